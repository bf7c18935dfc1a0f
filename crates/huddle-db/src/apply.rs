//! Sequential statement runner.
//!
//! Statements run one at a time in payload order. The first failure
//! aborts the whole run; there is no retry and no rollback
//! orchestration (each statement rides the client's default
//! autocommit behavior).

use thiserror::Error;
use tokio_postgres::Client;
use tracing::{debug, info};

use crate::schema;

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("existence check for '{name}' failed")]
    Guard {
        name: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },
    #[error("statement '{name}' failed")]
    Execute {
        name: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub executed: usize,
    pub skipped: usize,
}

/// Apply the full schema payload, fail-fast.
pub async fn run(client: &Client) -> Result<Applied, ApplyError> {
    let mut executed = 0;
    let mut skipped = 0;

    for stmt in schema::statements() {
        if let Some(guard) = stmt.guard {
            let rows = client
                .query(guard, &[])
                .await
                .map_err(|source| ApplyError::Guard { name: stmt.name, source })?;
            if !rows.is_empty() {
                debug!(statement = stmt.name, "already present, skipping");
                skipped += 1;
                continue;
            }
        }

        client
            .batch_execute(stmt.sql)
            .await
            .map_err(|source| ApplyError::Execute { name: stmt.name, source })?;
        debug!(statement = stmt.name, "applied");
        executed += 1;
    }

    info!(executed, skipped, "schema apply complete");
    Ok(Applied { executed, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_triggers_take_the_guard_path() {
        let guarded: Vec<_> = schema::statements()
            .iter()
            .filter(|s| s.guard.is_some())
            .map(|s| s.name)
            .collect();
        assert_eq!(
            guarded,
            vec!["trigger users updated_at", "trigger huddles updated_at"]
        );
    }
}
