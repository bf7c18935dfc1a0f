//! Connection descriptor resolution.
//!
//! The applier never guesses at credentials: it reads a pre-generated
//! descriptor file holding a PostgreSQL connection string (key/value
//! `host=… user=…` form or a `postgres://` URL) and fails immediately
//! if the file is absent.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("connection descriptor not found at {0}")]
    MissingDescriptor(PathBuf),
    #[error("connection descriptor {0} contains no connection string")]
    EmptyDescriptor(PathBuf),
    #[error("failed to read connection descriptor {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to connect to database")]
    Connect(#[source] tokio_postgres::Error),
}

/// A parsed connection descriptor file.
#[derive(Debug, Clone)]
pub struct ConnectionDescriptor {
    conn_string: String,
}

impl ConnectionDescriptor {
    /// Wrap a connection string obtained elsewhere (tests, embedding
    /// applications).
    pub fn from_conn_string(conn_string: impl Into<String>) -> Self {
        Self {
            conn_string: conn_string.into(),
        }
    }

    /// Load the descriptor from `path`.
    ///
    /// The first non-empty line that is not a `#` comment is taken as
    /// the connection string verbatim.
    pub fn load(path: &Path) -> Result<Self, ConnectError> {
        if !path.exists() {
            return Err(ConnectError::MissingDescriptor(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConnectError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).ok_or_else(|| ConnectError::EmptyDescriptor(path.to_path_buf()))
    }

    fn parse(contents: &str) -> Option<Self> {
        contents
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| Self {
                conn_string: line.to_string(),
            })
    }

    pub fn conn_string(&self) -> &str {
        &self.conn_string
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_usable_line() {
        let descriptor = ConnectionDescriptor::parse(
            "# local dev database\n\nhost=localhost user=huddle dbname=huddle\n",
        )
        .unwrap();
        assert_eq!(
            descriptor.conn_string(),
            "host=localhost user=huddle dbname=huddle"
        );
    }

    #[test]
    fn accepts_url_form() {
        let descriptor =
            ConnectionDescriptor::parse("postgres://huddle@localhost/huddle\n").unwrap();
        assert_eq!(descriptor.conn_string(), "postgres://huddle@localhost/huddle");
    }

    #[test]
    fn rejects_comment_only_file() {
        assert!(ConnectionDescriptor::parse("# nothing here\n\n").is_none());
    }

    #[test]
    fn missing_file_is_a_distinct_error() {
        let err = ConnectionDescriptor::load(Path::new("/nonexistent/connection.conf"))
            .unwrap_err();
        assert!(matches!(err, ConnectError::MissingDescriptor(_)));
    }
}
