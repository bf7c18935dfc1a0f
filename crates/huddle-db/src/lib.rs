pub mod apply;
pub mod connect;
pub mod models;
pub mod schema;

use tokio_postgres::{Client, NoTls};
use tracing::info;

pub use apply::{Applied, ApplyError};
pub use connect::{ConnectError, ConnectionDescriptor};

pub struct Database {
    client: Client,
}

impl Database {
    /// Connect using a loaded descriptor. The connection driver runs on
    /// a background task for the life of the client.
    pub async fn connect(descriptor: &ConnectionDescriptor) -> Result<Self, ConnectError> {
        let (client, connection) = tokio_postgres::connect(descriptor.conn_string(), NoTls)
            .await
            .map_err(ConnectError::Connect)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("database connection error: {e}");
            }
        });

        info!("Connected to database");
        Ok(Self { client })
    }

    /// Apply the full schema payload. Safe to call repeatedly.
    pub async fn apply_schema(&self) -> Result<Applied, ApplyError> {
        apply::run(&self.client).await
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
