//! Gateway surface - the two operations exposed to transports
//!
//! Classification always happens on the calling task before any blocking work
//! is scheduled, so a rejected query never opens a connection. Blocking
//! SQLite work runs under `spawn_blocking`; the connection lives and dies
//! inside that closure, which still runs to completion and drops the
//! connection if the awaiting request is cancelled.

use std::sync::Arc;

use crate::classifier;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::executor::{self, RowSet};
use crate::schema::{self, SchemaDocument};

/// Read-only query gateway over a single SQLite database
#[derive(Debug, Clone)]
pub struct SqlGateway {
    config: Arc<GatewayConfig>,
}

impl SqlGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Classify, then run an admitted query under the row cap
    pub async fn execute_readonly_query(&self, query: &str) -> Result<RowSet, GatewayError> {
        if let Err(rejection) = classifier::classify(query).into_result() {
            tracing::warn!(reason = %rejection, "Query rejected");
            return Err(rejection.into());
        }
        tracing::debug!("Query admitted");

        let config = Arc::clone(&self.config);
        let sql = query.to_string();
        let rows = tokio::task::spawn_blocking(move || {
            executor::run_query(&config.database, &sql, config.limits.max_return_rows)
        })
        .await
        .map_err(|e| GatewayError::Execution(format!("query worker failed: {}", e)))??;

        tracing::info!(
            rows = rows.row_count,
            truncated = rows.truncated,
            "Query executed"
        );
        Ok(rows)
    }

    /// Re-derive the schema document from the current catalog
    pub async fn get_schema_document(&self) -> Result<SchemaDocument, GatewayError> {
        let config = Arc::clone(&self.config);
        let doc = tokio::task::spawn_blocking(move || {
            schema::load_schema(&config.database, &config.schema)
        })
        .await
        .map_err(|e| GatewayError::Introspection(format!("schema worker failed: {}", e)))??;

        tracing::info!(tables = doc.tables.len(), "Schema introspected");
        Ok(doc)
    }

    /// Schema document rendered as markdown
    pub async fn schema_markdown(&self) -> Result<String, GatewayError> {
        Ok(self.get_schema_document().await?.to_markdown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rejection;

    #[tokio::test]
    async fn test_rejected_query_never_reaches_executor() {
        // no database exists here, so reaching the executor would fail differently
        let dir = tempfile::tempdir().unwrap();
        let gateway = SqlGateway::new(GatewayConfig::with_database(dir.path().join("none.db")))
            .unwrap();

        let err = gateway
            .execute_readonly_query("DROP TABLE students")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(Rejection::NotReadOnly)));

        let err = gateway
            .execute_readonly_query("SELECT 1; DELETE FROM students")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(Rejection::ForbiddenOperation(_))));

        let err = gateway.execute_readonly_query("SELECT 1").await.unwrap_err();
        assert!(matches!(err, GatewayError::Execution(_)));
    }

    #[tokio::test]
    async fn test_zero_cap_config_rejected() {
        let mut config = GatewayConfig::default();
        config.limits.max_return_rows = 0;
        assert!(SqlGateway::new(config).is_err());
    }

    #[tokio::test]
    async fn test_schema_on_missing_database_is_introspection_error() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = SqlGateway::new(GatewayConfig::with_database(dir.path().join("none.db")))
            .unwrap();

        let err = gateway.get_schema_document().await.unwrap_err();
        assert!(matches!(err, GatewayError::Introspection(_)));
    }
}
