//! Grants repository implementation

use crate::{
    GrantedPrivilege, Grantee, PrivilegeCatalog, Result, ShowGrantsParser, StatementBuilder,
    StatementExecutor,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of a grantee's current privileges
#[async_trait]
pub trait GrantsRepository: Send + Sync {
    /// Every privilege currently granted to `grantee`
    async fn current_grants(&self, grantee: &Grantee) -> Result<Vec<GrantedPrivilege>>;
}

/// Reads grants with `SHOW GRANTS FOR` and parses each reported row
pub struct MariaDbGrantsRepository {
    executor: Arc<dyn StatementExecutor>,
    parser: ShowGrantsParser,
    builder: StatementBuilder,
}

impl MariaDbGrantsRepository {
    pub fn new(executor: Arc<dyn StatementExecutor>, catalog: Arc<PrivilegeCatalog>) -> Self {
        Self {
            executor,
            parser: ShowGrantsParser::new(catalog),
            builder: StatementBuilder::new(),
        }
    }
}

#[async_trait]
impl GrantsRepository for MariaDbGrantsRepository {
    #[tracing::instrument(skip(self, grantee), fields(grantee = %grantee))]
    async fn current_grants(&self, grantee: &Grantee) -> Result<Vec<GrantedPrivilege>> {
        let sql = self.builder.show_grants(grantee);
        let rows = self.executor.fetch_rows(&sql).await?;

        let mut grants = Vec::new();
        for row in &rows {
            grants.extend(self.parser.parse_line(row)?);
        }

        tracing::debug!(rows = rows.len(), grants = grants.len(), "read current grants");
        Ok(grants)
    }
}
