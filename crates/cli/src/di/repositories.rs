use rulefeed_infrastructure::repositories::{SqliteChangeLogRepository, SqliteRuleListRepository};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub rule_lists: Arc<SqliteRuleListRepository>,
    pub change_logs: Arc<SqliteChangeLogRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            rule_lists: Arc::new(SqliteRuleListRepository::new(pool.clone())),
            change_logs: Arc::new(SqliteChangeLogRepository::new(pool)),
        }
    }
}
