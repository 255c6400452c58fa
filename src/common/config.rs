use tracing::Level;

use crate::common::TABLE_NAME_DEFAULT;

const LOG_LEVEL_DEFAULT: Level = Level::INFO;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("TABLE_NAME").ok(),
            std::env::var("LOG_LEVEL").ok(),
        )
    }

    fn from_vars(table_name: Option<String>, log_level: Option<String>) -> Self {
        let table_name = table_name
            .filter(|name| !name.is_empty())
            .unwrap_or(TABLE_NAME_DEFAULT.into());
        let log_level = log_level
            .and_then(|level| level.parse().ok())
            .unwrap_or(LOG_LEVEL_DEFAULT);

        Self {
            table_name,
            log_level,
        }
    }
}
