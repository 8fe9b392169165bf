//! Rulefeed Domain Layer
pub mod changelog;
pub mod config;
pub mod diff_record;
pub mod errors;
pub mod rule;
pub mod rule_list;

pub use changelog::{classify, AdjustEvent, ChangeLogEntry, RuleEvent};
pub use config::{CliOverrides, Config, ConfigError};
pub use diff_record::DiffRecord;
pub use errors::DomainError;
pub use rule::{sample_url, EXCEPTION_MARKER};
pub use rule_list::RuleList;
