mod get_change_log;
mod record_diff;

pub use get_change_log::GetChangeLogUseCase;
pub use record_diff::RecordDiffUseCase;
