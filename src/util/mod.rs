mod format;
mod path;

pub use format::{current_timestamp, format_datetime};
pub use path::SourceFilter;
