//! Log streaming for plans, applies and policy checks

mod messages;
mod reader;

pub use messages::{extract_log_message, human_readable_log};
pub use reader::LogReader;
