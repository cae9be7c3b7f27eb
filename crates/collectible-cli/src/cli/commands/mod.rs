//! CLI command handlers, one file per command.

mod catalog;
mod docs;
mod download;
mod tally;

pub use catalog::run_catalog;
pub use docs::{run_completions, run_man};
pub use download::run_download;
pub use tally::run_tally;
