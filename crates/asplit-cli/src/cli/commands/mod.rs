//! CLI command handlers.

mod completions;
mod split;

pub use completions::{print_completions, print_man_page};
pub use split::run_split_command;
#[cfg(test)]
pub(crate) use split::split_options;
