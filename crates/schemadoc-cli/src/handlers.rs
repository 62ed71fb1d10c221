//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; shared file and parsing
//! helpers are in `utils`.

mod completions;
mod config;
mod dual;
mod generate;
mod inspect;
mod utils;
mod viewer;

pub use completions::handle_completions;
pub use config::handle_config;
pub use dual::handle_dual;
pub use generate::handle_generate;
pub use inspect::handle_inspect;
pub use viewer::handle_viewer;
