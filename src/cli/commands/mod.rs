//! Command implementations for mypa.
//!
//! Each handler takes the store it needs, runs one subcommand and returns
//! the rendered output.

mod completions;
mod focus;
mod plan;
mod task;

pub use completions::completions;
pub use focus::focus;
pub use plan::plan;
pub use task::task;
