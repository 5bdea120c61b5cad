//! CLI command handlers, one file per command.

mod check;
mod gen;
mod probe;

pub use check::run_check;
pub use gen::run_gen;
pub use probe::run_probe;
