//! CLI command implementations.
//!
//! - **check**: run the docstring checks over a file or tree
//! - **rules**: list every diagnostic code with its rationale
//! - **init**: write a default configuration file

pub mod check;
pub mod init;
pub mod rules;

pub use check::{run_check, CheckConfig};
pub use init::init_config;
pub use rules::run_rules;
