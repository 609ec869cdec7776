//! CLI subcommand implementations.

pub mod check_call;
pub mod classify;
pub mod init;
pub mod path;
pub mod reset;
