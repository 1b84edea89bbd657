//! CLI subcommand implementations.

pub mod alerts;
pub mod clear;
pub mod diaper;
pub mod feed;
pub mod init;
pub mod sleep;
pub mod status;
pub mod watch;
