//! Infant care tracker CLI library.
//!
//! This crate wires the care engine to storage and the terminal.

mod cli;
pub mod commands;
mod config;
mod notify;
mod service;

pub use cli::{Cli, Commands, FeedAction, SleepAction};
pub use config::Config;
pub use notify::LogDelivery;
pub use service::CareService;
