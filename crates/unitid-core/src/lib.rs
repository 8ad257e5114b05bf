//! Shared configuration, error and logging support for the `unitid` workspace.

pub mod config;
pub mod error;
pub mod logging;
