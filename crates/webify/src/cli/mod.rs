//! Command handlers for the `webify` binary.

pub mod config;
pub mod convert;
