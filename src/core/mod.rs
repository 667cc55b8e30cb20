//! Policy evaluation core
//!
//! Everything here is synchronous and free of I/O apart from reading the
//! configuration file.

pub mod config;
pub mod error;
pub mod iam;
