//! Utility functions and helpers
//!
//! This module contains date-time parsing helpers shared by the loader and
//! the HTTP layer.

pub mod time;

pub use time::{format_local_datetime, parse_local_datetime};
