//! Data types for the events aggregation server
//!
//! This module contains the event value type and the error taxonomy.

mod error;
mod event;

pub use error::{EventsError, EventsResult};
pub use event::Event;
