//! Background Tasks Module
//!
//! Optional periodic maintenance. Lazy expiration already guarantees
//! correctness; nothing here is required for it.

mod sweeper;

pub use sweeper::spawn_sweeper_task;
