//! In-process progress and memory reporting for long seeding runs.
//!
//! Nothing here touches storage; the console layer subscribes through the
//! tracker listener.

pub mod memory;
pub mod tracker;
