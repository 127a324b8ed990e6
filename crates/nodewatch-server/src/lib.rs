//! Nodewatch server
//!
//! Configuration, logging, the health endpoint, and the process wiring around
//! the liveness monitor.

pub mod api;
pub mod model;
pub mod startup;
