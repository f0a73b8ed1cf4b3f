//! da_client
//!
//! HTTP front door that publishes an order snapshot to the Avail data-availability network
//! each time `/submit_data` is hit, plus a background status logger.

pub mod config;
pub mod server;
pub mod status;
