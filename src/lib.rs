pub mod candidates;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod sheet;
