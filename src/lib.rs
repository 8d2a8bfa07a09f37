pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod state;
pub mod store;
pub mod templates;
pub mod views;

// Domain data shapes shared across layers
pub mod domain;
