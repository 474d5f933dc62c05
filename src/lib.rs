// Main library file for the railway reservation simulator

pub mod admin;
pub mod catalog;
pub mod config;
pub mod logger;
pub mod menu;
pub mod reservation;
pub mod state;
pub mod transaction_log;

// Re-export key types for convenience
pub use admin::{AdminError, NewTrain, RevenueReport};
pub use catalog::{Coach, Train};
pub use config::{AppConfig, CliArgs, ConfigError};
pub use menu::{Console, Menu};
pub use reservation::{BookingRequest, Passenger, ReservationError};
pub use state::AppState;
pub use transaction_log::TransactionLog;
