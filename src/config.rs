// Runtime configuration: admin credentials and the initial catalog

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{default_trains, Train, TrainSpec, MAX_COACH_SEATS, MAX_SEATS};
use crate::state::AppState;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub admin: AdminCredentials,
    pub seats_per_coach: usize,
    // Replaces the seeded catalog when present
    pub trains: Option<Vec<TrainSpec>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin: AdminCredentials::default(),
            seats_per_coach: MAX_SEATS,
            trains: None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "railway_reservation", about = "Console railway ticket reservation simulator")]
pub struct CliArgs {
    /// JSON file with admin credentials and an optional train catalog
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overrides the configured admin username
    #[arg(long)]
    pub admin_user: Option<String>,

    /// Overrides the configured admin password
    #[arg(long)]
    pub admin_password: Option<String>,

    /// Log filter used when RUST_LOG is not set (e.g. "info", "railway_reservation=debug")
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(username) = &args.admin_user {
            config.admin.username = username.clone();
        }
        if let Some(password) = &args.admin_password {
            config.admin.password = password.clone();
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seats_per_coach == 0 || self.seats_per_coach > MAX_COACH_SEATS {
            return Err(ConfigError::Invalid(format!(
                "seats_per_coach must be between 1 and {}",
                MAX_COACH_SEATS
            )));
        }

        let Some(trains) = &self.trains else {
            return Ok(());
        };
        for (i, train) in trains.iter().enumerate() {
            if train.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("train #{} has no name", i + 1)));
            }
            if trains[..i].iter().any(|t| t.name == train.name) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate train name '{}'",
                    train.name
                )));
            }
            for (j, coach) in train.coaches.iter().enumerate() {
                if coach.name.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "coach #{} of '{}' has no name",
                        j + 1,
                        train.name
                    )));
                }
                if coach.seats == 0 || coach.seats > MAX_COACH_SEATS {
                    return Err(ConfigError::Invalid(format!(
                        "coach '{}' of '{}' must have between 1 and {} seats",
                        coach.name, train.name, MAX_COACH_SEATS
                    )));
                }
                if train.coaches[..j].iter().any(|c| c.name == coach.name) {
                    return Err(ConfigError::Invalid(format!(
                        "duplicate coach '{}' on '{}'",
                        coach.name, train.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn initial_trains(&self) -> Vec<Train> {
        match &self.trains {
            Some(trains) => trains.iter().map(Train::from).collect(),
            None => default_trains(self.seats_per_coach),
        }
    }

    pub fn initial_state(&self) -> AppState {
        AppState::with_trains(self.initial_trains())
    }
}
