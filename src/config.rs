use std::env;

use thiserror::Error;

use crate::grid::{GridError, GridStore};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Invalid grid configuration: {0}")]
    Grid(#[from] GridError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub cities: Vec<String>,
    pub start_year: i32,
    pub end_year: i32,
    pub seed_sample_data: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            cities: parse_cities(
                &env::var("GRID_CITIES").unwrap_or_else(|_| "Delhi,Mumbai,Chennai".to_string()),
            ),
            start_year: year_var("GRID_START_YEAR", 2022)?,
            end_year: year_var("GRID_END_YEAR", 2024)?,
            seed_sample_data: bool_var("SEED_SAMPLE_DATA", true)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Allocate the configured grid, seeded with the sample records if enabled
    pub fn build_grid(&self) -> Result<GridStore, ConfigError> {
        let mut grid = GridStore::new(self.cities.as_slice(), self.start_year, self.end_year)?;
        if self.seed_sample_data {
            grid.populate_sample_data();
        }
        Ok(grid)
    }
}

/// Split a comma-separated city list, dropping blank entries
pub fn parse_cities(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

fn year_var(name: &'static str, default: i32) -> Result<i32, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

fn bool_var(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { name, value }),
        },
        Err(_) => Ok(default),
    }
}
