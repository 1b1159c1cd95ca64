// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Dashboard configuration
//!
//! Layered as defaults → optional TOML file → environment variables:
//! - `FLEETVIEW_ENVIRONMENT`, `FLEETVIEW_TIME_RANGE`: initial filters
//! - `FLEETVIEW_PAGE_SIZE`: inventory page size
//! - `FLEETVIEW_LOG`: log filter directive
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`, `OTEL_SERVICE_NAME`: telemetry export

use crate::catalog::StatusThresholds;
use crate::dimension::{Environment, TimeRange};
use crate::error::{FleetviewError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of inventory rows per page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Error rate (percent) above which the error chart raises an alert
pub const DEFAULT_ERROR_ALERT_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Environment selected when the dashboard opens
    pub default_environment: Environment,
    /// Time range selected when the dashboard opens
    pub default_time_range: TimeRange,
    /// Inventory rows per page
    pub page_size: usize,
    /// Error-rate bands for inventory rows
    pub status_thresholds: StatusThresholds,
    /// Peak error rate that raises the error chart alert
    pub error_alert_threshold: f64,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_level: String,
    /// OTLP collector endpoint; telemetry stays local when unset
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_environment: Environment::Prod,
            default_time_range: TimeRange::LastDay,
            page_size: DEFAULT_PAGE_SIZE,
            status_thresholds: StatusThresholds::default(),
            error_alert_threshold: DEFAULT_ERROR_ALERT_THRESHOLD,
            log_level: "info".to_string(),
            otlp_endpoint: None,
            service_name: "fleetview".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then `path` if given, then process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("FLEETVIEW_ENVIRONMENT") {
            self.default_environment = Environment::parse(&env)?;
        }
        if let Some(range) = lookup("FLEETVIEW_TIME_RANGE") {
            self.default_time_range = TimeRange::parse(&range)?;
        }
        if let Some(size) = lookup("FLEETVIEW_PAGE_SIZE") {
            self.page_size = size.trim().parse().map_err(|_| {
                FleetviewError::Config(format!("FLEETVIEW_PAGE_SIZE is not a number: {}", size))
            })?;
        }
        if let Some(level) = lookup("FLEETVIEW_LOG") {
            self.log_level = level;
        }
        if let Some(endpoint) = lookup("OTEL_EXPORTER_OTLP_ENDPOINT") {
            self.otlp_endpoint = Some(endpoint).filter(|e| !e.is_empty());
        }
        if let Some(name) = lookup("OTEL_SERVICE_NAME") {
            self.service_name = name;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(FleetviewError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        let thresholds = &self.status_thresholds;
        if thresholds.warning >= thresholds.critical {
            return Err(FleetviewError::Config(format!(
                "warning threshold {} must be below critical threshold {}",
                thresholds.warning, thresholds.critical
            )));
        }
        if !self.error_alert_threshold.is_finite() || self.error_alert_threshold < 0.0 {
            return Err(FleetviewError::Config(
                "error_alert_threshold must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
