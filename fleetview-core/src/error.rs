// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for Fleetview

use thiserror::Error;

/// Result type for Fleetview operations
pub type Result<T> = std::result::Result<T, FleetviewError>;

/// Errors raised at the edges of the dashboard (parsing, config, registers).
///
/// The derivation engine itself never fails: every lookup is total over the
/// closed enumerations below.
#[derive(Debug, Error)]
pub enum FleetviewError {
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown runtime: {0}")]
    UnknownRuntime(String),

    #[error("Unknown time range: {0}")]
    UnknownTimeRange(String),

    #[error("Unknown pricing tier: {0}")]
    UnknownTier(String),

    #[error("Unknown feedback status: {0}")]
    UnknownFeedbackStatus(String),

    #[error("Invalid weight table: {0}")]
    InvalidWeightTable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors from the model pricing table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Pricing row not found: {0}")]
    NotFound(String),

    #[error("Cost per token must not be negative")]
    NegativeRate,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors from the feedback log
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedbackError {
    #[error("Feedback text is empty")]
    EmptyText,

    #[error("Feedback entry not found: {0}")]
    NotFound(String),
}
