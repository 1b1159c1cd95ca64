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

//! Fleetview Core
//!
//! Domain types shared by the dashboard: filter dimensions and selections,
//! the agent catalog, the static weight tables, configuration, and the
//! independent pricing and feedback registers.

pub mod catalog;
pub mod config;
pub mod dimension;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod pricing;
pub mod selection;
pub mod weights;

pub use catalog::{standard_catalog, AgentRow, AgentStatus, StatusThresholds};
pub use config::{DashboardConfig, DEFAULT_ERROR_ALERT_THRESHOLD, DEFAULT_PAGE_SIZE};
pub use dimension::{Environment, ModelName, Runtime, TimeRange};
pub use error::{FeedbackError, FleetviewError, PricingError, Result};
pub use feedback::{FeedbackEntry, FeedbackLog, FeedbackStatus};
pub use filter::FilterState;
pub use pricing::{NewPricingRow, PricingRow, PricingTable, PricingTier};
pub use selection::{Dimension, FilterSelection, Selection};
pub use weights::WeightTables;
