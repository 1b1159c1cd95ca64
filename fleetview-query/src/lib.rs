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

//! Fleetview Query Engine
//!
//! Deterministic derivation of dashboard metrics from a filter selection.

pub mod aggregates;
pub mod engine;
pub mod inventory;
pub mod kpi_cards;
pub mod pagination;
pub mod rounding;
pub mod scale;
pub mod series;

pub use aggregates::{kpis, latency_breakdown, platform_distribution, Kpis, LatencyRow, PlatformShare};
pub use engine::{compute_dashboard_data, spike_label, DashboardData, DashboardEngine};
pub use inventory::{filter_agents, status_mismatches, StatusMismatch};
pub use kpi_cards::{kpi_cards, KpiCard, TrendDirection};
pub use pagination::{paginate, Page};
pub use scale::{aggregate_model_weight, mean_latency_factor, resolve_scale, PRO_CLASS_REFERENCE_WEIGHT};
pub use series::{error_alert, error_series, usage_series, ErrorAlert, ErrorRatePoint, UsagePoint};
