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

//! Dashboard engine for Fleetview
//!
//! Combines the scale resolver, series generators, aggregate calculators and
//! inventory filter into one bundle per filter selection.

use crate::aggregates::{kpis, latency_breakdown, platform_distribution, Kpis, LatencyRow, PlatformShare};
use crate::inventory::filter_agents;
use crate::scale::resolve_scale;
use crate::series::{error_alert, error_series, usage_series, ErrorAlert, ErrorRatePoint, UsagePoint};
use fleetview_core::{
    standard_catalog, AgentRow, Environment, FilterSelection, ModelName, Result, Runtime,
    Selection, TimeRange, WeightTables,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Everything the dashboard renders for one filter selection
///
/// Built fresh on every call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub kpis: Kpis,
    pub usage_series: Vec<UsagePoint>,
    pub error_series: Vec<ErrorRatePoint>,
    pub latency_by_platform: Vec<LatencyRow>,
    pub platform_distribution: Vec<PlatformShare>,
    /// Filtered inventory in catalog order
    pub agents: Vec<AgentRow>,
    /// Label of the injected spike point
    pub spike_label: String,
}

impl DashboardData {
    /// Peak of the error series when it crosses `threshold`
    pub fn error_alert(&self, threshold: f64) -> Option<ErrorAlert> {
        error_alert(&self.error_series, threshold)
    }
}

/// Label at the spike index, or the last label when the index is out of range
pub fn spike_label(tables: &WeightTables, time_range: TimeRange) -> String {
    let labels = tables.labels(time_range);
    let index = tables.spike_index(time_range);
    match labels.get(index) {
        Some(label) => label.to_string(),
        None => {
            warn!(
                time_range = %time_range,
                index,
                labels = labels.len(),
                "spike index out of range, using last label"
            );
            labels.last().map(|l| l.to_string()).unwrap_or_default()
        }
    }
}

/// Stateless metrics engine over borrowed weight tables and catalog
#[derive(Debug, Clone, Copy)]
pub struct DashboardEngine<'a> {
    tables: &'a WeightTables,
    catalog: &'a [AgentRow],
}

impl DashboardEngine<'static> {
    /// Engine over the built-in tables and catalog
    pub fn standard() -> Self {
        Self {
            tables: WeightTables::standard(),
            catalog: standard_catalog(),
        }
    }
}

impl<'a> DashboardEngine<'a> {
    pub fn new(tables: &'a WeightTables, catalog: &'a [AgentRow]) -> Self {
        debug_assert!(tables.validate().is_ok(), "weight tables failed validation");
        Self { tables, catalog }
    }

    /// Like [`DashboardEngine::new`] but reports invalid tables as an error
    pub fn try_new(tables: &'a WeightTables, catalog: &'a [AgentRow]) -> Result<Self> {
        tables.validate()?;
        Ok(Self { tables, catalog })
    }

    pub fn tables(&self) -> &'a WeightTables {
        self.tables
    }

    pub fn catalog(&self) -> &'a [AgentRow] {
        self.catalog
    }

    /// Compute the full bundle for a selection
    pub fn compute_dashboard_data(&self, selection: &FilterSelection) -> DashboardData {
        let FilterSelection {
            environment,
            models,
            platforms,
            time_range,
        } = selection;
        let (environment, time_range) = (*environment, *time_range);

        let data = DashboardData {
            kpis: kpis(self.tables, environment, models, time_range),
            usage_series: usage_series(self.tables, environment, models, time_range),
            error_series: error_series(self.tables, environment, models, time_range),
            latency_by_platform: latency_breakdown(self.tables, models, platforms),
            platform_distribution: platform_distribution(self.tables, environment, platforms),
            agents: filter_agents(self.catalog, environment, models, platforms),
            spike_label: spike_label(self.tables, time_range),
        };

        debug!(
            environment = %environment,
            time_range = %time_range,
            models = %models.display_text("All"),
            platforms = %platforms.display_text("All"),
            scale = resolve_scale(self.tables, environment, models, time_range),
            agents = data.agents.len(),
            "computed dashboard data"
        );
        data
    }
}

/// Compute the bundle with the built-in tables and catalog
pub fn compute_dashboard_data(
    environment: Environment,
    models: Selection<ModelName>,
    platforms: Selection<Runtime>,
    time_range: TimeRange,
) -> DashboardData {
    let selection = FilterSelection::new(environment, models, platforms, time_range);
    DashboardEngine::standard().compute_dashboard_data(&selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_bundle() {
        let data = DashboardEngine::standard().compute_dashboard_data(&FilterSelection::default());
        assert_eq!(data.usage_series.len(), 12);
        assert_eq!(data.error_series.len(), 12);
        assert_eq!(data.latency_by_platform.len(), 2);
        assert_eq!(data.platform_distribution.len(), 2);
        assert_eq!(data.spike_label, "14:00");
        // Prod agents: 1 2 3 5 6 9 10 12
        assert_eq!(data.agents.len(), 8);
        assert!(data.error_alert(3.0).is_some());
    }

    #[test]
    fn test_free_function_matches_engine() {
        let models = Selection::only([ModelName::Gemini31Flash]);
        let a = compute_dashboard_data(
            Environment::Qa,
            models.clone(),
            Selection::All,
            TimeRange::LastWeek,
        );
        let b = DashboardEngine::standard().compute_dashboard_data(&FilterSelection::new(
            Environment::Qa,
            models,
            Selection::All,
            TimeRange::LastWeek,
        ));
        assert_eq!(a, b);
        assert_eq!(a.spike_label, "Fri");
    }

    #[test]
    fn test_spike_label_falls_back_to_last() {
        let tables = WeightTables::standard()
            .clone()
            .with_spike_index(TimeRange::LastDay, 40);
        assert_eq!(spike_label(&tables, TimeRange::LastDay), "22:00");
        assert_eq!(spike_label(&tables, TimeRange::LastHour), "40m");
    }

    #[test]
    fn test_try_new_rejects_invalid_tables() {
        let tables = WeightTables::standard()
            .clone()
            .with_spike_index(TimeRange::Custom, 6);
        assert!(DashboardEngine::try_new(&tables, standard_catalog()).is_err());
        assert!(DashboardEngine::try_new(WeightTables::standard(), standard_catalog()).is_ok());
    }

    #[test]
    fn test_bundle_serializes_camel_case() {
        let data = DashboardEngine::standard().compute_dashboard_data(&FilterSelection::default());
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("usageSeries").is_some());
        assert!(json.get("latencyByPlatform").is_some());
        assert_eq!(json["spikeLabel"], "14:00");
        assert_eq!(json["kpis"]["totalCost"], 127_840);
        assert_eq!(json["agents"][0]["agentName"], "content-synthesis-agent");

        let back: DashboardData = serde_json::from_value(json).unwrap();
        assert_eq!(back.agents, data.agents);
        assert_eq!(back.spike_label, data.spike_label);
    }
}
