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

//! Aggregate Calculators
//!
//! Summary numbers for the KPI strip, the per-platform latency breakdown and
//! the runtime distribution panel.
//!
//! Trend values are fixed lookups keyed on environment or time range. They are
//! presentation constants and are never derived from the series.

use crate::rounding::{round1, round_whole};
use crate::scale::{mean_latency_factor, resolve_scale};
use fleetview_core::{Environment, ModelName, Runtime, Selection, TimeRange, WeightTables};
use serde::{Deserialize, Serialize};

const BASE_TOTAL_COST: f64 = 127_840.0;
const BASE_TOTAL_TOKENS_M: f64 = 142.6;
const BASE_AVG_LATENCY_MS: f64 = 381.0;
const BASE_ERROR_RATE: f64 = 2.1;
const BASE_LLM_CALLS: f64 = 2_480_000.0;
const TOKENS_TREND: f64 = 9.5;

/// Headline numbers with their period-over-period trend (percent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    /// Dollars
    pub total_cost: u64,
    pub total_cost_trend: f64,
    /// Millions of tokens
    pub total_tokens: f64,
    pub total_tokens_trend: f64,
    /// Milliseconds
    pub avg_latency: u64,
    pub avg_latency_trend: f64,
    /// Percent
    pub error_rate: f64,
    pub error_rate_trend: f64,
    pub llm_calls: u64,
    pub llm_calls_trend: f64,
}

fn cost_trend(environment: Environment) -> f64 {
    match environment {
        Environment::Prod => 8.4,
        Environment::Qa => 4.2,
        Environment::Dev => 1.8,
    }
}

fn latency_trend(time_range: TimeRange) -> f64 {
    match time_range {
        TimeRange::LastWeek => -5.1,
        TimeRange::LastHour => 1.2,
        _ => -3.2,
    }
}

fn error_dampening(environment: Environment) -> f64 {
    match environment {
        Environment::Dev => 0.4,
        Environment::Qa => 0.7,
        Environment::Prod => 1.0,
    }
}

fn error_trend(environment: Environment) -> f64 {
    if environment == Environment::Prod {
        0.4
    } else {
        -0.3
    }
}

fn calls_trend(time_range: TimeRange) -> f64 {
    match time_range {
        TimeRange::LastWeek => 22.3,
        TimeRange::LastHour => 3.1,
        _ => 15.7,
    }
}

/// Compute the KPI snapshot for a selection
pub fn kpis(
    tables: &WeightTables,
    environment: Environment,
    models: &Selection<ModelName>,
    time_range: TimeRange,
) -> Kpis {
    let scale = resolve_scale(tables, environment, models, time_range);
    Kpis {
        total_cost: round_whole(BASE_TOTAL_COST * scale),
        total_cost_trend: cost_trend(environment),
        total_tokens: round1(BASE_TOTAL_TOKENS_M * scale),
        total_tokens_trend: TOKENS_TREND,
        avg_latency: round_whole(BASE_AVG_LATENCY_MS * mean_latency_factor(tables, models)),
        avg_latency_trend: latency_trend(time_range),
        error_rate: round1(BASE_ERROR_RATE * error_dampening(environment)),
        error_rate_trend: error_trend(environment),
        llm_calls: round_whole(BASE_LLM_CALLS * scale),
        llm_calls_trend: calls_trend(time_range),
    }
}

/// Model-side and end-to-end latency percentiles for one platform (ms)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyRow {
    #[serde(rename = "label")]
    pub platform: Runtime,
    #[serde(rename = "modelLatency_p50")]
    pub model_latency_p50: u64,
    #[serde(rename = "modelLatency_p95")]
    pub model_latency_p95: u64,
    #[serde(rename = "totalLatency_p50")]
    pub total_latency_p50: u64,
    #[serde(rename = "totalLatency_p95")]
    pub total_latency_p95: u64,
}

/// One row per effective platform, in catalog platform order
pub fn latency_breakdown(
    tables: &WeightTables,
    models: &Selection<ModelName>,
    platforms: &Selection<Runtime>,
) -> Vec<LatencyRow> {
    let model_factor = mean_latency_factor(tables, models);
    platforms
        .effective()
        .into_iter()
        .map(|platform| {
            let f = model_factor * tables.platform_latency_factor(platform);
            LatencyRow {
                platform,
                model_latency_p50: round_whole(312.0 * f),
                model_latency_p95: round_whole(540.0 * f),
                total_latency_p50: round_whole(481.0 * f),
                total_latency_p95: round_whole(830.0 * f),
            }
        })
        .collect()
}

/// Call volume of one platform and its share of the selected platforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformShare {
    pub runtime: Runtime,
    pub count: u64,
    pub percentage: f64,
}

impl PlatformShare {
    /// Bar width relative to the largest row, in percent
    pub fn relative_width(&self, max_count: u64) -> f64 {
        if max_count == 0 {
            return 0.0;
        }
        self.count as f64 / max_count as f64 * 100.0
    }
}

/// Runtime distribution over the effective platforms.
///
/// Percentages are taken over the selected subtotal so a narrowed selection
/// still sums to roughly 100.
pub fn platform_distribution(
    tables: &WeightTables,
    environment: Environment,
    platforms: &Selection<Runtime>,
) -> Vec<PlatformShare> {
    let counts: Vec<(Runtime, u64)> = platforms
        .effective()
        .into_iter()
        .map(|runtime| {
            let base = tables.platform_base_volume(runtime) as f64;
            let factor = tables.platform_adjustment(environment, runtime);
            (runtime, round_whole(base * factor))
        })
        .collect();

    let total: u64 = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return counts
            .into_iter()
            .map(|(runtime, count)| PlatformShare {
                runtime,
                count,
                percentage: 0.0,
            })
            .collect();
    }

    counts
        .into_iter()
        .map(|(runtime, count)| PlatformShare {
            runtime,
            count,
            percentage: round1(count as f64 / total as f64 * 100.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static WeightTables {
        WeightTables::standard()
    }

    #[test]
    fn test_prod_day_kpis() {
        let k = kpis(tables(), Environment::Prod, &Selection::All, TimeRange::LastDay);
        assert_eq!(k.total_cost, 127_840);
        assert_eq!(k.total_cost_trend, 8.4);
        assert_eq!(k.total_tokens, 142.6);
        assert_eq!(k.total_tokens_trend, 9.5);
        assert_eq!(k.avg_latency, 381);
        assert_eq!(k.avg_latency_trend, -3.2);
        assert_eq!(k.error_rate, 2.1);
        assert_eq!(k.error_rate_trend, 0.4);
        assert_eq!(k.llm_calls, 2_480_000);
        assert_eq!(k.llm_calls_trend, 15.7);
    }

    #[test]
    fn test_trend_lookups() {
        let week = kpis(tables(), Environment::Qa, &Selection::All, TimeRange::LastWeek);
        assert_eq!(week.avg_latency_trend, -5.1);
        assert_eq!(week.llm_calls_trend, 22.3);
        assert_eq!(week.total_cost_trend, 4.2);
        assert_eq!(week.error_rate_trend, -0.3);
        assert_eq!(week.error_rate, 1.5);

        let hour = kpis(tables(), Environment::Dev, &Selection::All, TimeRange::LastHour);
        assert_eq!(hour.avg_latency_trend, 1.2);
        assert_eq!(hour.llm_calls_trend, 3.1);
        assert_eq!(hour.total_cost_trend, 1.8);
        assert_eq!(hour.error_rate, 0.8);
        // 127840 * 0.0108
        assert_eq!(hour.total_cost, 1381);
    }

    #[test]
    fn test_latency_breakdown() {
        let rows = latency_breakdown(tables(), &Selection::All, &Selection::All);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].platform, Runtime::AgentEngine);
        assert_eq!(rows[0].model_latency_p50, 312);
        assert_eq!(rows[0].model_latency_p95, 540);
        assert_eq!(rows[0].total_latency_p50, 481);
        assert_eq!(rows[0].total_latency_p95, 830);
        assert_eq!(rows[1].platform, Runtime::Gke);
        // 312 * 0.92 = 287.04
        assert_eq!(rows[1].model_latency_p50, 287);
        assert_eq!(rows[1].total_latency_p95, 764);

        let gke_only = latency_breakdown(tables(), &Selection::All, &Selection::only([Runtime::Gke]));
        assert_eq!(gke_only.len(), 1);
        assert!(latency_breakdown(tables(), &Selection::All, &Selection::only(Vec::new())).is_empty());
    }

    #[test]
    fn test_latency_row_serializes_chart_keys() {
        let rows = latency_breakdown(tables(), &Selection::All, &Selection::only([Runtime::Gke]));
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["label"], "GKE");
        assert_eq!(json["modelLatency_p50"], 287);
        assert!(json.get("totalLatency_p95").is_some());
    }

    #[test]
    fn test_distribution_prod() {
        let shares = platform_distribution(tables(), Environment::Prod, &Selection::All);
        assert_eq!(shares.len(), 2);
        // 48420 * 1.2
        assert_eq!(shares[0].count, 58_104);
        assert_eq!(shares[1].count, 31_150);
        assert_eq!(shares[0].percentage, 65.1);
        assert_eq!(shares[1].percentage, 34.9);
    }

    #[test]
    fn test_distribution_single_platform_is_full_share() {
        for env in Environment::ALL {
            let shares = platform_distribution(tables(), env, &Selection::only([Runtime::Gke]));
            assert_eq!(shares.len(), 1);
            assert_eq!(shares[0].percentage, 100.0);
        }
    }

    #[test]
    fn test_relative_width() {
        let shares = platform_distribution(tables(), Environment::Dev, &Selection::All);
        let max = shares.iter().map(|s| s.count).max().unwrap();
        let widest = shares.iter().map(|s| s.relative_width(max)).fold(0.0, f64::max);
        assert_eq!(widest, 100.0);
        assert_eq!(shares[0].relative_width(0), 0.0);
    }
}
