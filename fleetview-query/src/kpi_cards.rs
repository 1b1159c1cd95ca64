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

//! KPI Cards
//!
//! Display-ready projection of [`Kpis`]: formatted value, trend arrow and
//! whether the trend is good news for that metric.

use crate::aggregates::Kpis;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// Zero counts as down
    pub fn of(trend: f64) -> Self {
        if trend > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "▲",
            TrendDirection::Down => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    /// Percent change vs. the previous period
    pub trend: f64,
    pub subtext: &'static str,
    pub direction: TrendDirection,
    /// Green when true, red otherwise
    pub favourable: bool,
}

impl KpiCard {
    /// `lower_is_better` flips which direction is favourable
    fn new(
        title: &'static str,
        value: String,
        trend: f64,
        subtext: &'static str,
        lower_is_better: bool,
    ) -> Self {
        let direction = TrendDirection::of(trend);
        let rising = direction == TrendDirection::Up;
        Self {
            title,
            value,
            trend,
            subtext,
            direction,
            favourable: rising != lower_is_better,
        }
    }

    /// Trend as shown beside the value, e.g. `▲ 8.4%`
    pub fn trend_text(&self) -> String {
        format!("{} {}%", self.direction.arrow(), self.trend.abs())
    }
}

impl fmt::Display for KpiCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.title, self.value, self.trend_text())
    }
}

/// The five cards of the KPI strip, left to right
pub fn kpi_cards(kpis: &Kpis) -> Vec<KpiCard> {
    vec![
        KpiCard::new(
            "Total Cost",
            format!("${:.1}K", kpis.total_cost as f64 / 1000.0),
            kpis.total_cost_trend,
            "vs. previous period",
            false,
        ),
        KpiCard::new(
            "Total Tokens",
            format!("{}M", kpis.total_tokens),
            kpis.total_tokens_trend,
            "input + output tokens",
            false,
        ),
        KpiCard::new(
            "Avg Latency",
            format!("{}ms", kpis.avg_latency),
            kpis.avg_latency_trend,
            "model + overhead",
            true,
        ),
        KpiCard::new(
            "Error Rate",
            format!("{}%", kpis.error_rate),
            kpis.error_rate_trend,
            "across all runtimes",
            true,
        ),
        KpiCard::new(
            "LLM Calls",
            format!("{:.2}M", kpis.llm_calls as f64 / 1_000_000.0),
            kpis.llm_calls_trend,
            "total inference requests",
            false,
        ),
    ]
}
