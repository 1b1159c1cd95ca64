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

//! Series Generators
//!
//! Time-indexed token/cost and error-rate sequences. One point per label of
//! the time range; a periodic shaping curve sets the baseline and a single
//! spike is injected at the range's spike index.

use crate::rounding::round2;
use crate::scale::{mean_over, resolve_scale};
use fleetview_core::{Environment, ModelName, Selection, TimeRange, WeightTables};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Input tokens (millions) at scale 1 and the top of the curve
const BASE_INPUT_TOKENS: f64 = 3.5;
const OUTPUT_TO_INPUT_RATIO: f64 = 0.62;
/// Cost per million total tokens
const COST_PER_TOKEN_UNIT: f64 = 2.1;
const USAGE_SPIKE_MULTIPLIER: f64 = 1.6;
const ERROR_SPIKE_MULTIPLIER: f64 = 2.2;

/// One point of the token/cost chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePoint {
    pub label: String,
    pub input_tokens: f64,
    pub output_tokens: f64,
    pub total_tokens: f64,
    pub cost: f64,
}

/// One point of the error-rate chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRatePoint {
    pub label: String,
    /// Percent
    pub error_rate: f64,
}

/// Single-hump shaping curve: 0.4 at the start, 1.0 mid-range
pub fn usage_cycle(index: usize, len: usize) -> f64 {
    ((index as f64 / len as f64) * PI).sin() * 0.6 + 0.4
}

/// Deterministic per-index noise for the error chart, in [0.2, 1.0]
pub fn error_noise(index: usize) -> f64 {
    (index as f64 * 1.3).sin() * 0.4 + 0.6
}

pub fn usage_series(
    tables: &WeightTables,
    environment: Environment,
    models: &Selection<ModelName>,
    time_range: TimeRange,
) -> Vec<UsagePoint> {
    let scale = resolve_scale(tables, environment, models, time_range);
    let labels = tables.labels(time_range);
    let spike_at = tables.spike_index(time_range);

    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let cycle = usage_cycle(i, labels.len());
            let spike = if i == spike_at {
                USAGE_SPIKE_MULTIPLIER
            } else {
                1.0
            };
            let input_tokens = round2(BASE_INPUT_TOKENS * scale * cycle * spike);
            let output_tokens = round2(input_tokens * OUTPUT_TO_INPUT_RATIO);
            let total_tokens = round2(input_tokens + output_tokens);
            UsagePoint {
                label: label.to_string(),
                input_tokens,
                output_tokens,
                total_tokens,
                cost: round2(total_tokens * COST_PER_TOKEN_UNIT),
            }
        })
        .collect()
}

/// Baseline error rate (percent) for an environment
pub fn base_error_rate(environment: Environment) -> f64 {
    match environment {
        Environment::Prod => 2.0,
        Environment::Qa => 1.2,
        Environment::Dev => 0.6,
    }
}

/// Per-model error factor keyed on the model family name
pub fn model_error_factor(model: ModelName) -> f64 {
    let name = model.as_str();
    if name.contains("GPT") {
        1.1
    } else if name.contains("Lite") {
        0.7
    } else {
        0.95
    }
}

pub fn error_series(
    tables: &WeightTables,
    environment: Environment,
    models: &Selection<ModelName>,
    time_range: TimeRange,
) -> Vec<ErrorRatePoint> {
    let base = base_error_rate(environment);
    let model_factor = mean_over(models, model_error_factor);
    let spike_at = tables.spike_index(time_range);

    tables
        .labels(time_range)
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let spike = if i == spike_at {
                ERROR_SPIKE_MULTIPLIER
            } else {
                1.0
            };
            ErrorRatePoint {
                label: label.to_string(),
                error_rate: round2(base * model_factor * error_noise(i) * spike),
            }
        })
        .collect()
}

/// Peak of an error series that crossed the alert threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorAlert {
    pub label: String,
    pub peak_error_rate: f64,
    pub threshold: f64,
}

/// Alert when the series peak is strictly above `threshold`
pub fn error_alert(series: &[ErrorRatePoint], threshold: f64) -> Option<ErrorAlert> {
    let peak = series
        .iter()
        .max_by(|a, b| a.error_rate.total_cmp(&b.error_rate))?;
    (peak.error_rate > threshold).then(|| ErrorAlert {
        label: peak.label.clone(),
        peak_error_rate: peak.error_rate,
        threshold,
    })
}
