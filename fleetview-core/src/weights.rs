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

//! Weight Tables
//!
//! Static scaling factors the derivation engine reads from:
//! - environment, time-range and model weights
//! - per-model latency factors
//! - time-range labels and the spike index within each label sequence
//! - per-platform call volume, latency factor and the sparse
//!   environment × platform volume adjustment
//!
//! Tables keyed by a dimension are arrays indexed by `index()`, so every
//! member always has an entry. The standard tables are built once and shared
//! by `&'static` reference; nothing mutates them after construction.

use crate::dimension::{Environment, ModelName, Runtime, TimeRange};
use crate::error::{FleetviewError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static STANDARD_WEIGHTS: Lazy<WeightTables> = Lazy::new(WeightTables::build_standard);

/// Read-only lookup tables for the derivation engine
#[derive(Debug, Clone)]
pub struct WeightTables {
    environment_weight: [f64; Environment::COUNT],
    time_range_weight: [f64; TimeRange::COUNT],
    model_weight: [f64; ModelName::COUNT],
    model_latency_factor: [f64; ModelName::COUNT],
    time_range_labels: [Vec<&'static str>; TimeRange::COUNT],
    spike_index: [usize; TimeRange::COUNT],
    platform_base_volume: [u64; Runtime::COUNT],
    platform_latency_factor: [f64; Runtime::COUNT],
    /// Sparse; absent combinations use 1.0
    platform_adjustment: HashMap<(Environment, Runtime), f64>,
}

impl WeightTables {
    /// The process-wide standard tables
    pub fn standard() -> &'static WeightTables {
        &STANDARD_WEIGHTS
    }

    fn build_standard() -> Self {
        let mut environment_weight = [0.0; Environment::COUNT];
        environment_weight[Environment::Prod.index()] = 1.0;
        environment_weight[Environment::Qa.index()] = 0.45;
        environment_weight[Environment::Dev.index()] = 0.18;

        let mut time_range_weight = [0.0; TimeRange::COUNT];
        time_range_weight[TimeRange::LastHour.index()] = 0.06;
        time_range_weight[TimeRange::LastDay.index()] = 1.0;
        time_range_weight[TimeRange::LastWeek.index()] = 6.4;
        time_range_weight[TimeRange::LastMonth.index()] = 26.0;
        time_range_weight[TimeRange::Custom.index()] = 1.3;

        // (weight, latency factor)
        let model_factors: [(ModelName, f64, f64); ModelName::COUNT] = [
            (ModelName::Gemini20Lite, 0.05, 0.55),
            (ModelName::Gemini20Flash, 0.08, 0.70),
            (ModelName::Gemini20Pro, 0.12, 1.0),
            (ModelName::Gemini25Lite, 0.08, 0.50),
            (ModelName::Gemini25Flash, 0.14, 0.65),
            (ModelName::Gemini25Pro, 0.18, 0.95),
            (ModelName::Gemini31Lite, 0.06, 0.48),
            (ModelName::Gemini31Flash, 0.10, 0.60),
            (ModelName::Gemini31Pro, 0.15, 0.90),
            (ModelName::AzureGpt4, 0.20, 1.1),
            (ModelName::AzureGpt5, 0.25, 0.85),
        ];
        let mut model_weight = [0.0; ModelName::COUNT];
        let mut model_latency_factor = [0.0; ModelName::COUNT];
        for (model, weight, latency) in model_factors {
            model_weight[model.index()] = weight;
            model_latency_factor[model.index()] = latency;
        }

        let time_range_labels = [
            vec![
                "00m", "05m", "10m", "15m", "20m", "25m", "30m", "35m", "40m", "45m", "50m",
                "55m", "60m",
            ],
            vec![
                "00:00", "02:00", "04:00", "06:00", "08:00", "10:00", "12:00", "14:00", "16:00",
                "18:00", "20:00", "22:00",
            ],
            vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            vec!["Week 1", "Week 2", "Week 3", "Week 4"],
            vec![
                "Period 1", "Period 2", "Period 3", "Period 4", "Period 5", "Period 6",
            ],
        ];

        let mut spike_index = [0; TimeRange::COUNT];
        spike_index[TimeRange::LastHour.index()] = 8;
        spike_index[TimeRange::LastDay.index()] = 7;
        spike_index[TimeRange::LastWeek.index()] = 4;
        spike_index[TimeRange::LastMonth.index()] = 2;
        spike_index[TimeRange::Custom.index()] = 3;

        let mut platform_base_volume = [0; Runtime::COUNT];
        platform_base_volume[Runtime::AgentEngine.index()] = 48_420;
        platform_base_volume[Runtime::Gke.index()] = 31_150;

        let mut platform_latency_factor = [1.0; Runtime::COUNT];
        platform_latency_factor[Runtime::Gke.index()] = 0.92;

        let platform_adjustment = HashMap::from([
            ((Environment::Prod, Runtime::AgentEngine), 1.2),
            ((Environment::Qa, Runtime::Gke), 0.8),
            ((Environment::Dev, Runtime::AgentEngine), 0.4),
        ]);

        let tables = Self {
            environment_weight,
            time_range_weight,
            model_weight,
            model_latency_factor,
            time_range_labels,
            spike_index,
            platform_base_volume,
            platform_latency_factor,
            platform_adjustment,
        };
        debug_assert!(tables.validate().is_ok(), "standard weight tables are invalid");
        tables
    }

    pub fn environment_weight(&self, env: Environment) -> f64 {
        self.environment_weight[env.index()]
    }

    pub fn time_range_weight(&self, range: TimeRange) -> f64 {
        self.time_range_weight[range.index()]
    }

    pub fn model_weight(&self, model: ModelName) -> f64 {
        self.model_weight[model.index()]
    }

    pub fn model_latency_factor(&self, model: ModelName) -> f64 {
        self.model_latency_factor[model.index()]
    }

    pub fn labels(&self, range: TimeRange) -> &[&'static str] {
        &self.time_range_labels[range.index()]
    }

    pub fn spike_index(&self, range: TimeRange) -> usize {
        self.spike_index[range.index()]
    }

    pub fn platform_base_volume(&self, runtime: Runtime) -> u64 {
        self.platform_base_volume[runtime.index()]
    }

    pub fn platform_latency_factor(&self, runtime: Runtime) -> f64 {
        self.platform_latency_factor[runtime.index()]
    }

    /// Volume adjustment for an environment/platform pair (1.0 when absent)
    pub fn platform_adjustment(&self, env: Environment, runtime: Runtime) -> f64 {
        self.platform_adjustment
            .get(&(env, runtime))
            .copied()
            .unwrap_or(1.0)
    }

    /// Override the spike index for one time range
    pub fn with_spike_index(mut self, range: TimeRange, index: usize) -> Self {
        self.spike_index[range.index()] = index;
        self
    }

    /// Override the label sequence for one time range
    pub fn with_labels(mut self, range: TimeRange, labels: Vec<&'static str>) -> Self {
        self.time_range_labels[range.index()] = labels;
        self
    }

    /// Check the table invariants.
    ///
    /// Every label sequence is non-empty, its spike index points inside it,
    /// and every weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for range in TimeRange::ALL {
            let labels = self.labels(range);
            if labels.is_empty() {
                return Err(FleetviewError::InvalidWeightTable(format!(
                    "time range {} has no labels",
                    range
                )));
            }
            let spike = self.spike_index(range);
            if spike >= labels.len() {
                return Err(FleetviewError::InvalidWeightTable(format!(
                    "spike index {} out of bounds for {} ({} labels)",
                    spike,
                    range,
                    labels.len()
                )));
            }
        }

        let weights = self
            .environment_weight
            .iter()
            .chain(self.time_range_weight.iter())
            .chain(self.model_weight.iter())
            .chain(self.model_latency_factor.iter())
            .chain(self.platform_latency_factor.iter())
            .chain(self.platform_adjustment.values());
        for &weight in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(FleetviewError::InvalidWeightTable(format!(
                    "weight {} is not a finite non-negative number",
                    weight
                )));
            }
        }

        Ok(())
    }
}
