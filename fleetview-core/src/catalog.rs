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

//! Agent catalog
//!
//! The fixed fleet inventory the dashboard filters over. Status is authored
//! with the catalog; [`AgentStatus::from_error_rate`] is a separate projection
//! used only to flag rows whose authored status and error rate disagree.

use crate::dimension::{Environment, ModelName, Runtime};
use serde::{Deserialize, Serialize};

/// Health status of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgentStatus {
    Healthy,
    Warning,
    Critical,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Healthy => "Healthy",
            AgentStatus::Warning => "Warning",
            AgentStatus::Critical => "Critical",
        }
    }

    /// Band an error rate (percent) falls into
    pub fn from_error_rate(error_rate: f64, thresholds: &StatusThresholds) -> Self {
        if error_rate >= thresholds.critical {
            AgentStatus::Critical
        } else if error_rate >= thresholds.warning {
            AgentStatus::Warning
        } else {
            AgentStatus::Healthy
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error-rate bands (percent) used to colour inventory rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    /// Lower bound of the warning band
    pub warning: f64,
    /// Lower bound of the critical band
    pub critical: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            warning: 1.5,
            critical: 3.0,
        }
    }
}

/// One agent in the fleet inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRow {
    pub id: String,
    pub agent_name: String,
    pub environment: Environment,
    pub runtime: Runtime,
    pub model_name: ModelName,
    pub total_tokens: u64,
    /// USD
    pub cost: f64,
    /// Milliseconds
    pub avg_latency: u32,
    /// Percent
    pub error_rate: f64,
    pub status: AgentStatus,
}

impl AgentRow {
    /// Projected status from the error rate, ignoring the authored one
    pub fn banded_status(&self, thresholds: &StatusThresholds) -> AgentStatus {
        AgentStatus::from_error_rate(self.error_rate, thresholds)
    }
}

/// The standard fleet inventory, in catalog order
pub fn standard_catalog() -> &'static [AgentRow] {
    &STANDARD_CATALOG
}

static STANDARD_CATALOG: once_cell::sync::Lazy<Vec<AgentRow>> = once_cell::sync::Lazy::new(|| {
    use AgentStatus::*;
    use Environment::*;
    use ModelName::*;
    use Runtime::*;

    #[allow(clippy::type_complexity)]
    let rows: [(&str, Environment, Runtime, ModelName, u64, f64, u32, f64, AgentStatus); 15] = [
        ("content-synthesis-agent", Prod, AgentEngine, Gemini25Pro, 14_200_000, 2840.0, 312, 0.8, Healthy),
        ("customer-support-bot", Prod, Gke, Gemini25Flash, 9_800_000, 1176.0, 285, 1.2, Healthy),
        ("data-extraction-pipeline", Prod, AgentEngine, AzureGpt4, 21_500_000, 4300.0, 520, 3.8, Warning),
        ("document-classifier", Qa, AgentEngine, Gemini31Lite, 5_600_000, 336.0, 198, 0.4, Healthy),
        ("fraud-detection-agent", Prod, Gke, AzureGpt5, 18_900_000, 3780.0, 390, 4.7, Critical),
        ("invoice-processing-v2", Prod, Gke, Gemini20Flash, 7_200_000, 864.0, 275, 0.6, Healthy),
        ("legal-review-assistant", Qa, AgentEngine, Gemini31Pro, 11_400_000, 2280.0, 480, 1.9, Healthy),
        ("marketing-copy-gen", Dev, Gke, Gemini20Lite, 2_100_000, 252.0, 560, 2.1, Warning),
        ("risk-assessment-agent", Prod, AgentEngine, Gemini25Pro, 16_700_000, 3340.0, 420, 0.9, Healthy),
        ("semantic-search-engine", Prod, Gke, Gemini31Flash, 8_300_000, 996.0, 310, 1.5, Healthy),
        ("supply-chain-optimizer", Qa, AgentEngine, Gemini25Lite, 4_800_000, 288.0, 340, 0.3, Healthy),
        ("translation-pipeline", Prod, Gke, AzureGpt4, 12_600_000, 2520.0, 365, 4.9, Critical),
        ("qa-regression-bot", Qa, Gke, Gemini20Pro, 3_400_000, 408.0, 290, 0.7, Healthy),
        ("dev-prototype-agent", Dev, AgentEngine, Gemini31Lite, 800_000, 48.0, 620, 3.1, Warning),
        ("compliance-checker", Dev, Gke, AzureGpt5, 1_200_000, 144.0, 480, 1.4, Healthy),
    ];

    rows.into_iter()
        .enumerate()
        .map(
            |(i, (name, environment, runtime, model_name, total_tokens, cost, avg_latency, error_rate, status))| {
                AgentRow {
                    id: (i + 1).to_string(),
                    agent_name: name.to_string(),
                    environment,
                    runtime,
                    model_name,
                    total_tokens,
                    cost,
                    avg_latency,
                    error_rate,
                    status,
                }
            },
        )
        .collect()
});
