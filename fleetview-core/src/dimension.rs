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

//! Filter dimensions
//!
//! The four closed enumerations a dashboard selection is built from. Each
//! carries a stable `index()` so weight tables can be plain arrays that are
//! total over their key type.

use crate::error::FleetviewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment tier
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Environment {
    Dev = 0,
    #[serde(rename = "QA")]
    Qa = 1,
    #[default]
    Prod = 2,
}

impl Environment {
    pub const COUNT: usize = 3;
    pub const ALL: [Environment; Self::COUNT] =
        [Environment::Dev, Environment::Qa, Environment::Prod];

    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, FleetviewError> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "qa" | "staging" => Ok(Environment::Qa),
            "prod" | "production" => Ok(Environment::Prod),
            _ => Err(FleetviewError::UnknownEnvironment(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "Dev",
            Environment::Qa => "QA",
            Environment::Prod => "Prod",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Model served to an agent
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelName {
    #[serde(rename = "Gemini 2.0 Lite")]
    Gemini20Lite = 0,
    #[serde(rename = "Gemini 2.0 Flash")]
    Gemini20Flash = 1,
    #[serde(rename = "Gemini 2.0 Pro")]
    Gemini20Pro = 2,
    #[serde(rename = "Gemini 2.5 Lite")]
    Gemini25Lite = 3,
    #[serde(rename = "Gemini 2.5 Flash")]
    Gemini25Flash = 4,
    #[serde(rename = "Gemini 2.5 Pro")]
    Gemini25Pro = 5,
    #[serde(rename = "Gemini 3.1 Lite")]
    Gemini31Lite = 6,
    #[serde(rename = "Gemini 3.1 Flash")]
    Gemini31Flash = 7,
    #[serde(rename = "Gemini 3.1 Pro")]
    Gemini31Pro = 8,
    #[serde(rename = "Azure OpenAI GPT-4")]
    AzureGpt4 = 9,
    #[serde(rename = "Azure OpenAI GPT-5")]
    AzureGpt5 = 10,
}

impl ModelName {
    pub const COUNT: usize = 11;
    pub const ALL: [ModelName; Self::COUNT] = [
        ModelName::Gemini20Lite,
        ModelName::Gemini20Flash,
        ModelName::Gemini20Pro,
        ModelName::Gemini25Lite,
        ModelName::Gemini25Flash,
        ModelName::Gemini25Pro,
        ModelName::Gemini31Lite,
        ModelName::Gemini31Flash,
        ModelName::Gemini31Pro,
        ModelName::AzureGpt4,
        ModelName::AzureGpt5,
    ];

    /// Display name, exactly as shown in the model filter
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Gemini20Lite => "Gemini 2.0 Lite",
            ModelName::Gemini20Flash => "Gemini 2.0 Flash",
            ModelName::Gemini20Pro => "Gemini 2.0 Pro",
            ModelName::Gemini25Lite => "Gemini 2.5 Lite",
            ModelName::Gemini25Flash => "Gemini 2.5 Flash",
            ModelName::Gemini25Pro => "Gemini 2.5 Pro",
            ModelName::Gemini31Lite => "Gemini 3.1 Lite",
            ModelName::Gemini31Flash => "Gemini 3.1 Flash",
            ModelName::Gemini31Pro => "Gemini 3.1 Pro",
            ModelName::AzureGpt4 => "Azure OpenAI GPT-4",
            ModelName::AzureGpt5 => "Azure OpenAI GPT-5",
        }
    }

    /// Parse a model from its display name (case-insensitive).
    ///
    /// Dashes and spaces are interchangeable so `gemini-2.5-pro` works on the
    /// command line.
    pub fn parse(s: &str) -> Result<Self, FleetviewError> {
        let wanted = normalize_name(s);
        Self::ALL
            .iter()
            .copied()
            .find(|m| normalize_name(m.as_str()) == wanted)
            .ok_or_else(|| FleetviewError::UnknownModel(s.to_string()))
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

fn normalize_name(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect()
}

/// Execution substrate for an agent
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Runtime {
    /// Managed agent runtime (primary platform)
    #[serde(rename = "Agent Engine")]
    AgentEngine = 0,
    /// Kubernetes-based runtime (secondary platform)
    #[serde(rename = "GKE")]
    Gke = 1,
}

impl Runtime {
    pub const COUNT: usize = 2;
    pub const ALL: [Runtime; Self::COUNT] = [Runtime::AgentEngine, Runtime::Gke];

    pub fn parse(s: &str) -> Result<Self, FleetviewError> {
        match normalize_name(s).as_str() {
            "agent engine" | "agentengine" => Ok(Runtime::AgentEngine),
            "gke" => Ok(Runtime::Gke),
            _ => Err(FleetviewError::UnknownRuntime(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Runtime::AgentEngine => "Agent Engine",
            Runtime::Gke => "GKE",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Reporting window
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    LastHour = 0,
    #[default]
    #[serde(rename = "24h")]
    LastDay = 1,
    #[serde(rename = "1w")]
    LastWeek = 2,
    #[serde(rename = "1m")]
    LastMonth = 3,
    Custom = 4,
}

impl TimeRange {
    pub const COUNT: usize = 5;
    pub const ALL: [TimeRange; Self::COUNT] = [
        TimeRange::LastHour,
        TimeRange::LastDay,
        TimeRange::LastWeek,
        TimeRange::LastMonth,
        TimeRange::Custom,
    ];

    pub fn parse(s: &str) -> Result<Self, FleetviewError> {
        match s.trim().to_lowercase().as_str() {
            "1h" => Ok(TimeRange::LastHour),
            "24h" | "1d" => Ok(TimeRange::LastDay),
            "1w" | "7d" => Ok(TimeRange::LastWeek),
            "1m" | "30d" => Ok(TimeRange::LastMonth),
            "custom" => Ok(TimeRange::Custom),
            _ => Err(FleetviewError::UnknownTimeRange(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::LastHour => "1h",
            TimeRange::LastDay => "24h",
            TimeRange::LastWeek => "1w",
            TimeRange::LastMonth => "1m",
            TimeRange::Custom => "Custom",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

macro_rules! impl_text_conversions {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = FleetviewError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty>::parse(s)
                }
            }
        )*
    };
}

impl_text_conversions!(Environment, ModelName, Runtime, TimeRange);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_declaration_order() {
        for (i, env) in Environment::ALL.iter().enumerate() {
            assert_eq!(env.index(), i);
        }
        for (i, model) in ModelName::ALL.iter().enumerate() {
            assert_eq!(model.index(), i);
        }
        for (i, runtime) in Runtime::ALL.iter().enumerate() {
            assert_eq!(runtime.index(), i);
        }
        for (i, range) in TimeRange::ALL.iter().enumerate() {
            assert_eq!(range.index(), i);
        }
    }

    #[test]
    fn test_parse_accepts_display_names() {
        for model in ModelName::ALL {
            assert_eq!(ModelName::parse(model.as_str()).unwrap(), model);
        }
        assert_eq!(
            ModelName::parse("gemini-2.5-pro").unwrap(),
            ModelName::Gemini25Pro
        );
        assert_eq!(Runtime::parse("agent-engine").unwrap(), Runtime::AgentEngine);
        assert_eq!(Environment::parse("qa").unwrap(), Environment::Qa);
        assert_eq!("1w".parse::<TimeRange>().unwrap(), TimeRange::LastWeek);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            Environment::parse("sandbox"),
            Err(FleetviewError::UnknownEnvironment(_))
        ));
        assert!(ModelName::parse("Gemini 9 Ultra").is_err());
        assert!(Runtime::parse("Cloud Run").is_err());
        assert!(TimeRange::parse("2y").is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&ModelName::AzureGpt4).unwrap();
        assert_eq!(json, "\"Azure OpenAI GPT-4\"");
        let json = serde_json::to_string(&Environment::Qa).unwrap();
        assert_eq!(json, "\"QA\"");
        let range: TimeRange = serde_json::from_str("\"24h\"").unwrap();
        assert_eq!(range, TimeRange::LastDay);
    }
}
