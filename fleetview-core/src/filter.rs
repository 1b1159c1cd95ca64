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

//! Filter bar state
//!
//! Owned by the presentation layer. Mutation goes through the setters below;
//! the engine only ever sees an immutable [`FilterSelection`] snapshot.

use crate::config::DashboardConfig;
use crate::dimension::{Environment, ModelName, Runtime, TimeRange};
use crate::selection::{FilterSelection, Selection};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    selection: FilterSelection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial filters from configuration
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            selection: FilterSelection::new(
                config.default_environment,
                Selection::All,
                Selection::All,
                config.default_time_range,
            ),
        }
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.selection.environment = environment;
    }

    pub fn set_time_range(&mut self, time_range: TimeRange) {
        self.selection.time_range = time_range;
    }

    pub fn set_models(&mut self, models: Selection<ModelName>) {
        self.selection.models = models;
    }

    pub fn set_platforms(&mut self, platforms: Selection<Runtime>) {
        self.selection.platforms = platforms;
    }

    pub fn toggle_model(&mut self, model: ModelName) {
        self.selection.models.toggle(model);
    }

    pub fn toggle_platform(&mut self, platform: Runtime) {
        self.selection.platforms.toggle(platform);
    }

    pub fn clear_models(&mut self) {
        self.selection.models = Selection::All;
    }

    pub fn clear_platforms(&mut self) {
        self.selection.platforms = Selection::All;
    }

    /// Snapshot handed to the engine
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Context line shown under the page title
    pub fn summary(&self) -> String {
        let models = match &self.selection.models {
            Selection::All => "All".to_string(),
            Selection::Subset(members) => members.len().to_string(),
        };
        format!(
            "Environment: {} · Models: {} · Time Range: {}",
            self.selection.environment, models, self.selection.time_range
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_open_state() {
        let state = FilterState::new();
        let selection = state.selection();
        assert_eq!(selection.environment, Environment::Prod);
        assert_eq!(selection.time_range, TimeRange::LastDay);
        assert!(selection.models.is_all());
        assert!(selection.platforms.is_all());
    }

    #[test]
    fn test_from_config() {
        let config = DashboardConfig {
            default_environment: Environment::Qa,
            default_time_range: TimeRange::LastWeek,
            ..Default::default()
        };
        let state = FilterState::from_config(&config);
        assert_eq!(state.selection().environment, Environment::Qa);
        assert_eq!(state.selection().time_range, TimeRange::LastWeek);
    }

    #[test]
    fn test_setters_and_summary() {
        let mut state = FilterState::new();
        assert_eq!(
            state.summary(),
            "Environment: Prod · Models: All · Time Range: 24h"
        );

        state.set_environment(Environment::Dev);
        state.set_time_range(TimeRange::LastHour);
        state.toggle_model(ModelName::Gemini25Pro);
        state.toggle_model(ModelName::AzureGpt4);
        assert_eq!(
            state.summary(),
            "Environment: Dev · Models: 2 · Time Range: 1h"
        );

        state.clear_models();
        assert!(state.selection().models.is_all());
    }

    #[test]
    fn test_toggle_platform() {
        let mut state = FilterState::new();
        state.toggle_platform(Runtime::Gke);
        assert!(state.selection().platforms.contains(&Runtime::Gke));
        assert!(!state.selection().platforms.contains(&Runtime::AgentEngine));

        state.clear_platforms();
        assert!(state.selection().platforms.is_all());
    }
}
