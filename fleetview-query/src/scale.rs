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

//! Scale Resolver
//!
//! Folds environment, model and time-range weights into one multiplier that
//! every magnitude in the dashboard is scaled by.

use fleetview_core::{Environment, ModelName, Selection, TimeRange, WeightTables};

/// Weight of a Pro-class model; one Pro model selected gives a neutral model term
pub const PRO_CLASS_REFERENCE_WEIGHT: f64 = 0.12;

/// Model term of the scale: 1 for the wildcard, else summed weight over the
/// Pro-class reference
pub fn aggregate_model_weight(tables: &WeightTables, models: &Selection<ModelName>) -> f64 {
    match models {
        Selection::All => 1.0,
        Selection::Subset(members) => {
            let sum: f64 = members.iter().map(|&m| tables.model_weight(m)).sum();
            sum / PRO_CLASS_REFERENCE_WEIGHT
        }
    }
}

/// `environment weight × model term × time-range weight`
pub fn resolve_scale(
    tables: &WeightTables,
    environment: Environment,
    models: &Selection<ModelName>,
    time_range: TimeRange,
) -> f64 {
    tables.environment_weight(environment)
        * aggregate_model_weight(tables, models)
        * tables.time_range_weight(time_range)
}

/// Mean latency factor over the selected models.
///
/// The wildcard and an empty subset both give the neutral 1.0.
pub fn mean_latency_factor(tables: &WeightTables, models: &Selection<ModelName>) -> f64 {
    mean_over(models, |m| tables.model_latency_factor(m))
}

pub(crate) fn mean_over<F>(models: &Selection<ModelName>, factor: F) -> f64
where
    F: Fn(ModelName) -> f64,
{
    match models {
        Selection::Subset(members) if !members.is_empty() => {
            members.iter().map(|&m| factor(m)).sum::<f64>() / members.len() as f64
        }
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static WeightTables {
        WeightTables::standard()
    }

    #[test]
    fn test_wildcard_is_neutral() {
        assert_eq!(aggregate_model_weight(tables(), &Selection::All), 1.0);
    }

    #[test]
    fn test_single_pro_model_is_neutral() {
        let models = Selection::only([ModelName::Gemini20Pro]);
        assert!((aggregate_model_weight(tables(), &models) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lite_model_shrinks_and_many_models_inflate() {
        let lite = Selection::only([ModelName::Gemini20Lite]);
        assert!(aggregate_model_weight(tables(), &lite) < 1.0);

        let many = Selection::only([
            ModelName::Gemini25Pro,
            ModelName::AzureGpt4,
            ModelName::AzureGpt5,
        ]);
        // (0.18 + 0.20 + 0.25) / 0.12
        assert!((aggregate_model_weight(tables(), &many) - 5.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_subset_has_zero_weight() {
        let none: Selection<ModelName> = Selection::only(Vec::new());
        assert_eq!(aggregate_model_weight(tables(), &none), 0.0);
        assert_eq!(
            resolve_scale(tables(), Environment::Prod, &none, TimeRange::LastDay),
            0.0
        );
    }

    #[test]
    fn test_dev_last_hour_scale() {
        let scale = resolve_scale(
            tables(),
            Environment::Dev,
            &Selection::All,
            TimeRange::LastHour,
        );
        assert!((scale - 0.0108).abs() < 1e-12);
    }

    #[test]
    fn test_mean_latency_factor() {
        assert_eq!(mean_latency_factor(tables(), &Selection::All), 1.0);
        let models = Selection::only([ModelName::Gemini20Lite, ModelName::AzureGpt4]);
        // (0.55 + 1.1) / 2
        assert!((mean_latency_factor(tables(), &models) - 0.825).abs() < 1e-12);
        assert_eq!(
            mean_latency_factor(tables(), &Selection::only(Vec::new())),
            1.0
        );
    }
}
