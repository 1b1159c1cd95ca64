//! Property-based tests for filter selections.

use fleetview_core::{ModelName, Runtime, Selection};
use proptest::prelude::*;

fn models_strategy() -> impl Strategy<Value = Vec<ModelName>> {
    prop::sample::subsequence(ModelName::ALL.to_vec(), 0..=ModelName::COUNT)
}

/// Wildcard or a non-empty subset, the states reachable from the filter bar
fn reachable_strategy() -> impl Strategy<Value = Selection<ModelName>> {
    prop_oneof![
        Just(Selection::All),
        prop::sample::subsequence(ModelName::ALL.to_vec(), 1..=ModelName::COUNT)
            .prop_map(Selection::only),
    ]
}

proptest! {
    /// An empty filter-bar list is the wildcard, never an empty subset.
    #[test]
    fn prop_from_filter_never_empty(models in models_strategy()) {
        let selection = Selection::from_filter(models.clone());
        match selection.members() {
            None => prop_assert!(models.is_empty()),
            Some(members) => prop_assert_eq!(members.len(), models.len()),
        }
    }

    /// `contains` agrees with `effective` for every model.
    #[test]
    fn prop_contains_matches_effective(selection in reachable_strategy()) {
        let effective = selection.effective();
        for model in ModelName::ALL {
            prop_assert_eq!(selection.contains(&model), effective.contains(&model));
        }
    }

    /// Toggling the same model twice restores the selection.
    #[test]
    fn prop_double_toggle_restores(
        selection in reachable_strategy(),
        model in prop::sample::select(ModelName::ALL.to_vec()),
    ) {
        let mut toggled = selection.clone();
        toggled.toggle(model);
        toggled.toggle(model);
        prop_assert_eq!(toggled, selection);
    }
}

#[test]
fn test_effective_follows_declaration_order() {
    let selection = Selection::only([Runtime::Gke, Runtime::AgentEngine]);
    assert_eq!(selection.effective(), vec![Runtime::AgentEngine, Runtime::Gke]);
}
