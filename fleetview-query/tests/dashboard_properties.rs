//! Property-based tests for the dashboard derivation engine.
//!
//! These hold for every filter selection, not just the defaults the UI
//! starts with.

use fleetview_core::{
    Environment, FilterSelection, ModelName, Runtime, Selection, TimeRange, WeightTables,
};
use fleetview_query::rounding::round2;
use fleetview_query::{
    compute_dashboard_data, filter_agents, platform_distribution, resolve_scale, usage_series,
    DashboardEngine,
};
use proptest::prelude::*;

// ============================================================================
// Test Strategies
// ============================================================================

fn environment_strategy() -> impl Strategy<Value = Environment> {
    prop::sample::select(Environment::ALL.to_vec())
}

fn time_range_strategy() -> impl Strategy<Value = TimeRange> {
    prop::sample::select(TimeRange::ALL.to_vec())
}

/// Wildcard or any subset of models, including the empty one
fn models_strategy() -> impl Strategy<Value = Selection<ModelName>> {
    prop_oneof![
        Just(Selection::All),
        prop::sample::subsequence(ModelName::ALL.to_vec(), 0..=ModelName::COUNT)
            .prop_map(Selection::only),
    ]
}

fn platforms_strategy() -> impl Strategy<Value = Selection<Runtime>> {
    prop_oneof![
        Just(Selection::All),
        prop::sample::subsequence(Runtime::ALL.to_vec(), 0..=Runtime::COUNT)
            .prop_map(Selection::only),
    ]
}

fn selection_strategy() -> impl Strategy<Value = FilterSelection> {
    (
        environment_strategy(),
        models_strategy(),
        platforms_strategy(),
        time_range_strategy(),
    )
        .prop_map(|(env, models, platforms, range)| {
            FilterSelection::new(env, models, platforms, range)
        })
}

fn expected_len(range: TimeRange) -> usize {
    match range {
        TimeRange::LastHour => 13,
        TimeRange::LastDay => 12,
        TimeRange::LastWeek => 7,
        TimeRange::LastMonth => 4,
        TimeRange::Custom => 6,
    }
}

// ============================================================================
// Engine Property Tests
// ============================================================================

proptest! {
    /// Identical selections give identical bundles.
    #[test]
    fn prop_deterministic(selection in selection_strategy()) {
        let engine = DashboardEngine::standard();
        let first = engine.compute_dashboard_data(&selection);
        let second = engine.compute_dashboard_data(&selection);
        prop_assert_eq!(first, second);
    }

    /// Series length depends on the time range alone.
    #[test]
    fn prop_series_length(selection in selection_strategy()) {
        let data = DashboardEngine::standard().compute_dashboard_data(&selection);
        let n = expected_len(selection.time_range);
        prop_assert_eq!(data.usage_series.len(), n);
        prop_assert_eq!(data.error_series.len(), n);
    }

    /// Distribution percentages cover the selected platforms only.
    #[test]
    fn prop_percentages_sum_to_hundred(
        env in environment_strategy(),
        platforms in platforms_strategy(),
    ) {
        let shares = platform_distribution(WeightTables::standard(), env, &platforms);
        prop_assume!(!shares.is_empty());
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        prop_assert!((sum - 100.0).abs() <= 0.1 + 1e-9, "sum was {}", sum);
    }

    /// Listing every platform is the same as the platform wildcard.
    #[test]
    fn prop_platform_wildcard_equals_full_listing(
        env in environment_strategy(),
        models in models_strategy(),
        range in time_range_strategy(),
    ) {
        let wildcard = compute_dashboard_data(env, models.clone(), Selection::All, range);
        let explicit = compute_dashboard_data(env, models, Selection::only(Runtime::ALL), range);
        prop_assert_eq!(wildcard, explicit);
    }

    /// Listing every model covers the same agents as the model wildcard.
    #[test]
    fn prop_model_wildcard_covers_same_agents(
        env in environment_strategy(),
        platforms in platforms_strategy(),
    ) {
        let catalog = DashboardEngine::standard().catalog();
        let wildcard = filter_agents(catalog, env, &Selection::All, &platforms);
        let explicit = filter_agents(catalog, env, &Selection::only(ModelName::ALL), &platforms);
        prop_assert_eq!(wildcard, explicit);
    }

    /// Adding a model to an explicit subset never lowers the scale.
    #[test]
    fn prop_scale_monotonic_in_models(
        env in environment_strategy(),
        range in time_range_strategy(),
        base in prop::sample::subsequence(ModelName::ALL.to_vec(), 0..ModelName::COUNT),
        extra in prop::sample::select(ModelName::ALL.to_vec()),
    ) {
        let tables = WeightTables::standard();
        let smaller = Selection::only(base.clone());
        let larger = Selection::only(base.into_iter().chain([extra]));
        let before = resolve_scale(tables, env, &smaller, range);
        let after = resolve_scale(tables, env, &larger, range);
        prop_assert!(after >= before);
    }

    /// Usage points stay consistent with their own components.
    #[test]
    fn prop_usage_components(
        env in environment_strategy(),
        models in models_strategy(),
        range in time_range_strategy(),
    ) {
        for point in usage_series(WeightTables::standard(), env, &models, range) {
            prop_assert!(point.input_tokens >= 0.0);
            prop_assert!(point.output_tokens <= point.input_tokens);
            prop_assert!((point.total_tokens - (point.input_tokens + point.output_tokens)).abs() < 0.006);
        }
    }
}

// ============================================================================
// Fixed Scenarios
// ============================================================================

#[test]
fn test_prod_gke_inventory() {
    let data = compute_dashboard_data(
        Environment::Prod,
        Selection::All,
        Selection::only([Runtime::Gke]),
        TimeRange::LastDay,
    );
    let ids: Vec<&str> = data.agents.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "5", "6", "10", "12"]);
    assert_eq!(data.latency_by_platform.len(), 1);
    assert_eq!(data.platform_distribution[0].percentage, 100.0);
}

#[test]
fn test_day_spike_at_fourteen_hundred() {
    let data = compute_dashboard_data(
        Environment::Prod,
        Selection::All,
        Selection::All,
        TimeRange::LastDay,
    );
    assert_eq!(data.spike_label, "14:00");
    assert_eq!(data.usage_series[7].label, "14:00");

    let cycle = (7.0_f64 / 12.0 * std::f64::consts::PI).sin() * 0.6 + 0.4;
    let unspiked = round2(3.5 * cycle);
    let spiked = round2(3.5 * cycle * 1.6);
    assert_eq!(data.usage_series[7].input_tokens, spiked);
    assert_ne!(data.usage_series[7].input_tokens, unspiked);
}

#[test]
fn test_dev_last_hour_baseline() {
    let tables = WeightTables::standard();
    let scale = resolve_scale(tables, Environment::Dev, &Selection::All, TimeRange::LastHour);
    assert!((scale - 0.0108).abs() < 1e-12);

    let data = compute_dashboard_data(
        Environment::Dev,
        Selection::All,
        Selection::All,
        TimeRange::LastHour,
    );
    assert_eq!(data.usage_series[0].input_tokens, 0.02);
    assert_eq!(data.kpis.total_cost, 1381);
}

#[test]
fn test_dev_day_first_point_rounds_stored_values() {
    let data = compute_dashboard_data(
        Environment::Dev,
        Selection::All,
        Selection::All,
        TimeRange::LastDay,
    );
    let first = &data.usage_series[0];
    assert_eq!(first.input_tokens, 0.25);
    // 0.25 * 0.62 is stored just below 0.155
    assert_eq!(first.output_tokens, 0.15);
    assert_eq!(first.total_tokens, 0.4);
    assert_eq!(first.cost, 0.84);
}

#[test]
fn test_dev_month_tokens_below_tie() {
    let models = Selection::only([
        ModelName::Gemini20Lite,
        ModelName::Gemini20Flash,
        ModelName::Gemini20Pro,
    ]);
    let data = compute_dashboard_data(Environment::Dev, models, Selection::All, TimeRange::LastMonth);
    // 142.6 * 9.75 is stored just below 1390.35
    assert_eq!(data.kpis.total_tokens, 1390.3);
}

#[test]
fn test_empty_model_subset_zeroes_volume() {
    let data = compute_dashboard_data(
        Environment::Prod,
        Selection::only(Vec::new()),
        Selection::All,
        TimeRange::LastDay,
    );
    assert!(data.agents.is_empty());
    assert_eq!(data.kpis.total_cost, 0);
    assert_eq!(data.kpis.llm_calls, 0);
    assert_eq!(data.kpis.avg_latency, 381);
    assert!(data.usage_series.iter().all(|p| p.cost == 0.0));
    assert_eq!(data.usage_series.len(), 12);
}

#[test]
fn test_empty_platform_subset_has_no_rows() {
    let data = compute_dashboard_data(
        Environment::Qa,
        Selection::All,
        Selection::only(Vec::new()),
        TimeRange::LastWeek,
    );
    assert!(data.agents.is_empty());
    assert!(data.latency_by_platform.is_empty());
    assert!(data.platform_distribution.is_empty());
    assert_eq!(data.spike_label, "Fri");
}
