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

//! Plain-text rendering of dashboard sections.

use fleetview_core::{AgentRow, FeedbackEntry, PricingRow, StatusThresholds};
use fleetview_query::{
    kpi_cards, status_mismatches, DashboardData, ErrorAlert, LatencyRow, Page, PlatformShare,
    UsagePoint,
};
use std::fmt::Write;

const BAR_WIDTH: f64 = 30.0;

pub fn kpi_strip(data: &DashboardData) -> String {
    let mut out = String::new();
    for card in kpi_cards(&data.kpis) {
        let marker = if card.favourable { "+" } else { "!" };
        let _ = writeln!(
            out,
            "  {:<13} {:>10}  {} {:<8} {}",
            card.title,
            card.value,
            marker,
            card.trend_text(),
            card.subtext
        );
    }
    out
}

/// Row carrying the injected spike, or the costliest point when the index is
/// past the end of the series
pub fn spike_row(points: &[UsagePoint], spike_index: usize) -> Option<usize> {
    if spike_index < points.len() {
        return Some(spike_index);
    }
    points
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.cost.total_cmp(&b.cost))
        .map(|(i, _)| i)
}

pub fn usage_table(data: &DashboardData, spike_at: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<9} {:>8} {:>8} {:>8} {:>9}",
        "time", "input M", "output M", "total M", "cost $K"
    );
    for (i, point) in data.usage_series.iter().enumerate() {
        let spike = if Some(i) == spike_at { "  ◆ spike" } else { "" };
        let _ = writeln!(
            out,
            "  {:<9} {:>8.2} {:>8.2} {:>8.2} {:>9.2}{}",
            point.label, point.input_tokens, point.output_tokens, point.total_tokens, point.cost, spike
        );
    }
    out
}

pub fn error_table(
    data: &DashboardData,
    spike_at: Option<usize>,
    alert: Option<&ErrorAlert>,
) -> String {
    let mut out = String::new();
    for (i, point) in data.error_series.iter().enumerate() {
        let spike = if Some(i) == spike_at { "  ◆" } else { "" };
        let _ = writeln!(out, "  {:<9} {:>6.2}%{}", point.label, point.error_rate, spike);
    }
    if let Some(alert) = alert {
        let _ = writeln!(
            out,
            "  ALERT: error rate peaked at {}% at {} (threshold {}%)",
            alert.peak_error_rate, alert.label, alert.threshold
        );
    }
    out
}

pub fn latency_table(rows: &[LatencyRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<13} {:>9} {:>9} {:>9} {:>9}",
        "platform", "model p50", "model p95", "total p50", "total p95"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<13} {:>7}ms {:>7}ms {:>7}ms {:>7}ms",
            row.platform.as_str(),
            row.model_latency_p50,
            row.model_latency_p95,
            row.total_latency_p50,
            row.total_latency_p95
        );
    }
    out
}

pub fn distribution(shares: &[PlatformShare]) -> String {
    let mut out = String::new();
    let max = shares.iter().map(|s| s.count).max().unwrap_or(0);
    for share in shares {
        let width = (share.relative_width(max) / 100.0 * BAR_WIDTH).round() as usize;
        let _ = writeln!(
            out,
            "  {:<13} {:<30} {:>7} calls {:>5}%",
            share.runtime.as_str(),
            "█".repeat(width),
            share.count,
            share.percentage
        );
    }
    out
}

pub fn inventory(page: &Page<'_, AgentRow>, thresholds: &StatusThresholds) -> String {
    let mut out = String::new();
    let flagged = status_mismatches(page.items, thresholds);
    let _ = writeln!(
        out,
        "  {:<3} {:<26} {:<13} {:<19} {:>8} {:>7} {:>6} {:>6}  {}",
        "id", "agent", "runtime", "model", "tokens", "cost", "lat", "err", "status"
    );
    for agent in page.items {
        let note = flagged
            .iter()
            .find(|m| m.id == agent.id)
            .map(|m| format!("  (rate suggests {})", m.banded))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<3} {:<26} {:<13} {:<19} {:>7.1}M ${:>6} {:>4}ms {:>5}%  {}{}",
            agent.id,
            agent.agent_name,
            agent.runtime.as_str(),
            agent.model_name.as_str(),
            agent.total_tokens as f64 / 1_000_000.0,
            agent.cost,
            agent.avg_latency,
            agent.error_rate,
            agent.status,
            note
        );
    }
    let _ = writeln!(
        out,
        "  {}  (page {} of {})",
        page.range_label(),
        page.page,
        page.total_pages.max(1)
    );
    out
}

pub fn pricing_table(rows: &[PricingRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<3} {:<18} {:<8} {:<6} {:>11} {:>11}  {}",
        "id", "model", "version", "tier", "input", "output", "effective"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<3} {:<18} {:<8} {:<6} {:>11} {:>11}  {}",
            short_id(&row.id),
            row.model,
            row.version,
            row.tier.as_str(),
            row.input_rate_display(),
            row.output_rate_display(),
            row.effective_date
        );
    }
    out
}

pub fn feedback_list(entries: &[FeedbackEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "  [{}] {}  {}",
            entry.status.as_str(),
            entry.date.format("%b %d, %Y %H:%M"),
            entry.text
        );
    }
    out
}

/// Built-in ids are short; generated UUIDs are cut to their first group
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetview_core::{FilterSelection, TimeRange, WeightTables};
    use fleetview_query::{paginate, spike_label, usage_series, DashboardEngine};

    #[test]
    fn test_usage_table_marks_spike() {
        let data = DashboardEngine::standard().compute_dashboard_data(&FilterSelection::default());
        let spike_at = spike_row(&data.usage_series, 7);
        let text = usage_table(&data, spike_at);
        let spike_lines: Vec<&str> = text.lines().filter(|l| l.contains("◆ spike")).collect();
        assert_eq!(spike_lines.len(), 1);
        assert!(spike_lines[0].contains("14:00"));
    }

    #[test]
    fn test_out_of_range_spike_marks_costliest_point() {
        let tables = WeightTables::standard()
            .clone()
            .with_spike_index(TimeRange::LastDay, 40);
        let selection = FilterSelection::default();
        let mut data = DashboardEngine::standard().compute_dashboard_data(&selection);
        data.usage_series = usage_series(
            &tables,
            selection.environment,
            &selection.models,
            selection.time_range,
        );
        // falls back to the last label, which carries no spike
        data.spike_label = spike_label(&tables, TimeRange::LastDay);
        assert_eq!(data.spike_label, "22:00");

        let spike_at = spike_row(&data.usage_series, 40);
        assert_eq!(spike_at, Some(6));
        let text = usage_table(&data, spike_at);
        let marked: Vec<&str> = text.lines().filter(|l| l.contains("◆ spike")).collect();
        assert_eq!(marked.len(), 1);
        assert!(!marked[0].contains("22:00"));
    }

    #[test]
    fn test_inventory_flags_mismatch() {
        let data = DashboardEngine::standard().compute_dashboard_data(&FilterSelection::default());
        let page = paginate(&data.agents, 1, 6);
        let text = inventory(&page, &StatusThresholds::default());
        assert!(text.contains("Showing 1–6 of 8"));
        // data-extraction-pipeline: authored Warning at 3.8%
        assert!(text.contains("rate suggests Critical"));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("3"), "3");
        assert_eq!(short_id("6f1c2a9e-1111-4222-8333-444455556666"), "6f1c2a9e");
    }
}
