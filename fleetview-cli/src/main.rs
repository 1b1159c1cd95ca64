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

//! Fleetview CLI
//!
//! Command-line front end for the fleet observability dashboard.

mod render;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use fleetview_core::{
    standard_catalog, DashboardConfig, Environment, FeedbackLog, FeedbackStatus, FilterState,
    ModelName, PricingTable, PricingTier, Runtime, Selection, TimeRange, WeightTables,
};
use fleetview_query::{paginate, status_mismatches, DashboardEngine};
use fleetview_telemetry::{init_telemetry, Metrics};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fleetview")]
#[command(about = "Fleetview - AI agent fleet observability dashboard", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,

    /// Output as JSON (machine-readable)
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct FilterArgs {
    /// Environment (Dev, QA, Prod)
    #[arg(long = "env")]
    environment: Option<Environment>,

    /// Model filter, repeatable; omit for all models
    #[arg(long = "model")]
    models: Vec<ModelName>,

    /// Platform filter, repeatable; omit for all platforms
    #[arg(long = "platform")]
    platforms: Vec<Runtime>,

    /// Time range (1h, 24h, 1w, 1m, custom)
    #[arg(long = "range")]
    time_range: Option<TimeRange>,

    /// Inventory page (1-based)
    #[arg(long, default_value = "1")]
    page: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the full dashboard
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the agent inventory only
    Agents {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List model pricing
    Pricing {
        /// TOML file with extra or replacement `[[rows]]`
        #[arg(long)]
        seed: Option<PathBuf>,

        /// Only show rows of this tier (pro, flash, lite)
        #[arg(long)]
        tier: Option<PricingTier>,
    },

    /// List feedback
    Feedback {
        /// Submit a new entry before listing
        #[arg(long)]
        submit: Option<String>,

        /// Only show entries in this state (review, acknowledged, resolved)
        #[arg(long)]
        status: Option<FeedbackStatus>,
    },

    /// Validate weight tables and configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let telemetry = init_telemetry(
        &config.service_name,
        config.otlp_endpoint.as_deref(),
        cli.json,
        level,
    )
    .context("Failed to initialise telemetry")?;

    let outcome = run(&cli, &config, &telemetry.metrics);
    if let Err(e) = &outcome {
        error!(error = %e, "command failed");
    }

    telemetry.shutdown()?;
    outcome
}

fn run(cli: &Cli, config: &DashboardConfig, metrics: &Metrics) -> Result<()> {
    match &cli.command {
        Commands::Dashboard { filters } => {
            let state = filter_state(config, filters);
            let engine = DashboardEngine::standard();

            let started = Instant::now();
            let data = engine.compute_dashboard_data(state.selection());
            metrics.record_computation(
                state.selection().environment.as_str(),
                state.selection().time_range.as_str(),
                started.elapsed().as_secs_f64() * 1000.0,
                data.agents.len(),
            );

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&data)?);
                return Ok(());
            }

            let alert = data.error_alert(config.error_alert_threshold);
            let spike_index = engine.tables().spike_index(state.selection().time_range);
            let spike_at = render::spike_row(&data.usage_series, spike_index);
            let page = paginate(&data.agents, filters.page, config.page_size);

            println!("{}", state.summary());
            println!();
            println!("KPIs");
            print!("{}", render::kpi_strip(&data));
            println!();
            println!("Token usage & cost (spike at {})", data.spike_label);
            print!("{}", render::usage_table(&data, spike_at));
            println!();
            println!("Error rate");
            print!("{}", render::error_table(&data, spike_at, alert.as_ref()));
            println!();
            println!("Latency by platform");
            print!("{}", render::latency_table(&data.latency_by_platform));
            println!();
            println!("Runtime distribution");
            print!("{}", render::distribution(&data.platform_distribution));
            println!();
            println!("Agents");
            print!("{}", render::inventory(&page, &config.status_thresholds));
        }

        Commands::Agents { filters } => {
            let state = filter_state(config, filters);
            let data = DashboardEngine::standard().compute_dashboard_data(state.selection());
            let mismatches = status_mismatches(&data.agents, &config.status_thresholds);

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "agents": data.agents,
                        "statusMismatches": mismatches,
                    }))?
                );
                return Ok(());
            }

            let page = paginate(&data.agents, filters.page, config.page_size);
            println!("{}", state.summary());
            print!("{}", render::inventory(&page, &config.status_thresholds));
            if !mismatches.is_empty() {
                println!("✗ {} agent(s) with a status that disagrees with their error rate", mismatches.len());
            }
        }

        Commands::Pricing { seed, tier } => {
            let table = PricingTable::with_builtins();
            if let Some(path) = seed {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read pricing seed {:?}", path))?;
                let applied = table
                    .load_toml_str(&content)
                    .with_context(|| format!("Invalid pricing seed {:?}", path))?;
                metrics.record_pricing_edit("load");
                info!(applied, "Applied pricing seed");
            }

            let mut rows = table.list();
            if let Some(tier) = tier {
                rows.retain(|r| r.tier == *tier);
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render::pricing_table(&rows));
            }
        }

        Commands::Feedback { submit, status } => {
            let log = FeedbackLog::seeded(Utc::now());
            if let Some(text) = submit {
                let entry = log.submit(text, Utc::now()).context("Feedback rejected")?;
                metrics.record_feedback_submission();
                if !cli.json {
                    println!("✓ Submitted feedback {}", entry.id);
                }
            }

            let mut entries = log.entries();
            if let Some(status) = status {
                entries.retain(|e| e.status == *status);
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", render::feedback_list(&entries));
            }
        }

        Commands::Check => {
            WeightTables::standard()
                .validate()
                .context("Weight tables are invalid")?;
            DashboardEngine::try_new(WeightTables::standard(), standard_catalog())?;
            config.validate().context("Configuration is invalid")?;

            let mismatches = status_mismatches(standard_catalog(), &config.status_thresholds);
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "weightTables": "ok",
                        "config": "ok",
                        "statusMismatches": mismatches.len(),
                    })
                );
            } else {
                println!("✓ Weight tables valid");
                println!("✓ Configuration valid");
                println!(
                    "  {} catalog agent(s) have an authored status outside their error-rate band",
                    mismatches.len()
                );
            }
        }
    }

    Ok(())
}

/// Config defaults overlaid with command-line filters
fn filter_state(config: &DashboardConfig, args: &FilterArgs) -> FilterState {
    let mut state = FilterState::from_config(config);
    if let Some(environment) = args.environment {
        state.set_environment(environment);
    }
    if let Some(time_range) = args.time_range {
        state.set_time_range(time_range);
    }
    state.set_models(Selection::from_filter(args.models.iter().copied()));
    state.set_platforms(Selection::from_filter(args.platforms.iter().copied()));
    state
}
