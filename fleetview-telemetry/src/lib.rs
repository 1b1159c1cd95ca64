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

//! Fleetview telemetry (metrics + tracing + logging).

use opentelemetry::{
    metrics::{Counter, Histogram, Meter, MeterProvider},
    trace::TracerProvider,
    KeyValue,
};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Metrics registry.
pub struct Metrics {
    pub dashboard_computations: Counter<u64>,
    pub compute_latency_ms: Histogram<f64>,
    pub agents_returned: Histogram<u64>,
    pub pricing_edits: Counter<u64>,
    pub feedback_submissions: Counter<u64>,
}

impl Metrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            dashboard_computations: meter
                .u64_counter("fleetview.dashboard.computations")
                .with_description("Total dashboard bundles computed")
                .init(),
            compute_latency_ms: meter
                .f64_histogram("fleetview.dashboard.compute_latency_ms")
                .with_description("Dashboard computation latency in milliseconds")
                .init(),
            agents_returned: meter
                .u64_histogram("fleetview.inventory.agents_returned")
                .with_description("Agents left after filtering")
                .init(),
            pricing_edits: meter
                .u64_counter("fleetview.pricing.edits")
                .with_description("Pricing table mutations")
                .init(),
            feedback_submissions: meter
                .u64_counter("fleetview.feedback.submissions")
                .with_description("Feedback entries submitted")
                .init(),
        }
    }

    pub fn record_computation(
        &self,
        environment: &str,
        time_range: &str,
        latency_ms: f64,
        agent_count: usize,
    ) {
        let attrs = [
            KeyValue::new("environment", environment.to_string()),
            KeyValue::new("time_range", time_range.to_string()),
        ];
        self.dashboard_computations.add(1, &attrs);
        self.compute_latency_ms.record(latency_ms, &attrs);
        self.agents_returned.record(agent_count as u64, &attrs);
    }

    /// `operation` is one of add, update, delete or load
    pub fn record_pricing_edit(&self, operation: &'static str) {
        self.pricing_edits
            .add(1, &[KeyValue::new("operation", operation)]);
    }

    pub fn record_feedback_submission(&self) {
        self.feedback_submissions.add(1, &[]);
    }
}

/// Installed providers plus the metrics registry built on them
pub struct Telemetry {
    pub metrics: Metrics,
    meter_provider: SdkMeterProvider,
}

impl Telemetry {
    /// Flush pending spans and metrics.
    pub fn shutdown(self) -> anyhow::Result<()> {
        self.meter_provider.shutdown()?;
        opentelemetry::global::shutdown_tracer_provider();
        Ok(())
    }
}

/// Initialize telemetry (tracing + metrics).
///
/// `RUST_LOG` wins over `default_level`. Logs go to stderr. Spans and metrics
/// are exported over OTLP only when an endpoint is given.
pub fn init_telemetry(
    service_name: &str,
    otlp_endpoint: Option<&str>,
    json: bool,
    default_level: &str,
) -> anyhow::Result<Telemetry> {
    let resource = opentelemetry_sdk::Resource::new(vec![KeyValue::new(
        "service.name",
        service_name.to_string(),
    )]);

    let tracer_provider = if let Some(endpoint) = otlp_endpoint {
        opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_endpoint(endpoint))
            .with_trace_config(
                opentelemetry_sdk::trace::Config::default().with_resource(resource.clone()),
            )
            .install_batch(opentelemetry_sdk::runtime::Tokio)?
    } else {
        opentelemetry_sdk::trace::TracerProvider::builder().build()
    };
    let tracer = tracer_provider.tracer(service_name.to_string());
    opentelemetry::global::set_tracer_provider(tracer_provider);

    let meter_provider = if let Some(endpoint) = otlp_endpoint {
        opentelemetry_otlp::new_pipeline()
            .metrics(opentelemetry_sdk::runtime::Tokio)
            .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_endpoint(endpoint))
            .with_resource(resource)
            .build()?
    } else {
        SdkMeterProvider::default()
    };
    let meter = meter_provider.meter(service_name.to_string());
    let metrics = Metrics::new(&meter);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(Telemetry {
        metrics,
        meter_provider,
    })
}
