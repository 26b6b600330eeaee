//! Tracing setup: console logging, plus OTLP export of traces and logs when a
//! collector is configured and reachable.

use crate::config::TelemetryConfig;
use anyhow::Context;
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the OpenTelemetry providers alive; flushes them when dropped.
#[derive(Default)]
pub struct TelemetryGuard {
    providers: Option<(SdkTracerProvider, SdkLoggerProvider)>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some((trace_provider, log_provider)) = self.providers.take() {
            if let Err(e) = trace_provider.shutdown() {
                eprintln!("Failed to shut down trace provider: {e}");
            }
            if let Err(e) = log_provider.shutdown() {
                eprintln!("Failed to shut down log provider: {e}");
            }
        }
    }
}

/// Quick TCP check to see if the collector is up (resolve hostname first).
fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/');

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` (default: `info`).
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer();

    let endpoint = config
        .otlp_endpoint
        .as_deref()
        .filter(|endpoint| collector_reachable(endpoint));

    let Some(endpoint) = endpoint else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        match &config.otlp_endpoint {
            Some(endpoint) => tracing::info!(
                "OpenTelemetry endpoint {} not reachable, using console logging only",
                endpoint
            ),
            None => tracing::debug!(
                "OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only"
            ),
        }
        return Ok(TelemetryGuard::default());
    };

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(config.service_name.clone())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("Failed to create OTLP trace exporter")?;

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let tracer = trace_provider.tracer(config.service_name.clone());
    opentelemetry::global::set_tracer_provider(trace_provider.clone());

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("Failed to create OTLP log exporter")?;

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(OpenTelemetryTracingBridge::new(&log_provider))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        "OpenTelemetry enabled, exporting traces and logs to {} as {}",
        endpoint,
        config.service_name
    );

    Ok(TelemetryGuard {
        providers: Some((trace_provider, log_provider)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_collector_reachable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(collector_reachable(&format!("http://{addr}")));
        assert!(collector_reachable(&format!("http://{addr}/")));
    }

    #[test]
    fn test_collector_unreachable() {
        assert!(!collector_reachable("http://not a host"));
        assert!(!collector_reachable(""));
    }
}
