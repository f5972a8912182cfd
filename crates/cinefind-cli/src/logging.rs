//! Tracing subscriber setup.
//!
//! One-shot commands log to stdout. The browser owns the terminal, so its
//! logs go to a daily-rotated file instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log file name prefix (`cinefind.log.YYYY-MM-DD`).
const LOG_FILE_PREFIX: &str = "cinefind.log";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard output with ANSI colors.
    Stdout,
    /// Daily-rotated files in the given directory.
    File(PathBuf),
}

/// Installs the global subscriber.
///
/// `RUST_LOG` controls the filter (default `info`). With the `otel` feature
/// and `OTEL_EXPORTER_OTLP_ENDPOINT` set, spans are also exported over OTLP.
///
/// The returned guard flushes file output on drop and must be kept alive
/// until exit.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init_logging(target: &LogTarget) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, ansi, guard) = match target {
        LogTarget::Stdout => (BoxMakeWriter::new(std::io::stdout), true, None),
        LogTarget::File(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), false, Some(guard))
        }
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    #[cfg(feature = "otel")]
    let registry = {
        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });
        registry.with(otel_layer)
    };

    registry
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let LogTarget::File(dir) = target {
        tracing::info!(dir = %dir.display(), "Logging to file");
    }

    Ok(guard)
}
