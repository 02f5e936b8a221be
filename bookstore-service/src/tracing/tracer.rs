use std::error::Error;

use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    trace::{SdkTracer, SdkTracerProvider},
};
use opentelemetry_stdout::SpanExporter;
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, fmt::format::Format, prelude::*, registry::LookupSpan};

use crate::config::{DistributionConfig, TracingConfig};

const TRACER_NAME: &str = "bookstore_service";

/// Tracer configuration and initialization.
///
/// Handles setting up tracing for the bookstore service.
pub struct Tracer;

impl Tracer {
    /// Installs the tracer selected by the configuration.
    ///
    /// `Memory` installs nothing, so events are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if tracer initialization fails.
    pub fn install(
        tracing: &TracingConfig,
        distribution: &DistributionConfig,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        match tracing {
            TracingConfig::Memory => Ok(()),
            TracingConfig::Stdout => Self::install_stdout(distribution),
        }
    }

    /// Installs stdout tracing with OpenTelemetry.
    ///
    /// Events are printed by a `fmt` layer, and spans are bridged into an
    /// OpenTelemetry provider that exports them to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if tracer initialization fails.
    pub fn install_stdout(
        distribution: &DistributionConfig,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let mut resource = Resource::builder().with_service_name(distribution.name.clone());
        if let Some(version) = distribution.version.clone() {
            resource = resource.with_attribute(KeyValue::new("version", version));
        }

        let provider = SdkTracerProvider::builder()
            .with_resource(resource.build())
            .with_simple_exporter(SpanExporter::default())
            .build();
        let span_layer = Self::span_layer(&provider);
        global::set_tracer_provider(provider);

        let fmt_layer = tracing_subscriber::fmt::layer().event_format(Format::default().pretty());

        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(span_layer)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }

    /// Bridges `tracing` spans into the given OpenTelemetry provider.
    pub fn span_layer<S>(provider: &SdkTracerProvider) -> OpenTelemetryLayer<S, SdkTracer>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(TRACER_NAME))
    }
}
