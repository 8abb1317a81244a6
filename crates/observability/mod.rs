mod config;

use anyhow::Result;
use config::ObservabilityConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global tracing subscriber for `component`.
///
/// Log level comes from `RUST_LOG`, then `LOG_LEVEL`, then `info`.
pub fn init_observability(component: &str) -> Result<()> {
    let config = ObservabilityConfig::from_env(component);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive.as_str()));

    // Local time so `TZ=America/Bogota` shows `-05:00` in logs.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    info!(
        service = %config.service_context.service_name,
        environment = %config.service_context.environment,
        component = %config.service_context.component,
        "Observability initialized"
    );

    Ok(())
}
