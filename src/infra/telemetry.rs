use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let default_directive = logging
        .level
        .parse()
        .map_err(|err| InfraError::telemetry(format!("invalid log level `{}`: {err}", logging.level)))?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "vetrina_page_cache_hit_total",
            Unit::Count,
            "Generated pages served within their revalidation window."
        );
        describe_counter!(
            "vetrina_page_cache_miss_total",
            Unit::Count,
            "Page requests that required fallback generation."
        );
        describe_counter!(
            "vetrina_page_cache_stale_served_total",
            Unit::Count,
            "Stale pages served while background regeneration ran."
        );
        describe_counter!(
            "vetrina_page_regen_fail_total",
            Unit::Count,
            "Background page regenerations that failed and kept the previous page."
        );
        describe_counter!(
            "vetrina_posts_created_total",
            Unit::Count,
            "Posts accepted by the create operation."
        );
        describe_counter!(
            "vetrina_view_increments_total",
            Unit::Count,
            "Accepted view-count increments."
        );
    });
}
