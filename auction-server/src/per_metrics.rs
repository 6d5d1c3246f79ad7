use {
    crate::config::RunOptions,
    anyhow::Result,
    axum::{
        routing::get,
        Router,
    },
    axum_prometheus::{
        metrics,
        metrics_exporter_prometheus::{
            Matcher,
            PrometheusBuilder,
            PrometheusHandle,
        },
    },
    std::{
        fmt::Debug,
        time::Instant,
    },
    tokio_util::sync::CancellationToken,
    tracing::{
        field::{
            Field,
            Visit,
        },
        span::{
            Attributes,
            Record,
        },
        Id,
        Metadata,
    },
    tracing_subscriber::{
        layer::Context,
        Layer,
    },
};

pub const DURATION_SECONDS_SUFFIX: &str = "_duration_seconds";
pub const DURATION_SECONDS_BUCKETS: &[f64; 14] = &[
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
];

/// Timing and labels collected for a span while it is open.
#[derive(Debug, Clone)]
struct SpanMetrics {
    category:   String,
    name:       String,
    result:     String,
    started_at: Instant,
}

impl SpanMetrics {
    fn new(name: &str) -> Self {
        Self {
            category:   "unknown".to_string(),
            name:       name.to_string(),
            result:     "unknown".to_string(),
            started_at: Instant::now(),
        }
    }

    fn labels(&self) -> [(&'static str, String); 2] {
        [("name", self.name.clone()), ("result", self.result.clone())]
    }
}

impl Visit for SpanMetrics {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "result" {
            self.result = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "category" => self.category = value.to_string(),
            "name" => self.name = value.to_string(),
            "result" => self.result = value.to_string(),
            _ => {}
        }
    }
}

/// Turns spans with a `metrics` target into a `<category>_duration_seconds` histogram and a
/// `<category>_total` counter, labelled by `name` and `result`.
pub struct MetricsLayer;

/// Spans are only measured when their target starts with `metrics`. With
/// `check_tracing_enabled` they must also declare a `tracing_enabled` field.
pub fn is_metrics(metadata: &Metadata, check_tracing_enabled: bool) -> bool {
    let tracing_enabled = !check_tracing_enabled
        || metadata
            .fields()
            .iter()
            .any(|field| field.name() == "tracing_enabled");
    tracing_enabled && metadata.target().starts_with("metrics")
}

impl<S> Layer<S> for MetricsLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            tracing::error!(span_id = ?id, "Span not found");
            return;
        };
        let mut data = SpanMetrics::new(span.metadata().name());
        attrs.record(&mut data);
        span.extensions_mut().replace(data);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            tracing::error!(span_id = ?id, "Span not found");
            return;
        };
        let mut extensions = span.extensions_mut();
        match extensions.get_mut::<SpanMetrics>() {
            Some(data) => values.record(data),
            None => {
                let mut data = SpanMetrics::new(span.metadata().name());
                values.record(&mut data);
                extensions.replace(data);
            }
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            tracing::error!(span_id = ?id, "Span not found");
            return;
        };
        let extensions = span.extensions();
        let Some(data) = extensions.get::<SpanMetrics>() else {
            tracing::warn!(span_id = ?id, "No metrics recorded for span");
            return;
        };
        let labels = data.labels();
        metrics::histogram!(
            format!("{}{}", data.category, DURATION_SECONDS_SUFFIX),
            &labels
        )
        .record(data.started_at.elapsed().as_secs_f64());
        metrics::counter!(format!("{}_total", data.category), &labels).increment(1);
    }
}

/// Installs the global Prometheus recorder that the `metrics` macros report to.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    Ok(PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix(DURATION_SECONDS_SUFFIX.to_string()),
            DURATION_SECONDS_BUCKETS,
        )?
        .install_recorder()?)
}

pub async fn start_metrics(
    run_options: RunOptions,
    metrics_recorder: PrometheusHandle,
    exit_token: CancellationToken,
) -> Result<()> {
    tracing::info!(metrics_addr = %run_options.server.metrics_addr, "Starting Metrics Server...");

    let app = Router::new();
    let app = app.route("/metrics", get(|| async move { metrics_recorder.render() }));

    let listener = tokio::net::TcpListener::bind(&run_options.server.metrics_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            exit_token.cancelled().await;
            tracing::info!("Shutting down metrics server...");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        tracing_subscriber::{
            filter,
            layer::SubscriberExt,
        },
    };

    #[test]
    fn test_metrics_spans_are_recorded() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let subscriber = tracing_subscriber::registry().with(
            MetricsLayer.with_filter(filter::filter_fn(|metadata| is_metrics(metadata, true))),
        );

        metrics::with_local_recorder(&recorder, || {
            tracing::subscriber::with_default(subscriber, || {
                let span = tracing::info_span!(
                    target: "metrics",
                    "db_get_auction",
                    category = "db_queries",
                    result = "success",
                    name = "get_auction",
                    tracing_enabled = true,
                );
                span.record("result", "error");
                drop(span);
                tracing::info_span!("db_untracked", category = "db_queries").in_scope(|| {});
            });
        });

        let rendered = handle.render();
        assert!(rendered.contains("db_queries_total{name=\"get_auction\",result=\"error\"} 1"));
        assert!(!rendered.contains("db_untracked"));
    }
}
