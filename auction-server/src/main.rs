use {
    anyhow::Result,
    clap::Parser,
    per_metrics::{
        is_metrics,
        MetricsLayer,
    },
    server::start_server,
    std::io::IsTerminal,
    tracing_subscriber::{
        filter::{
            self,
            LevelFilter,
        },
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
        Layer,
    },
};

mod api;
mod auction;
mod config;
mod kernel;
mod per_metrics;
mod server;
mod state;

fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    let is_terminal = std::io::stderr().is_terminal();
    let compact_layer = is_terminal.then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_file(false)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_ansi(true)
            .with_filter(env_filter())
    });
    let json_layer = (!is_terminal).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_file(false)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .with_filter(env_filter())
    });

    tracing_subscriber::registry()
        .with(MetricsLayer.with_filter(filter::filter_fn(|metadata| is_metrics(metadata, true))))
        .with(compact_layer)
        .with(json_layer)
        .try_init()?;

    // Parse the command line arguments with clap, will exit automatically on `--help` or
    // with invalid arguments.
    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
    }
}
