use std::path::PathBuf;
use std::process::ExitCode;

use axum::Router;
use clap::{Parser, Subcommand, ValueHint};
use fitstats_rs::config::Config;
use fitstats_rs::error::AppError;
use fitstats_rs::pipeline::{self, parse, AnalysisOptions};
use fitstats_rs::routes;
use fitstats_rs::sink::{self, HttpObjectSink, UuidKeyGenerator};
use fitstats_rs::state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ride analytics from FIT recordings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one FIT file and print the results as JSON on stdout
    Process(ProcessArgs),
    /// Run the HTTP service
    Serve,
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Path to the .fit file to process
    #[arg(long, value_hint = ValueHint::FilePath)]
    fit: PathBuf,

    /// Threshold power in watts; values <= 0 skip power zones
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    ftp: i64,

    /// Upload the time series beneath this identity (needs SINK_ENDPOINT and SINK_BUCKET)
    #[arg(long)]
    identity: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the JSON result, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitstats_rs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let result = match cli.command {
        Command::Process(args) => run_process(args, config).await,
        Command::Serve => serve(config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run_process(args: ProcessArgs, config: Config) -> Result<(), AppError> {
    let bytes = std::fs::read(&args.fit).map_err(|e| {
        AppError::BadRequest(format!("Failed to read {}: {}", args.fit.display(), e))
    })?;

    let activity = parse::decode(&bytes)?;
    let options = AnalysisOptions {
        tolerance: config.simplify_tolerance,
        threshold_power: Some(args.ftp).filter(|ftp| *ftp > 0),
    };
    let analysis = pipeline::analyze(&activity, &options, &UuidKeyGenerator)?;

    if let Some(identity) = args.identity.as_deref() {
        let uploaded = match HttpObjectSink::from_config(&config) {
            Ok(store) => {
                sink::upload_payload(&store, identity, &analysis.timeseries_key, &analysis.payload())
                    .await
            }
            Err(err) => Err(err),
        };
        if let Err(err) = uploaded {
            tracing::warn!("Failed to upload time series: {}", err);
        }
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&analysis)
    } else {
        serde_json::to_string(&analysis)
    }
    .map_err(|e| AppError::Internal(format!("Failed to marshal output: {}", e)))?;

    println!("{}", json);
    Ok(())
}

async fn serve(config: Config) -> Result<(), AppError> {
    let addr = format!("0.0.0.0:{}", config.port);
    let max_file_size = config.max_file_size;
    let cache_ttl = config.cache_ttl;
    let state = AppState::new(config);

    let eviction_state = state.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
            eviction_state.evict_expired(cache_ttl);
        }
    });

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::process::router())
        .merge(routes::timeseries::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("fitstats-rs listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Process: POST http://{}/api/process", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))
}
