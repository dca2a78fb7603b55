use anyhow::{Context, Result};
use clap::Parser;
use object_tiering::{
    adapters::inbound::http::router::{AppState, create_router},
    adapters::outbound::storage::{S3Config, s3::MAX_KEYS_LIMIT},
    app::{
        AppBuilder, AppConfig, PRICE_TABLE_ENV, PRICE_TABLE_ENV_ALT, StorageBackend,
        price_table_from,
    },
    domain::models::TierPolicy,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "object-tiering-server")]
#[command(about = "Tags bucket objects by age tier and reports projected storage savings", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type: memory or s3
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// S3 endpoint override (LocalStack, MinIO); switches to path-style addressing
    #[arg(long, env = "AWS_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 region
    #[arg(long, env = "AWS_REGION", default_value = "ap-southeast-2")]
    s3_region: String,

    /// S3 access key; without a key pair the default AWS credential chain is used
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY")]
    s3_secret_key: Option<String>,

    /// Objects requested per listing page (1 to 1000)
    #[arg(
        long,
        env = "S3_PAGE_SIZE",
        default_value_t = MAX_KEYS_LIMIT,
        value_parser = clap::value_parser!(i32).range(1..=MAX_KEYS_LIMIT as i64)
    )]
    s3_page_size: i32,

    /// Price table, `CLASS=price,...` or a JSON object
    #[arg(long, env = PRICE_TABLE_ENV)]
    price_per_gb: Option<String>,

    #[arg(long, env = PRICE_TABLE_ENV_ALT, hide = true)]
    price_per_gb_alt: Option<String>,

    /// Default age, in days, at which objects become warm
    #[arg(long, env = "DEFAULT_WARM_AFTER_DAYS", default_value = "30")]
    warm_after_days: u32,

    /// Default age, in days, at which objects become archive
    #[arg(long, env = "DEFAULT_ARCHIVE_AFTER_DAYS", default_value = "90")]
    archive_after_days: u32,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => StorageBackend::S3(S3Config {
                endpoint: self.s3_endpoint.clone().filter(|e| !e.is_empty()),
                region: self.s3_region.clone(),
                access_key: self.s3_access_key.clone(),
                secret_key: self.s3_secret_key.clone(),
                page_size: self.s3_page_size,
            }),
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let price_table = price_table_from(
            self.price_per_gb.as_deref(),
            self.price_per_gb_alt.as_deref(),
        )
        .context("Invalid price table")?;

        let default_policy = TierPolicy::new(self.warm_after_days, self.archive_after_days)
            .context("Invalid default tier policy")?;

        Ok(AppConfig {
            storage_backend,
            price_table,
            default_policy,
        })
    }

    fn init_logging(&self) -> Result<()> {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", level)));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting object tiering server");
    info!("Storage backend: {}", cli.storage_backend);

    let config = cli.to_app_config()?;

    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let state = AppState {
        tiering_service: Arc::new(app_services.tiering_service),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
