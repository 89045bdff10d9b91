use clap::{Args, Parser, Subcommand};
use gemmatch_api::RestApi;
use gemmatch_core::{BudgetInput, CatalogQuery};
use gemmatch_matching::{RecommendationRequest, Recommender, RecommenderConfig, RequestDefaults};
use gemmatch_storage::CatalogStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Jewelry matching engine driven by preferences and photos
#[derive(Parser, Debug)]
#[command(name = "gemmatch")]
#[command(about = "Match jewelry to shopper preferences and photos", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API
    Serve {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// HTTP API port
        #[arg(long, default_value_t = 8080)]
        http_port: u16,

        /// Tuning file (weights, budgets, limits)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run a single recommendation and print it as JSON
    Recommend {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Tuning file (weights, budgets, limits)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Photo to extract colors from
        #[arg(long)]
        image: Option<PathBuf>,

        #[command(flatten)]
        prefs: PreferenceArgs,
    },
}

#[derive(Args, Debug)]
struct PreferenceArgs {
    #[arg(long)]
    occasion: Option<String>,

    #[arg(long)]
    style: Option<String>,

    /// "low", "medium", "high" or an amount
    #[arg(long)]
    budget: Option<String>,

    #[arg(long)]
    material: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    gender: Option<String>,
}

impl From<PreferenceArgs> for RecommendationRequest {
    fn from(args: PreferenceArgs) -> Self {
        Self {
            occasion: args.occasion,
            style: args.style,
            budget: args.budget.map(BudgetInput::Label),
            material: args.material,
            category: args.category,
            gender: args.gender,
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RecommenderConfig> {
    match path {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Ok(RecommenderConfig::from_json_file(path)?)
        }
        None => Ok(RecommenderConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so `recommend` output stays pipeable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Serve {
            catalog,
            http_port,
            config,
        } => {
            info!("Starting gemmatch v{}", env!("CARGO_PKG_VERSION"));
            let config = load_config(config.as_deref())?;
            let store: Arc<dyn CatalogQuery> = Arc::new(CatalogStore::load(&catalog)?);
            let recommender = Arc::new(Recommender::new(store, config)?);
            info!("HTTP API: http://localhost:{}/", http_port);

            let http_handle = std::thread::spawn(move || {
                let sys = actix_web::rt::System::new();
                sys.block_on(async {
                    if let Err(e) = RestApi::start(recommender, http_port).await {
                        tracing::error!("HTTP server error: {}", e);
                    }
                })
            });

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                }
                _ = tokio::task::spawn_blocking(move || {
                    http_handle.join().ok();
                }) => {
                    info!("HTTP server stopped");
                }
            }

            info!("Shutting down...");
        }
        Command::Recommend {
            catalog,
            config,
            image,
            prefs,
        } => {
            let config = load_config(config.as_deref())?;
            let store = CatalogStore::load(&catalog)?;
            let recommender = Recommender::new(store, config)?;

            let image = match image {
                Some(path) => Some(std::fs::read(&path)?),
                None => None,
            };
            let defaults = if image.is_some() {
                RequestDefaults::analyze()
            } else {
                RequestDefaults::suggest()
            };

            let request = RecommendationRequest::from(prefs);
            let result = recommender.handle(&request, &defaults, image.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
