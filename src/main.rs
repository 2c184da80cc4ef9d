use calorie_vision::error::ImageDecodeError;
use calorie_vision::pipeline::orchestration::service::into_app_error;
use calorie_vision::{
    AnalysisRequest, AnalysisServiceBuilder, AppError, Configuration, ImagePayload, ModelRegistry,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower::{Service, ServiceExt};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "calorie-vision",
    about = "Estimate food and nutrition from photos"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one or more images and print a JSON result for each
    Analyze {
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Seed for reproducible fallback picks and nutrition jitter
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the recognition model snapshot
    Info,
}

fn init_logging(configuration: &Configuration) {
    tracing_subscriber::fmt()
        .with_max_level(configuration.max_log_level())
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AppError::Service(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut configuration = Configuration::load(cli.config.as_deref())?;
    if let Command::Analyze {
        seed: Some(seed), ..
    } = &cli.command
    {
        configuration = configuration.with_random_seed(*seed);
    }
    init_logging(&configuration);

    let configuration = Arc::new(configuration);
    let registry = Arc::new(ModelRegistry::from_configuration(configuration.clone()));
    let model = registry.get()?;

    match cli.command {
        Command::Info => print_json(&model.info()),
        Command::Analyze { images, .. } => {
            let mut service = AnalysisServiceBuilder::new(registry, configuration).build();
            let total = images.len();
            let mut failed = 0;

            for path in images {
                let result = match tokio::fs::read(&path).await {
                    Ok(bytes) => {
                        let request = AnalysisRequest::new(ImagePayload::Bytes(bytes));
                        info!("Analyzing {} as request {}", path.display(), request.request_id);
                        match service.ready().await {
                            Ok(ready) => ready.call(request).await.map_err(into_app_error),
                            Err(e) => Err(into_app_error(e)),
                        }
                    }
                    Err(e) => Err(AppError::ImageDecode(ImageDecodeError::Io(e))),
                };

                match result {
                    Ok(analysis) => print_json(&analysis)?,
                    Err(e) => {
                        warn!("Failed to analyze {}: {}", path.display(), e);
                        failed += 1;
                    }
                }
            }

            if failed > 0 {
                return Err(AppError::Service(format!(
                    "{} of {} images could not be analyzed",
                    failed, total
                )));
            }
            Ok(())
        }
    }
}
