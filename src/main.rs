use clap::Parser;
use sensor_consumer::config::file_config::{FileConfig, DEFAULT_CONFIG_PATH};
use sensor_consumer::domain::ports::ServiceConsumer;
use sensor_consumer::utils::{logger, validation::Validate};
use sensor_consumer::{ConsumerEngine, HttpConsumer};

#[derive(Parser)]
#[command(name = "sensor-consumer")]
#[command(about = "Consume a sensor reading from an orchestrated service provider")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Override the orchestrator endpoint from config
    #[arg(long)]
    orch_uri: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show the effective configuration and request form without sending anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting sensor-consumer");
    tracing::info!("Loading configuration from: {}", args.config);

    let mut config = FileConfig::load_or_default(&args.config);

    if let Some(orch_uri) = args.orch_uri {
        tracing::info!("Orchestrator endpoint overridden to: {}", orch_uri);
        config.orch_uri = orch_uri;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let consumer = HttpConsumer::new(config.clone());

    if args.dry_run {
        display_config_summary(&config);
        let form = consumer.compile_request();
        println!("Request form: {}", serde_json::to_string_pretty(&form)?);
        return Ok(());
    }

    let engine = ConsumerEngine::new(consumer);

    match engine.run().await {
        Ok(reading) => {
            tracing::info!("Consumer run completed successfully");
            println!("The indoor temperature is {} degrees celsius.", reading);
        }
        Err(e) => {
            tracing::error!("Consumer run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn display_config_summary(config: &FileConfig) {
    println!("Configuration Summary:");
    println!("  Orchestrator: {}", config.orch_uri);
    println!(
        "  Requester: {} ({})",
        config.requester.system_name, config.requester.address
    );
    println!("  Service: {}", config.service.definition);
    println!("  Interfaces: {}", config.service.interfaces.join(", "));
    println!(
        "  Flags: override_store={}, matchmaking={}",
        config.flags.override_store, config.flags.matchmaking
    );
    println!();
}
