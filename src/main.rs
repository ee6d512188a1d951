use clap::Parser;
use creator_valuation::cli::{Cli, Commands};
use creator_valuation::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    creator_valuation::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Simulate(args) => {
            args.execute(&config).await?;
        }
        Commands::MonteCarlo(args) => {
            tracing::info!("Starting Monte Carlo simulation");
            args.execute(&config).await?;
        }
        Commands::BreakEven(args) => {
            args.execute(&config).await?;
        }
        Commands::Diligence(args) => {
            args.execute(&config).await?;
        }
        Commands::Serve(args) => {
            tracing::info!("Starting offer modeling API");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Valuation: rate={}%, share={}%, years={}, offer={}%, band={}%",
                config.valuation.discount_rate_percent,
                config.valuation.revenue_share_percent,
                config.valuation.time_horizon_years,
                config.valuation.offer_factor_percent,
                config.valuation.scenario_band_percent
            );
            println!(
                "  Monte Carlo: iterations={} (max {}), seed={}",
                config.monte_carlo.iterations,
                config.monte_carlo.max_iterations,
                config.monte_carlo.seed
            );
            println!("  Server: {}", config.server.bind_address);
            println!(
                "  Telemetry: {} ({:?})",
                config.telemetry.log_level, config.telemetry.log_format
            );
        }
    }

    Ok(())
}
