use std::io;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use temperature_grid::app::Application;
use temperature_grid::config::{parse_cities, Config};
use temperature_grid::shell::Shell;

#[derive(Parser)]
#[command(name = "temperature-grid")]
#[command(about = "Yearly temperature readings by city in a dense grid", long_about = None)]
struct Cli {
    /// Comma-separated city list (overrides GRID_CITIES)
    #[arg(long, global = true)]
    cities: Option<String>,

    /// First year of the grid, inclusive (overrides GRID_START_YEAR)
    #[arg(long, global = true)]
    start_year: Option<i32>,

    /// Last year of the grid, inclusive (overrides GRID_END_YEAR)
    #[arg(long, global = true)]
    end_year: Option<i32>,

    /// Start with an empty grid instead of the sample records
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Interactive numbered menu on stdin/stdout (default)
    Shell,
    /// Serve the grid over HTTP
    Serve {
        /// Port to listen on (overrides SERVER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(cities) = &self.cities {
            config.cities = parse_cities(cities);
        }
        if let Some(start_year) = self.start_year {
            config.start_year = start_year;
        }
        if let Some(end_year) = self.end_year {
            config.end_year = end_year;
        }
        if self.no_seed {
            config.seed_sample_data = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Command::Shell);

    // Logs go to stderr so they never interleave with the menu on stdout
    let default_filter = match command {
        Command::Shell => "warn",
        Command::Serve { .. } => "info,temperature_grid=debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    dotenvy::dotenv().ok();

    let mut config = Config::from_env()?;
    cli.apply(&mut config);
    info!("Starting temperature grid with config: {:?}", config);

    match command {
        Command::Shell => {
            let grid = config.build_grid()?;
            let mut shell = Shell::new(grid, io::stdin().lock(), io::stdout().lock());
            shell.run()?;
        }
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            let application = Application::build(config).await?;
            application.run_until_stopped().await?;
        }
    }

    Ok(())
}
