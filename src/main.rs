use std::{fs::File, io::stdout, path::PathBuf};

use clap::{Parser, Subcommand};
use pill_tabs::{
    config::Config,
    error::Result,
    trace::{self, TraceOptions},
    tui,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pill-tabs")]
#[command(about = "Animated pill indicator for a terminal bottom tab bar")]
struct Cli {
    /// Tab configuration (JSON). Defaults to <config_dir>/pill-tabs/tabs.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Delay before a requested tab becomes the active one, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive tab bar (default)
    Run,
    /// Replay presses without a terminal and print one JSON line per frame
    Trace {
        /// Bar width in cells
        #[arg(long, default_value_t = 60)]
        width: u16,
        /// Tab ids to press, in order
        #[arg(long, value_delimiter = ',')]
        press: Vec<String>,
        /// Frames between consecutive presses
        #[arg(long, default_value_t = 6)]
        frames_between: usize,
    },
}

fn init_tracing() -> Result<()> {
    let log_file = File::create(std::env::temp_dir().join("pill-tabs.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pill_tabs=info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

async fn execute(cli: Cli) -> Result<()> {
    init_tracing()?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(delay) = cli.delay_ms {
        config.propagation_delay_ms = delay;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => tui::run(config).await,
        Commands::Trace {
            width,
            press,
            frames_between,
        } => {
            let options = TraceOptions {
                width,
                presses: press,
                frames_between,
                frame: config.frame_interval(),
            };
            let frames = trace::run(&config, &options);
            trace::write(&frames, stdout().lock())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
