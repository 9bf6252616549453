//! smartvol entry point.

use std::process;

use clap::Parser;
use smartvol::{app, cli::Cli, tracing_config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    tracing_config::init(cli.verbose)?;

    let volume_change: f64 = match cli.volume_change.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("volume-change needs to be a number between -1 and 1");
            process::exit(1);
        }
    };

    if let Err(e) = app::run(&cli, volume_change).await {
        eprintln!("{e}");
        process::exit(1);
    }

    Ok(())
}
