use anyhow::{Context, Result};
use clap::Parser;
use concierge::{script, ui, util, App, Cli, Config};
use std::fs::{self, OpenOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_scripts {
        for name in script::builtin_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    util::init_data_dir(cli.data_dir.clone());

    // Initialize logging to file (~/.concierge/logs/concierge.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // The terminal belongs to the UI
        .init();

    let mut config = Config::load();
    let plan = cli
        .plan(&config.playback)
        .context("Failed to load script")?;

    if cli.check {
        print!("{}", plan.summary());
        return Ok(());
    }

    config.playback.timing = plan.timing;

    ui::install_panic_hook();
    let mut app = App::new(config, plan.script, plan.mode);
    app.run().await
}
