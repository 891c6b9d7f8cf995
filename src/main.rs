use circle_button::config::{self, Label};
use circle_button::gui::app::{AppInit, AppModel};
use circle_button::sys::runtime;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "circle-button", version, about, long_about = None)]
struct Cli {
    /// Config file to load and watch (defaults to the per-user config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Text shown above the expanded button (overrides the config file)
    #[arg(short = 'l', long)]
    label: Option<String>,

    /// Write the default config file and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = cli.config.map(std::path::absolute).transpose()?;

    if cli.write_default_config {
        let path = config::write_default_config(config_path.as_deref())?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(config_path.as_deref());

    let (tx, rx) = async_channel::bounded(32);

    match config::resolve_path(config_path.as_deref()) {
        Ok(watched) => runtime::start_background_services(watched, tx),
        Err(e) => log::warn!("Config hot reload disabled: {}", e),
    }

    // clap owns the command line, so GTK gets no arguments
    let app = RelmApp::new("org.gjz.circle-button").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        label_override: cli.label.map(Label::new),
        rx,
    });

    Ok(())
}
