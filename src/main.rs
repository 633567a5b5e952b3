use anyhow::Result;
use clap::Parser;
use flicktui::app::App;
use flicktui::config::Config;
use flicktui::lookup::omdb::OmdbClient;
use flicktui::ui;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Look up movie details by title from your terminal.
#[derive(Parser, Debug)]
#[command(name = "flicktui", version = flicktui::VERSION, about)]
struct Cli {
    /// Pre-fill the search bar with this title.
    #[arg(short, long)]
    query: Option<String>,

    /// Path to the config file (default: platform config dir).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let client = OmdbClient::new(
        config.provider.base_url.clone(),
        config.provider.api_key.clone(),
        Duration::from_secs(config.provider.timeout_secs),
    )?;

    let mut app = App::new(Arc::new(client), cli.query);

    let mut terminal = ui::init()?;
    let result = app.run(&mut terminal).await;
    ui::restore()?;

    result
}
