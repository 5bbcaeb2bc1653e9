use std::fs;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

mod api;
mod app;
mod models;
mod player;
mod theme;
mod ui;

/// Terminal tuner for the radio-browser.info station directory.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opt {
    /// Logging level
    #[clap(long, default_value = "error")]
    level: LevelFilter,

    /// Log file path (for debugging)
    #[clap(long, default_value = ".tdial.log")]
    log_file: String,

    /// Radio browser address
    #[clap(long, default_value = "https://de1.api.radio-browser.info")]
    radio_browser_url: String,

    /// Restrict every search to an ISO 3166-1 country code
    #[clap(long)]
    country_code: Option<String>,

    /// Color palette
    #[clap(long, value_enum, default_value = "dark")]
    theme: theme::Kind,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();

    let log_file = fs::File::create(&opt.log_file).context("can't open log file")?;

    simplelog::WriteLogger::init(opt.level, simplelog::Config::default(), log_file)
        .context("init logger")?;

    let player = player::RodioPlayer::try_default()?;
    let client = api::RadioBrowser::new(&opt.radio_browser_url)?;

    let app = app::App::new(Box::new(player), Arc::new(client), opt.country_code);

    ui::Ui::new(app, opt.theme.palette()).start().await
}
