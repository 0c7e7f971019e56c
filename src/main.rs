mod cli;

use clap::Parser;
use cli::menu::Menu;
use cli::Cli;
use historical_temps::{OpenMeteoArchive, ZippopotamGeocoder};
use std::io;

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"));
    if let Some(level) = cli.log_level() {
        logger.filter_level(level);
    }
    logger.init();

    let geocoder = ZippopotamGeocoder::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    Menu::builder()
        .geocoder(&geocoder)
        .archive(OpenMeteoArchive::new())
        .start(cli.start)
        .end(cli.end)
        .input(stdin.lock())
        .output(&mut stdout)
        .build()
        .run()
}
