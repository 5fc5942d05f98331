mod app;
mod config;
mod game;
mod store;
mod ui;

use clap::Parser;

fn main()
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String>
{
    let config = config::Config::parse();
    config.validate().map_err(|err| err.to_string())?;

    let store = config.open_store();
    log::info!("starting with {} store", store.name());
    let mut app = app::App::new(game::GameSession::new(), store);
    ui::run(&mut app)
}
