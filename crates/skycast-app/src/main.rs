//! SkyCast: city weather lookup with a persistent search history.

mod cli;
mod clock;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use skycast_history::{normalize, validate, FileBlob, HistoryError, HistoryStore};
use skycast_weather::{Lang, SessionEvent, Units, WeatherClient, WeatherSession};

use cli::{Cli, Command, HistoryCommand};
use config::SkycastConfig;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = SkycastConfig::load()?;
    let mut store = HistoryStore::open(FileBlob::new(SkycastConfig::history_path()?));

    match cli.command {
        Command::Lookup {
            city,
            units,
            lang,
            watch,
        } => {
            let units = units.unwrap_or(config.units);
            let lang = lang.unwrap_or(config.lang);
            lookup(&config, &mut store, &city, units, lang, watch).await
        }
        Command::History { command } => history(&mut store, command),
    }
}

async fn lookup(
    config: &SkycastConfig,
    store: &mut HistoryStore<FileBlob>,
    city: &str,
    units: Units,
    lang: Lang,
    watch: bool,
) -> Result<()> {
    let city = normalize(city);
    validate(&city)?;

    let client = WeatherClient::new(config.effective_api_key(), units, lang)?;
    let (mut session, mut events) = WeatherSession::new(client);
    session.submit(&city);
    session.join().await;

    let mut tz_offset = None;
    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::Current(Ok((conditions, from_cache))) => {
                store.upsert(&conditions.city)?;
                tz_offset = conditions.tz_offset;
                print!("{}", render::render_current(&conditions, from_cache));
                println!("{}", clock::clock_line(tz_offset));
            }
            SessionEvent::Current(Err(e)) => {
                anyhow::bail!("Could not fetch current conditions: {}", e);
            }
            SessionEvent::Forecast(Ok((daily, _))) => {
                print!("{}", render::render_forecast(&daily, units));
            }
            SessionEvent::Forecast(Err(e)) => {
                tracing::warn!("Forecast unavailable: {}", e);
            }
        }
    }

    println!("{}", render::render_history(store.entries()));

    if watch {
        let _clock = clock::LiveClock::start(tz_offset, |line| {
            print!("\r{}", line);
            let _ = std::io::Write::flush(&mut std::io::stdout());
        });
        tokio::signal::ctrl_c().await?;
        println!();
    }

    Ok(())
}

fn history(store: &mut HistoryStore<FileBlob>, command: HistoryCommand) -> Result<()> {
    let entries = match command {
        HistoryCommand::List => store.entries().to_vec(),
        HistoryCommand::Pin { name } => store.toggle_pin(&name)?,
        HistoryCommand::Rename { old, new } => match store.rename(&old, &new) {
            Ok(entries) => entries,
            Err(HistoryError::Name(e)) => anyhow::bail!("Rename rejected: {}", e),
            Err(e) => return Err(e.into()),
        },
        HistoryCommand::Delete { name } => store.remove(&name)?,
        HistoryCommand::Clear => store.clear()?,
    };

    println!("{}", render::render_history(&entries));
    Ok(())
}
