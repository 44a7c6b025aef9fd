// pokedex-cache - Two-tier Pokémon image cache and custom registry
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use pokedex_cache::cli::{Args, Command};
use pokedex_cache::config::AppConfig;
use pokedex_cache::utils::logging;
use pokedex_cache::{cache, metrics, Expiration, PokemonCache};
use std::process::ExitCode;
use tracing::info;

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting pokedex-cache v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the cache and hydrate from the session store
    let cache = cache::global::install(PokemonCache::from_config(&config));

    // Phase 4: Run the requested command
    run(&cache, args.command)
}

fn run(cache: &PokemonCache, command: Command) -> Result<ExitCode> {
    match command {
        Command::Get { key } => match cache.get_image_from_cache(&key) {
            Some(url) => println!("{}", url),
            None => {
                eprintln!("not found: {}", key);
                return Ok(ExitCode::from(1));
            }
        },
        Command::Put {
            key,
            url,
            minutes,
            permanent,
        } => {
            let expiration = if permanent {
                Expiration::Never
            } else {
                Expiration::Minutes(
                    minutes.unwrap_or(cache.settings().default_expiration_minutes),
                )
            };
            cache.cache_image_with_expiration(&key, &url, expiration);
        }
        Command::Register { name } => cache.register_custom(&name),
        Command::Classify { id, name } => {
            let custom = match name.as_deref() {
                Some(name) => cache.is_custom(Some(id.as_str()), name),
                None => cache.is_custom_id(&id),
            };
            println!("{}", if custom { "custom" } else { "canonical" });
        }
        Command::Clear => cache.clear_all(),
        Command::Stats => {
            println!("{}", serde_json::to_string_pretty(&cache.stats())?);
            println!("custom names: {:?}", cache.custom_names());
            print!("{}", metrics::gather_metrics());
        }
    }

    Ok(ExitCode::SUCCESS)
}
