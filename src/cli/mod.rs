// CLI module for pokedex-cache
// Author: kelexine (https://github.com/kelexine)

use clap::{Parser, Subcommand};

/// pokedex-cache - Two-tier Pokémon image cache and custom registry
#[derive(Parser, Debug)]
#[command(name = "pokedex-cache", version, about, long_about = None)]
pub struct Args {
    /// Config file (defaults to ~/.pokedex-cache/config.toml)
    #[arg(long, env = "POKEDEX_CACHE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the cached image URL for a key
    Get {
        key: String,
    },

    /// Cache an image URL for a key
    Put {
        key: String,
        url: String,

        /// Minutes until the entry expires (0 never expires)
        #[arg(long, conflicts_with = "permanent")]
        minutes: Option<u64>,

        /// Never expire the entry
        #[arg(long)]
        permanent: bool,
    },

    /// Mark a name as a custom Pokémon
    Register {
        name: String,
    },

    /// Report whether an id (and optionally a name) is custom
    Classify {
        id: String,

        #[arg(long)]
        name: Option<String>,
    },

    /// Remove every cached image and custom name
    Clear,

    /// Print cache statistics and Prometheus metrics
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put_with_minutes() {
        let args = Args::parse_from(["pokedex-cache", "put", "Pikachu", "https://img/25.png", "--minutes", "5"]);
        assert_eq!(
            args.command,
            Command::Put {
                key: "Pikachu".into(),
                url: "https://img/25.png".into(),
                minutes: Some(5),
                permanent: false,
            }
        );
    }

    #[test]
    fn test_permanent_conflicts_with_minutes() {
        let result = Args::try_parse_from([
            "pokedex-cache", "put", "a", "b", "--minutes", "5", "--permanent",
        ]);
        assert!(result.is_err());
    }
}
