use clap::{Parser, Subcommand};
use skycast_weather::{Lang, Units};

#[derive(Debug, Parser)]
#[command(name = "skycast", about = "City weather lookup with a local search history", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up current conditions and the 5-day forecast for a city
    Lookup {
        /// City name, optionally with a country code ("Tijuana, MX")
        city: String,

        /// Measurement units (metric or imperial)
        #[arg(long)]
        units: Option<Units>,

        /// Description language (es or en)
        #[arg(long)]
        lang: Option<Lang>,

        /// Keep a live destination clock running until Ctrl-C
        #[arg(long)]
        watch: bool,
    },

    /// Manage the saved search history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// Show saved searches, pinned first
    List,
    /// Pin a saved search, or unpin it if already pinned
    Pin { name: String },
    /// Rename a saved search, merging into the target if it already exists
    Rename { old: String, new: String },
    /// Remove a saved search
    Delete { name: String },
    /// Remove all saved searches
    Clear,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_lookup_with_options() {
        let cli = Cli::try_parse_from([
            "skycast", "lookup", "Tijuana, MX", "--units", "imperial", "--lang", "en",
        ])
        .unwrap();
        match cli.command {
            Command::Lookup { city, units, lang, watch } => {
                assert_eq!(city, "Tijuana, MX");
                assert_eq!(units, Some(Units::Imperial));
                assert_eq!(lang, Some(Lang::En));
                assert!(!watch);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_lookup_defaults_come_from_config_not_cli() {
        let cli = Cli::try_parse_from(["skycast", "lookup", "Lima"]).unwrap();
        match cli.command {
            Command::Lookup { units, lang, .. } => {
                assert_eq!(units, None);
                assert_eq!(lang, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_units_rejected() {
        assert!(Cli::try_parse_from(["skycast", "lookup", "Lima", "--units", "kelvin"]).is_err());
    }

    #[test]
    fn test_history_subcommands() {
        let cli = Cli::try_parse_from(["skycast", "history", "rename", "Tokyo", "tijuana"]).unwrap();
        match cli.command {
            Command::History {
                command: HistoryCommand::Rename { old, new },
            } => {
                assert_eq!(old, "Tokyo");
                assert_eq!(new, "tijuana");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["skycast", "history", "clear"]).is_ok());
        assert!(Cli::try_parse_from(["skycast", "history", "pin"]).is_err());
    }
}
