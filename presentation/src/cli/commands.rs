//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for wiz-weather
#[derive(Parser, Debug)]
#[command(name = "wiz-weather")]
#[command(author, version, about = "Wiz WEATHER - a weather and climate chat assistant")]
#[command(long_about = r#"
Wiz WEATHER answers weather and climate questions. It can look up live
conditions for any city and explain how weather patterns form.

Without a question it starts an interactive chat. With a question it
answers once and exits.

API keys are read from the environment (a .env file is loaded first):
  GEMINI_API_KEY    hosted model (required)
  WEATHER_API_KEY   live weather lookups (optional)

Configuration files are loaded from (in priority order):
1. WIZ_* environment variables (e.g. WIZ_MODEL__MODEL)
2. --config <path>     Explicit config file
3. ./wiz-weather.toml  Project-level config
4. ~/.config/wiz-weather/config.toml   Global config

Example:
  wiz-weather "What's the weather in Lahore?"
  wiz-weather --model gemini-2.5-flash
"#)]
pub struct Cli {
    /// Ask a single question and exit (starts a chat when omitted)
    pub question: Option<String>,

    /// Model id to use (overrides config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// OpenAI-compatible base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the spinner and tool activity lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    pub print_default_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_shot_question() {
        let cli = Cli::parse_from(["wiz-weather", "-vv", "--model", "gemini-2.5-flash", "Weather in Oslo?"]);
        assert_eq!(cli.question.as_deref(), Some("Weather in Oslo?"));
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_chat_mode_without_question() {
        let cli = Cli::parse_from(["wiz-weather", "--no-config", "-q"]);
        assert!(cli.question.is_none());
        assert!(cli.no_config);
        assert!(cli.quiet);
    }
}
