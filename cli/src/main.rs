//! CLI entrypoint for Wiz WEATHER
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wiz_application::{ChatSession, RunAgentUseCase, SessionWorker};
use wiz_domain::AgentDefinition;
use wiz_infrastructure::{
    ConfigIssue, ConfigLoader, FileConfig, JsonSchemaToolConverter, JsonlConversationLogger,
    LiveWeatherLookup, LocalToolExecutor, OpenAiCompatGateway, Severity, weather_tool_spec,
};
use wiz_presentation::config::expand_home;
use wiz_presentation::{ChatRepl, Cli, ConsoleChatOutput, ReplConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Before anything reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", ConfigLoader::default_toml()?);
        return Ok(());
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    apply_cli_overrides(&mut config, &cli);

    let _log_guard = init_logging(cli.verbose, config.logging.log_file.as_deref())?;
    info!("Starting Wiz WEATHER");

    check_config(&config.validate())?;

    let Some(model_key) = config.model.resolve_api_key() else {
        bail!(
            "No model API key found. Set {} (or model.api_key in the config file).",
            config.model.api_key_env
        );
    };
    let weather_key = config.weather.resolve_api_key();
    if weather_key.is_none() {
        warn!(
            "{} is not set; live weather lookups are unavailable",
            config.weather.api_key_env
        );
    }

    let run_config = config.run_config();
    run_config.model.validate()?;
    info!(
        "Using model {} at {}",
        run_config.model.model, run_config.model.base_url
    );

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiCompatGateway::new(&run_config.model, model_key)?);
    let lookup = Arc::new(
        LiveWeatherLookup::new(
            &config.weather.endpoint,
            weather_key,
            Duration::from_secs(config.weather.timeout_secs),
        )
        .context("Failed to create weather HTTP client")?,
    );
    let executor = Arc::new(LocalToolExecutor::new(lookup));
    let agent = AgentDefinition::wiz_weather(weather_tool_spec(), run_config.model.clone());

    let mut runner = RunAgentUseCase::new(
        agent,
        gateway,
        executor,
        Arc::new(JsonSchemaToolConverter),
    );
    if !run_config.tracing_disabled
        && let Some(logger) = open_transcript(config.logging.conversation_log.as_deref())
    {
        info!("Writing conversation transcript to {}", logger.path().display());
        runner = runner.with_conversation_logger(Arc::new(logger));
    }

    let mut repl_config = ReplConfig::default().with_history_file(config.repl.history_file.as_deref());
    repl_config.show_tool_activity = config.repl.show_tool_activity;
    if cli.quiet {
        repl_config = repl_config.quiet();
    }
    let output = Arc::new(ConsoleChatOutput::new(&repl_config));
    let mut session = ChatSession::new(runner, run_config, output);

    // Single question mode
    if let Some(question) = cli.question {
        session.on_message(&question).await?;
        return Ok(());
    }

    let handle = SessionWorker::spawn(session);
    ChatRepl::new(handle, repl_config).run().await?;

    Ok(())
}

/// CLI flags sit above every config source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.model.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.model.base_url = base_url.clone();
    }
}

/// Print every issue; fail if any is an error.
fn check_config(issues: &[ConfigIssue]) -> Result<()> {
    let mut errors = 0;
    for issue in issues {
        match issue.severity {
            Severity::Error => {
                errors += 1;
                eprintln!("config error: {}", issue);
            }
            Severity::Warning => eprintln!("config warning: {}", issue),
        }
    }
    if errors > 0 {
        bail!("Invalid configuration ({} error(s))", errors);
    }
    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// Logs go to stderr, and additionally to `log_file` when configured. The
/// returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, log_file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let path = expand_home(path);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let Some(file_name) = path.file_name() else {
                bail!("logging.log_file must name a file: {}", path.display());
            };
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn open_transcript(path: Option<&str>) -> Option<JsonlConversationLogger> {
    let path = match path {
        Some(p) => expand_home(p),
        None => JsonlConversationLogger::default_path()?,
    };
    JsonlConversationLogger::open(path)
}
