use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tweet_sentiment::analyzer::{LexiconScorer, DEFAULT_THRESHOLD};
use tweet_sentiment::config::{load_config, AppConfig, Credentials, RunConfig, SourceConfig};
use tweet_sentiment::model::ConfigError;
use tweet_sentiment::pipeline::{Pipeline, DEFAULT_LIMIT};
use tweet_sentiment::source::TwitterSource;
use tweet_sentiment::storage::write_report;

#[derive(Parser, Debug)]
#[command(name = "tweet-sentiment", version)]
#[command(about = "Analyse tweet sentiment for a query and write it to a CSV file", long_about = None)]
struct Cli {
    /// Search term for which sentiment is to be computed
    query: String,

    /// Filepath for output csv file
    outfile: PathBuf,

    /// Maximum number of tweets to be analysed
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = parse_limit)]
    limit: usize,

    /// Polarity a tweet must exceed to be labelled positive
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    threshold: f64,

    /// JSON settings file for the post source
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search language, overrides the settings file
    #[arg(long)]
    lang: Option<String>,
}

fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("limit must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn build_config(cli: Cli) -> Result<AppConfig, ConfigError> {
    let source = match &cli.config {
        Some(path) => load_config(path)?,
        None => SourceConfig::default(),
    }
    .with_language(cli.lang)?;
    let run = RunConfig::new(cli.query, cli.outfile, cli.limit, cli.threshold)?;
    let credentials = Credentials::from_env()?;
    Ok(AppConfig { credentials, source, run })
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let cli = Cli::parse();

    // Credentials and settings are checked before any network call
    let config = match build_config(cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(2);
        }
    };

    let scorer = match &config.source.lexicon_path {
        Some(path) => match LexiconScorer::from_file(path) {
            Ok(scorer) => scorer,
            Err(e) => {
                error!("Lexicon load error: {}", e);
                eprintln!("Configuration error: {}", e);
                return ExitCode::from(2);
            }
        },
        None => LexiconScorer::new(),
    };

    let source = match TwitterSource::new(config.credentials.clone(), &config.source) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize post source: {}", e);
            eprintln!("Unable to initialize post source: {}", e);
            return ExitCode::from(3);
        }
    };

    let pipeline = Pipeline::new(&source, &scorer).with_language(config.source.language.as_str());
    let run = &config.run;
    let rows = match pipeline.run(&run.query, run.limit, run.threshold).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Retrieval failed: {}", e);
            eprintln!("Unable to fetch posts for {:?}: {}", run.query, e);
            return ExitCode::from(3);
        }
    };

    if let Err(e) = write_report(&run.outfile, &rows) {
        error!("Report write failed: {:?}", e);
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("Analysed {} posts for {:?}", rows.len(), run.query);
    ExitCode::SUCCESS
}
