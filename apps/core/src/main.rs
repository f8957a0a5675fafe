// TruthLens CLI entry point
// All command output is JSON on stdout; logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use truthlens_core::config::AppConfig;
use truthlens_core::database;
use truthlens_core::detector::{AuthenticityAnalyzer, Category, LanguageTag, RuleTable};
use truthlens_core::fs_manager::PortablePathManager;
use truthlens_core::remote::{AnalysisMode, GeminiClassifier, HybridAnalyzer, RemoteClassifier};
use truthlens_core::telemetry;

fn parse_language(s: &str) -> Result<LanguageTag, String> {
    s.parse()
}

fn parse_mode(s: &str) -> Result<AnalysisMode, String> {
    s.parse()
}

/// TruthLens - offline fake-news heuristics for English, Russian and Kazakh
#[derive(Parser, Debug)]
#[command(name = "truthlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a text (argument, --file, or stdin)
    Check {
        /// Text to classify
        text: Option<String>,

        /// Read the text from a file
        #[arg(long, short = 'f', conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Language hint: en, ru, kk (skips detection)
        #[arg(long, value_parser = parse_language)]
        lang: Option<LanguageTag>,

        /// Ask the remote model first, falling back to the local detector
        #[arg(long)]
        remote: bool,

        /// Remote analysis depth: quick or deep
        #[arg(long, default_value = "quick", value_parser = parse_mode)]
        mode: AnalysisMode,

        /// Do not store the result in the history
        #[arg(long)]
        no_history: bool,

        /// Print the full evidence breakdown of the local detector
        #[arg(long, conflicts_with = "remote")]
        explain: bool,
    },

    /// Summary of the stored history
    Stats,

    /// Stored classifications, newest first
    History {
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Delete the stored history
    Clear,

    /// Replace the history with sample records
    Demo,

    /// List the loaded rules
    Rules {
        #[arg(long, value_parser = parse_language)]
        lang: Option<LanguageTag>,
    },
}

#[derive(Serialize)]
struct RuleListing<'a> {
    id: &'a str,
    category: Category,
    language: LanguageTag,
    weight: f64,
    pattern: &'a str,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_rules(config: &AppConfig) -> Result<RuleTable> {
    let table = match &config.rules_path {
        Some(path) => RuleTable::from_json_file(path)?,
        None => RuleTable::builtin()?,
    };
    Ok(table)
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("cannot read stdin")?;
    Ok(buffer)
}

async fn open_history(config: &AppConfig) -> Result<sqlx::SqlitePool> {
    if let Err(e) = PortablePathManager::init() {
        warn!("Failed to initialize data directory: {}", e);
    }
    let pool = database::init_db(&config.db_path)
        .await
        .with_context(|| format!("cannot open history at {}", config.db_path.display()))?;
    Ok(pool)
}

#[allow(clippy::too_many_arguments)]
async fn check(
    config: &AppConfig,
    text: Option<String>,
    file: Option<PathBuf>,
    lang: Option<LanguageTag>,
    remote: bool,
    mode: AnalysisMode,
    no_history: bool,
    explain: bool,
) -> Result<()> {
    let text = read_input(text, file)?;
    let analyzer = AuthenticityAnalyzer::new(Arc::new(load_rules(config)?), config.classifier()?)?;

    let result = if explain {
        let analysis = analyzer.analyze(&text, lang)?;
        print_json(&analysis.report(analyzer.config()))?;
        analysis.result
    } else if remote {
        let remote_model: Option<Arc<dyn RemoteClassifier>> = match &config.remote {
            Some(remote_config) => Some(Arc::new(GeminiClassifier::new(remote_config)?)),
            None => {
                warn!("--remote given but no GEMINI_API_KEY / API_KEY is set");
                None
            }
        };
        let verdict = HybridAnalyzer::new(analyzer, remote_model)
            .classify(&text, lang, mode)
            .await?;
        print_json(&verdict)?;
        verdict.result
    } else {
        let result = analyzer.classify(&text, lang)?;
        print_json(&result)?;
        result
    };

    info!("{}", result.summary());

    if !no_history {
        let pool = open_history(config).await?;
        database::record_result(&pool, &text, &result, config.history_limit).await?;
    }
    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Commands::Check {
            text,
            file,
            lang,
            remote,
            mode,
            no_history,
            explain,
        } => check(&config, text, file, lang, remote, mode, no_history, explain).await,
        Commands::Stats => {
            let pool = open_history(&config).await?;
            print_json(&database::get_analytics(&pool).await?)
        }
        Commands::History { limit } => {
            if limit == 0 {
                bail!("--limit must be at least 1");
            }
            let pool = open_history(&config).await?;
            let records = database::get_all_predictions(&pool).await?;
            let records: Vec<_> = records.into_iter().take(limit).collect();
            print_json(&records)
        }
        Commands::Clear => {
            let pool = open_history(&config).await?;
            let removed = database::clear_all(&pool).await?;
            print_json(&serde_json::json!({ "removed": removed }))
        }
        Commands::Demo => {
            let pool = open_history(&config).await?;
            print_json(&database::seed_demo_data(&pool).await?)
        }
        Commands::Rules { lang } => {
            let table = load_rules(&config)?;
            let languages = match lang {
                Some(language) => vec![language.working()],
                None => LanguageTag::SUPPORTED.to_vec(),
            };
            let listing: Vec<RuleListing> = languages
                .into_iter()
                .flat_map(|language| table.rules_for(language))
                .map(|rule| RuleListing {
                    id: rule.id(),
                    category: rule.category(),
                    language: rule.language(),
                    weight: rule.weight(),
                    pattern: rule.pattern(),
                })
                .collect();
            print_json(&listing)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("invalid configuration")?;
    telemetry::init_tracing(config.log_format)?;

    run(cli, config).await
}
