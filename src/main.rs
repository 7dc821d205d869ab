use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use siftkit::{
    assemble, chunk, dedupe, edit_distance, locate, rank_json, trim, trim_by_name, ReaderConfig,
    SanitizeLevel, Sanitizer, SegmenterRules, SentenceSegmenter, SiftConfig, TextReader, ValuePolicy,
    WeightedItem, WeightedSampler,
};

#[derive(Parser, Debug)]
#[command(name = "siftkit")]
#[command(about = "Text and sequence preprocessing primitives")]
#[command(version)]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for the JSON log stream on stderr
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Reject unknown level/category names instead of falling back
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

/// Inline text, or a file to read it from; stdin when neither is given
#[derive(ClapArgs, Debug)]
struct Input {
    /// Inline input
    text: Option<String>,

    /// Read input from this file instead
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split text into sentences, keeping terminators
    Segment {
        #[command(flatten)]
        input: Input,
        /// Collapse whitespace inside each sentence
        #[arg(long)]
        normalize: bool,
        /// Override the terminator characters
        #[arg(long)]
        terminators: Option<String>,
    },
    /// Merge `[[sentence, label], ...]` into articles
    Assemble {
        #[command(flatten)]
        input: Input,
    },
    /// Byte intervals of every non-overlapping occurrence of a pattern
    Locate {
        pattern: String,
        #[command(flatten)]
        input: Input,
    },
    /// Strip markup at a thoroughness level
    Sanitize {
        #[command(flatten)]
        input: Input,
        /// Normal, Deeper or NoPackage
        #[arg(long)]
        level: Option<String>,
    },
    /// Remove duplicates from a JSON array of strings
    Dedupe {
        #[command(flatten)]
        input: Input,
        /// Allow the result order to differ from first occurrence
        #[arg(long)]
        unordered: bool,
    },
    /// Pack a JSON array into fixed-size chunks
    Chunk {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        size: Option<usize>,
    },
    /// Remove empty elements from a JSON array
    Trim {
        #[command(flatten)]
        input: Input,
        /// All, Both, Left or Right
        #[arg(long)]
        category: Option<String>,
    },
    /// Draw one item from `[[item, probability], ...]`
    Sample {
        #[command(flatten)]
        input: Input,
        /// Items that must not be drawn
        #[arg(long)]
        exclude: Vec<String>,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Frequency ranking of a JSON array (or array of arrays)
    Rank {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        ascending: bool,
    },
    /// Levenshtein distance between two strings
    Distance { a: String, b: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(&args.log_level))
        .json()
        .init();

    let mut config = SiftConfig::load_or_default(args.config.as_ref())
        .with_context(|| "failed to load configuration")?;
    if args.strict {
        config.value_policy = ValuePolicy::Strict;
    }
    info!(?config, "Resolved configuration");

    run(args.command, &config).await
}

async fn run(command: Command, config: &SiftConfig) -> Result<()> {
    match command {
        Command::Segment { input, normalize, terminators } => {
            // Untrimmed so the segments concatenate back to the file content
            let text = load_text(&input, config, false).await?;
            let rules = SegmenterRules::from_chars(terminators.as_deref().unwrap_or(config.terminators.as_str()));
            let segmenter = SentenceSegmenter::new(rules)?;
            let sentences = if normalize {
                segmenter.segment_normalized(&text)
            } else {
                segmenter.segment(&text)
            };
            emit(&sentences)
        }
        Command::Assemble { input } => {
            let labeled: Vec<(String, Value)> = load_json(&input, config).await?;
            emit(&assemble(&labeled))
        }
        Command::Locate { pattern, input } => {
            let text = load_text(&input, config, false).await?;
            emit(&locate(&text, &pattern)?)
        }
        Command::Sanitize { input, level } => {
            let text = load_text(&input, config, true).await?;
            let level = match level {
                Some(name) => SanitizeLevel::resolve(&name, config.value_policy)?,
                None => config.sanitize_level,
            };
            emit(&Sanitizer::new()?.sanitize(&text, level))
        }
        Command::Dedupe { input, unordered } => {
            let items: Vec<String> = load_json(&input, config).await?;
            let preserve_order = config.preserve_order && !unordered;
            emit(&dedupe(&items, preserve_order))
        }
        Command::Chunk { input, size } => {
            let items: Vec<Value> = load_json(&input, config).await?;
            emit(&chunk(&items, size.unwrap_or(config.chunk_size))?)
        }
        Command::Trim { input, category } => {
            let items: Vec<Value> = load_json(&input, config).await?;
            let trimmed = match category {
                Some(name) => trim_by_name(&items, &name, config.value_policy)?,
                None => trim(&items, config.trim_category),
            };
            emit(&trimmed)
        }
        Command::Sample { input, exclude, seed } => {
            // Pair shape is enforced by deserialization before any processing
            let pairs: Vec<(String, f64)> = load_json(&input, config).await?;
            let items: Vec<WeightedItem<String>> = pairs.into_iter().map(WeightedItem::from).collect();
            let filter: HashSet<String> = exclude.into_iter().collect();
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let drawn = match WeightedSampler::new(items)? {
                Some(sampler) => Some(
                    sampler
                        .with_max_retries(config.sampler_max_retries)
                        .draw(&filter, &mut rng)?
                        .clone(),
                ),
                None => None,
            };
            emit(&drawn)
        }
        Command::Rank { input, ascending } => {
            let value: Value = load_json(&input, config).await?;
            let descending = config.rank_descending && !ascending;
            emit(&rank_json(&value, descending))
        }
        Command::Distance { a, b } => emit(&edit_distance(&a, &b)),
    }
}

/// Input text; file reads are trimmed only when `trim` is set
async fn load_text(input: &Input, config: &SiftConfig, trim: bool) -> Result<String> {
    if let Some(path) = &input.input {
        let reader = TextReader::new(ReaderConfig {
            buffer_size: config.reader_buffer_size,
            max_lines: None,
            trim,
        });
        let (text, _stats) = reader
            .read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(text);
    }
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }

    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;
    Ok(text)
}

async fn load_json<T: serde::de::DeserializeOwned>(input: &Input, config: &SiftConfig) -> Result<T> {
    let text = load_text(input, config, true).await?;
    serde_json::from_str(&text).with_context(|| "input is not the expected JSON shape")
}

fn emit<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
