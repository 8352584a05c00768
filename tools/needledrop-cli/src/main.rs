//! Needledrop dataset tool
//!
//! Builds the review dataset from a dump of channel videos, appends single
//! reviews as new uploads come in, and reports how individual videos
//! classify.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use needledrop_core::grammar::{Era, TitleGrammar};
use needledrop_core::parser::{Classification, Collator};
use needledrop_core::types::{ReviewRecord, VideoRecord};
use needledrop_dataset as dataset;
use serde::Serialize;
use tracing::{info, warn};

/// Exit status of `append` when the video is not a review.
const NOT_REVIEW_EXIT_CODE: u8 = 8;

/// CLI arguments
#[derive(Parser)]
#[command(name = "needledrop")]
#[command(about = "Build and update the needledrop review dataset")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Grammar file (JSON); the built-in tables are used when omitted
    #[arg(short, long, global = true, env = "NEEDLEDROP_GRAMMAR")]
    grammar: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify and extract every video in a dump and write the dataset
    Collect {
        /// JSON array of videos (playlist items or flat records)
        #[arg(short, long, env = "NEEDLEDROP_VIDEOS")]
        videos: PathBuf,

        /// Dataset file to write
        #[arg(short, long, env = "NEEDLEDROP_DATASET")]
        output: PathBuf,

        /// Dataset format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// Append a single new video to an existing dataset
    Append {
        /// JSON object for one video
        #[arg(long)]
        video: PathBuf,

        /// Dataset file to append to (created if missing)
        #[arg(short, long, env = "NEEDLEDROP_DATASET")]
        dataset: PathBuf,

        /// Dataset format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// Print the classification verdict of every video in a dump
    Classify {
        /// JSON array of videos (playlist items or flat records)
        #[arg(short, long, env = "NEEDLEDROP_VIDEOS")]
        videos: PathBuf,
    },
    /// Print the grammar in use as JSON
    Grammar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Comma-separated rows under a header, as published
    Csv,
    /// One row per line
    Jsonl,
    /// A single JSON array
    Json,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyOutput<'a> {
    video_id: &'a str,
    title: &'a str,
    era: Era,
    verdict: Classification,
}

fn load_grammar(path: Option<&Path>) -> Result<TitleGrammar> {
    let Some(path) = path else {
        return Ok(TitleGrammar::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grammar {}", path.display()))?;
    TitleGrammar::from_json(&json)
        .with_context(|| format!("Invalid grammar {}", path.display()))
}

fn load_videos(path: &Path) -> Result<Vec<VideoRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open videos {}", path.display()))?;
    dataset::read_videos(BufReader::new(file))
        .with_context(|| format!("Failed to read videos {}", path.display()))
}

fn load_dataset(path: &Path, format: Format) -> Result<Vec<ReviewRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset {}", path.display()))?;
    let reader = BufReader::new(file);
    let reviews = match format {
        Format::Csv => dataset::read_csv(reader),
        Format::Jsonl => dataset::read_json_lines(reader),
        Format::Json => dataset::read_json(reader),
    };
    reviews.with_context(|| format!("Failed to read dataset {}", path.display()))
}

fn collect(collator: &Collator, videos: &Path, output: &Path, format: Format) -> Result<()> {
    let videos = load_videos(videos)?;
    let collection = collator.collect(&videos);

    for skipped in &collection.skipped {
        warn!(video_id = %skipped.video_id, title = %skipped.title, "add an edge case to include this review");
    }

    let file = File::create(output)
        .with_context(|| format!("Failed to create dataset {}", output.display()))?;
    let writer = BufWriter::new(file);
    match format {
        Format::Csv => dataset::write_csv(writer, &collection.reviews),
        Format::Jsonl => dataset::write_json_lines(writer, &collection.reviews),
        Format::Json => dataset::write_json(writer, &collection.reviews),
    }
    .with_context(|| format!("Failed to write dataset {}", output.display()))?;

    info!(
        videos = videos.len(),
        reviews = collection.reviews.len(),
        skipped = collection.skipped.len(),
        output = %output.display(),
        "Wrote review dataset"
    );
    Ok(())
}

fn append(collator: &Collator, video_path: &Path, path: &Path, format: Format) -> Result<ExitCode> {
    let file = File::open(video_path)
        .with_context(|| format!("Failed to open video {}", video_path.display()))?;
    let video: VideoRecord = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read video {}", video_path.display()))?;

    let Some(review) = collator
        .process_one(&video)
        .with_context(|| format!("Failed to extract review {:?}", video.title))?
    else {
        info!(video_id = %video.video_id, title = %video.title, "Not a review, nothing to append");
        return Ok(ExitCode::from(NOT_REVIEW_EXIT_CODE));
    };

    let mut reviews = load_dataset(path, format)?;
    if !dataset::append_review(&mut reviews, review.clone()) {
        return Ok(ExitCode::SUCCESS);
    }

    let result = match format {
        Format::Csv => dataset::append_csv(open_for_append(path)?, &review),
        Format::Jsonl => dataset::append_json_line(open_for_append(path)?, &review),
        Format::Json => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create dataset {}", path.display()))?;
            dataset::write_json(BufWriter::new(file), &reviews)
        }
    };
    result.with_context(|| format!("Failed to write dataset {}", path.display()))?;

    info!(%review, dataset = %path.display(), "Appended review");
    Ok(ExitCode::SUCCESS)
}

fn open_for_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to open dataset {}", path.display()))
}

fn classify(collator: &Collator, videos: &Path) -> Result<()> {
    let videos = load_videos(videos)?;
    let classifier = collator.classifier();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for video in &videos {
        let output = ClassifyOutput {
            video_id: &video.video_id,
            title: &video.title,
            era: classifier.era(video),
            verdict: classifier.classify(video),
        };
        serde_json::to_writer(&mut out, &output)?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let grammar = load_grammar(cli.grammar.as_deref())?;

    if let Commands::Grammar = cli.command {
        println!("{}", serde_json::to_string_pretty(&grammar)?);
        return Ok(ExitCode::SUCCESS);
    }

    let collator = Collator::new(grammar).context("Failed to build collator")?;

    match cli.command {
        Commands::Collect {
            videos,
            output,
            format,
        } => collect(&collator, &videos, &output, format)?,
        Commands::Append {
            video,
            dataset,
            format,
        } => return append(&collator, &video, &dataset, format),
        Commands::Classify { videos } => classify(&collator, &videos)?,
        Commands::Grammar => {}
    }

    Ok(ExitCode::SUCCESS)
}
