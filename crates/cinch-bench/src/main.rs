//! Benchmark runner and reporting interface for the Cinch solver.

mod measure;
mod scenarios;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use measure::StageRecorder;

const SCHEMA_VERSION: u32 = 1;
const DEFAULT_CASES: [usize; 4] = [10, 100, 1_000, 10_000];

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Cinch benchmark runner and reporting interface"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute benchmark scenarios and save JSONL artifacts
    Run(RunArgs),
    /// Render benchmark artifact summaries
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Benchmark scenarios to execute
    #[arg(
        long = "scenario",
        value_enum,
        value_delimiter = ',',
        default_value = "chain"
    )]
    scenarios: Vec<Scenario>,

    /// Comma-separated list of case sizes (chain links, layout rows, or
    /// suggestion counts, depending on the scenario)
    #[arg(long, value_delimiter = ',')]
    cases: Option<Vec<usize>>,

    /// Number of repetitions per case
    #[arg(long, default_value_t = 1)]
    repetitions: u32,

    /// JSONL output artifact path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Input JSONL benchmark artifact
    #[arg(long)]
    input: PathBuf,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Scenario {
    /// Long ladder of required equalities behind one edit variable
    Chain,
    /// Rows of padded boxes constrained against shared container edits
    Layout,
    /// Steady-state suggest churn on a small fixed system
    EditStorm,
}

impl Scenario {
    fn as_str(self) -> &'static str {
        match self {
            Scenario::Chain => "chain",
            Scenario::Layout => "layout",
            Scenario::EditStorm => "edit-storm",
        }
    }
}

/// One stage of one benchmark case, as stored in the JSONL artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StageRecord {
    schema_version: u32,
    scenario: String,
    case: usize,
    repetition: u32,
    stage: String,
    duration_ms: f64,
    rss_before_bytes: Option<u64>,
    rss_after_bytes: Option<u64>,
    rss_delta_bytes: Option<i64>,
    unix_timestamp_secs: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Report(args) => report(args),
    }
}

fn run(args: RunArgs) {
    let cases = args.cases.unwrap_or_else(|| DEFAULT_CASES.to_vec());
    let mut records = Vec::new();

    for scenario in &args.scenarios {
        for &case in &cases {
            for repetition in 0..args.repetitions {
                tracing::info!(
                    scenario = scenario.as_str(),
                    case,
                    repetition,
                    "Running benchmark case"
                );
                let mut recorder = StageRecorder::new();
                match scenario {
                    Scenario::Chain => scenarios::chain(&mut recorder, case, 16),
                    Scenario::Layout => scenarios::layout(&mut recorder, case),
                    Scenario::EditStorm => scenarios::edit_storm(&mut recorder, case),
                }
                records.extend(stage_records(*scenario, case, repetition, &recorder));
            }
        }
    }

    if let Some(path) = &args.output {
        write_jsonl(path, &records);
    }
    render(&records, args.format);
}

fn stage_records(
    scenario: Scenario,
    case: usize,
    repetition: u32,
    recorder: &StageRecorder,
) -> Vec<StageRecord> {
    let unix_timestamp_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();

    recorder
        .stages()
        .iter()
        .map(|stage| StageRecord {
            schema_version: SCHEMA_VERSION,
            scenario: scenario.as_str().to_string(),
            case,
            repetition,
            stage: stage.stage.to_string(),
            duration_ms: stage.duration.as_secs_f64() * 1000.0,
            rss_before_bytes: stage.rss_before_bytes,
            rss_after_bytes: stage.rss_after_bytes,
            rss_delta_bytes: stage.rss_delta_bytes,
            unix_timestamp_secs,
        })
        .collect()
}

fn report(args: ReportArgs) {
    let file = File::open(&args.input)
        .unwrap_or_else(|err| panic!("failed to open {}: {}", args.input.display(), err));
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line.expect("failed to read artifact line");
        if line.trim().is_empty() {
            continue;
        }
        let record: StageRecord =
            serde_json::from_str(&line).expect("failed to parse artifact record");
        records.push(record);
    }
    render(&records, args.format);
}

fn write_jsonl(path: &PathBuf, records: &[StageRecord]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create artifact directory");
    }
    let file = File::create(path)
        .unwrap_or_else(|err| panic!("failed to create {}: {}", path.display(), err));
    let mut writer = BufWriter::new(file);
    for record in records {
        let line = serde_json::to_string(record).expect("failed to encode record");
        writeln!(writer, "{line}").expect("failed to write artifact");
    }
    tracing::info!(path = %path.display(), records = records.len(), "Wrote artifact");
}

fn render(records: &[StageRecord], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let encoded =
                serde_json::to_string_pretty(records).expect("failed to encode records");
            println!("{encoded}");
        }
        OutputFormat::Table => {
            println!(
                "{:<12} {:>8} {:>4} {:<6} {:>12} {:>14}",
                "scenario", "case", "rep", "stage", "duration_ms", "rss_delta"
            );
            for record in records {
                println!(
                    "{:<12} {:>8} {:>4} {:<6} {:>12.3} {:>14}",
                    record.scenario,
                    record.case,
                    record.repetition,
                    record.stage,
                    record.duration_ms,
                    record
                        .rss_delta_bytes
                        .map(|delta| delta.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
        }
    }
}
