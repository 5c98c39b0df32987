use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use handwire_core::{DecodeReport, Stamp, WireVariant, make_decode_report, parse_landmarks};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("HANDWIRE_BUILD_COMMIT"),
    " ",
    env!("HANDWIRE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "handwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Offline inspector for framed hand-pose (MANO) packets.",
    long_about = None,
    after_help = "Examples:\n  handwire packet decode frame.mano --variant timestamped -o report.json\n  handwire packet decode frame.mano --variant opaque --stdout --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on framed packet files (offline-first).
    Packet {
        #[command(subcommand)]
        command: PacketCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PacketCommands {
    /// Decode one framed packet file and generate a versioned JSON report.
    #[command(
        after_help = "Examples:\n  handwire packet decode frame.mano --variant timestamped -o report.json\n  handwire packet decode frame.mano --variant opaque --stdout"
    )]
    Decode {
        /// Path to a .mano packet file
        input: PathBuf,

        /// Wire layout the producer uses; there is no auto-detection
        #[arg(long, value_enum)]
        variant: VariantArg,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum VariantArg {
    /// 12-byte opaque header, no timestamp
    Opaque,
    /// Sequence + seconds + nanoseconds header
    Timestamped,
}

impl VariantArg {
    fn wire(self) -> WireVariant {
        match self {
            VariantArg::Opaque => WireVariant::Opaque,
            VariantArg::Timestamped => WireVariant::Timestamped,
        }
    }

    fn label(self) -> &'static str {
        match self {
            VariantArg::Opaque => "opaque",
            VariantArg::Timestamped => "timestamped",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Packet { command } => match command {
            PacketCommands::Decode {
                input,
                variant,
                report,
                stdout,
                pretty,
                compact,
                quiet,
            } => cmd_packet_decode(input, variant, report, stdout, pretty, compact, quiet),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_packet_decode(
    input: PathBuf,
    variant: VariantArg,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    let meta = fs::metadata(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .mano packet file".to_string()),
        ));
    }

    let raw = fs::read(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;

    let landmarks = parse_landmarks(&raw, variant.wire()).map_err(|err| {
        CliError::new(
            format!("decode failed: {err}"),
            Some("check that --variant matches the producer's wire layout".to_string()),
        )
    })?;

    let mut rep = make_decode_report(
        &resolved_input.display().to_string(),
        meta.len(),
        variant.label(),
        landmarks,
    );
    if let Some(stamp) = rep.landmarks.header.stamp {
        if let Some(rfc3339) = stamp_to_rfc3339(stamp) {
            rep.generated_at = rfc3339;
        }
    }

    let json = serialize_report(&rep, pretty, compact)?;

    if stdout {
        print!("{}", json);
        return Ok(());
    }

    let report = report.expect("report required when not using stdout");
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn serialize_report(rep: &DecodeReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn stamp_to_rfc3339(stamp: Stamp) -> Option<String> {
    let nanos = (stamp.secs as i128) * 1_000_000_000 + stamp.nanos as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .mano packet file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "mano" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .mano packet file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected a .mano file".to_string()),
        ));
    }
    if matches.len() > 1 {
        let mut listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if matches.len() > 3 {
            listed.push_str(", ...");
        }
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}",
                pattern,
                matches.len(),
                listed
            ),
            Some("pass a single packet file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
