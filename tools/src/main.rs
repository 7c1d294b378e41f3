use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ecupb_tools::{
    decode_message, decode_message_json, format_decode_pretty, inspect_message, size_table,
    InspectReport, RawValue,
};
use glob::Pattern;

#[derive(Parser)]
#[command(
    name = "ecupb-tools",
    version,
    about = "ecupb console message inspection and decoding tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the raw tag/length/value structure of captured payloads.
    Inspect {
        /// Path to a payload file, or a directory of them.
        payload_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected payloads.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected payloads (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Decode a payload as a console message.
    Decode {
        /// Path to the payload bytes.
        payload_file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the worst-case encoded size of every message type.
    Sizes,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            payload_path,
            glob,
            sort,
            limit,
            format,
        } => {
            if payload_path.is_dir() {
                let entries = collect_payload_entries(&payload_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                log::info!("inspecting {} payloads", entries.len());
                for entry in entries {
                    let bytes = fs::read(&entry.path)
                        .with_context(|| format!("read payload {}", entry.path.display()))?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print_inspect_report(&inspect_message(&bytes), format)?;
                }
            } else {
                let bytes = fs::read(&payload_path)
                    .with_context(|| format!("read payload {}", payload_path.display()))?;
                print_inspect_report(&inspect_message(&bytes), format)?;
            }
        }
        Command::Decode {
            payload_file,
            format,
        } => {
            let bytes = fs::read(&payload_file)
                .with_context(|| format!("read payload {}", payload_file.display()))?;
            match format {
                OutputFormat::Json => {
                    let output = decode_message_json(&bytes)?;
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => {
                    let msg = decode_message(&bytes)?;
                    println!("{}", format_decode_pretty(&msg));
                }
            }
        }
        Command::Sizes => {
            for (name, size) in size_table() {
                println!("{name:<20} {size:>6}");
            }
        }
    }
    Ok(())
}

struct PayloadEntry {
    path: PathBuf,
    size: u64,
}

fn collect_payload_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<PayloadEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                log::debug!("skipping {}", path.display());
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(PayloadEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<PayloadEntry>,
    sort: Option<InspectSort>,
) -> Vec<PayloadEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}

fn print_inspect_report(report: &InspectReport, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        let json = serde_json::to_string_pretty(report).context("serialize json")?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "length: {} bytes message: {}",
        report.total_len,
        report.message_kind.unwrap_or("undecodable")
    );
    println!("fields:");
    for field in &report.fields {
        let value = match field.value {
            RawValue::Varint { value } => format!("varint {value}"),
            RawValue::Fixed32 { bits, float } => format!("fixed32 0x{bits:08x} ({float})"),
            RawValue::LengthDelimited { len } => format!("length-delimited ({len} bytes)"),
        };
        println!("  @{:<5} field {:>3}: {value}", field.offset, field.field);
    }
    if let Some(reason) = &report.stopped {
        println!("stopped: {reason} ({} bytes not walked)", report.trailing);
    }
    Ok(())
}
