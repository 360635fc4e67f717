//! ttdecode CLI
//!
//! Decodes stack payloads and prints each result as JSON.

use std::io::{self, BufRead, BufWriter, Write};

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};
use ttdecode::{Decoder, DecoderConfig, SleepPolicy};

/// ttdecode
#[derive(Parser, Debug)]
#[command(name = "ttdecode")]
#[command(about = "Decode Thinking Things stack payloads to JSON")]
#[command(version)]
struct Args {
    /// Payloads to decode; read one per line from stdin when omitted
    payloads: Vec<String>,

    /// Parse module segments on the calling thread only
    #[arg(long, conflicts_with = "threads")]
    sequential: bool,

    /// Maximum worker threads per frame
    #[arg(short, long, default_value = "4")]
    threads: usize,

    /// Handling of sleep fields without a `$` separator
    #[arg(long, value_enum, default_value_t = SleepArg::Lenient)]
    sleep: SleepArg,

    /// Require the echoed stack id in every segment
    #[arg(long)]
    no_compact: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,
}

/// `--sleep` choices
#[derive(ValueEnum, Clone, Copy, Debug)]
enum SleepArg {
    /// Whole field is the value
    Lenient,
    /// Reject the frame
    Strict,
    /// Whole field is the condition
    Legacy,
}

impl From<SleepArg> for SleepPolicy {
    fn from(arg: SleepArg) -> Self {
        match arg {
            SleepArg::Lenient => SleepPolicy::Lenient,
            SleepArg::Strict => SleepPolicy::Strict,
            SleepArg::Legacy => SleepPolicy::Legacy,
        }
    }
}

fn main() {
    // Initialize tracing/logging; stdout is reserved for results
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ttdecode=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("ttdecode v{}", ttdecode::VERSION);

    let builder = DecoderConfig::builder()
        .sleep_policy(args.sleep.into())
        .compact_segments(!args.no_compact);
    let config = if args.sequential {
        builder.sequential().build()
    } else {
        builder.parallel(args.threads).build()
    };

    let decoder = match Decoder::new(config) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    tracing::debug!(config = ?decoder.config(), "Decoder ready");

    let out = BufWriter::new(io::stdout().lock());
    let result = if args.payloads.is_empty() {
        run(&decoder, io::stdin().lock().lines(), out, args.pretty)
    } else {
        run(&decoder, args.payloads.into_iter().map(Ok), out, args.pretty)
    };

    match result {
        Ok(0) => {}
        Ok(failed) => {
            tracing::warn!("{} frame(s) rejected", failed);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Aborted: {}", e);
            std::process::exit(2);
        }
    }
}

/// Decode every payload into `out`, one JSON document per accepted frame
///
/// Blank lines are skipped. Returns how many frames were rejected.
fn run<I, W>(decoder: &Decoder, payloads: I, mut out: W, pretty: bool) -> ttdecode::Result<usize>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    let mut failed = 0;

    for line in payloads {
        let line = line?;
        let payload = line.trim_end_matches(['\r', '\n']);
        if payload.is_empty() {
            continue;
        }

        match decoder.decode(payload) {
            Ok(parsed) => {
                if pretty {
                    serde_json::to_writer_pretty(&mut out, &parsed)?;
                } else {
                    serde_json::to_writer(&mut out, &parsed)?;
                }
                writeln!(out)?;
            }
            Err(e) if e.is_frame_error() => {
                tracing::warn!(payload, "Dropping frame: {}", e);
                failed += 1;
            }
            Err(e) => {
                tracing::error!(payload, "Dropping frame: {}", e);
                failed += 1;
            }
        }
    }

    out.flush()?;
    Ok(failed)
}
