use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use parking_lot::Mutex;
use ropey::Rope;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pegcomb::{CaptureList, RopeCursor, SharedSink, demos, none};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file; only its first line is parsed. Reads stdin if absent.
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Demo grammar to run
    #[arg(short = 'd', long, default_value = "macro")]
    demo: String,

    /// Also print the bytes the demo forwards
    #[arg(short = 'f', long)]
    forward: bool,

    /// Require the whole line to match
    #[arg(short = 'a', long)]
    all: bool,

    /// Print the demo's pattern and rules before running it
    #[arg(short = 'e', long)]
    explain: bool,
}

/// Install a subscriber only when `RUST_LOG` is set.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn read_input(file: Option<&str>) -> Result<String> {
    let contents = match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?,
        None => {
            let mut contents = String::new();
            io::stdin()
                .read_to_string(&mut contents)
                .context("Failed to read stdin")?;
            contents
        }
    };
    Ok(contents.lines().next().unwrap_or_default().to_string())
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let forwarded = Arc::new(Mutex::new(Vec::<u8>::new()));
    let Some(demo) = demos::build(&args.demo, SharedSink::from_arc(forwarded.clone())) else {
        bail!("Unknown demo '{}'. Available: {}.", args.demo, demos::names());
    };
    demo.grammar.check()?;

    let start = if args.all {
        demo.start >> none()
    } else {
        demo.start
    };

    if args.explain {
        println!("{start}");
        for name in demo.grammar.rule_names() {
            if let Some(body) = demo.grammar.get(name) {
                println!("  <{name}> := {body}");
            }
        }
    }

    let line = Rope::from_str(&read_input(args.file.as_deref())?);
    let mut cursor = RopeCursor::new(&line);
    let mut captures = CaptureList::new();
    let Some(m) = demo.grammar.eval(&start, &mut cursor, &mut captures)? else {
        eprintln!("Failed to parse input with demo '{}'.", args.demo);
        return Ok(ExitCode::FAILURE);
    };

    println!("matched {}..{}: {}", m.begin(), m.end(), m.text(&mut cursor));
    for capture in &captures {
        println!("{}", capture.text(&mut cursor));
    }
    if args.forward {
        println!("{}", String::from_utf8_lossy(&forwarded.lock()));
    }
    Ok(ExitCode::SUCCESS)
}
