//! RV32IM cache-policy simulator CLI.
//!
//! Runs the program image twice — once per replacement policy (LRU, bpLRU) —
//! over independent RAM/cache/processor pipelines, prints the hit/miss
//! statistics table to stdout, and optionally dumps the final register file
//! and a RAM slice from the LRU run.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rvcache_core::sim::loader;
use rvcache_core::sim::simulator::run_policy;
use rvcache_core::{ReplacementKind, SimError, stats};

#[derive(Parser, Debug)]
#[command(
    name = "rvcache",
    version,
    about = "RV32IM cache replacement policy simulator",
    long_about = "Execute a program image under true-LRU and tree pseudo-LRU replacement \
                  and report per-policy cache hit/miss statistics.\n\n\
                  Examples:\n  \
                  rvcache -i program.bin\n  \
                  rvcache -i program.bin -o final.bin 0x1000 256"
)]
struct Cli {
    /// Program image to execute (initial registers + memory fragments).
    #[arg(short = 'i', value_name = "FILE")]
    input: PathBuf,

    /// Dump the LRU run's final state: <FILE> <START> <SIZE>.
    ///
    /// START and SIZE accept decimal or 0x-prefixed hex.
    #[arg(short = 'o', num_args = 3, value_names = ["FILE", "START", "SIZE"])]
    output: Option<Vec<String>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit 1 like every other failure; clap's default is 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let dump = match cli.output.as_deref() {
        Some([file, start, size]) => {
            Some((PathBuf::from(file), parse_u32(start)?, parse_u32(size)?))
        }
        Some(_) | None => None,
    };

    let image = loader::read_image(&cli.input)?;

    let lru = run_policy(&image, ReplacementKind::Lru)?;
    let bplru = run_policy(&image, ReplacementKind::BpLru)?;

    println!("{}", stats::table_header());
    println!("{}", stats::table_row(lru.kind.label(), &lru.stats));
    println!("{}", stats::table_row(bplru.kind.label(), &bplru.stats));

    if let Some((path, start, size)) = dump {
        loader::write_dump(&path, &lru.registers, &lru.ram, start, size)?;
    }

    Ok(())
}

/// Parses a numeric CLI argument, accepting decimal and `0x`-prefixed hex.
fn parse_u32(text: &str) -> Result<u32, SimError> {
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        text.parse()
    };
    parsed.map_err(|_| SimError::Format(format!("invalid numeric argument '{text}'")))
}
