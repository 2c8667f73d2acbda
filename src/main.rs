use abi_export::logging::{LoggingConfig, init_logging, parse_level};
use abi_export::{ExportConfig, run};
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Export Solidity contract ABIs to individual JSON files", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan for contracts, prune orphaned ABI files and export every ABI
    #[command(name = "generate-abi")]
    GenerateAbi(GenerateArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Project root (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Source directory, relative to the root
    #[arg(long = "src")]
    source_dir: Option<PathBuf>,

    /// Output directory, relative to the root
    #[arg(short, long = "out")]
    out_dir: Option<PathBuf>,

    /// Introspection program
    #[arg(long)]
    forge: Option<String>,

    /// Protect an output from pruning (qualified id or source path)
    #[arg(long)]
    keep: Vec<String>,

    /// Maximum concurrent tool invocations
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Exit non-zero if any single export fails
    #[arg(long)]
    strict: bool,

    /// Set an environment variable for the tool (KEY=VALUE)
    #[arg(long = "env", value_name = "KEY=VALUE")]
    env: Vec<String>,

    /// Echo tool invocations and progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some(level) = parse_level(&args.log_level) else {
        bail!("Invalid log level '{}'", args.log_level);
    };
    init_logging(LoggingConfig {
        level,
        use_json: args.log_json,
    });

    match args.command {
        Command::GenerateAbi(gen_args) => {
            let config = build_config(gen_args)?;
            run(config)?;
        }
    }

    Ok(())
}

fn build_config(args: GenerateArgs) -> Result<ExportConfig> {
    let root = args.root.unwrap_or_else(|| PathBuf::from("."));

    // 1. Load from file or default
    let mut config = ExportConfig::load_from_dir(&root)?.unwrap_or_default();
    config.root = root;

    // 2. Override with CLI args
    if let Some(s) = args.source_dir {
        config.source_dir = s;
    }
    if let Some(o) = args.out_dir {
        config.out_dir = o;
    }
    if let Some(f) = args.forge {
        config.tool.program = f;
    }
    // CLI keeps ADD to config keeps
    config.keep.extend(args.keep);
    if let Some(j) = args.jobs {
        config.jobs = Some(j);
    }
    if args.strict {
        config.strict = true;
    }
    if args.verbose {
        config.tool.verbose = true;
    }
    for pair in args.env {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Expected KEY=VALUE for --env, got '{}'", pair);
        };
        config.tool.env.insert(key.to_string(), value.to_string());
    }

    Ok(config)
}
