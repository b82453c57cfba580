// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use binlog_rollback::config::DEFAULT_SIZE_LIMIT;
use binlog_rollback_cli::commands::{generate, inspect, run};
use binlog_rollback_cli::hit_size_limit;
use binlog_rollback_node::telemetry;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rollback")]
#[command(about = "Generates SQL that undoes a thread's transactions from MySQL binlog output", long_about = None)]
struct Cli {
    /// Print Prometheus metrics to stderr on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the transactions a thread committed in a captured `mysqlbinlog -v` dump
    Inspect {
        dump: PathBuf,

        #[arg(long)]
        thread_id: String,

        /// Ceiling on accumulated event body bytes
        #[arg(long, default_value_t = DEFAULT_SIZE_LIMIT)]
        size_limit: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Generate the rollback script from a captured dump
    Generate {
        dump: PathBuf,

        #[arg(long)]
        thread_id: String,

        /// JSON catalog: {"table": ["col1", "col2", ...]}
        #[arg(long)]
        catalog: PathBuf,

        #[arg(long, default_value_t = DEFAULT_SIZE_LIMIT)]
        size_limit: usize,

        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Read the binlog from a live server with mysqlbinlog and generate the rollback script
    Run(run::RunArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry();

    let result = match cli.command {
        Commands::Inspect {
            dump,
            thread_id,
            size_limit,
            json,
        } => inspect::run(&dump, &thread_id, size_limit, json),
        Commands::Generate {
            dump,
            thread_id,
            catalog,
            size_limit,
            output,
        } => generate::run(&dump, &thread_id, &catalog, size_limit, output.as_deref()),
        Commands::Run(args) => run::run(args),
    };

    if cli.metrics {
        eprintln!("{}", telemetry::get_metrics());
    }
    if let Err(e) = &result {
        if hit_size_limit(e) {
            eprintln!("hint: the binlog window holds more event text than --size-limit allows; narrow the window or raise --size-limit");
        }
    }
    result
}
