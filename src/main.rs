use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use stutsk::{
    interpreter::{
        config::{Config, DEFAULT_MAX_DEPTH},
        evaluator::core::Outcome,
    },
    run_file, run_source,
};
use tracing_subscriber::EnvFilter;

/// stutsk runs programs written in Stutsk, a stack-based concatenative
/// scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run, or the program text itself with `--eval`.
    input: String,

    /// Arguments passed through to the script, available via `commandline`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Treats the input as program text instead of a file name.
    #[arg(short, long)]
    eval: bool,

    /// Adds a directory searched by `include`.
    #[arg(short = 'I', long = "include-path", value_name = "DIR")]
    include_path: Vec<PathBuf>,

    /// Limits how deeply code blocks and function calls may nest.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

/// Installs a log subscriber, but only when `RUST_LOG` asks for one so that
/// script output stays clean.
fn init_tracing() {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt().with_env_filter(filter)
                                 .with_writer(std::io::stderr)
                                 .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let mut config = Config::default().with_arguments(args.args)
                                      .with_max_depth(args.max_depth);
    for path in args.include_path {
        config = config.with_include_path(path);
    }

    let result = if args.eval {
        run_source("<eval>", &args.input, config)
    } else {
        run_file(&PathBuf::from(&args.input), config)
    };

    match result {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::Halted) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
