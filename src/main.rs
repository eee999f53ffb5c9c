use std::{
    io::{self, BufRead, Write},
    process,
    str::FromStr,
};

use clap::Parser;
use par_integral::{prelude::*, Error, Result};

/// Integrates (cos(x) - 1) / x over [0, boundary] with 1, 2, 4, ... 32 threads.
///
/// Boundary and steps are prompted for on stdin when not given as flags.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Upper limit of integration
    #[arg(short, long, allow_negative_numbers = true)]
    boundary: Option<f64>,

    /// Total number of midpoint cells
    #[arg(short, long)]
    steps: Option<u64>,

    /// Thread counts to try, in order
    #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_THREAD_COUNTS)]
    threads: Vec<usize>,

    /// How workers hand in partial sums: mutex or channel
    #[arg(long, default_value = "mutex")]
    strategy: Strategy,

    /// What to do with leftover steps: truncate or redistribute
    #[arg(long, default_value = "truncate")]
    split: StepSplit,

    /// What to do with NaN partial sums: drop or propagate
    #[arg(long, default_value = "drop")]
    nan: NanPolicy,
}

fn prompt<T: FromStr>(input: &mut impl BufRead, label: &str, what: &'static str) -> Result<T> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim();
    line.parse().map_err(|_| Error::InvalidInput {
        what,
        input: line.to_owned(),
    })
}

fn run(args: Args) -> Result<()> {
    let mut stdin = io::stdin().lock();
    let boundary = match args.boundary {
        Some(b) => b,
        None => prompt(&mut stdin, "Boundary", "boundary")?,
    };
    let steps = match args.steps {
        Some(s) => s,
        None => prompt(&mut stdin, "Steps", "step count")?,
    };

    let config = RunConfig::new(boundary, steps)
        .with_thread_counts(args.threads)
        .with_strategy(args.strategy)
        .with_split(args.split)
        .with_nan_policy(args.nan);
    log::debug!("running with {:?}", config);

    ParallelRunner::from_config(&config).run(&config, |trial| println!("{}", Report(trial)))?;
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
