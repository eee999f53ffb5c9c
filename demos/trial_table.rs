use par_integral::prelude::*;

fn main() {
    env_logger::init();
    let config = RunConfig::new(1.0, 10_000_000);
    let runner = ParallelRunner::from_config(&config);
    if let Err(e) = runner.run(&config, |trial| println!("{}", Report(trial))) {
        eprintln!("{}", e);
    }

    let config = config.with_split(StepSplit::Redistribute).with_thread_counts([3, 7]);
    let trials = match ParallelRunner::from_config(&config).run(&config, |_| {}) {
        Ok(trials) => trials,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    for trial in trials {
        println!(
            "{} threads, {} steps evaluated: {:?}",
            trial.threads, trial.steps, trial.outcome
        );
    }
}
