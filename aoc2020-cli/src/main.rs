//! aoc2020 - command-line runner for the Advent of Code 2020 solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod logging;
mod output;

// Link the solutions crate so its solver plugins are collected
use aoc2020_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc2020_solver::{RegistryBuilder, SolverRegistry};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, InputSource, WorkItem};
use output::OutputFormatter;

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.tags)?;

    let input = match &config.input_file {
        Some(path) => InputSource::File(std::fs::read_to_string(path)?),
        None => InputSource::provider(config.input_provider()?),
    };
    let mut executor =
        Executor::new(registry, input, &config).map_err(|e| CliError::Executor(e.into()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing_inputs = executor.missing_inputs(&work_items);
    if !missing_inputs.is_empty() {
        if !config.quiet {
            println!("Missing {} input file(s):", missing_inputs.len());
            for (year, day) in &missing_inputs {
                println!("  - {}/day{:02}", year, day);
            }
        }

        if executor.needs_session() {
            println!();
            let session = config::prompt_session(
                "Session token required to fetch missing inputs from adventofcode.com",
            )?;
            executor.set_session(session);
        }

        let failed = executor.prefetch(&missing_inputs);
        if failed > 0 {
            tracing::warn!(failed, "some inputs could not be fetched");
        }
    }

    run_executor(&executor, &work_items, config.quiet)
}

/// Run the executor and print results in order as they become ready
fn run_executor(executor: &Executor, work_items: &[WorkItem], quiet: bool) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys: Vec<ResultKey> = work_items
        .iter()
        .flat_map(|w| w.parts.clone().map(move |part| ResultKey { key: w.key, part }))
        .collect();

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::scope(|s| {
        let handle = s.spawn(|| executor.execute(work_items, tx));

        for result in rx {
            for ready in aggregator.add(result) {
                formatter.print_result(&ready);
                results.push(ready);
            }
        }

        handle
            .join()
            .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
            .map_err(CliError::Executor)
    })?;

    // Only reached when a result went missing
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        tracing::warn!("not all expected results were received");
    }

    formatter.print_summary(&results);
    Ok(())
}

/// Build registry, keeping only solvers that carry every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
