//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use aoc2020_input::{InputProvider, SessionToken};
use aoc2020_solver::{DynSolver, SolverError, SolverKey, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver part
pub struct SolverResult {
    pub key: SolverKey,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the first part answered from a parsed instance
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub key: SolverKey,
    pub parts: RangeInclusive<u8>,
}

/// Where puzzle inputs come from
pub enum InputSource {
    /// One file's contents, used for every selected solver
    File(String),
    /// Cached or downloaded inputs
    Provider {
        provider: InputProvider,
        /// Days whose download already failed, with the reason
        unavailable: HashMap<(u16, u8), String>,
    },
}

impl InputSource {
    pub fn provider(provider: InputProvider) -> Self {
        Self::Provider {
            provider,
            unavailable: HashMap::new(),
        }
    }

    fn get(&self, year: u16, day: u8) -> Result<String, ExecutorError> {
        match self {
            Self::File(contents) => Ok(contents.clone()),
            Self::Provider {
                provider,
                unavailable,
            } => {
                if let Some(message) = unavailable.get(&(year, day)) {
                    return Err(ExecutorError::InputFetch {
                        year,
                        day,
                        message: message.clone(),
                    });
                }
                provider
                    .get(year, day)
                    .map_err(|e| ExecutorError::InputFetch {
                        year,
                        day,
                        message: e.to_string(),
                    })
            }
        }
    }
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// The parts of the executor shared by every worker thread
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    input: InputSource,
    parallelize_by: ParallelizeBy,
    year: u16,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
    variant_filter: Option<String>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(
        registry: SolverRegistry,
        input: InputSource,
        config: &Config,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                input,
                parallelize_by: config.parallelize_by,
                year: config.year,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
                variant_filter: config.variant_filter.clone(),
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata, in key order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| info.key.year == cfg.year)
            .filter(|info| cfg.day_filter.is_none_or(|d| info.key.day == d))
            .filter(|info| {
                cfg.variant_filter
                    .as_deref()
                    .is_none_or(|v| info.key.variant == v)
            })
            .map(|info| WorkItem {
                key: info.key,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Days among `work_items` whose input is not cached yet, each listed once
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        let InputSource::Provider { provider, .. } = &self.sync_executor_config.input else {
            return Vec::new();
        };
        work_items
            .iter()
            .map(|w| (w.key.year, w.key.day))
            .unique()
            .filter(|&(year, day)| !provider.is_cached(year, day))
            .collect()
    }

    /// Whether downloads would fail for want of a session token
    pub fn needs_session(&self) -> bool {
        matches!(
            &self.sync_executor_config.input,
            InputSource::Provider { provider, .. } if !provider.has_session()
        )
    }

    pub fn set_session(&mut self, session: SessionToken) {
        if let InputSource::Provider { provider, .. } = &mut self.sync_executor_config.input {
            provider.set_session(session);
        }
    }

    /// Download `missing` inputs one after another before any solver runs
    ///
    /// Failures are remembered so that no day is requested twice; the
    /// affected solvers report them as per-part errors.
    pub fn prefetch(&mut self, missing: &[(u16, u8)]) -> usize {
        let InputSource::Provider {
            provider,
            unavailable,
        } = &mut self.sync_executor_config.input
        else {
            return 0;
        };

        for &(year, day) in missing {
            match provider.get(year, day) {
                Ok(_) => tracing::info!(year, day, "fetched input"),
                Err(e) => {
                    tracing::warn!(year, day, error = %e, "failed to fetch input");
                    unavailable.insert((year, day), e.to_string());
                }
            }
        }
        unavailable.len()
    }

    /// Execute work items and send results to channel
    pub fn execute(
        &self,
        work_items: &[WorkItem],
        tx: Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;
        tracing::info!(
            solvers = work_items.len(),
            threads = self.thread_pool.current_num_threads(),
            mode = ?cfg.parallelize_by,
            "starting execution"
        );

        match cfg.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work(work, &tx, cfg) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .map(|work| run_work(work, &tx, cfg).err())
                    .reduce(|| None, merge_errors)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

fn merge_errors(
    a: Option<ArcExecutorError>,
    b: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (a, b) {
        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
        (a, b) => a.or(b),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Report the same failure for every part of `work`
fn send_failures(
    work: &WorkItem,
    error: ArcExecutorError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(
            tx,
            SolverResult {
                key: work.key,
                part,
                answer: Err(error.clone()),
                parse_duration: None,
                solve_duration: TimeDelta::zero(),
            },
        )?;
    }
    Ok(())
}

/// Fetch the input for one solver and answer its parts
fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let input = match cfg.input.get(work.key.year, work.key.day) {
        Ok(input) => input,
        Err(e) => return send_failures(work, e.into(), tx),
    };

    match cfg.parallelize_by {
        ParallelizeBy::Part => run_parts_parallel(work, &input, tx, cfg),
        ParallelizeBy::Sequential | ParallelizeBy::Day => {
            run_parts_sequential(work, &input, tx, cfg)
        }
    }
}

/// One parsed instance answers every part in order
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let mut solver = match cfg.registry.create_solver(&work.key, input) {
        Ok(solver) => solver,
        Err(e) => return send_failures(work, ExecutorError::Solver(e).into(), tx),
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        send(tx, solve_part(work.key, part, &mut *solver, parse_duration.take()))?;
    }
    Ok(())
}

/// Every part parses its own instance, so parts run concurrently
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    work.parts
        .clone()
        .into_par_iter()
        .try_for_each_with(tx.clone(), |tx, part| {
            let result = match cfg.registry.create_solver(&work.key, input) {
                Ok(mut solver) => {
                    let parse_duration = solver.parse_duration();
                    solve_part(work.key, part, &mut *solver, Some(parse_duration))
                }
                Err(e) => SolverResult {
                    key: work.key,
                    part,
                    answer: Err(ExecutorError::Solver(e).into()),
                    parse_duration: None,
                    solve_duration: TimeDelta::zero(),
                },
            };
            send(tx, result)
        })
}

fn solve_part(
    key: SolverKey,
    part: u8,
    solver: &mut dyn DynSolver,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(result) => {
            tracing::debug!(%key, part, duration = %result.duration(), "part solved");
            let duration = result.duration();
            (Ok(result.answer), duration)
        }
        Err(e) => (
            Err(ExecutorError::Solver(SolverError::from(e)).into()),
            TimeDelta::zero(),
        ),
    };

    SolverResult {
        key,
        part,
        answer,
        parse_duration,
        solve_duration,
    }
}
