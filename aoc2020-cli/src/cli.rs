//! CLI argument parsing using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across solvers; parts of one solver run in order (default)
    #[default]
    Day,
    /// Parallelize across every solver and part
    Part,
}

/// Advent of Code 2020 solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc2020", about = "Run the Advent of Code 2020 solvers", version)]
pub struct Args {
    /// Year to run
    #[arg(short, long, default_value_t = 2020)]
    pub year: u16,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers of this variant, e.g. `main` or `alternate`
    #[arg(long)]
    pub variant: Option<String>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Read the puzzle input from this file instead of the cache
    #[arg(short, long, requires = "day")]
    pub input: Option<PathBuf>,

    /// Cache directory for puzzle inputs
    #[arg(long, default_value = "~/.cache/aoc2020")]
    pub cache_dir: PathBuf,

    /// File holding the adventofcode.com session cookie
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["aoc2020"]).unwrap();
        assert_eq!(args.year, 2020);
        assert_eq!(args.day, None);
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert_eq!(args.cache_dir, PathBuf::from("~/.cache/aoc2020"));
        assert_eq!(args.verbose, 0);
        assert!(args.tags.is_empty());
    }

    #[test]
    fn filters_and_flags() {
        let args = Args::try_parse_from([
            "aoc2020", "-d", "19", "-p", "2", "--variant", "alternate", "-t", "regex,parsing",
            "-vv", "--parallelize-by", "part",
        ])
        .unwrap();
        assert_eq!(args.day, Some(19));
        assert_eq!(args.part, Some(2));
        assert_eq!(args.variant.as_deref(), Some("alternate"));
        assert_eq!(args.tags, vec!["regex", "parsing"]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.parallelize_by, ParallelizeBy::Part);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Args::try_parse_from(["aoc2020", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc2020", "-d", "0"]).is_err());
        assert!(Args::try_parse_from(["aoc2020", "-p", "3"]).is_err());
    }

    #[test]
    fn input_file_needs_a_day() {
        assert!(Args::try_parse_from(["aoc2020", "-i", "input.txt"]).is_err());
        assert!(Args::try_parse_from(["aoc2020", "-d", "3", "-i", "input.txt"]).is_ok());
    }
}
