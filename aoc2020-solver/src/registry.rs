//! Solver registry for managing and creating solver instances

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::key::SolverKey;
use crate::solver::Solver;
use std::collections::BTreeMap;

/// Days per year in AoC (1-25)
pub const DAYS_PER_YEAR: u8 = 25;

/// Thread-safe factory function type for creating solver instances
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub key: SolverKey,
    /// Number of parts this solver supports
    pub parts: u8,
}

struct SolverFactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Builder for constructing a [`SolverRegistry`]
///
/// Registration consumes and returns the builder so calls chain with `?`.
/// Registering the same [`SolverKey`] twice is an error; siblings for the same
/// day are registered under different variants.
///
/// # Example
///
/// ```
/// use aoc2020_solver::{AocParser, ParseError, RegistryBuilder, SolveError, Solver, SolverKey};
///
/// struct Sum;
///
/// impl AocParser for Sum {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl Solver for Sum {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.iter().sum::<u32>().to_string()),
///             _ => Err(SolveError::PartOutOfRange(part)),
///         }
///     }
/// }
///
/// let registry = RegistryBuilder::new()
///     .register_solver::<Sum>(SolverKey::new(2020, 1))
///     .unwrap()
///     .build();
///
/// let mut solver = registry.create_solver(&SolverKey::new(2020, 1), "1\n2\n3").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "6");
/// ```
pub struct RegistryBuilder {
    entries: BTreeMap<SolverKey, SolverFactoryEntry>,
}

impl RegistryBuilder {
    /// Create a new empty registry builder
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a factory function under `key`
    ///
    /// # Returns
    /// * `Ok(Self)` - Builder with the solver registered, ready for chaining
    /// * `Err(RegistrationError)` - Duplicate key or day outside 1..=25
    pub fn register<F>(
        mut self,
        key: SolverKey,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        if !(1..=DAYS_PER_YEAR).contains(&key.day) {
            return Err(RegistrationError::InvalidDay(key.year, key.day));
        }
        if self.entries.contains_key(&key) {
            return Err(RegistrationError::DuplicateSolver {
                year: key.year,
                day: key.day,
                variant: key.variant,
            });
        }
        self.entries.insert(
            key,
            SolverFactoryEntry {
                factory: Box::new(factory),
                parts,
            },
        );
        Ok(self)
    }

    /// Register a [`Solver`] type under `key`
    pub fn register_solver<S>(self, key: SolverKey) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register(key, S::PARTS, move |input: &str| {
            let instance: Box<dyn DynSolver + '_> =
                Box::new(SolverInstance::<S>::new(key, input)?);
            Ok(instance)
        })
    }

    /// Register every plugin submitted via `inventory::submit!`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins for which `filter` returns `true`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use aoc2020_solver::RegistryBuilder;
    /// // Only alternate solvers tagged "parsing"
    /// let registry = RegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| {
    ///         plugin.variant == "alternate" && plugin.tags.contains(&"parsing")
    ///     })
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.key())?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder and create an immutable registry
    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable registry for looking up and creating solvers
pub struct SolverRegistry {
    entries: BTreeMap<SolverKey, SolverFactoryEntry>,
}

impl SolverRegistry {
    /// Parse `input` with the solver registered under `key`
    ///
    /// # Returns
    /// * `Ok(Box<dyn DynSolver>)` - Successfully created solver
    /// * `Err(SolverError)` - Solver not found or parsing failed
    pub fn create_solver<'a>(
        &self,
        key: &SolverKey,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let entry = self.entries.get(key).ok_or(SolverError::NotFound {
            year: key.year,
            day: key.day,
            variant: key.variant,
        })?;

        (entry.factory)(input).map_err(SolverError::Parse)
    }

    /// Metadata of every registered solver, in key order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().map(|(key, entry)| FactoryInfo {
            key: *key,
            parts: entry.parts,
        })
    }

    pub fn get_info(&self, key: &SolverKey) -> Option<FactoryInfo> {
        self.entries.get(key).map(|entry| FactoryInfo {
            key: *key,
            parts: entry.parts,
        })
    }

    pub fn contains(&self, key: &SolverKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Type-erased registration hook so differently typed solvers can live in
/// one plugin list
///
/// Every `Solver + Sync + 'static` type gets this through a blanket impl.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: RegistryBuilder,
        key: SolverKey,
    ) -> Result<RegistryBuilder, RegistrationError>;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: RegistryBuilder,
        key: SolverKey,
    ) -> Result<RegistryBuilder, RegistrationError> {
        builder.register_solver::<S>(key)
    }
}

/// Plugin information for automatic solver registration
///
/// Normally submitted by `#[derive(AutoRegisterSolver)]`. Written by hand:
///
/// ```no_run
/// use aoc2020_solver::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type SharedData<'a> = ();
///
///     fn parse(_: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(())
///     }
/// }
///
/// impl Solver for Day1 {
///     const PARTS: u8 = 1;
///
///     fn solve_part(_: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         Err(SolveError::PartOutOfRange(part))
///     }
/// }
///
/// inventory::submit! {
///     SolverPlugin {
///         year: 2020,
///         day: 1,
///         variant: "main",
///         solver: &Day1,
///         tags: &["easy"],
///     }
/// }
/// ```
pub struct SolverPlugin {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// `"main"` or the name of a sibling implementation
    pub variant: &'static str,
    /// The solver instance (type-erased)
    pub solver: &'static dyn RegisterableSolver,
    /// Tags for filtering (e.g. "simulation", "parsing")
    pub tags: &'static [&'static str],
}

impl SolverPlugin {
    pub fn key(&self) -> SolverKey {
        SolverKey::with_variant(self.year, self.day, self.variant)
    }
}

inventory::collect!(SolverPlugin);

/// Register a solver type with a builder, yielding the builder's `Result`
///
/// ```
/// use aoc2020_solver::{register_solver, AocParser, ParseError, RegistryBuilder, SolveError, Solver};
///
/// struct Noop;
///
/// impl AocParser for Noop {
///     type SharedData<'a> = ();
///
///     fn parse(_: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(())
///     }
/// }
///
/// impl Solver for Noop {
///     const PARTS: u8 = 1;
///
///     fn solve_part(_: &mut Self::SharedData<'_>, _: u8) -> Result<String, SolveError> {
///         Ok(String::new())
///     }
/// }
///
/// let builder = register_solver!(RegistryBuilder::new(), Noop, 2020, 1).unwrap();
/// let builder = register_solver!(builder, Noop, 2020, 1, "alternate").unwrap();
/// assert_eq!(builder.build().len(), 2);
/// ```
#[macro_export]
macro_rules! register_solver {
    ($builder:expr, $solver:ty, $year:expr, $day:expr) => {
        $builder.register_solver::<$solver>($crate::SolverKey::new($year, $day))
    };
    ($builder:expr, $solver:ty, $year:expr, $day:expr, $variant:expr) => {
        $builder.register_solver::<$solver>($crate::SolverKey::with_variant($year, $day, $variant))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::AocParser;

    struct Echo;

    impl AocParser for Echo {
        type SharedData<'a> = &'a str;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            if input.is_empty() {
                Err(ParseError::MissingData("empty input".into()))
            } else {
                Ok(input)
            }
        }
    }

    impl Solver for Echo {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            Ok(format!("{}:{}", part, shared))
        }
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let result = RegistryBuilder::new()
            .register_solver::<Echo>(SolverKey::new(2020, 1))
            .and_then(|b| b.register_solver::<Echo>(SolverKey::new(2020, 1)));

        assert!(matches!(
            result,
            Err(RegistrationError::DuplicateSolver {
                year: 2020,
                day: 1,
                variant: "main"
            })
        ));
    }

    #[test]
    fn variants_share_a_day() {
        let registry = RegistryBuilder::new()
            .register_solver::<Echo>(SolverKey::new(2020, 6))
            .and_then(|b| b.register_solver::<Echo>(SolverKey::with_variant(2020, 6, "alternate")))
            .unwrap()
            .build();

        assert_eq!(registry.len(), 2);
        let keys: Vec<_> = registry.iter_info().map(|info| info.key).collect();
        assert_eq!(
            keys,
            vec![
                SolverKey::new(2020, 6),
                SolverKey::with_variant(2020, 6, "alternate")
            ]
        );
    }

    #[test]
    fn invalid_day_is_rejected() {
        for day in [0, 26] {
            let result = RegistryBuilder::new().register_solver::<Echo>(SolverKey::new(2020, day));
            assert!(matches!(result, Err(RegistrationError::InvalidDay(2020, d)) if d == day));
        }
    }

    #[test]
    fn create_solver_reports_missing_and_parse_errors() {
        let registry = RegistryBuilder::new()
            .register_solver::<Echo>(SolverKey::new(2020, 2))
            .unwrap()
            .build();

        assert!(matches!(
            registry.create_solver(&SolverKey::new(2020, 3), "x"),
            Err(SolverError::NotFound { day: 3, .. })
        ));
        assert!(matches!(
            registry.create_solver(&SolverKey::new(2020, 2), ""),
            Err(SolverError::Parse(ParseError::MissingData(_)))
        ));

        let mut solver = registry
            .create_solver(&SolverKey::new(2020, 2), "abc")
            .unwrap();
        assert_eq!(solver.key(), SolverKey::new(2020, 2));
        assert_eq!(solver.parts(), 2);
        assert_eq!(solver.solve(2).unwrap().answer, "2:abc");
        assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
    }

    #[test]
    fn info_lookup() {
        let registry = RegistryBuilder::new()
            .register_solver::<Echo>(SolverKey::new(2020, 9))
            .unwrap()
            .build();

        assert!(registry.contains(&SolverKey::new(2020, 9)));
        assert!(!registry.contains(&SolverKey::with_variant(2020, 9, "alternate")));
        assert_eq!(
            registry.get_info(&SolverKey::new(2020, 9)),
            Some(FactoryInfo {
                key: SolverKey::new(2020, 9),
                parts: 2
            })
        );
    }
}
