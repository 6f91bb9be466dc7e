//! Identity of a registered solver

use std::cmp::Ordering;
use std::fmt;

/// Variant name of the first solver written for a day
pub const MAIN_VARIANT: &str = "main";

/// Identifies one solver: the puzzle it solves and which of its sibling
/// implementations it is.
///
/// Ordered by year, day, then variant with [`MAIN_VARIANT`] first and the
/// remaining variants by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolverKey {
    pub year: u16,
    pub day: u8,
    pub variant: &'static str,
}

impl SolverKey {
    /// Key of the main solver for a puzzle
    pub const fn new(year: u16, day: u8) -> Self {
        Self {
            year,
            day,
            variant: MAIN_VARIANT,
        }
    }

    /// Key of a named sibling solver for a puzzle
    pub const fn with_variant(year: u16, day: u8, variant: &'static str) -> Self {
        Self { year, day, variant }
    }

    pub fn is_main(&self) -> bool {
        self.variant == MAIN_VARIANT
    }
}

impl Ord for SolverKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then(self.day.cmp(&other.day))
            .then_with(|| other.is_main().cmp(&self.is_main()))
            .then_with(|| self.variant.cmp(other.variant))
    }
}

impl PartialOrd for SolverKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SolverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.year, self.day)?;
        if !self.is_main() {
            write!(f, " [{}]", self.variant)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_variant_sorts_before_alternates() {
        let mut keys = vec![
            SolverKey::with_variant(2020, 7, "alternate"),
            SolverKey::new(2020, 8),
            SolverKey::new(2020, 7),
            SolverKey::with_variant(2020, 6, "alternate"),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SolverKey::with_variant(2020, 6, "alternate"),
                SolverKey::new(2020, 7),
                SolverKey::with_variant(2020, 7, "alternate"),
                SolverKey::new(2020, 8),
            ]
        );
    }

    #[test]
    fn display_names_alternates() {
        assert_eq!(SolverKey::new(2020, 3).to_string(), "2020/03");
        assert_eq!(
            SolverKey::with_variant(2020, 19, "alternate").to_string(),
            "2020/19 [alternate]"
        );
    }
}
