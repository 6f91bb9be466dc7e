//! Timing and error behaviour of registry-created instances

use aoc2020_solver::{
    AocParser, AocSolver, ParseError, PartSolver, RegistryBuilder, SolveError, SolverError,
    SolverKey,
};

#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct Words;

impl AocParser for Words {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let words: Vec<_> = input.split_whitespace().collect();
        if words.is_empty() {
            return Err(ParseError::MissingData("no words".into()));
        }
        Ok(words)
    }
}

impl PartSolver<1> for Words {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

#[test]
fn timestamps_are_ordered() {
    let registry = RegistryBuilder::new()
        .register_solver::<Words>(SolverKey::new(2020, 4))
        .unwrap()
        .build();

    let mut solver = registry
        .create_solver(&SolverKey::new(2020, 4), "a bb ccc")
        .unwrap();
    assert!(solver.parse_start() <= solver.parse_end());
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());

    let result = solver.solve(1).unwrap();
    assert_eq!(result.answer, "3");
    assert!(result.solve_start <= result.solve_end);
}

#[test]
fn parse_errors_surface_through_registry() {
    let registry = RegistryBuilder::new()
        .register_solver::<Words>(SolverKey::new(2020, 4))
        .unwrap()
        .build();

    let err = registry
        .create_solver(&SolverKey::new(2020, 4), "   ")
        .err()
        .unwrap();
    assert!(matches!(err, SolverError::Parse(ParseError::MissingData(_))));
    assert_eq!(err.to_string(), "Parse error: Missing data: no words");
}

#[test]
fn lookup_uses_the_variant() {
    let registry = RegistryBuilder::new()
        .register_solver::<Words>(SolverKey::with_variant(2020, 4, "alternate"))
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(&SolverKey::new(2020, 4), "x"),
        Err(SolverError::NotFound { variant: "main", .. })
    ));
    let mut solver = registry
        .create_solver(&SolverKey::with_variant(2020, 4, "alternate"), "x y")
        .unwrap();
    assert_eq!(solver.key().variant, "alternate");
    assert_eq!(solver.solve(1).unwrap().answer, "2");
}
