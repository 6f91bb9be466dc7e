//! Day 8: Handheld Halting

use crate::utils::parse::{no_solution, parse_lines};
use anyhow::{Context, anyhow, bail};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 8, tags = ["interpreter"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Acc,
    Jmp,
    Nop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    op: Op,
    arg: i64,
}

/// How a run of the program ended
#[derive(Debug, PartialEq, Eq)]
enum Exit {
    /// The pointer reached one past the last instruction
    Halted(i64),
    /// An instruction was about to run a second time
    Looped(i64),
    /// A jump left the program anywhere other than one past the end
    OutOfBounds(i64),
}

/// Run `program`, reading `jmp` as `nop` and vice versa at index `flip`
fn run(program: &[Instruction], flip: Option<usize>) -> Exit {
    let mut visited = vec![false; program.len()];
    let mut pointer = 0usize;
    let mut acc = 0i64;

    loop {
        if pointer == program.len() {
            return Exit::Halted(acc);
        }
        let Some(seen) = visited.get_mut(pointer) else {
            return Exit::OutOfBounds(acc);
        };
        if *seen {
            return Exit::Looped(acc);
        }
        *seen = true;

        let Instruction { op, arg } = program[pointer];
        let op = match (op, flip == Some(pointer)) {
            (Op::Jmp, true) => Op::Nop,
            (Op::Nop, true) => Op::Jmp,
            (op, _) => op,
        };
        match op {
            Op::Acc => {
                acc += arg;
                pointer += 1;
            }
            Op::Nop => pointer += 1,
            Op::Jmp => match pointer.checked_add_signed(arg as isize) {
                Some(next) => pointer = next,
                None => return Exit::OutOfBounds(acc),
            },
        }
    }
}

fn parse_instruction(line: &str) -> anyhow::Result<Instruction> {
    let (op, arg) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `<op> <arg>`"))?;
    let op = match op {
        "acc" => Op::Acc,
        "jmp" => Op::Jmp,
        "nop" => Op::Nop,
        other => bail!("unknown opcode {:?}", other),
    };
    let arg = arg
        .parse::<i64>()
        .with_context(|| format!("argument {:?}", arg))?;
    Ok(Instruction { op, arg })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_instruction)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        match run(shared, None) {
            Exit::Looped(acc) => Ok(acc.to_string()),
            other => Err(no_solution(anyhow!("program does not loop: {:?}", other))),
        }
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let program: &[Instruction] = shared;
        program
            .iter()
            .enumerate()
            .filter(|(_, ins)| ins.op != Op::Acc)
            .find_map(|(index, _)| match run(program, Some(index)) {
                Exit::Halted(acc) => {
                    tracing::debug!(index, acc, "flipping instruction halts the program");
                    Some(acc)
                }
                _ => None,
            })
            .map(|acc| acc.to_string())
            .ok_or_else(|| no_solution(anyhow!("no single jmp/nop flip halts the program")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        nop +0
        acc +1
        jmp +4
        acc +3
        jmp -3
        acc -99
        acc +1
        jmp -4
        acc +6
    "};

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "5");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "8");
    }

    #[test]
    fn exits() {
        let program = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(run(&program, None), Exit::Looped(5));
        assert_eq!(run(&program, Some(7)), Exit::Halted(8));

        let program = Solver::parse("acc +1\njmp -5").unwrap();
        assert_eq!(run(&program, None), Exit::OutOfBounds(1));
    }

    #[test]
    fn unknown_opcode_is_a_parse_error() {
        assert!(matches!(
            Solver::parse("nop +0\nmul +3"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("mul")
        ));
    }
}
