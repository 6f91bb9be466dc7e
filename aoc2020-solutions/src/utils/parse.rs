//! Input splitting and error conversion

use aoc2020_solver::{ParseError, SolveError};

/// Parse every non-blank line of `input`
///
/// Errors are reported with the 1-based line number of the offending line.
pub(crate) fn parse_lines<'a, T>(
    input: &'a str,
    mut parse_line: impl FnMut(&'a str) -> anyhow::Result<T>,
) -> Result<Vec<T>, ParseError> {
    input
        .trim()
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            parse_line(line.trim())
                .map_err(|e| ParseError::InvalidFormat(format!("line {}: {:#}", idx + 1, e)))
        })
        .collect()
}

/// Blocks of `input` separated by blank lines
///
/// A line counts as blank when it holds only whitespace, so `\r\n` endings and
/// indented separators split blocks too. Each block is trimmed.
pub(crate) fn blocks(input: &str) -> impl Iterator<Item = &str> + '_ {
    let mut found = Vec::new();
    let mut start = None;
    let mut offset = 0;
    for line in input.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(from) = start.take() {
                found.push(input[from..offset].trim());
            }
        } else if start.is_none() {
            start = Some(offset);
        }
        offset += line.len();
    }
    if let Some(from) = start {
        found.push(input[from..].trim());
    }
    found.into_iter()
}

pub(crate) fn invalid(error: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(format!("{:#}", error))
}

pub(crate) fn no_solution(error: anyhow::Error) -> SolveError {
    SolveError::SolveFailed(error.into())
}

/// Parse `input` with `S` and answer `part`, panicking on any error
#[cfg(test)]
pub(crate) fn solve<S: aoc2020_solver::Solver>(input: &str, part: u8) -> String {
    let mut shared = S::parse(input).unwrap_or_else(|e| panic!("parse failed: {e}"));
    S::solve_part(&mut shared, part).unwrap_or_else(|e| panic!("part {part} failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lines_reports_line_numbers() {
        let parsed = parse_lines("1\n\n2\n", |l| Ok(l.parse::<u8>()?)).unwrap();
        assert_eq!(parsed, vec![1, 2]);

        let err = parse_lines("1\nx\n", |l| Ok(l.parse::<u8>()?)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.starts_with("line 2:")));
    }

    #[test]
    fn blocks_skip_surrounding_blank_lines() {
        let found: Vec<_> = blocks("\n\na\nb\n\nc\n\n").collect();
        assert_eq!(found, vec!["a\nb", "c"]);
    }

    #[test]
    fn blocks_split_on_crlf_and_whitespace_lines() {
        let found: Vec<_> = blocks("a\r\nb\r\n\r\nc\r\n  \t\r\nd").collect();
        assert_eq!(found, vec!["a\r\nb", "c", "d"]);

        let lines: Vec<_> = found[0].lines().collect();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
