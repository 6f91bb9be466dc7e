//! Day 4: Passport Processing

use crate::utils::parse::{blocks, invalid};
use anyhow::anyhow;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

const REQUIRED: [&str; 7] = ["byr", "iyr", "eyr", "hgt", "hcl", "ecl", "pid"];
const EYE_COLOURS: [&str; 7] = ["amb", "blu", "brn", "gry", "grn", "hzl", "oth"];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 4, tags = ["parsing", "validation"])]
pub struct Solver;

type Passport<'a> = HashMap<&'a str, &'a str>;

fn has_required_fields(passport: &Passport<'_>) -> bool {
    REQUIRED.iter().all(|field| passport.contains_key(field))
}

fn year_between(value: &str, min: u32, max: u32) -> bool {
    value.len() == 4 && value.parse::<u32>().is_ok_and(|year| (min..=max).contains(&year))
}

fn valid_height(value: &str) -> bool {
    let (number, range) = if let Some(number) = value.strip_suffix("cm") {
        (number, 150..=193)
    } else if let Some(number) = value.strip_suffix("in") {
        (number, 59..=76)
    } else {
        return false;
    };
    !number.is_empty()
        && number.bytes().all(|b| b.is_ascii_digit())
        && number.parse::<u32>().is_ok_and(|n| range.contains(&n))
}

fn valid_field(key: &str, value: &str) -> bool {
    match key {
        "byr" => year_between(value, 1920, 2002),
        "iyr" => year_between(value, 2010, 2020),
        "eyr" => year_between(value, 2020, 2030),
        "hgt" => valid_height(value),
        "hcl" => value.strip_prefix('#').is_some_and(|hex| {
            hex.len() == 6 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        }),
        "ecl" => EYE_COLOURS.contains(&value),
        "pid" => value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit()),
        _ => true,
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Passport<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        blocks(input)
            .enumerate()
            .map(|(idx, block)| {
                block
                    .split_whitespace()
                    .map(|field| {
                        field.split_once(':').ok_or_else(|| {
                            invalid(anyhow!("passport {}: field {:?} has no ':'", idx + 1, field))
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|p| has_required_fields(p))
            .count()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|p| has_required_fields(p) && p.iter().all(|(k, v)| valid_field(k, v)))
            .count()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    #[test]
    fn required_fields() {
        let input = indoc! {"
            ecl:gry pid:860033327 eyr:2020 hcl:#fffffd
            byr:1937 iyr:2017 cid:147 hgt:183cm

            iyr:2013 ecl:amb cid:350 eyr:2023 pid:028048884
            hcl:#cfa07d byr:1929

            hcl:#ae17e1 iyr:2013
            eyr:2024
            ecl:brn pid:760753108 byr:1931
            hgt:179cm

            hcl:#cfa07d eyr:2025 pid:166559648
            iyr:2011 ecl:brn hgt:59in
        "};
        assert_eq!(solve::<Solver>(input, 1), "2");
    }

    #[test]
    fn invalid_passports() {
        let input = indoc! {"
            eyr:1972 cid:100
            hcl:#18171d ecl:amb hgt:170 pid:186cm iyr:2018 byr:1926

            iyr:2019
            hcl:#602927 eyr:1967 hgt:170cm
            ecl:grn pid:012533040 byr:1946

            hcl:dab227 iyr:2012
            ecl:brn hgt:182cm pid:021572410 eyr:2020 byr:1992 cid:277

            hgt:59cm ecl:zzz
            eyr:2038 hcl:74454a iyr:2023
            pid:3556412378 byr:2007
        "};
        assert_eq!(solve::<Solver>(input, 2), "0");
    }

    #[test]
    fn valid_passports() {
        let input = indoc! {"
            pid:087499704 hgt:74in ecl:grn iyr:2012 eyr:2030 byr:1980
            hcl:#623a2f

            eyr:2029 ecl:blu cid:129 byr:1989
            iyr:2014 pid:896056539 hcl:#a97842 hgt:165cm

            hcl:#888785
            hgt:164cm byr:2001 iyr:2015 cid:88
            pid:545766238 ecl:hzl
            eyr:2022

            iyr:2010 hgt:158cm hcl:#b6652a ecl:blu byr:1944 eyr:2021 pid:093154719
        "};
        assert_eq!(solve::<Solver>(input, 2), "4");
    }

    #[test]
    fn field_rules() {
        assert!(valid_field("byr", "2002"));
        assert!(!valid_field("byr", "2003"));
        assert!(valid_field("hgt", "60in"));
        assert!(valid_field("hgt", "190cm"));
        assert!(!valid_field("hgt", "190in"));
        assert!(!valid_field("hgt", "190"));
        assert!(valid_field("hcl", "#123abc"));
        assert!(!valid_field("hcl", "#123abz"));
        assert!(!valid_field("hcl", "123abc"));
        assert!(valid_field("ecl", "brn"));
        assert!(!valid_field("ecl", "wat"));
        assert!(valid_field("pid", "000000001"));
        assert!(!valid_field("pid", "0123456789"));
    }
}
