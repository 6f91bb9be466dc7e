//! Reorders results arriving from worker threads
//!
//! Results are printed in [`ResultKey`] order no matter which worker finishes
//! first: each result waits in `pending` until every key before it has been
//! printed.

use crate::executor::SolverResult;
use aoc2020_solver::SolverKey;
use std::collections::{BTreeMap, VecDeque};

/// Output position of a result: solver key (year, day, variant), then part
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub key: SolverKey,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            key: r.key,
            part: r.part,
        }
    }
}

pub struct ResultAggregator {
    /// Keys not printed yet, smallest first
    expected: VecDeque<ResultKey>,
    /// Received results waiting for an earlier key
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(mut expected_keys: Vec<ResultKey>) -> Self {
        expected_keys.sort_unstable();
        expected_keys.dedup();
        Self {
            expected: expected_keys.into(),
            pending: BTreeMap::new(),
        }
    }

    /// Accept `result` and return every result that can now be printed, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(next) = self.expected.front() {
            let Some(result) = self.pending.remove(next) else {
                break;
            };
            self.expected.pop_front();
            ready.push(result);
        }
        ready
    }

    /// Results still held back by a missing earlier key, in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let drained = std::mem::take(&mut self.pending);
        for key in drained.keys() {
            self.expected.retain(|expected| expected != key);
        }
        drained.into_values().collect()
    }

    /// Whether every expected key has been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(day: u8, variant: &'static str, part: u8) -> ResultKey {
        ResultKey {
            key: SolverKey::with_variant(2020, day, variant),
            part,
        }
    }

    fn make_result(k: ResultKey) -> SolverResult {
        SolverResult {
            key: k.key,
            part: k.part,
            answer: Ok(format!("{}_{}", k.key, k.part)),
            parse_duration: Some(TimeDelta::milliseconds(5)),
            solve_duration: TimeDelta::milliseconds(10),
        }
    }

    #[test]
    fn test_in_order_results() {
        let keys = vec![key(1, "main", 1), key(1, "main", 2)];
        let mut agg = ResultAggregator::new(keys.clone());

        let ready = agg.add(make_result(keys[0]));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 1);

        let ready = agg.add(make_result(keys[1]));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 2);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let keys = vec![
            key(7, "main", 1),
            key(7, "main", 2),
            key(7, "alternate", 1),
            key(8, "main", 1),
        ];
        let mut agg = ResultAggregator::new(keys.clone());

        assert!(agg.add(make_result(keys[2])).is_empty());
        assert!(agg.add(make_result(keys[1])).is_empty());
        assert!(agg.add(make_result(keys[3])).is_empty());

        let ready = agg.add(make_result(keys[0]));
        let order: Vec<ResultKey> = ready.iter().map(ResultKey::from).collect();
        assert_eq!(order, keys);
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new(vec![key(1, "main", 1), key(1, "main", 2)]);

        agg.add(make_result(key(1, "main", 2)));
        assert!(!agg.is_complete());

        let remaining = agg.drain();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].part, 2);
    }

    proptest! {
        #[test]
        fn any_arrival_order_prints_sorted(order in Just((0..12usize).collect::<Vec<_>>()).prop_shuffle()) {
            let variants = ["main", "alternate"];
            let mut keys: Vec<ResultKey> = (0..12usize)
                .map(|i| key((i / 4 + 1) as u8, variants[i / 2 % 2], (i % 2 + 1) as u8))
                .collect();
            keys.sort();
            let mut agg = ResultAggregator::new(keys.clone());

            let mut printed = Vec::new();
            for idx in order {
                printed.extend(agg.add(make_result(keys[idx])).iter().map(ResultKey::from));
            }
            prop_assert!(agg.is_complete());
            prop_assert_eq!(printed, keys);
        }
    }
}
