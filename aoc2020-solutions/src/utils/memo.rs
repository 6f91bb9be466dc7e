//! Memoized recurrences over a dependency graph
//!
//! A [`Recurrence`] names, for each index, the indices its value is built from
//! and how to combine their values. [`Memo`] evaluates it lazily: asking for
//! one index evaluates only what it depends on, and every index is combined at
//! most once. Reaching an index that is still being evaluated is reported as a
//! cycle instead of recursing forever.
//!
//! ```rust
//! use aoc2020_solutions::utils::memo::{Dense, Memo, Recurrence};
//!
//! struct Tribonacci;
//!
//! impl Recurrence for Tribonacci {
//!     type Index = usize;
//!     type Value = u64;
//!
//!     fn inputs(&self, n: &usize) -> Vec<usize> {
//!         if *n < 3 { vec![] } else { vec![n - 1, n - 2, n - 3] }
//!     }
//!
//!     fn combine(&self, n: &usize, inputs: Vec<u64>) -> u64 {
//!         if *n < 3 { u64::from(*n == 2) } else { inputs.iter().sum() }
//!     }
//! }
//!
//! let memo = Memo::new(Tribonacci, Dense::new());
//! assert_eq!(memo.get(&10).unwrap(), 81);
//! ```

use anyhow::bail;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub trait Recurrence {
    type Index: Clone + Debug;
    type Value: Clone;

    /// Indices whose values `index` is combined from; empty for base cases
    fn inputs(&self, index: &Self::Index) -> Vec<Self::Index>;

    /// Value of `index`, given the values of [`Recurrence::inputs`] in order
    fn combine(&self, index: &Self::Index, inputs: Vec<Self::Value>) -> Self::Value;
}

/// State of one index in a [`Table`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<V> {
    /// Evaluation started and has not finished
    Pending,
    Ready(V),
}

/// Storage for evaluated indices
pub trait Table<I, V> {
    fn slot(&self, index: &I) -> Option<&Slot<V>>;
    fn fill(&mut self, index: I, slot: Slot<V>);
    /// Forget `index`, as if it had never been asked for
    fn clear(&mut self, index: &I);
}

/// Table for small `usize` indices, grown on demand
#[derive(Debug)]
pub struct Dense<V> {
    slots: Vec<Option<Slot<V>>>,
}

impl<V> Dense<V> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }
}

impl<V> Default for Dense<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Table<usize, V> for Dense<V> {
    fn slot(&self, index: &usize) -> Option<&Slot<V>> {
        self.slots.get(*index).and_then(Option::as_ref)
    }

    fn fill(&mut self, index: usize, slot: Slot<V>) {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(slot);
    }

    fn clear(&mut self, index: &usize) {
        if let Some(slot) = self.slots.get_mut(*index) {
            *slot = None;
        }
    }
}

/// Table for any hashable index, such as names borrowed from the input
#[derive(Debug)]
pub struct Sparse<I, V> {
    slots: HashMap<I, Slot<V>>,
}

impl<I, V> Sparse<I, V> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<I, V> Default for Sparse<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, V> Table<I, V> for Sparse<I, V> {
    fn slot(&self, index: &I) -> Option<&Slot<V>> {
        self.slots.get(index)
    }

    fn fill(&mut self, index: I, slot: Slot<V>) {
        self.slots.insert(index, slot);
    }

    fn clear(&mut self, index: &I) {
        self.slots.remove(index);
    }
}

/// Lazily evaluated [`Recurrence`]
///
/// Lookups take `&self`; the table sits in a `RefCell` and no borrow of it is
/// held while inputs are evaluated.
pub struct Memo<R, T> {
    recurrence: R,
    table: RefCell<T>,
}

impl<R, T> Memo<R, T>
where
    R: Recurrence,
    T: Table<R::Index, R::Value>,
{
    pub fn new(recurrence: R, table: T) -> Self {
        Self {
            recurrence,
            table: RefCell::new(table),
        }
    }

    /// Value of `index`, evaluating its inputs first when they are not known yet
    ///
    /// Fails when `index` depends on itself. Nothing evaluated on the way to a
    /// failure stays pending, so a later lookup fails for the same reason.
    pub fn get(&self, index: &R::Index) -> anyhow::Result<R::Value> {
        let known = match self.table.borrow().slot(index) {
            Some(Slot::Ready(value)) => Some(value.clone()),
            Some(Slot::Pending) => bail!("dependency cycle through {:?}", index),
            None => None,
        };
        if let Some(value) = known {
            return Ok(value);
        }

        self.table.borrow_mut().fill(index.clone(), Slot::Pending);
        let inputs = self
            .recurrence
            .inputs(index)
            .iter()
            .map(|input| self.get(input))
            .collect::<anyhow::Result<Vec<_>>>();
        let inputs = match inputs {
            Ok(inputs) => inputs,
            Err(err) => {
                self.table.borrow_mut().clear(index);
                return Err(err);
            }
        };
        let value = self.recurrence.combine(index, inputs);
        self.table
            .borrow_mut()
            .fill(index.clone(), Slot::Ready(value.clone()));
        Ok(value)
    }
}
