use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::Symbol;

/// Occurrence counts per symbol.
///
/// Iteration follows the order in which symbols were first inserted. The
/// tree builder seeds its queue in this order, which keeps trees built from
/// the same input identical between runs.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(Symbol, u64)>,
    index: HashMap<Symbol, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every symbol of `symbols`.
    pub fn count<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        symbols.into_iter().fold(Self::new(), |mut acc, symbol| {
            acc.add(symbol, 1);
            acc
        })
    }

    pub fn from_text(text: &str) -> Self {
        Self::count(text.chars())
    }

    /// Increments the count of `symbol` by `n`, inserting it if missing.
    pub fn add(&mut self, symbol: Symbol, n: u64) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 = self.entries[i].1.saturating_add(n),
            None => self.push(symbol, n),
        }
    }

    /// Sets the count of `symbol`, returning the previous one.
    pub fn insert(&mut self, symbol: Symbol, count: u64) -> Option<u64> {
        match self.index.get(&symbol) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, count)),
            None => {
                self.push(symbol, count);
                None
            }
        }
    }

    fn push(&mut self, symbol: Symbol, count: u64) {
        self.index.insert(symbol, self.entries.len());
        self.entries.push((symbol, count));
    }

    /// Gives every symbol of `other` that is missing here a count of zero,
    /// so codes built from `self` can also encode text counted into `other`.
    pub fn extend_missing(&mut self, other: &FrequencyTable) {
        for (symbol, _) in other.iter() {
            if !self.contains(symbol) {
                self.push(symbol, 0);
            }
        }
    }

    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.index.get(&symbol).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.index.contains_key(&symbol)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, &(_, count)| acc.saturating_add(count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.entries.iter().map(|&(symbol, _)| symbol)
    }
}

impl FromIterator<(Symbol, u64)> for FrequencyTable {
    /// Later duplicates overwrite earlier counts but keep the first position.
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (symbol, count) in iter {
            table.insert(symbol, count);
        }
        table
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
