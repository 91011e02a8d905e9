// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Ranking representations and the conversions between them.
//!
//! Samplers speak in *rank-position maps* (candidate -> 1-based position)
//! keyed by their own candidate names; the rest of the crate speaks in
//! *linear rankings* (candidates ordered best to worst) over zero-based
//! ids. [`CandidateMap`] translates names and [`rmaps_to_linear_rankings`]
//! translates representations.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

use crate::common::{Candidate, Result};
use crate::invariant_err;

/// A strict linear ranking, most preferred candidate first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ranking(Vec<Candidate>);

impl Ranking {
    pub fn new(order: Vec<Candidate>) -> Self {
        Ranking(order)
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Candidate> {
        self.0
    }

    /// Position (0-based) of `c`, if it is ranked at all.
    pub fn index_of(&self, c: Candidate) -> Option<usize> {
        self.0.iter().position(|&x| x == c)
    }

    /// True when `a` is ranked strictly above `b`.
    pub fn prefers(&self, a: Candidate, b: Candidate) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => ia < ib,
            _ => false,
        }
    }

    pub fn reversed(&self) -> Ranking {
        Ranking(self.0.iter().rev().copied().collect())
    }

    /// Rank-position map for this ranking: position = 1-based index.
    pub fn to_rank_map(&self) -> RankMap {
        RankMap::from_order(&self.0)
    }

    /// Whether this is a permutation of `0..num_cands`.
    pub fn is_permutation_of(&self, num_cands: usize) -> bool {
        if self.0.len() != num_cands {
            return false;
        }
        let mut seen = vec![false; num_cands];
        for &c in self.0.iter() {
            if c >= num_cands || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }
}

impl From<Vec<Candidate>> for Ranking {
    fn from(order: Vec<Candidate>) -> Self {
        Ranking(order)
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        if self.0.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

/// Candidate name -> 1-based preference position (1 = most preferred).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RankMap(BTreeMap<usize, usize>);

impl RankMap {
    pub fn new() -> Self {
        RankMap(BTreeMap::new())
    }

    /// Builds a map from candidate names listed best to worst.
    pub fn from_order(order: &[usize]) -> Self {
        RankMap(
            order
                .iter()
                .enumerate()
                .map(|(i, &name)| (name, i + 1))
                .collect(),
        )
    }

    pub fn insert(&mut self, name: usize, position: usize) -> Option<usize> {
        self.0.insert(name, position)
    }

    pub fn position(&self, name: usize) -> Option<usize> {
        self.0.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(&name, &pos)| (name, pos))
    }

    pub fn names(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    /// Sorts entries by position and emits the candidate sequence.
    ///
    /// Positions must be exactly `1..=len`; a gap or a repeat would make the
    /// resulting sequence ambiguous, so it is reported instead.
    pub fn to_ranking(&self) -> Result<Ranking> {
        let n = self.0.len();
        let mut slots: Vec<Option<usize>> = vec![None; n];
        for (&name, &pos) in self.0.iter() {
            if pos == 0 || pos > n {
                return invariant_err!(
                    BadRankMap,
                    format!("position {pos} for candidate {name} outside 1..={n}")
                );
            }
            if let Some(other) = slots[pos - 1] {
                return invariant_err!(
                    BadRankMap,
                    format!("candidates {other} and {name} share position {pos}")
                );
            }
            slots[pos - 1] = Some(name);
        }
        // n distinct positions in 1..=n fill every slot
        Ok(Ranking(slots.into_iter().flatten().collect()))
    }
}

impl FromIterator<(usize, usize)> for RankMap {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        RankMap(iter.into_iter().collect())
    }
}

/// Converts sampler rank maps into linear rankings, preserving input order.
pub fn rmaps_to_linear_rankings(rmaps: &[RankMap]) -> Result<Vec<Ranking>> {
    rmaps.iter().map(RankMap::to_ranking).collect()
}

/// Bijection between the engine's zero-based candidate ids and the
/// one-based names the samplers work over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CandidateMap {
    num_cands: usize,
}

impl CandidateMap {
    pub fn new(num_cands: usize) -> Self {
        CandidateMap { num_cands }
    }

    pub fn num_cands(&self) -> usize {
        self.num_cands
    }

    pub fn to_external(&self, c: Candidate) -> usize {
        c + 1
    }

    pub fn to_engine(&self, name: usize) -> Result<Candidate> {
        if name == 0 || name > self.num_cands {
            return invariant_err!(
                BadRankMap,
                format!("candidate name {name} outside 1..={}", self.num_cands)
            );
        }
        Ok(name - 1)
    }

    /// Sampler-facing names, in engine id order.
    pub fn external_names(&self) -> Vec<usize> {
        (0..self.num_cands).map(|c| self.to_external(c)).collect()
    }

    pub fn to_external_map(&self, rmap: &RankMap) -> RankMap {
        rmap.iter()
            .map(|(c, pos)| (self.to_external(c), pos))
            .collect()
    }

    pub fn to_engine_map(&self, rmap: &RankMap) -> Result<RankMap> {
        let mut engine = RankMap::new();
        for (name, pos) in rmap.iter() {
            engine.insert(self.to_engine(name)?, pos);
        }
        Ok(engine)
    }
}

/// Counts identical items, remembering the order each was first seen in.
#[derive(Clone, Debug)]
pub struct Tally<T: Eq + Hash + Clone> {
    index: HashMap<T, usize>,
    items: Vec<T>,
    counts: Vec<usize>,
}

impl<T: Eq + Hash + Clone> Default for Tally<T> {
    fn default() -> Self {
        Tally {
            index: HashMap::new(),
            items: Vec::new(),
            counts: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> Tally<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T, n: usize) {
        match self.index.get(&item) {
            Some(&i) => self.counts[i] += n,
            None => {
                self.index.insert(item.clone(), self.items.len());
                self.items.push(item);
                self.counts.push(n);
            }
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<usize>) {
        (self.items, self.counts)
    }
}
