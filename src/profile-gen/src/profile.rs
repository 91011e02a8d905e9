// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashSet;

use crate::common::Result;
use crate::invariant_err;
use crate::ranking::Ranking;

/// A ranking multiset over `num_cands` candidates.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    rankings: Vec<Ranking>,
    counts: Vec<usize>,
    num_cands: usize,
}

impl Profile {
    pub fn new(rankings: Vec<Ranking>, num_cands: usize, counts: Vec<usize>) -> Self {
        Profile {
            rankings,
            counts,
            num_cands,
        }
    }

    pub fn rankings(&self) -> &[Ranking] {
        &self.rankings
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn num_cands(&self) -> usize {
        self.num_cands
    }

    pub fn num_voters(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ranking, usize)> + '_ {
        self.rankings.iter().zip(self.counts.iter().copied())
    }

    /// Count for `ranking`, or 0 if nobody holds it.
    pub fn count_of(&self, ranking: &Ranking) -> usize {
        self.iter()
            .find(|(r, _)| *r == ranking)
            .map(|(_, c)| c)
            .unwrap_or(0)
    }

    /// Checks the structural invariants of a generated profile: one count
    /// per ranking, positive counts summing to `num_voters`, every ranking a
    /// permutation of the candidates and no ranking listed twice.
    pub fn validate(&self, num_voters: usize) -> Result<()> {
        if self.rankings.len() != self.counts.len() {
            return invariant_err!(
                BadCounts,
                format!(
                    "{} rankings but {} counts",
                    self.rankings.len(),
                    self.counts.len()
                )
            );
        }
        if self.counts.contains(&0) {
            return invariant_err!(BadCounts, "zero multiplicity in profile".to_owned());
        }
        if self.num_voters() != num_voters {
            return invariant_err!(
                BadCounts,
                format!("counts sum to {} for {num_voters} voters", self.num_voters())
            );
        }
        let mut seen = HashSet::new();
        for ranking in self.rankings.iter() {
            if !ranking.is_permutation_of(self.num_cands) {
                return invariant_err!(
                    BadRankMap,
                    format!(
                        "{ranking} is not a ranking of {} candidates",
                        self.num_cands
                    )
                );
            }
            if !seen.insert(ranking) {
                return invariant_err!(BadCounts, format!("{ranking} listed twice"));
            }
        }
        Ok(())
    }
}
