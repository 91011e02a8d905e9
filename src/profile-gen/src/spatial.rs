// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Spatial (ideological-position) model of preference formation.
//!
//! Candidates and voters are placed in a shared `num_dim`-dimensional space
//! by independent draws from a standard multivariate normal. Each voter
//! ranks candidates by the Rabinowitz-Macdonald mixed utility
//!
//! ```text
//! U(v, c) = 2 (v . c) - beta (|v|^2 + |c|^2)
//! ```
//!
//! `beta = 1` is the proximity model (`-|v - c|^2`), `beta = 0` the purely
//! directional one.

use std::cmp::Reverse;
use std::f64::consts::PI;

use ordered_float::OrderedFloat;
use rand::{Rng, RngCore};
use tracing::{debug, trace};

use crate::common::{Candidate, Result};
use crate::invariant_err;
use crate::ranking::{Ranking, Tally};

/// Parameters of the spatial model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpatialParams {
    /// Dimensionality of the ideological space.
    pub num_dim: usize,
    /// Mix between directional (0) and proximity (1) utility.
    pub beta: f64,
}

impl Default for SpatialParams {
    fn default() -> Self {
        SpatialParams {
            num_dim: 3,
            beta: 1.0,
        }
    }
}

/// Sample from the standard normal distribution using the Box-Muller transform.
pub(crate) fn sample_standard_normal(rng: &mut dyn RngCore) -> f64 {
    // random() returns [0, 1), so clamp u1 away from zero to keep ln finite.
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// `count` points drawn from a zero-mean, identity-covariance normal.
fn sample_positions(count: usize, num_dim: usize, rng: &mut dyn RngCore) -> Vec<Vec<f64>> {
    (0..count)
        .map(|_| (0..num_dim).map(|_| sample_standard_normal(rng)).collect())
        .collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn voter_utility(v_pos: &[f64], c_pos: &[f64], beta: f64) -> f64 {
    2.0 * dot(v_pos, c_pos) - beta * (dot(v_pos, v_pos) + dot(c_pos, c_pos))
}

/// One voter's ranking: descending utility, equal utilities broken by
/// ascending candidate id so no candidate is ever lost.
pub fn rank_by_utility(v_pos: &[f64], cand_positions: &[Vec<f64>], beta: f64) -> Ranking {
    let mut scored: Vec<(Reverse<OrderedFloat<f64>>, Candidate)> = cand_positions
        .iter()
        .enumerate()
        .map(|(c, c_pos)| (Reverse(OrderedFloat(voter_utility(v_pos, c_pos, beta))), c))
        .collect();
    scored.sort_unstable();
    Ranking::new(scored.into_iter().map(|(_, c)| c).collect())
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SpatialModel {
    pub params: SpatialParams,
}

impl SpatialModel {
    pub fn new(params: SpatialParams) -> Self {
        SpatialModel { params }
    }

    /// Generates `num_voters` rankings over `num_cands` candidates and
    /// aggregates identical ones, in first-seen order.
    pub fn generate(
        &self,
        num_voters: usize,
        num_cands: usize,
        rng: &mut dyn RngCore,
    ) -> Result<(Vec<Ranking>, Vec<usize>)> {
        let SpatialParams { num_dim, beta } = self.params;

        let cand_positions = sample_positions(num_cands, num_dim, rng);
        let voter_positions = sample_positions(num_voters, num_dim, rng);

        let mut tally = Tally::new();
        for (v, v_pos) in voter_positions.iter().enumerate() {
            let ranking = rank_by_utility(v_pos, &cand_positions, beta);
            trace!(voter = v, %ranking, "spatial voter ranked");
            tally.add(ranking, 1);
        }

        if tally.total() != num_voters {
            return invariant_err!(
                BadCounts,
                format!("spatial counts sum to {} for {num_voters} voters", tally.total())
            );
        }

        let (rankings, counts) = tally.into_parts();
        debug!(
            num_dim,
            beta,
            num_voters,
            distinct = rankings.len(),
            "spatial profile complete"
        );
        Ok((rankings, counts))
    }
}
