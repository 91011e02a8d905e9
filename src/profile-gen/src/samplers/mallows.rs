// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use rand::{Rng, RngCore};
use tracing::debug;

use super::{RankingSampler, SampledRankings};
use crate::common::Result;
use crate::config_err;
use crate::ranking::{CandidateMap, RankMap};

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Mixture of Mallows models.
///
/// Each voter picks a component with probability equal to its weight, then
/// draws a ranking whose probability decays as `phi^d` in the Kendall-tau
/// distance `d` from that component's reference.
#[derive(Clone, Debug)]
pub struct MallowsSampler {
    references: Vec<RankMap>,
    weights: Vec<f64>,
    phis: Vec<f64>,
}

impl MallowsSampler {
    pub fn new(references: Vec<RankMap>, weights: Vec<f64>, phis: Vec<f64>) -> Result<Self> {
        if references.is_empty() {
            return config_err!(BadReference, "mallows needs at least one reference".to_owned());
        }
        if references.len() != weights.len() || references.len() != phis.len() {
            return config_err!(
                BadReference,
                format!(
                    "{} references, {} weights and {} dispersions",
                    references.len(),
                    weights.len(),
                    phis.len()
                )
            );
        }
        if let Some(phi) = phis.iter().find(|phi| !(0.0..=1.0).contains(*phi)) {
            return config_err!(BadParameter, format!("dispersion {phi} outside [0, 1]"));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return config_err!(BadParameter, format!("bad mixture weights {weights:?}"));
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return config_err!(
                BadParameter,
                format!("mixture weights sum to {total}, not 1")
            );
        }

        Ok(MallowsSampler {
            references,
            weights,
            phis,
        })
    }

    /// Single-reference model.
    pub fn single(reference: RankMap, phi: f64) -> Result<Self> {
        Self::new(vec![reference], vec![1.0], vec![phi])
    }

    fn pick_component(&self, rng: &mut dyn RngCore) -> usize {
        let mut flip = rng.random::<f64>();
        for (i, w) in self.weights.iter().enumerate() {
            flip -= w;
            if flip < 0.0 {
                return i;
            }
        }
        self.weights.len() - 1
    }
}

/// Insertion probabilities for the repeated-insertion model: row `i` holds
/// the chance of placing the `(i+1)`-th reference candidate at each of the
/// `i+1` available slots, best slot first.
fn insertion_probabilities(num_cands: usize, phi: f64) -> Vec<Vec<f64>> {
    (0..num_cands)
        .map(|i| {
            let weights: Vec<f64> = (0..=i).map(|j| phi.powi((i - j) as i32)).collect();
            let total: f64 = weights.iter().sum();
            weights.into_iter().map(|w| w / total).collect()
        })
        .collect()
}

fn insert_draw(reference: &[usize], insertion: &[Vec<f64>], rng: &mut dyn RngCore) -> Vec<usize> {
    let mut order: Vec<usize> = Vec::with_capacity(reference.len());
    for (i, &name) in reference.iter().enumerate() {
        let mut flip = rng.random::<f64>();
        let mut slot = i;
        for (j, p) in insertion[i].iter().enumerate() {
            flip -= p;
            if flip < 0.0 {
                slot = j;
                break;
            }
        }
        order.insert(slot, name);
    }
    order
}

impl RankingSampler for MallowsSampler {
    fn sample(
        &self,
        num_voters: usize,
        cmap: &CandidateMap,
        rng: &mut dyn RngCore,
    ) -> Result<SampledRankings> {
        let names = cmap.external_names();
        let mut reference_orders = Vec::with_capacity(self.references.len());
        for reference in self.references.iter() {
            if reference.names().ne(names.iter().copied()) {
                return config_err!(
                    BadReference,
                    format!("reference {reference:?} does not rank exactly {names:?}")
                );
            }
            let ranking = match reference.to_ranking() {
                Ok(ranking) => ranking,
                Err(err) => {
                    return config_err!(
                        BadReference,
                        err.get_details().unwrap_or_default()
                    );
                }
            };
            reference_orders.push(ranking.into_inner());
        }

        let insertion: Vec<Vec<Vec<f64>>> = self
            .phis
            .iter()
            .map(|&phi| insertion_probabilities(names.len(), phi))
            .collect();

        let sampled = SampledRankings::from_orders((0..num_voters).map(|_| {
            let k = self.pick_component(rng);
            insert_draw(&reference_orders[k], &insertion[k], rng)
        }));
        debug!(
            components = self.references.len(),
            num_voters,
            distinct = sampled.rmaps.len(),
            "mallows sample complete"
        );
        Ok(sampled)
    }
}
