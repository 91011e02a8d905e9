// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

use super::{RankingSampler, SampledRankings};
use crate::common::Result;
use crate::ranking::CandidateMap;

/// Uniform distribution over rankings single-peaked on the axis given by
/// the candidates' names in ascending order.
///
/// Rankings are built worst-first: the last-placed candidate is always an
/// end of the remaining axis interval, chosen with a fair coin. Each of the
/// `2^(m-1)` single-peaked orders is equally likely.
#[derive(Copy, Clone, Debug, Default)]
pub struct SinglePeakedSampler;

fn draw(axis: &[usize], rng: &mut dyn RngCore) -> Vec<usize> {
    let mut remaining: VecDeque<usize> = axis.iter().copied().collect();
    let mut worst_first = Vec::with_capacity(axis.len());
    while remaining.len() > 1 {
        let end = if rng.random::<bool>() {
            remaining.pop_front()
        } else {
            remaining.pop_back()
        };
        worst_first.extend(end);
    }
    worst_first.extend(remaining.pop_front());
    worst_first.reverse();
    worst_first
}

impl RankingSampler for SinglePeakedSampler {
    fn sample(
        &self,
        num_voters: usize,
        cmap: &CandidateMap,
        rng: &mut dyn RngCore,
    ) -> Result<SampledRankings> {
        let axis = cmap.external_names();
        Ok(SampledRankings::from_orders(
            (0..num_voters).map(|_| draw(&axis, rng)),
        ))
    }
}
