// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use rand::RngCore;
use rand::seq::SliceRandom;

use super::{RankingSampler, SampledRankings};
use crate::common::Result;
use crate::ranking::CandidateMap;

/// Impartial culture over strict orders: every voter independently draws a
/// uniformly random permutation of the candidates.
#[derive(Copy, Clone, Debug, Default)]
pub struct ImpartialCulture;

impl ImpartialCulture {
    pub(crate) fn draw(names: &[usize], rng: &mut dyn RngCore) -> Vec<usize> {
        let mut order = names.to_vec();
        order.shuffle(rng);
        order
    }
}

impl RankingSampler for ImpartialCulture {
    fn sample(
        &self,
        num_voters: usize,
        cmap: &CandidateMap,
        rng: &mut dyn RngCore,
    ) -> Result<SampledRankings> {
        let names = cmap.external_names();
        Ok(SampledRankings::from_orders(
            (0..num_voters).map(|_| Self::draw(&names, rng)),
        ))
    }
}
