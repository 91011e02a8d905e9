// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Combinatorial ranking samplers.
//!
//! Every sampler works over the one-based candidate names handed out by a
//! [`CandidateMap`] and returns rank-position maps keyed by those names,
//! with identical maps aggregated into a single entry and a count.

use rand::RngCore;

use crate::common::Result;
use crate::ranking::{CandidateMap, RankMap, Tally};

mod impartial;
mod mallows;
mod single_peaked;
mod urn;

pub use self::impartial::ImpartialCulture;
pub use self::mallows::MallowsSampler;
pub use self::single_peaked::SinglePeakedSampler;
pub use self::urn::UrnSampler;

/// Distinct rank maps drawn by a sampler, with a parallel count list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampledRankings {
    pub rmaps: Vec<RankMap>,
    pub counts: Vec<usize>,
}

impl SampledRankings {
    pub fn num_voters(&self) -> usize {
        self.counts.iter().sum()
    }

    pub(crate) fn from_orders<I>(orders: I) -> Self
    where
        I: IntoIterator<Item = Vec<usize>>,
    {
        let mut tally = Tally::new();
        for order in orders {
            tally.add(RankMap::from_order(&order), 1);
        }
        let (rmaps, counts) = tally.into_parts();
        SampledRankings { rmaps, counts }
    }
}

pub trait RankingSampler {
    fn sample(
        &self,
        num_voters: usize,
        cmap: &CandidateMap,
        rng: &mut dyn RngCore,
    ) -> Result<SampledRankings>;
}
