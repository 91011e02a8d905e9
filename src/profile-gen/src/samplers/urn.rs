// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use rand::{Rng, RngCore};
use tracing::debug;

use super::impartial::ImpartialCulture;
use super::{RankingSampler, SampledRankings};
use crate::common::Result;
use crate::ranking::{CandidateMap, RankMap, Tally};

/// Pólya-Eggenberger urn over strict orders.
///
/// The urn starts with one copy of every ranking. Each voter draws a ranking
/// and returns it together with `replace` extra copies, so `replace = 0` is
/// impartial culture and `replace = 1` impartial anonymous culture.
#[derive(Copy, Clone, Debug)]
pub struct UrnSampler {
    pub replace: u64,
}

impl UrnSampler {
    pub fn new(replace: u64) -> Self {
        UrnSampler { replace }
    }
}

/// `n!` as a float; saturates to infinity for large `n`, which just means
/// the urn never gets a chance to reuse a ranking.
fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}

impl RankingSampler for UrnSampler {
    fn sample(
        &self,
        num_voters: usize,
        cmap: &CandidateMap,
        rng: &mut dyn RngCore,
    ) -> Result<SampledRankings> {
        let names = cmap.external_names();
        let ic_size = factorial(names.len());

        let mut votes: Tally<RankMap> = Tally::new();
        let replace = self.replace as f64;
        // replacement mass per ranking, in first-seen order; kept as floats
        // so a huge `replace` can't overflow across voters
        let mut replacements: Vec<(RankMap, f64)> = Vec::new();
        let mut replace_size: f64 = 0.0;

        for _ in 0..num_voters {
            let flip = rng.random::<f64>() * (ic_size + replace_size);
            let chosen = if replace_size == 0.0 || ic_size.is_infinite() || flip < ic_size {
                let rmap = RankMap::from_order(&ImpartialCulture::draw(&names, rng));
                match replacements.iter_mut().find(|(r, _)| *r == rmap) {
                    Some(entry) => entry.1 += replace,
                    None => replacements.push((rmap.clone(), replace)),
                }
                rmap
            } else {
                let mut remaining = flip - ic_size;
                let mut pick = replacements.len() - 1;
                for (i, (_, copies)) in replacements.iter().enumerate() {
                    remaining -= *copies;
                    if remaining < 0.0 {
                        pick = i;
                        break;
                    }
                }
                let entry = &mut replacements[pick];
                entry.1 += replace;
                entry.0.clone()
            };
            replace_size += replace;
            votes.add(chosen, 1);
        }

        let (rmaps, counts) = votes.into_parts();
        debug!(
            replace = self.replace,
            num_voters,
            distinct = rmaps.len(),
            "urn sample complete"
        );
        Ok(SampledRankings { rmaps, counts })
    }
}
