// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Seed rankings for the dispersion (Mallows) models.

use rand::RngCore;

use crate::common::{Candidate, Result};
use crate::invariant_err;
use crate::ranking::{CandidateMap, RankMap, Ranking};
use crate::samplers::{ImpartialCulture, RankingSampler};

/// One uniformly random reference, keyed by the sampler-facing names.
pub fn single_reference(cmap: &CandidateMap, rng: &mut dyn RngCore) -> Result<RankMap> {
    let sampled = ImpartialCulture.sample(1, cmap, rng)?;
    match sampled.rmaps.into_iter().next() {
        Some(rmap) => Ok(rmap),
        None => invariant_err!(BadCounts, "impartial culture drew no reference".to_owned()),
    }
}

/// The reversal of `first`: every pair of candidates is ordered the other
/// way round.
pub fn reversed_reference(first: &RankMap) -> Result<RankMap> {
    Ok(first.to_ranking()?.reversed().to_rank_map())
}

/// A reference and its exact reversal, for the two-component mixture. When
/// `first` is `None` it is drawn uniformly at random.
pub fn antipodal_references(
    cmap: &CandidateMap,
    first: Option<RankMap>,
    rng: &mut dyn RngCore,
) -> Result<(RankMap, RankMap)> {
    let first = match first {
        Some(first) => first,
        None => single_reference(cmap, rng)?,
    };
    let second = reversed_reference(&first)?;
    Ok((first, second))
}

/// A uniformly random linear ranking of `candidates`.
pub fn random_ranking(candidates: &[Candidate], rng: &mut dyn RngCore) -> Ranking {
    Ranking::new(ImpartialCulture::draw(candidates, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_single_reference_is_permutation() {
        let mut rng = StdRng::seed_from_u64(2);
        let cmap = CandidateMap::new(5);
        let reference = single_reference(&cmap, &mut rng).unwrap();
        assert_eq!(5, reference.len());
        let ranking = reference.to_ranking().unwrap();
        let mut names = ranking.into_inner();
        names.sort();
        assert_eq!(cmap.external_names(), names);
    }

    #[test]
    fn test_antipodal_pair_is_opposite() {
        let mut rng = StdRng::seed_from_u64(8);
        let cmap = CandidateMap::new(6);
        let (first, second) = antipodal_references(&cmap, None, &mut rng).unwrap();
        let r1 = first.to_ranking().unwrap();
        let r2 = second.to_ranking().unwrap();
        for a in cmap.external_names() {
            for b in cmap.external_names() {
                if a != b {
                    assert_eq!(r1.prefers(a, b), r2.prefers(b, a));
                }
            }
        }
    }

    #[test]
    fn test_antipodal_uses_given_first() {
        let mut rng = StdRng::seed_from_u64(0);
        let cmap = CandidateMap::new(3);
        let first = RankMap::from_order(&[2, 3, 1]);
        let (got_first, second) =
            antipodal_references(&cmap, Some(first.clone()), &mut rng).unwrap();
        assert_eq!(first, got_first);
        assert_eq!(RankMap::from_order(&[1, 3, 2]), second);
    }

    #[test]
    fn test_reversed_reference_rejects_bad_map() {
        let broken: RankMap = vec![(1, 2), (2, 2)].into_iter().collect();
        assert!(reversed_reference(&broken).is_err());
    }

    #[test]
    fn test_random_ranking() {
        let mut rng = StdRng::seed_from_u64(4);
        let ranking = random_ranking(&[7, 3, 9], &mut rng);
        let mut ids = ranking.into_inner();
        ids.sort();
        assert_eq!(vec![3, 7, 9], ids);
    }
}
