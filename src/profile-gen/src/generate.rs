// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::common::Result;
use crate::profile::Profile;
use crate::ranking::{CandidateMap, RankMap, rmaps_to_linear_rankings};
use crate::reference::{antipodal_references, single_reference};
use crate::registry::{ModelParam, ProbModel, Routine};
use crate::samplers::{
    MallowsSampler, RankingSampler, SampledRankings, SinglePeakedSampler, UrnSampler,
};
use crate::spatial::SpatialModel;
use crate::{config_err, invariant_err};

/// Knobs for a generation call that aren't part of the model itself.
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    /// Seed for a fresh `StdRng`; `None` draws from the thread-local
    /// generator instead.
    pub seed: Option<u64>,
    /// Check the assembled profile's invariants before returning it.
    pub validate_output: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: None,
            validate_output: true,
        }
    }
}

impl GenerateConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Runs `sampler` over the one-based names of `cmap` and maps the result
/// back to zero-based candidate ids.
fn run_sampler(
    sampler: &dyn RankingSampler,
    num_voters: usize,
    cmap: &CandidateMap,
    rng: &mut dyn RngCore,
) -> Result<SampledRankings> {
    let sampled = sampler.sample(num_voters, cmap, rng)?;
    if sampled.rmaps.len() != sampled.counts.len() || sampled.num_voters() != num_voters {
        return invariant_err!(
            BadCounts,
            format!(
                "sampler returned {} maps with counts summing to {} for {num_voters} voters",
                sampled.rmaps.len(),
                sampled.num_voters()
            )
        );
    }
    let rmaps = sampled
        .rmaps
        .iter()
        .map(|rmap| cmap.to_engine_map(rmap))
        .collect::<Result<Vec<_>>>()?;
    Ok(SampledRankings {
        rmaps,
        counts: sampled.counts,
    })
}

/// Urn model with `replace` extra copies returned per draw.
pub fn create_rankings_urn(
    num_voters: usize,
    cmap: &CandidateMap,
    replace: u64,
    rng: &mut dyn RngCore,
) -> Result<SampledRankings> {
    run_sampler(&UrnSampler::new(replace), num_voters, cmap, rng)
}

/// Mallows model with dispersion `phi` around `reference` (zero-based ids),
/// or around a uniformly random reference when none is given.
pub fn create_rankings_mallows(
    num_voters: usize,
    cmap: &CandidateMap,
    phi: f64,
    reference: Option<&RankMap>,
    rng: &mut dyn RngCore,
) -> Result<SampledRankings> {
    let reference = match reference {
        Some(reference) => cmap.to_external_map(reference),
        None => single_reference(cmap, rng)?,
    };
    let sampler = MallowsSampler::single(reference, phi)?;
    run_sampler(&sampler, num_voters, cmap, rng)
}

/// Equal mixture of two Mallows models with the same dispersion, centred on
/// a reference and on its exact reversal.
pub fn create_rankings_mallows_two_rankings(
    num_voters: usize,
    cmap: &CandidateMap,
    phi: f64,
    reference: Option<&RankMap>,
    rng: &mut dyn RngCore,
) -> Result<SampledRankings> {
    let first = reference.map(|r| cmap.to_external_map(r));
    let (first, second) = antipodal_references(cmap, first, rng)?;
    let sampler = MallowsSampler::new(vec![first, second], vec![0.5, 0.5], vec![phi, phi])?;
    run_sampler(&sampler, num_voters, cmap, rng)
}

pub fn create_rankings_single_peaked(
    num_voters: usize,
    cmap: &CandidateMap,
    rng: &mut dyn RngCore,
) -> Result<SampledRankings> {
    run_sampler(&SinglePeakedSampler, num_voters, cmap, rng)
}

/// Generates a profile of `num_voters` voters over `num_cands` candidates
/// using the probability model named `probmod` (one of `IC`, `IAC`, `URN`,
/// `MALLOWS`, `MALLOWS_2REF`, `SinglePeaked`, `SPATIAL`). `probmod_param`
/// overrides the model's default parameter.
pub fn generate_profile(
    num_cands: usize,
    num_voters: usize,
    probmod: &str,
    probmod_param: Option<ModelParam>,
) -> Result<Profile> {
    generate_profile_with_config(
        num_cands,
        num_voters,
        probmod,
        probmod_param,
        &GenerateConfig::default(),
    )
}

pub fn generate_profile_with_config(
    num_cands: usize,
    num_voters: usize,
    probmod: &str,
    probmod_param: Option<ModelParam>,
    config: &GenerateConfig,
) -> Result<Profile> {
    match config.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_profile_with_rng(
                num_cands,
                num_voters,
                probmod,
                probmod_param,
                config,
                &mut rng,
            )
        }
        None => {
            let mut rng = rand::rng();
            generate_profile_with_rng(
                num_cands,
                num_voters,
                probmod,
                probmod_param,
                config,
                &mut rng,
            )
        }
    }
}

/// Like [`generate_profile_with_config`] but drawing from a caller-owned
/// random stream; `config.seed` is ignored.
pub fn generate_profile_with_rng(
    num_cands: usize,
    num_voters: usize,
    probmod: &str,
    probmod_param: Option<ModelParam>,
    config: &GenerateConfig,
    rng: &mut dyn RngCore,
) -> Result<Profile> {
    // everything configuration-related is checked before the first draw
    let model: ProbModel = probmod.parse()?;
    let routine = model.entry().routine(probmod_param.as_ref())?;
    if num_cands == 0 {
        return config_err!(NoCandidates, format!("{model} needs at least one candidate"));
    }
    debug!(%model, ?routine, num_cands, num_voters, "generating profile");

    let cmap = CandidateMap::new(num_cands);
    let sampled = match routine {
        Routine::Urn { replace } => create_rankings_urn(num_voters, &cmap, replace, rng)?,
        Routine::Mallows { phi } => create_rankings_mallows(num_voters, &cmap, phi, None, rng)?,
        Routine::MallowsTwoRef { phi } => {
            create_rankings_mallows_two_rankings(num_voters, &cmap, phi, None, rng)?
        }
        Routine::SinglePeaked => create_rankings_single_peaked(num_voters, &cmap, rng)?,
        Routine::Spatial(params) => {
            // already linear rankings, nothing to normalize
            let (rankings, counts) =
                SpatialModel::new(params).generate(num_voters, num_cands, rng)?;
            return finish(Profile::new(rankings, num_cands, counts), num_voters, config);
        }
    };

    let rankings = rmaps_to_linear_rankings(&sampled.rmaps)?;
    finish(
        Profile::new(rankings, num_cands, sampled.counts),
        num_voters,
        config,
    )
}

fn finish(profile: Profile, num_voters: usize, config: &GenerateConfig) -> Result<Profile> {
    if config.validate_output {
        profile.validate(num_voters)?;
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ErrorCode, ErrorKind};
    use crate::ranking::Ranking;

    #[test]
    fn test_wrappers_return_engine_ids() {
        let mut rng = StdRng::seed_from_u64(6);
        let cmap = CandidateMap::new(3);
        let sampled = create_rankings_urn(30, &cmap, 2, &mut rng).unwrap();
        for rmap in sampled.rmaps.iter() {
            assert_eq!(vec![0, 1, 2], rmap.names().collect::<Vec<_>>());
        }
        let sampled = create_rankings_single_peaked(30, &cmap, &mut rng).unwrap();
        for rmap in sampled.rmaps.iter() {
            assert_eq!(vec![0, 1, 2], rmap.names().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_mallows_with_given_reference() {
        let mut rng = StdRng::seed_from_u64(12);
        let cmap = CandidateMap::new(4);
        let reference = Ranking::new(vec![2, 0, 3, 1]).to_rank_map();
        let sampled =
            create_rankings_mallows(50, &cmap, 0.0, Some(&reference), &mut rng).unwrap();
        assert_eq!(vec![reference], sampled.rmaps);
        assert_eq!(vec![50], sampled.counts);
    }

    #[test]
    fn test_mallows_two_rankings_with_given_reference() {
        let mut rng = StdRng::seed_from_u64(12);
        let cmap = CandidateMap::new(4);
        let forward = Ranking::new(vec![2, 0, 3, 1]);
        let sampled = create_rankings_mallows_two_rankings(
            400,
            &cmap,
            0.0,
            Some(&forward.to_rank_map()),
            &mut rng,
        )
        .unwrap();
        let mut rankings = rmaps_to_linear_rankings(&sampled.rmaps).unwrap();
        rankings.sort();
        let mut expected = vec![forward.clone(), forward.reversed()];
        expected.sort();
        assert_eq!(expected, rankings);
        assert_eq!(400, sampled.num_voters());
    }

    #[test]
    fn test_no_candidates() {
        let err = generate_profile_with_config(0, 10, "IC", None, &GenerateConfig::seeded(1))
            .unwrap_err();
        assert_eq!(ErrorKind::Configuration, err.kind);
        assert_eq!(ErrorCode::NoCandidates, err.code);
    }

    #[test]
    fn test_no_voters() {
        for model in ProbModel::ALL.iter() {
            let profile =
                generate_profile_with_config(3, 0, model.name(), None, &GenerateConfig::seeded(1))
                    .unwrap();
            assert!(profile.rankings().is_empty());
            assert_eq!(0, profile.num_voters());
        }
    }

    #[test]
    fn test_default_config() {
        let config = GenerateConfig::default();
        assert_eq!(None, config.seed);
        assert!(config.validate_output);
        assert_eq!(Some(5), GenerateConfig::seeded(5).seed);
    }
}
