// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Synthetic preference profiles for computational social-choice
//! experiments.
//!
//! [`generate_profile`] resolves a probability model from the registry,
//! draws voters' rankings from it and returns them as a [`Profile`]: a
//! multiset of linear rankings over candidates `0..num_cands`.

#![forbid(unsafe_code)]

pub mod common;
mod generate;
mod profile;
pub mod ranking;
pub mod reference;
pub mod registry;
pub mod samplers;
pub mod spatial;

pub use self::common::{Candidate, Error, ErrorCode, ErrorKind, Result};
pub use self::generate::{
    GenerateConfig, create_rankings_mallows, create_rankings_mallows_two_rankings,
    create_rankings_single_peaked, create_rankings_urn, generate_profile,
    generate_profile_with_config, generate_profile_with_rng,
};
pub use self::profile::Profile;
pub use self::ranking::{CandidateMap, RankMap, Ranking, rmaps_to_linear_rankings};
pub use self::reference::random_ranking;
pub use self::registry::{ModelParam, ProbModel};
pub use self::spatial::SpatialParams;
