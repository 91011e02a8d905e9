// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Property-based tests for profile generation using proptest.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use profile_gen::reference::antipodal_references;
use profile_gen::spatial::rank_by_utility;
use profile_gen::{CandidateMap, GenerateConfig, Ranking, generate_profile_with_config};

fn model_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("IC"),
        Just("IAC"),
        Just("MALLOWS"),
        Just("MALLOWS_2REF"),
        Just("URN"),
        Just("SinglePeaked"),
        Just("SPATIAL"),
    ]
}

fn ranking_strategy() -> impl Strategy<Value = Ranking> {
    (1usize..9)
        .prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
        .prop_map(Ranking::new)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_profiles_are_well_formed(
        model in model_strategy(),
        num_cands in 1usize..7,
        num_voters in 0usize..120,
        seed in any::<u64>(),
    ) {
        let profile = generate_profile_with_config(
            num_cands,
            num_voters,
            model,
            None,
            &GenerateConfig::seeded(seed),
        )
        .unwrap();
        prop_assert_eq!(num_voters, profile.num_voters());
        prop_assert_eq!(profile.rankings().len(), profile.counts().len());
        for ranking in profile.rankings() {
            prop_assert!(ranking.is_permutation_of(num_cands));
        }
    }

    #[test]
    fn normalizer_round_trip(ranking in ranking_strategy()) {
        let back = ranking.to_rank_map().to_ranking().unwrap();
        prop_assert_eq!(ranking, back);
    }

    #[test]
    fn antipodal_references_are_opposite(num_cands in 1usize..10, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let cmap = CandidateMap::new(num_cands);
        let (first, second) = antipodal_references(&cmap, None, &mut rng).unwrap();
        let r1 = first.to_ranking().unwrap();
        let r2 = second.to_ranking().unwrap();
        for a in cmap.external_names() {
            for b in cmap.external_names() {
                if a != b {
                    prop_assert_eq!(r1.prefers(a, b), r2.prefers(b, a));
                }
            }
        }
    }

    #[test]
    fn proximity_ranking_is_distance_order(
        voter in prop::collection::vec(-3.0f64..3.0, 2),
        cands in prop::collection::vec(prop::collection::vec(-3.0f64..3.0, 2), 1..6),
    ) {
        let sq_dist = |c: &[f64]| -> f64 {
            voter.iter().zip(c.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
        };
        let ranking = rank_by_utility(&voter, &cands, 1.0);
        let order = ranking.as_slice();
        for pair in order.windows(2) {
            // allow for rounding between the two formulations
            prop_assert!(sq_dist(&cands[pair[0]]) <= sq_dist(&cands[pair[1]]) + 1e-9);
        }
    }
}
