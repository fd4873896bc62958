use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vocab_trainer::constants::{W_MAX, W_MIN};
use vocab_trainer::engine::sampler::sample_round;
use vocab_trainer::engine::weights::{apply_correct, apply_incorrect, effective_weight};
use vocab_trainer::store::operations::entries::Entry;
use vocab_trainer::validation::pair_key;

fn entry(weight: f64, hard: bool) -> Entry {
    let mut e = Entry::new("native", "target", hard);
    e.weight = weight;
    e
}

proptest! {
    #[test]
    fn pt_weight_stays_bounded_under_any_answer_sequence(
        answers in proptest::collection::vec(any::<bool>(), 0..200),
    ) {
        let mut e = entry(W_MIN, false);
        let mut last_correct = 0u32;
        let mut last_incorrect = 0u32;

        for correct in answers {
            if correct {
                apply_correct(&mut e);
            } else {
                apply_incorrect(&mut e);
            }
            prop_assert!(e.weight >= W_MIN && e.weight <= W_MAX);
            // 计数单调不减
            prop_assert!(e.correct_count >= last_correct);
            prop_assert!(e.incorrect_count >= last_incorrect);
            last_correct = e.correct_count;
            last_incorrect = e.incorrect_count;
        }
    }

    #[test]
    fn pt_effective_weight_is_positive(
        weight in W_MIN..=W_MAX,
        hard in any::<bool>(),
    ) {
        let e = entry(weight, hard);
        prop_assert!(effective_weight(&e) > 0.0);
    }

    #[test]
    fn pt_sampler_draws_without_replacement(
        weights in proptest::collection::vec(W_MIN..=W_MAX, 0..40),
        k in 0usize..15,
        seed in any::<u64>(),
    ) {
        let pool: Vec<Entry> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let mut e = Entry::new(format!("n{i}"), format!("t{i}"), i % 3 == 0);
                e.weight = *w;
                e
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let picked = sample_round(&pool, k, &mut rng);

        prop_assert_eq!(picked.len(), k.min(pool.len()));
        let ids: HashSet<&str> = picked.iter().map(|e| e.id.as_str()).collect();
        prop_assert_eq!(ids.len(), picked.len());
    }

    #[test]
    fn pt_pair_key_ignores_case_and_outer_whitespace(
        native in "[а-яa-z]{1,12}",
        target in "[а-яa-z]{1,12}",
    ) {
        let shouted = pair_key(
            &format!("  {}  ", native.to_uppercase()),
            &target.to_uppercase(),
        );
        prop_assert_eq!(shouted, pair_key(&native, &target));
    }
}
