use proptest::prelude::*;

use cuberesults::{
    attempt::reduce,
    engine::{advancement::advancing_by_rank, ranking::{compare_scores, rank}},
    types::{AttemptValue, Direction, Format, RegistrantId},
    wcif::ResultRecord,
};

fn attempt_value() -> impl Strategy<Value = AttemptValue> {
    prop_oneof![
        8 => 1i64..400,
        1 => Just(-1i64),
        1 => Just(-2i64),
    ]
}

fn format_strategy() -> impl Strategy<Value = Format> {
    prop::sample::select(Format::ALL.to_vec())
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::LowerIsBetter), Just(Direction::HigherIsBetter)]
}

fn round_results(format: Format) -> impl Strategy<Value = Vec<ResultRecord>> {
    prop::collection::vec(
        prop::collection::vec(attempt_value(), 0..=format.solve_count()),
        0..40,
    )
    .prop_map(|all| {
        all.into_iter()
            .enumerate()
            .map(|(idx, attempts)| ResultRecord {
                person_id: idx as RegistrantId + 1,
                ranking: None,
                attempts,
            })
            .collect()
    })
}

fn round_case() -> impl Strategy<Value = (Format, Direction, Vec<ResultRecord>)> {
    (format_strategy(), direction_strategy())
        .prop_flat_map(|(format, direction)| (Just(format), Just(direction), round_results(format)))
}

proptest! {
    #[test]
    fn best_is_the_extreme_completed_value(
        attempts in prop::collection::vec(attempt_value(), 0..=5),
        direction in direction_strategy(),
    ) {
        let score = reduce(&attempts, Format::AverageOf5, direction).unwrap();
        let completed = attempts.iter().copied().filter(|v| *v > 0);
        let expected = match direction {
            Direction::LowerIsBetter => completed.min(),
            Direction::HigherIsBetter => completed.max(),
        };
        prop_assert_eq!(score.best, expected);
    }

    #[test]
    fn ranks_are_standard_competition_ranks((format, direction, results) in round_case()) {
        let ranking = rank(&results, format, direction);
        let sort_by = format.sort_by();
        prop_assert_eq!(ranking.len() + ranking.rejected.len(), results.len());

        let ranked: Vec<_> = ranking.ranked().collect();
        // Ranked results form a prefix of the ordering.
        prop_assert!(ranking.results[..ranked.len()].iter().all(|r| r.ranking.is_some()));

        for (pos, r) in ranked.iter().enumerate() {
            let better = ranked
                .iter()
                .filter(|o| compare_scores(&o.score(), &r.score(), sort_by, direction).is_lt())
                .count();
            prop_assert_eq!(r.ranking, Some(better as u32 + 1));
            prop_assert!(r.ranking.unwrap() as usize <= pos + 1);
        }
        if let Some(first) = ranked.first() {
            prop_assert_eq!(first.ranking, Some(1));
        }
    }

    #[test]
    fn rank_threshold_never_admits_worse_ranks(
        (format, direction, results) in round_case(),
        n in -2i64..45,
    ) {
        let ranking = rank(&results, format, direction);
        let advancing = advancing_by_rank(&ranking, n);

        for id in &advancing {
            let r = ranking.get(*id).unwrap();
            prop_assert!(r.ranking.is_some_and(|k| i64::from(k) <= n));
        }
        let eligible = ranking
            .ranked()
            .filter(|r| r.ranking.is_some_and(|k| i64::from(k) <= n))
            .count();
        prop_assert_eq!(advancing.len(), eligible);
    }

    #[test]
    fn ranking_is_deterministic((format, direction, results) in round_case()) {
        prop_assert_eq!(rank(&results, format, direction), rank(&results, format, direction));
    }
}
