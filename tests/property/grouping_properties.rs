use std::collections::HashSet;

use group_picker::{
    partition, rate_group, search, Group, GroupingError, GroupingStatistics, SearchParams,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn list_and_size() -> impl Strategy<Value = (Vec<u32>, usize)> {
    (1usize..60).prop_flat_map(|len| (Just((0..len as u32).collect::<Vec<_>>()), 1..=len))
}

fn history() -> impl Strategy<Value = Vec<Group<u32>>> {
    prop::collection::vec(
        prop::collection::hash_set(0u32..30, 0..8)
            .prop_map(|members| Group::from(members.into_iter().collect::<Vec<_>>())),
        0..6,
    )
}

proptest! {
    #[test]
    fn partition_covers_list_exactly((list, n) in list_and_size(), seed in any::<u64>()) {
        let groups = partition(&list, n, &mut StdRng::seed_from_u64(seed)).unwrap();

        let mut all: Vec<u32> = groups.iter().flat_map(|g| g.members.iter().copied()).collect();
        all.sort_unstable();
        prop_assert_eq!(all, list);
    }

    #[test]
    fn partition_respects_minimum_size((list, n) in list_and_size(), seed in any::<u64>()) {
        let groups = partition(&list, n, &mut StdRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(groups.len(), list.len() / n);
        let spare = list.len() % n;
        let extra = (spare + groups.len() - 1) / groups.len();
        for group in &groups {
            prop_assert!(group.len() >= n, "group of {} below minimum {}", group.len(), n);
            prop_assert!(group.len() <= n + extra);
        }
    }

    #[test]
    fn partition_rejects_short_lists(len in 0usize..20, extra in 1usize..5, seed in any::<u64>()) {
        let list: Vec<u32> = (0..len as u32).collect();
        let n = len + extra;

        let err = partition(&list, n, &mut StdRng::seed_from_u64(seed)).unwrap_err();
        prop_assert_eq!(err, GroupingError::ListTooShort { required: n, actual: len });
    }

    #[test]
    fn rate_group_is_pure(group in prop::collection::hash_set(0u32..30, 0..10), previous in history()) {
        let group = Group::from(group.into_iter().collect::<Vec<_>>());

        prop_assert_eq!(rate_group(&group, &previous), rate_group(&group, &previous));
    }

    #[test]
    fn rating_is_overlaps_times_highest(group in prop::collection::hash_set(0u32..30, 0..10), previous in history()) {
        let group = Group::from(group.into_iter().collect::<Vec<_>>());
        let rating = rate_group(&group, &previous);

        prop_assert_eq!(rating.rating, rating.overlaps * rating.highest_overlap);
        prop_assert!(rating.highest_overlap <= rating.overlaps);
    }

    #[test]
    fn disjoint_groups_score_zero(previous in history()) {
        let seen: HashSet<u32> = previous.iter().flat_map(|g| g.members.iter().copied()).collect();
        let fresh: Vec<u32> = (100..110).filter(|m| !seen.contains(m)).collect();

        prop_assert_eq!(rate_group(&Group::from(fresh), &previous).rating, 0);
    }

    #[test]
    fn search_keeps_best_trial((list, n) in list_and_size(), previous in history(), runs in 1usize..8, seed in any::<u64>()) {
        let params = SearchParams { min_group_size: n, num_runs: runs };
        let outcome = search(&list, &previous, params, &mut StdRng::seed_from_u64(seed)).unwrap();

        // Replaying the same random stream reproduces every trial; none beats the winner.
        let mut rng = StdRng::seed_from_u64(seed);
        let mut best = None;
        for _ in 0..runs {
            let grouping = partition(&list, n, &mut rng).unwrap();
            let stats = GroupingStatistics::of_grouping(&grouping, &previous);
            prop_assert!(stats.total_rating >= outcome.statistics.total_rating);
            if best.is_none() && stats.total_rating == outcome.statistics.total_rating {
                best = Some(grouping);
            }
        }
        prop_assert_eq!(Some(outcome.grouping), best);
    }
}
