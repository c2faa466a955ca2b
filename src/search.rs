//! Best-of-N random search for a low-overlap grouping.

use std::hash::Hash;

use rand::Rng;
use tracing::{debug, trace};

use crate::config::defaults;
use crate::error::GroupingError;
use crate::group::Group;
use crate::partition::partition;
use crate::rating::GroupingStatistics;

/// Knobs for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub min_group_size: usize,
    pub num_runs: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            min_group_size: defaults::DEFAULT_MIN_GROUP_SIZE,
            num_runs: defaults::DEFAULT_NUM_RUNS,
        }
    }
}

/// Winning grouping of a search and its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<T> {
    pub grouping: Vec<Group<T>>,
    pub statistics: GroupingStatistics,
}

/// Runs `params.num_runs` independent trials and keeps the grouping with
/// the lowest total rating. Ties keep the earliest trial.
pub fn search<T, R>(
    list: &[T],
    previous_groups: &[Group<T>],
    params: SearchParams,
    rng: &mut R,
) -> Result<SearchOutcome<T>, GroupingError>
where
    T: Clone + Eq + Hash,
    R: Rng + ?Sized,
{
    search_while(list, previous_groups, params, rng, || true)
}

/// Like [`search`], but asks `keep_going` before every trial after the
/// first and returns the best grouping so far once it answers `false`.
pub fn search_while<T, R, F>(
    list: &[T],
    previous_groups: &[Group<T>],
    params: SearchParams,
    rng: &mut R,
    mut keep_going: F,
) -> Result<SearchOutcome<T>, GroupingError>
where
    T: Clone + Eq + Hash,
    R: Rng + ?Sized,
    F: FnMut() -> bool,
{
    if params.num_runs == 0 {
        return Err(GroupingError::ZeroRuns);
    }

    let mut best: Option<SearchOutcome<T>> = None;

    for run in 0..params.num_runs {
        if run > 0 && !keep_going() {
            debug!(run, "search stopped early");
            break;
        }
        let grouping = partition(list, params.min_group_size, rng)?;
        let statistics = GroupingStatistics::of_grouping(&grouping, previous_groups);
        trace!(run, total_rating = statistics.total_rating, "trial scored");

        let improves = best
            .as_ref()
            .map_or(true, |b| statistics.total_rating < b.statistics.total_rating);
        if improves {
            debug!(run, %statistics, "new best grouping");
            best = Some(SearchOutcome {
                grouping,
                statistics,
            });
        }
    }

    // num_runs >= 1 always leaves a candidate behind.
    best.ok_or(GroupingError::ZeroRuns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn groups(raw: &[&[u32]]) -> Vec<Group<u32>> {
        raw.iter().map(|g| Group::from(g.to_vec())).collect()
    }

    fn params(min_group_size: usize, num_runs: usize) -> SearchParams {
        SearchParams {
            min_group_size,
            num_runs,
        }
    }

    #[test]
    fn test_finds_zero_overlap_grouping() {
        let mut rng = StdRng::seed_from_u64(5);
        let list = vec![1, 2, 3, 4];
        let previous = groups(&[&[1, 2], &[3, 4]]);

        let outcome = search(&list, &previous, params(2, 100), &mut rng).unwrap();

        assert_eq!(outcome.statistics.total_rating, 0);
        assert_eq!(outcome.grouping.len(), 2);
        let allowed: [[u32; 2]; 4] = [[1, 3], [1, 4], [2, 3], [2, 4]];
        for group in &outcome.grouping {
            let mut members = group.members.clone();
            members.sort_unstable();
            assert!(
                allowed.iter().any(|pair| pair[..] == members[..]),
                "unexpected group {:?}",
                members
            );
        }
    }

    #[test]
    fn test_converges_to_minimal_overlap() {
        let mut rng = StdRng::seed_from_u64(9);
        let list: Vec<u32> = (1..=6).collect();
        let previous = groups(&[&[1, 2, 3], &[4, 5, 6]]);

        let outcome = search(&list, &previous, params(3, 200), &mut rng).unwrap();

        assert_eq!(
            outcome.statistics,
            GroupingStatistics {
                total_rating: 2,
                total_overlaps: 2,
                highest_overlap: 1,
            }
        );
    }

    #[test]
    fn test_empty_history_first_trial_wins() {
        let list: Vec<u32> = (1..=8).collect();
        let outcome = search(&list, &[], params(2, 10), &mut StdRng::seed_from_u64(21)).unwrap();

        // Every trial scores zero, so the strict comparison keeps trial one.
        let first = partition(&list, 2, &mut StdRng::seed_from_u64(21)).unwrap();
        assert_eq!(outcome.grouping, first);
        assert_eq!(outcome.statistics, GroupingStatistics::default());
    }

    #[test]
    fn test_statistics_match_returned_grouping() {
        let mut rng = StdRng::seed_from_u64(13);
        let list: Vec<u32> = (1..=12).collect();
        let previous = groups(&[&[1, 2, 3, 4], &[5, 6, 7, 8], &[9, 10, 11, 12]]);

        let outcome = search(&list, &previous, params(4, 5), &mut rng).unwrap();

        assert_eq!(
            outcome.statistics,
            GroupingStatistics::of_grouping(&outcome.grouping, &previous)
        );
    }

    #[test]
    fn test_zero_runs_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let list: Vec<u32> = (1..=4).collect();

        assert_eq!(
            search(&list, &[], params(2, 0), &mut rng).unwrap_err(),
            GroupingError::ZeroRuns
        );
    }

    #[test]
    fn test_short_list_propagates() {
        let mut rng = StdRng::seed_from_u64(0);
        let list: Vec<u32> = (1..=2).collect();

        assert_eq!(
            search(&list, &[], params(5, 3), &mut rng).unwrap_err(),
            GroupingError::list_too_short(5, 2)
        );
    }

    #[test]
    fn test_search_while_stops_between_trials() {
        let list: Vec<u32> = (1..=9).collect();
        let previous = groups(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        let mut asked = 0;

        let stopped = search_while(
            &list,
            &previous,
            params(3, 50),
            &mut StdRng::seed_from_u64(4),
            || {
                asked += 1;
                asked < 2
            },
        )
        .unwrap();

        // Trial one always runs, trial two is allowed, then the search stops.
        assert_eq!(asked, 2);
        let two_runs = search(&list, &previous, params(3, 2), &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(stopped, two_runs);
    }

    #[test]
    fn test_search_while_always_runs_one_trial() {
        let list: Vec<u32> = (1..=4).collect();
        let outcome = search_while(&list, &[], params(2, 10), &mut StdRng::seed_from_u64(8), || false)
            .unwrap();

        assert_eq!(outcome.grouping.len(), 2);
    }

    #[test]
    fn test_default_params() {
        let params = SearchParams::default();
        assert_eq!(params.min_group_size, 5);
        assert_eq!(params.num_runs, 20);
    }
}
