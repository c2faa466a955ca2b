//! Overlap scoring of candidate groups against previous groups.
//!
//! Lower is better everywhere in this module. A single shared member between
//! a candidate and a previous group is ignored; only two or more members
//! meeting again count as overlap.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::group::Group;

/// Score of one group against all previous groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupRating {
    /// Sum of per-previous-group overlaps
    pub overlaps: usize,
    /// Largest overlap with any single previous group
    pub highest_overlap: usize,
    /// `overlaps * highest_overlap`
    pub rating: usize,
}

/// Rates `group` by how much it repeats `previous_groups`.
///
/// For every previous group the intersection size `c` contributes `c - 1`
/// when `c >= 2` and nothing otherwise. The rating multiplies the summed
/// contributions by the largest one, so several repeats plus one big repeat
/// cost more than one concentrated repeat.
pub fn rate_group<T>(group: &Group<T>, previous_groups: &[Group<T>]) -> GroupRating
where
    T: Eq + Hash,
{
    if previous_groups.is_empty() {
        return GroupRating::default();
    }

    let members: HashSet<&T> = group.members.iter().collect();
    let mut overlaps = 0;
    let mut highest_overlap = 0;

    for previous in previous_groups {
        let previous_members: HashSet<&T> = previous.members.iter().collect();
        let shared = members.intersection(&previous_members).count();
        let overlap = shared.saturating_sub(1);

        overlaps += overlap;
        highest_overlap = highest_overlap.max(overlap);
    }

    GroupRating {
        overlaps,
        highest_overlap,
        rating: overlaps * highest_overlap,
    }
}

/// Totals over every group of one grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingStatistics {
    pub total_rating: usize,
    pub total_overlaps: usize,
    /// Largest `highest_overlap` of any group in the grouping
    pub highest_overlap: usize,
}

impl GroupingStatistics {
    pub fn aggregate<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = GroupRating>,
    {
        ratings
            .into_iter()
            .fold(Self::default(), |stats, rating| GroupingStatistics {
                total_rating: stats.total_rating + rating.rating,
                total_overlaps: stats.total_overlaps + rating.overlaps,
                highest_overlap: stats.highest_overlap.max(rating.highest_overlap),
            })
    }

    /// Rates every group in `grouping` and aggregates the result.
    pub fn of_grouping<T>(grouping: &[Group<T>], previous_groups: &[Group<T>]) -> Self
    where
        T: Eq + Hash,
    {
        Self::aggregate(
            grouping
                .iter()
                .map(|group| rate_group(group, previous_groups)),
        )
    }
}

impl fmt::Display for GroupingStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total_rating: {}, total_overlaps: {}, highest_overlap: {}",
            self.total_rating, self.total_overlaps, self.highest_overlap
        )
    }
}
