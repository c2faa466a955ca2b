//! Randomized splitting of a list into groups of a minimum size.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GroupingError;
use crate::group::Group;

/// Divides `list` into shuffled groups of at least `n` members.
///
/// The shuffled list is cut into chunks of exactly `n`. When the length is
/// not a multiple of `n`, the short final chunk is removed and its members
/// are dealt round-robin onto the remaining groups, so no group ever ends up
/// below `n`.
pub fn partition<T, R>(list: &[T], n: usize, rng: &mut R) -> Result<Vec<Group<T>>, GroupingError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if n == 0 {
        return Err(GroupingError::ZeroGroupSize);
    }
    if list.len() < n {
        return Err(GroupingError::list_too_short(n, list.len()));
    }

    let mut shuffled = list.to_vec();
    shuffled.shuffle(rng);

    let mut groups: Vec<Group<T>> = shuffled
        .chunks(n)
        .map(|chunk| Group::from(chunk.to_vec()))
        .collect();

    // list.len() >= n guarantees the first chunk is full, so popping the
    // short tail always leaves at least one group to receive its members.
    if groups.last().is_some_and(|group| group.len() < n) {
        if let Some(leftover) = groups.pop() {
            let count = groups.len();
            for (i, member) in leftover.members.into_iter().enumerate() {
                groups[i % count].add_member(member);
            }
        }
    }

    Ok(groups)
}
