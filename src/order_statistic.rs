/// A one-based rank into the descending order of a ranked list.
///
/// Rank 1 is the entry with the greatest `(key, member)` — the top of the
/// leaderboard — and rank `len()` is the lowest-ranked entry.
///
/// # Examples
///
/// ```
/// use rank_list::{Rank, RankList};
///
/// let mut scores = RankList::new();
/// scores.insert(100, "alice");
/// scores.insert(85, "bob");
///
/// assert_eq!(scores[Rank(1)], 100);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
