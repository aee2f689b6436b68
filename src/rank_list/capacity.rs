use super::RankList;
use crate::raw::RawRankList;

impl<K, M> RankList<K, M> {
    /// Creates an empty, unbounded list with storage preallocated for at
    /// least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_list::RankList;
    ///
    /// let board: RankList<i64, u64> = RankList::with_capacity(32);
    /// assert!(board.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawRankList::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the list can hold without
    /// reallocating node storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_list::RankList;
    ///
    /// let board: RankList<i64, u64> = RankList::with_capacity(32);
    /// assert!(board.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Creates an empty list bounded to at most `max_len` entries; `0`
    /// disables the bound.
    ///
    /// Whenever an insert would push the list past the bound, the
    /// lowest-ranked entry is evicted: either the incoming entry itself
    /// (the insert is refused, see [`insert`](RankList::insert)) or the
    /// previous tail of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_list::RankList;
    ///
    /// let mut top2 = RankList::with_max_len(2);
    /// top2.insert(30, "a");
    /// top2.insert(20, "b");
    /// top2.insert(25, "c");
    ///
    /// assert_eq!(top2.len(), 2);
    /// assert!(!top2.contains(&"b"));
    /// ```
    #[must_use]
    pub fn with_max_len(max_len: usize) -> Self {
        Self { raw: RawRankList::new(max_len) }
    }

    /// Returns the capacity bound, or `0` when the list is unbounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_list::RankList;
    ///
    /// let board: RankList<i64, u64> = RankList::with_max_len(100);
    /// assert_eq!(board.max_len(), 100);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn max_len(&self) -> usize {
        self.raw.max_len()
    }
}
