use smallvec::SmallVec;

use super::handle::Handle;

/// Hard cap on node height. Heights are geometric with promotion
/// probability 1/2, so 32 levels comfortably covers any list an in-memory
/// index can hold.
#[cfg(test)]
pub(crate) const MAX_LEVEL: usize = 8;
#[cfg(not(test))]
pub(crate) const MAX_LEVEL: usize = 32;

/// Levels stored inline before spilling to the heap. At promotion
/// probability 1/2 roughly 15 nodes in 16 are at most this tall.
pub(crate) const INLINE_LEVELS: usize = 4;

/// One forward link of a node (or of the header sentinel).
#[derive(Clone, Copy)]
pub(crate) struct Level {
    /// Next node at this level, or `None` at the end of the level.
    pub(crate) forward: Option<Handle>,
    /// Number of level-0 steps this link advances past. Links with no
    /// forward node carry the distance to the virtual end of the list, so
    /// span arithmetic never has to special-case the tail.
    pub(crate) span: usize,
}

impl Level {
    pub(crate) const EMPTY: Self = Self { forward: None, span: 0 };
}

/// A leveled skip-list record.
///
/// The height is drawn once at creation and never changes; an
/// order-breaking key update destroys the node and creates a fresh one.
#[derive(Clone)]
pub(crate) struct Node<K, M> {
    pub(crate) key: K,
    pub(crate) member: M,
    /// Level-0 predecessor; `None` for the first node in the list.
    pub(crate) pred: Option<Handle>,
    /// One link per level, `1..=MAX_LEVEL` entries.
    pub(crate) levels: SmallVec<[Level; INLINE_LEVELS]>,
}

impl<K, M> Node<K, M> {
    pub(crate) fn new(key: K, member: M, height: usize) -> Self {
        debug_assert!((1..=MAX_LEVEL).contains(&height));
        Self {
            key,
            member,
            pred: None,
            levels: SmallVec::from_elem(Level::EMPTY, height),
        }
    }

    /// Number of levels this node participates in.
    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.levels.len()
    }
}
