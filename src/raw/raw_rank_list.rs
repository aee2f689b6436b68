use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::hash::Hash;

use hashbrown::HashMap;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rustc_hash::FxBuildHasher;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Level, MAX_LEVEL, Node};

/// Seed for the per-instance leveling generator. Skip-list balance only
/// needs a well-mixed coin, not unpredictability, so a fixed seed keeps the
/// structure deterministic and `no_std`-friendly.
const LEVEL_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Whether entry `a` comes before entry `b` in the global order.
///
/// The order is strictly descending by key — higher key, better rank — with
/// key ties broken by member so that the order is total.
#[inline]
fn precedes<K: Ord, M: Ord>(a: (&K, &M), b: (&K, &M)) -> bool {
    match a.0.cmp(b.0) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => a.1 > b.1,
    }
}

/// The core ranked skip list backing `RankList`.
///
/// Invariants maintained across every mutation:
/// - one node per member, and `len` == membership-index size == number of
///   level-0 nodes;
/// - at every level, prefix-summing spans reconstructs level-0 rank
///   distance (spans of links with no forward node count to the virtual
///   end of the list);
/// - with `max_len > 0`, `len <= max_len` on return from any public
///   operation.
#[derive(Clone)]
pub(crate) struct RawRankList<K, M> {
    /// Arena storing all nodes.
    nodes: Arena<Node<K, M>>,
    /// Membership index: member -> owning node, for O(1) lookups.
    index: HashMap<M, Handle, FxBuildHasher>,
    /// The sentinel's links. The header owns no key or member, so it lives
    /// here instead of occupying an arena slot.
    header: [Level; MAX_LEVEL],
    /// Last node in level-0 order; `None` iff the list is empty.
    tail: Option<Handle>,
    /// Number of entries.
    len: usize,
    /// Highest active level (>= 1); all levels at or above it are empty.
    level: usize,
    /// Maximum entry count; 0 disables the bound.
    max_len: usize,
    /// Node-height generator, created once and reused for the lifetime of
    /// the list.
    rng: SmallRng,
}

impl<K, M> RawRankList<K, M> {
    pub(crate) fn new(max_len: usize) -> Self {
        Self {
            nodes: Arena::new(),
            index: HashMap::with_hasher(FxBuildHasher),
            header: [Level::EMPTY; MAX_LEVEL],
            tail: None,
            len: 0,
            level: 1,
            max_len,
            rng: SmallRng::seed_from_u64(LEVEL_SEED),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            index: HashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            ..Self::new(0)
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn max_len(&self) -> usize {
        self.max_len
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.header = [Level::EMPTY; MAX_LEVEL];
        self.tail = None;
        self.len = 0;
        self.level = 1;
    }

    /// First node in rank order, if any.
    pub(crate) fn head(&self) -> Option<Handle> {
        self.header[0].forward
    }

    /// Last node in rank order, if any.
    pub(crate) const fn tail(&self) -> Option<Handle> {
        self.tail
    }

    /// Key and member of the node at `handle`.
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &M) {
        let node = self.nodes.get(handle);
        (&node.key, &node.member)
    }

    /// Level-0 successor of the node at `handle`.
    pub(crate) fn forward(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).levels[0].forward
    }

    /// Level-0 predecessor of the node at `handle`.
    pub(crate) fn pred(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).pred
    }

    /// Link at `level` out of the node at `at`, or out of the header when
    /// `at` is `None`.
    #[inline]
    fn link(&self, at: Option<Handle>, level: usize) -> &Level {
        match at {
            Some(h) => &self.nodes.get(h).levels[level],
            None => &self.header[level],
        }
    }

    #[inline]
    fn link_mut(&mut self, at: Option<Handle>, level: usize) -> &mut Level {
        match at {
            Some(h) => &mut self.nodes.get_mut(h).levels[level],
            None => &mut self.header[level],
        }
    }

    /// Draws a node height: geometric with promotion probability 1/2,
    /// capped at `MAX_LEVEL`. One `u64` draw per node.
    fn random_level(&mut self) -> usize {
        let draw = self.rng.next_u64();
        (draw.trailing_zeros() as usize + 1).min(MAX_LEVEL)
    }

    /// Drains all entries in rank order by walking the level-0 chain.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, M)> {
        let mut result = Vec::with_capacity(self.len);
        let mut cur = self.header[0].forward;
        while let Some(handle) = cur {
            let node = self.nodes.take(handle);
            cur = node.levels[0].forward;
            result.push((node.key, node.member));
        }
        self.clear();
        result
    }
}

impl<K, M> RawRankList<K, M>
where
    K: Ord,
    M: Clone + Hash + Ord,
{
    /// Walks top-down to the position where `(key, member)` belongs.
    ///
    /// Returns, per level, the last node strictly preceding the position
    /// (`None` while the header is still the predecessor) and the number of
    /// level-0 steps from the header to that node. `rank[0]` is therefore
    /// the target's prospective 1-based rank minus one.
    fn find_preds(&self, key: &K, member: &M) -> ([Option<Handle>; MAX_LEVEL], [usize; MAX_LEVEL]) {
        let mut preds = [None; MAX_LEVEL];
        let mut rank = [0_usize; MAX_LEVEL];
        let mut at: Option<Handle> = None;

        for i in (0..self.level).rev() {
            rank[i] = if i + 1 == self.level { 0 } else { rank[i + 1] };
            loop {
                let link = self.link(at, i);
                let Some(next) = link.forward else { break };
                let node = self.nodes.get(next);
                if !precedes((&node.key, &node.member), (key, member)) {
                    break;
                }
                rank[i] += link.span;
                at = Some(next);
            }
            preds[i] = at;
        }

        (preds, rank)
    }

    /// Inserts `(key, member)`, or repositions `member` under the new key
    /// if it is already present.
    ///
    /// Returns `true` when the member is in the list after the call. The
    /// only `false` outcome is a capacity rejection: the list is at its
    /// bound and the entry would rank last, making it the exact entry the
    /// bound evicts.
    pub(crate) fn insert(&mut self, key: K, member: M) -> bool {
        if let Some(&target) = self.index.get(&member) {
            self.update(key, target);
            return true;
        }
        self.insert_new(key, member)
    }

    /// Inserts a member known to be absent.
    fn insert_new(&mut self, key: K, member: M) -> bool {
        let (mut preds, mut rank) = self.find_preds(&key, &member);

        // At capacity with the insertion point at the tail: the new entry
        // is the one the bound would evict, so reject without mutating.
        if self.max_len > 0 && self.len >= self.max_len && self.link(preds[0], 0).forward.is_none() {
            return false;
        }

        let height = self.random_level();
        if height > self.level {
            // Fresh top levels start at the header with the whole list in
            // their span.
            for i in self.level..height {
                rank[i] = 0;
                preds[i] = None;
                self.header[i].span = self.len;
            }
            self.level = height;
        }

        let handle = self.nodes.alloc(Node::new(key, member, height));

        // Splice into every level up to the node's height. `stepped` is the
        // level-0 distance from this level's predecessor to the new node.
        for i in 0..height {
            let Level { forward, span } = *self.link(preds[i], i);
            let stepped = rank[0] - rank[i];

            let node = self.nodes.get_mut(handle);
            node.levels[i].forward = forward;
            node.levels[i].span = span - stepped;

            let pred = self.link_mut(preds[i], i);
            pred.forward = Some(handle);
            pred.span = stepped + 1;
        }
        // The node is invisible above its height, but rank distances there
        // still grew by one entry.
        for i in height..self.level {
            self.link_mut(preds[i], i).span += 1;
        }

        self.nodes.get_mut(handle).pred = preds[0];
        match self.nodes.get(handle).levels[0].forward {
            Some(next) => self.nodes.get_mut(next).pred = Some(handle),
            None => self.tail = Some(handle),
        }

        self.len += 1;
        let member = self.nodes.get(handle).member.clone();
        self.index.insert(member, handle);

        // The bound trims from the tail; the rejection above guarantees the
        // new entry is not among the trimmed ranks.
        if self.max_len > 0 && self.len > self.max_len {
            let removed = self.remove_range(self.max_len + 1, self.len);
            debug_assert_eq!(removed, 1, "insert: trim removed more than the one surplus entry");
        }

        true
    }

    /// Repositions the node at `target` under a new key.
    ///
    /// When both level-0 neighbors still satisfy the order with the key
    /// substituted, the key is overwritten in place at O(1). Any other
    /// update unlinks the node and reinserts a fresh one; this is the only
    /// path that moves an entry, and it never re-levels in place.
    fn update(&mut self, new_key: K, target: Handle) {
        let node = self.nodes.get(target);
        let (preds, _) = self.find_preds(&node.key, &node.member);
        debug_assert_eq!(
            self.link(preds[0], 0).forward,
            Some(target),
            "update: membership index points at an unlinked node"
        );

        let node = self.nodes.get(target);
        let pred_ok = match node.pred {
            Some(p) => self.nodes.get(p).key > new_key,
            None => true,
        };
        let succ_ok = match node.levels[0].forward {
            Some(s) => self.nodes.get(s).key < new_key,
            None => true,
        };
        // Strict on both sides: a key tie with a neighbor has to relink so
        // the member tie-break decides the order.
        if pred_ok && succ_ok {
            self.nodes.get_mut(target).key = new_key;
            return;
        }

        let node = self.unlink(target, &preds);
        self.index.remove(&node.member);
        let inserted = self.insert_new(new_key, node.member);
        // The unlink just freed a slot below the bound.
        debug_assert!(inserted, "update: reinsert cannot hit the capacity bound");
    }

    /// Removes `member`, returning the key it held.
    pub(crate) fn remove<Q>(&mut self, member: &Q) -> Option<K>
    where
        M: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let target = *self.index.get(member)?;
        let node = self.nodes.get(target);
        let (preds, _) = self.find_preds(&node.key, &node.member);
        debug_assert_eq!(
            self.link(preds[0], 0).forward,
            Some(target),
            "remove: membership index points at an unlinked node"
        );

        let node = self.unlink(target, &preds);
        self.index.remove(&node.member);
        Some(node.key)
    }

    /// Removes the entries at 1-based ranks `start..=end`.
    ///
    /// The range must already be validated: `1 <= start <= end <= len`.
    /// Returns the number removed (always the full range width).
    pub(crate) fn remove_range(&mut self, start: usize, end: usize) -> usize {
        debug_assert!(
            start >= 1 && start <= end && end <= self.len,
            "remove_range: unvalidated range {start}..={end} (len {})",
            self.len
        );

        // Stop each level one step short of rank `start`.
        let mut preds = [None; MAX_LEVEL];
        let mut at: Option<Handle> = None;
        let mut traversed = 0_usize;
        for i in (0..self.level).rev() {
            loop {
                let link = self.link(at, i);
                let Some(next) = link.forward else { break };
                if traversed + link.span >= start {
                    break;
                }
                traversed += link.span;
                at = Some(next);
            }
            preds[i] = at;
        }

        // Unlink level-0 successors one at a time. Removing a node never
        // invalidates the predecessors of the lower-ranked nodes after it,
        // so the predecessor array is reused across the whole range.
        let mut cur = self.link(preds[0], 0).forward;
        traversed += 1;
        let mut removed = 0;
        loop {
            let Some(handle) = cur else { break };
            if traversed > end {
                break;
            }
            cur = self.nodes.get(handle).levels[0].forward;
            let node = self.unlink(handle, &preds);
            self.index.remove(&node.member);
            traversed += 1;
            removed += 1;
        }

        debug_assert_eq!(removed, end - start + 1, "remove_range: span walk lost entries");
        removed
    }

    /// Splices `target` out of every level, fixes back-references and the
    /// active level, and returns the node taken out of the arena.
    ///
    /// The caller owns the membership-index erase; direct removal, range
    /// removal, and the update relink path all funnel through here.
    fn unlink(&mut self, target: Handle, preds: &[Option<Handle>; MAX_LEVEL]) -> Node<K, M> {
        for i in 0..self.level {
            if self.link(preds[i], i).forward == Some(target) {
                let Level { forward, span } = self.nodes.get(target).levels[i];
                let pred = self.link_mut(preds[i], i);
                // Add before subtracting: `span` is 0 on a link that runs
                // off the end of the list, but `pred.span` is at least 1.
                pred.span += span;
                pred.span -= 1;
                pred.forward = forward;
            } else {
                // The target sits below this level, but it still counted
                // toward the predecessor's rank distance.
                self.link_mut(preds[i], i).span -= 1;
            }
        }

        let node = self.nodes.take(target);
        match node.levels[0].forward {
            Some(next) => self.nodes.get_mut(next).pred = node.pred,
            None => self.tail = node.pred,
        }
        while self.level > 1 && self.header[self.level - 1].forward.is_none() {
            self.level -= 1;
        }
        self.len -= 1;

        node
    }

    /// 1-based rank of `member`, or `None` if absent.
    pub(crate) fn rank_of<Q>(&self, member: &Q) -> Option<usize>
    where
        M: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let target = *self.index.get(member)?;
        let node = self.nodes.get(target);
        let (preds, rank) = self.find_preds(&node.key, &node.member);
        debug_assert_eq!(
            self.link(preds[0], 0).forward,
            Some(target),
            "rank_of: membership index points at an unlinked node"
        );
        Some(rank[0] + 1)
    }

    /// Entry at 1-based `rank`, or `None` outside `[1, len]`.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<(&K, &M)> {
        if rank == 0 || rank > self.len {
            return None;
        }

        let mut at: Option<Handle> = None;
        let mut traversed = 0_usize;
        for i in (0..self.level).rev() {
            loop {
                let link = self.link(at, i);
                let Some(next) = link.forward else { break };
                if traversed + link.span > rank {
                    break;
                }
                traversed += link.span;
                at = Some(next);
            }
            if traversed == rank {
                let node = self.nodes.get(at?);
                return Some((&node.key, &node.member));
            }
        }

        debug_assert!(false, "get_by_rank: span sums never reached rank {rank} (len {})", self.len);
        None
    }

    /// Key held by `member`, or `None` if absent.
    pub(crate) fn key_of<Q>(&self, member: &Q) -> Option<&K>
    where
        M: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let &target = self.index.get(member)?;
        Some(&self.nodes.get(target).key)
    }

    pub(crate) fn contains<Q>(&self, member: &Q) -> bool
    where
        M: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(member)
    }

    /// Exhaustively validates the structural invariants. Test-only: the
    /// checks are linear in the list size per level.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self)
    where
        K: core::fmt::Debug,
        M: core::fmt::Debug,
    {
        // Level-0 chain: count, strict descending order, pred symmetry.
        let mut chain = Vec::new();
        let mut prev: Option<Handle> = None;
        let mut cur = self.header[0].forward;
        while let Some(handle) = cur {
            let node = self.nodes.get(handle);
            assert_eq!(node.pred, prev, "pred back-reference out of sync at {:?}", node.member);
            if let Some(p) = prev {
                let before = self.nodes.get(p);
                assert!(
                    precedes((&before.key, &before.member), (&node.key, &node.member)),
                    "order violated: {:?} before {:?}",
                    before.member,
                    node.member
                );
            }
            chain.push(handle);
            prev = cur;
            cur = node.levels[0].forward;
        }

        assert_eq!(chain.len(), self.len, "len out of sync with the level-0 chain");
        assert_eq!(self.index.len(), self.len, "membership index out of sync");
        assert_eq!(self.nodes.len(), self.len, "arena holds unlinked nodes");
        assert_eq!(self.tail, chain.last().copied(), "tail out of sync");
        if self.max_len > 0 {
            assert!(self.len <= self.max_len, "capacity bound exceeded");
        }

        // Membership index: every entry owns the node it maps to.
        for (member, &handle) in &self.index {
            assert_eq!(&self.nodes.get(handle).member, member, "index entry maps to a foreign node");
        }

        // 1-based rank of each handle, for span validation.
        let rank_of = |at: Option<Handle>| match at {
            None => 0,
            Some(h) => 1 + chain.iter().position(|&c| c == h).expect("node unreachable at level 0"),
        };

        // Spans: at every level, each link advances exactly its span, and
        // end-of-level links span to the end of the list.
        for i in 0..self.level {
            let mut at: Option<Handle> = None;
            loop {
                let link = self.link(at, i);
                match link.forward {
                    Some(next) => {
                        assert!(
                            i < self.nodes.get(next).height(),
                            "link reaches a node below its height at level {i}"
                        );
                        assert_eq!(
                            link.span,
                            rank_of(Some(next)) - rank_of(at),
                            "span mismatch at level {i}"
                        );
                        at = Some(next);
                    }
                    None => {
                        assert_eq!(link.span, self.len - rank_of(at), "tail span mismatch at level {i}");
                        break;
                    }
                }
            }
        }

        // Active level is minimal: the top is occupied (or the list is
        // trivial), everything above is empty.
        assert!(self.level >= 1 && self.level <= MAX_LEVEL);
        if self.level > 1 {
            assert!(self.header[self.level - 1].forward.is_some(), "active level is not minimal");
        }
        for i in self.level..MAX_LEVEL {
            assert!(self.header[i].forward.is_none(), "level {i} live above the active level");
        }
    }
}
