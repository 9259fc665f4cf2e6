use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{FrameId, Replacer};

/// Eviction rank of a candidate frame. Preliminary frames (fewer than k
/// recorded accesses, i.e. backward k-distance of +inf) always order before
/// mature ones; within either group the frame whose earliest retained
/// timestamp is smallest wins. For a mature frame that earliest retained
/// timestamp is the k-th most recent access, so picking the minimum is the
/// same as picking the largest backward k-distance.
#[derive(Debug, Eq, PartialEq)]
struct VictimRank {
    frame_id: FrameId,
    mature: bool,
    oldest: u64,
}

impl PartialOrd for VictimRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VictimRank {
    fn cmp(&self, other: &Self) -> Ordering {
        // timestamps are unique, the frame id comparison only keeps the
        // ordering total
        self.mature
            .cmp(&other.mature)
            .then_with(|| self.oldest.cmp(&other.oldest))
            .then_with(|| self.frame_id.cmp(&other.frame_id))
    }
}

struct LRUKNode {
    k: usize,
    frame_id: FrameId,
    evictable: bool,
    /// Timestamps of the last up to k accesses of the frame, earliest in
    /// front. Once the history is full the oldest entry is dropped on each
    /// new access.
    history: VecDeque<u64>,
}

impl LRUKNode {
    fn new(frame_id: FrameId, k: usize) -> Self {
        assert!(k > 0, "replacer k should be larger than zero");
        LRUKNode { history: VecDeque::with_capacity(k), k, frame_id, evictable: false }
    }

    fn record_access(&mut self, timestamp: u64) {
        if self.history.len() == self.k {
            self.history.pop_front();
        }
        self.history.push_back(timestamp)
    }

    /// A node is mature once it has accumulated k recorded accesses.
    fn is_mature(&self) -> bool {
        self.history.len() >= self.k
    }

    fn rank(&self) -> VictimRank {
        // a node is created by its first access, so the history is never
        // empty and unwrap cannot panic here.
        let oldest = *self.history.front().unwrap();
        VictimRank { frame_id: self.frame_id, mature: self.is_mature(), oldest }
    }
}

/// LRUKReplacer implements the LRU-k replacement policy.
///
/// The LRU-k algorithm evicts the frame whose backward k-distance is the
/// maximum over all evictable frames. Backward k-distance is the difference
/// between the current timestamp and the timestamp of the k-th previous
/// access.
///
/// A frame with fewer than k recorded accesses has a backward k-distance of
/// +inf and is preferred for eviction; among those, the classical LRU rule
/// applies and the frame with the oldest first access goes first.
pub struct LRUKReplacer {
    nodes: HashMap<FrameId, LRUKNode>,
    current_timestamp: u64,
    current_size: usize,
    replacer_size: usize,
    k: usize,
}

impl LRUKReplacer {
    pub fn new(k: usize, size: usize) -> Self {
        let nodes = HashMap::new();
        LRUKReplacer { nodes, current_timestamp: 0, current_size: 0, replacer_size: size, k }
    }

    /// Advance the logical clock, returning the tick that just elapsed.
    /// Uniqueness of timestamps is all that matters; overflow is not a
    /// practical concern at 64-bit width.
    fn tick(&mut self) -> u64 {
        let timestamp = self.current_timestamp;
        self.current_timestamp += 1;
        timestamp
    }

    /// Record the event that the given frame id is accessed at the current
    /// timestamp. Create a new entry for the access history if the frame id
    /// has not been seen before. Out-of-range frame ids are ignored.
    fn record_access(&mut self, frame_id: FrameId) {
        if frame_id >= self.replacer_size {
            return;
        }
        let timestamp = self.tick();
        let k = self.k;
        let node = self.nodes.entry(frame_id).or_insert_with(|| LRUKNode::new(frame_id, k));
        node.record_access(timestamp);
    }

    /// Find the frame with the largest backward k-distance and evict it.
    /// Only frames that are marked as evictable are candidates.
    ///
    /// Frames with fewer than k recorded accesses (+inf backward
    /// k-distance) are preferred; ties are broken by the earliest recorded
    /// timestamp.
    ///
    /// Successful eviction removes the frame's access history and
    /// decrements the replacer size.
    fn evict(&mut self) -> Option<FrameId> {
        self.tick();
        let victim = self
            .nodes
            .values()
            .filter(|node| node.evictable)
            .map(|node| node.rank())
            .min()?;
        self.nodes.remove(&victim.frame_id);
        self.current_size -= 1;
        Some(victim.frame_id)
    }

    /// Toggle whether a frame is evictable or non-evictable. This also
    /// controls the replacer size: the size equals the number of evictable
    /// entries.
    ///
    /// If the frame is not tracked, or the flag already has the requested
    /// value, nothing is modified.
    fn set_evictable(&mut self, frame_id: FrameId, evictable: bool) {
        self.tick();
        let node = match self.nodes.get_mut(&frame_id) {
            Some(node) => node,
            None => return,
        };
        if node.evictable == evictable {
            return;
        }
        node.evictable = evictable;
        if evictable {
            self.current_size += 1;
        } else {
            self.current_size -= 1;
        }
    }

    /// Check if a frame is evictable. If the frame is not tracked, return
    /// true.
    fn is_evictable(&self, frame_id: FrameId) -> bool {
        match self.nodes.get(&frame_id) {
            Some(node) => node.evictable,
            None => true,
        }
    }

    /// Remove a frame from the replacer along with its access history,
    /// regardless of its backward k-distance. Decrements the replacer size
    /// if the frame was evictable. Unknown frames are ignored.
    fn remove(&mut self, frame_id: FrameId) {
        self.tick();
        let node = match self.nodes.remove(&frame_id) {
            Some(node) => node,
            None => return,
        };
        if node.evictable {
            self.current_size -= 1;
        }
    }

    fn size(&self) -> usize {
        self.current_size
    }
}

/// SyncLRUKReplacer is the thread-safe version of the LRU-k replacement
/// policy; all the heavy lifting happens in the LRUKReplacer. The pool
/// always calls in from inside its own critical section, so this latch is
/// only ever acquired after the pool latch.
pub struct SyncLRUKReplacer {
    inner: Mutex<LRUKReplacer>,
}

impl SyncLRUKReplacer {
    pub fn new(k: usize, size: usize) -> Self {
        let inner = Mutex::new(LRUKReplacer::new(k, size));
        SyncLRUKReplacer { inner }
    }
}

impl Replacer for SyncLRUKReplacer {
    fn record_access(&self, frame_id: FrameId) {
        let mut guard = self.inner.lock().unwrap();
        guard.record_access(frame_id)
    }

    fn evict(&self) -> Option<FrameId> {
        let mut guard = self.inner.lock().unwrap();
        guard.evict()
    }

    fn set_evictable(&self, frame_id: FrameId, evictable: bool) {
        let mut guard = self.inner.lock().unwrap();
        guard.set_evictable(frame_id, evictable)
    }

    fn is_evictable(&self, frame_id: FrameId) -> bool {
        let guard = self.inner.lock().unwrap();
        guard.is_evictable(frame_id)
    }

    fn remove(&self, frame_id: FrameId) {
        let mut guard = self.inner.lock().unwrap();
        guard.remove(frame_id)
    }

    fn size(&self) -> usize {
        let guard = self.inner.lock().unwrap();
        guard.size()
    }
}
