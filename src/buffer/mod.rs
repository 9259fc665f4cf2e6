pub mod bufferpool;
pub mod page;
pub mod replacer;

/// Index of a frame slot in the buffer pool, in range `[0, pool_size)`.
pub type FrameId = usize;

/// Replacer tracks frame usage to pick replacement victims when the buffer
/// pool is full.
pub trait Replacer: Send + Sync {
    /// Record the event that the given frame id is accessed at the current
    /// timestamp. Create a new history entry if the frame id has not been
    /// seen before. Frame ids outside `[0, pool_size)` are ignored.
    fn record_access(&self, frame_id: FrameId);

    /// Find the frame to evict per the replacement policy (backward
    /// k-distance). Only frames marked evictable are candidates.
    ///
    /// Successful eviction removes the frame's access history and
    /// decrements the replacer size.
    ///
    /// Returns the evicted frame id, or None if no frame can be evicted.
    fn evict(&self) -> Option<FrameId>;

    /// Toggle whether a frame is evictable or non-evictable. The replacer
    /// size equals the number of evictable entries, so flipping the flag
    /// adjusts it accordingly. Unknown frames are ignored.
    fn set_evictable(&self, frame_id: FrameId, evictable: bool);

    /// Check if a frame is evictable. If the frame is not tracked, return
    /// true.
    fn is_evictable(&self, frame_id: FrameId) -> bool;

    /// Remove a frame from the replacer along with its access history,
    /// no matter its position in the eviction order. Unknown frames are
    /// ignored. Called by the pool for frames known to be unpinned.
    fn remove(&self, frame_id: FrameId);

    /// Number of frames currently evictable.
    fn size(&self) -> usize;
}
