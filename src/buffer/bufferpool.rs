use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::disk::{DiskManager, PageId, INVALID_PAGE_ID};
use crate::error::{Error, Result};
use crate::wal::LogManager;

use super::page::{Page, PageData};
use super::replacer::SyncLRUKReplacer;
use super::{FrameId, Replacer};

/// The buffer pool is responsible for moving physical pages back and forth
/// from main memory to disk. It allows the system to support databases that
/// are larger than the amount of memory available.
///
/// The buffer pool's operations are transparent to other parts of the
/// system: callers ask for a page by its unique identifier (page_id) and do
/// not know whether that page is already in memory or has to be fetched
/// from disk.
struct BufferPool {
    pool_size: usize,
    /// block-addressable persistent storage.
    disk: Box<dyn DiskManager>,
    /// array of buffer pool frames. the array index is the FrameId, i.e.
    /// the FrameId is in range [0, pool_size).
    pages: Vec<Arc<Page>>,
    /// page table for keeping track of resident pages.
    page_table: HashMap<PageId, FrameId>,
    /// list of frames that don't have any page on them.
    free_list: Vec<FrameId>,
    /// Replacer to find unpinned frames for replacement.
    replacer: Arc<dyn Replacer>,
}

impl BufferPool {
    fn new(disk: Box<dyn DiskManager>, pool_size: usize, replacer_k: usize) -> Self {
        let mut pages = Vec::with_capacity(pool_size);
        let mut free_list = Vec::with_capacity(pool_size);
        let page_table = HashMap::new();
        let replacer: Arc<dyn Replacer> = Arc::new(SyncLRUKReplacer::new(replacer_k, pool_size));
        for i in 0..pool_size {
            pages.push(Arc::new(Page::new()));
            // initially, every frame is in the free list
            free_list.push(i);
        }
        BufferPool { pool_size, disk, pages, page_table, free_list, replacer }
    }

    /// Pick the frame a new resident page will live in: the free list
    /// first, then an eviction victim from the replacer. A dirty victim is
    /// written back before its frame is handed out; the frame comes back
    /// cleared, unlinked from the page table and zeroed.
    fn replacement_frame(&mut self) -> Result<FrameId> {
        if let Some(frame_id) = self.free_list.pop() {
            return Ok(frame_id);
        }
        let frame_id = match self.replacer.evict() {
            Some(frame_id) => frame_id,
            // every frame is pinned, nothing can be replaced
            None => return Err(Error::NoAvailableFrame),
        };
        let page = Arc::clone(&self.pages[frame_id]);
        let mut guard = page.write()?;
        let evicted_page_id = guard.id;
        // flush the in-memory page as the storage page if it is dirty.
        if guard.is_dirty {
            debug!("writing back dirty page {} from frame {}", evicted_page_id, frame_id);
            self.disk.write_page(evicted_page_id, &guard.data)?;
            guard.is_dirty = false;
        }
        guard.clear();
        // unlink the evicted page from the page table
        self.page_table.remove(&evicted_page_id);
        debug!("evicted page {} from frame {}", evicted_page_id, frame_id);
        Ok(frame_id)
    }

    /// Create a new page in the buffer pool, or return no-available-frame
    /// if all frames are currently in use and not evictable (in other
    /// words, pinned).
    ///
    /// The new page id comes from the disk manager, the authoritative page
    /// id allocator. The frame is pinned with an initial pin count of 1 and
    /// registered with the replacer as non-evictable so it cannot be
    /// reclaimed before the caller unpins it.
    fn new_page(&mut self) -> Result<Arc<Page>> {
        let frame_id = self.replacement_frame()?;
        let page_id = match self.disk.allocate_page() {
            Ok(page_id) => page_id,
            Err(err) => {
                // hand the frame back so the pool doesn't leak it
                self.free_list.push(frame_id);
                return Err(err);
            }
        };
        let page = Arc::clone(&self.pages[frame_id]);
        let mut guard = page.write()?;
        // the frame bytes are already zeroed, set up the metadata
        guard.id = page_id;
        guard.pin_count = 1;
        // link the new page with the frame into the page table
        self.page_table.insert(page_id, frame_id);
        self.replacer.record_access(frame_id);
        self.replacer.set_evictable(frame_id, false);

        drop(guard);
        Ok(page)
    }

    /// Fetch the page with the given page id. Return no-available-frame if
    /// the page has to be read from disk but all frames are currently in
    /// use and not evictable.
    ///
    /// On a hit the pin count is incremented and the access recorded; on a
    /// miss a replacement frame is picked (free list first), the page bytes
    /// are read from disk, and the frame is pinned with a pin count of 1.
    fn fetch_page(&mut self, page_id: PageId) -> Result<Arc<Page>> {
        if page_id == INVALID_PAGE_ID {
            return Err(Error::invalid_input("cannot fetch the invalid page id"));
        }
        // check if the page is resident already
        if let Some(&frame_id) = self.page_table.get(&page_id) {
            let page = Arc::clone(&self.pages[frame_id]);
            let mut guard = page.write()?;
            guard.pin_count += 1;
            self.replacer.record_access(frame_id);
            self.replacer.set_evictable(frame_id, false);

            drop(guard);
            return Ok(page);
        }

        let frame_id = self.replacement_frame()?;
        let page = Arc::clone(&self.pages[frame_id]);
        let mut guard = page.write()?;
        if let Err(err) = self.disk.read_page(page_id, &mut guard.data) {
            // hand the cleared frame back so the pool doesn't leak it
            guard.clear();
            drop(guard);
            self.free_list.push(frame_id);
            return Err(err);
        }
        guard.id = page_id;
        guard.pin_count = 1;
        self.page_table.insert(page_id, frame_id);
        self.replacer.record_access(frame_id);
        self.replacer.set_evictable(frame_id, false);

        drop(guard);
        Ok(page)
    }

    /// Unpin the target page. Return false if the page is not resident or
    /// its pin count is already 0.
    ///
    /// When the pin count reaches 0 the frame becomes evictable by the
    /// replacer.
    fn unpin_page(&mut self, page_id: PageId, is_dirty: bool) -> Result<bool> {
        let frame_id = match self.page_table.get(&page_id) {
            Some(&frame_id) => frame_id,
            None => return Ok(false),
        };
        let page = &self.pages[frame_id];
        let mut guard = page.write()?;
        if guard.pin_count == 0 {
            return Ok(false);
        }
        // the dirty bit is sticky for the lifetime of the residency: a
        // clean unpin after a dirty one must not erase the dirty bit.
        if is_dirty {
            guard.is_dirty = true;
        }
        guard.pin_count -= 1;
        if guard.pin_count == 0 {
            self.replacer.set_evictable(frame_id, true);
        }
        Ok(true)
    }

    /// Flush the target page to storage regardless of the dirty flag, then
    /// unset the dirty flag. Return false if the page is not resident or
    /// the page id is the invalid sentinel.
    fn flush_page(&mut self, page_id: PageId) -> Result<bool> {
        if page_id == INVALID_PAGE_ID {
            return Ok(false);
        }
        let frame_id = match self.page_table.get(&page_id) {
            Some(&frame_id) => frame_id,
            None => return Ok(false),
        };
        let page = &self.pages[frame_id];
        let mut guard = page.write()?;
        self.disk.write_page(guard.id, &guard.data)?;
        guard.is_dirty = false;
        Ok(true)
    }

    /// Flush every resident page to storage.
    fn flush_all_pages(&mut self) -> Result<()> {
        debug!("flushing all {} resident pages", self.page_table.len());
        for (_, &frame_id) in self.page_table.iter() {
            let page = &self.pages[frame_id];
            let mut guard = page.write()?;
            self.disk.write_page(guard.id, &guard.data)?;
            guard.is_dirty = false;
        }
        Ok(())
    }

    /// Delete a page from the buffer pool. If the page is not resident, do
    /// nothing and return true. If the page is pinned, return false.
    ///
    /// Deleting unlinks the page from the page table, stops tracking the
    /// frame in the replacer, resets the frame's memory and metadata, adds
    /// the frame back to the free list, and tells the disk manager the page
    /// id may be deallocated.
    fn delete_page(&mut self, page_id: PageId) -> Result<bool> {
        let frame_id = match self.page_table.get(&page_id) {
            Some(&frame_id) => frame_id,
            // not resident, nothing to do
            None => return Ok(true),
        };
        let page = &self.pages[frame_id];
        let mut guard = page.write()?;
        if guard.pin_count > 0 {
            return Ok(false);
        }
        // a zero-pinned resident frame was handed to the replacer as
        // evictable on its last unpin
        debug_assert!(self.replacer.is_evictable(frame_id));
        guard.clear();
        self.replacer.remove(frame_id);
        self.page_table.remove(&page_id);
        self.free_list.push(frame_id);
        self.disk.deallocate_page(page_id)?;
        Ok(true)
    }
}

/// Buffer pool manager wraps the buffer pool with a mutex for concurrent
/// access; all the heavy lifting happens in the buffer pool. The latch is
/// held for the entirety of every operation, disk I/O included, and is
/// always acquired before the replacer's own latch.
pub struct BufferPoolManager {
    /// the actual buffer pool protected by a mutex latch.
    inner: Arc<Mutex<BufferPool>>,
    /// recovery integration point; accepted but never invoked by the
    /// cache itself.
    #[allow(dead_code)]
    log_manager: Option<Arc<dyn LogManager>>,
}

impl BufferPoolManager {
    pub fn new(
        disk: Box<dyn DiskManager>,
        pool_size: usize,
        replacer_k: usize,
        log_manager: Option<Arc<dyn LogManager>>,
    ) -> Result<Self> {
        if pool_size == 0 {
            return Err(Error::invalid_input("buffer pool requires at least one frame"));
        }
        if replacer_k == 0 {
            return Err(Error::invalid_input("replacer k should be larger than zero"));
        }
        let inner = BufferPool::new(disk, pool_size, replacer_k);
        Ok(BufferPoolManager { inner: Arc::new(Mutex::new(inner)), log_manager })
    }

    /// Number of frames in the pool.
    pub fn pool_size(&self) -> Result<usize> {
        let inner = self.inner.lock()?;
        Ok(inner.pool_size)
    }

    /// Create a new page in the buffer pool and return a pinned handle to
    /// it.
    pub fn new_page(&self) -> Result<PageHandle> {
        let mut inner = self.inner.lock()?;
        let page = inner.new_page()?;
        let page_id = page.read()?.id;
        drop(inner);
        Ok(PageHandle::new(Arc::clone(&self.inner), page, page_id))
    }

    /// Fetch the page with the given page id and return a pinned handle to
    /// it.
    pub fn fetch_page(&self, page_id: PageId) -> Result<PageHandle> {
        let mut inner = self.inner.lock()?;
        let page = inner.fetch_page(page_id)?;
        drop(inner);
        Ok(PageHandle::new(Arc::clone(&self.inner), page, page_id))
    }

    /// Unpin the target page. Return false if the page is not resident or
    /// its pin count is already 0. Prefer releasing pins by dropping the
    /// [`PageHandle`]; this entry point exists for callers that manage
    /// pins manually.
    pub fn unpin_page(&self, page_id: PageId, is_dirty: bool) -> Result<bool> {
        let mut inner = self.inner.lock()?;
        inner.unpin_page(page_id, is_dirty)
    }

    /// Flush the target page to storage regardless of the dirty flag.
    /// Return false if the page is not resident.
    pub fn flush_page(&self, page_id: PageId) -> Result<bool> {
        let mut inner = self.inner.lock()?;
        inner.flush_page(page_id)
    }

    /// Flush all resident pages to storage.
    pub fn flush_all_pages(&self) -> Result<()> {
        let mut inner = self.inner.lock()?;
        inner.flush_all_pages()
    }

    /// Delete a page from the buffer pool. If the page is not resident, do
    /// nothing and return true. If the page is pinned, return false.
    pub fn delete_page(&self, page_id: PageId) -> Result<bool> {
        let mut inner = self.inner.lock()?;
        inner.delete_page(page_id)
    }
}

/// A pinned page.
///
/// The handle keeps the page resident: the frame cannot be evicted while
/// the handle is alive. Dropping the handle releases the pin and carries
/// the dirty bit back to the pool; [`PageHandle::unpin`] does the same
/// explicitly. Taking a [`PageHandle::write`] guard marks the handle dirty.
///
/// The byte buffer behind the handle is shared by all holders of a pin on
/// the page; the page's RwLock serializes byte access, but coordination
/// above that (who writes what when) is up to the access methods.
pub struct PageHandle {
    pool: Arc<Mutex<BufferPool>>,
    page: Arc<Page>,
    page_id: PageId,
    dirty: bool,
    released: bool,
}

impl PageHandle {
    fn new(pool: Arc<Mutex<BufferPool>>, page: Arc<Page>, page_id: PageId) -> Self {
        PageHandle { pool, page, page_id, dirty: false, released: false }
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Shared access to the frame bytes and metadata.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, PageData>> {
        Ok(self.page.read()?)
    }

    /// Exclusive access to the frame bytes. Taking a write guard marks the
    /// handle dirty; the pool learns about it when the pin is released.
    pub fn write(&mut self) -> Result<RwLockWriteGuard<'_, PageData>> {
        self.dirty = true;
        Ok(self.page.write()?)
    }

    /// Number of outstanding pins on the page, for observability.
    pub fn pin_count(&self) -> Result<i32> {
        Ok(self.page.read()?.pin_count)
    }

    /// Mark the page dirty without taking a write guard.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Release the pin now instead of at drop. The dirty flag accumulated
    /// by the handle is sticky: passing false here does not undo a write
    /// made through the handle.
    pub fn unpin(mut self, is_dirty: bool) -> Result<bool> {
        self.released = true;
        let dirty = self.dirty || is_dirty;
        let mut pool = self.pool.lock()?;
        pool.unpin_page(self.page_id, dirty)
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        // a poisoned pool latch means another thread panicked while
        // holding it; there is no pin bookkeeping left to maintain then.
        if let Ok(mut pool) = self.pool.lock() {
            let _ = pool.unpin_page(self.page_id, self.dirty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::memory::Memory;

    /// A disk manager test double that records every write_page call.
    #[derive(Debug)]
    struct CountingDisk {
        inner: Memory,
        writes: Arc<Mutex<Vec<PageId>>>,
    }

    impl CountingDisk {
        fn new() -> (Box<dyn DiskManager>, Arc<Mutex<Vec<PageId>>>) {
            let writes = Arc::new(Mutex::new(Vec::new()));
            let disk = CountingDisk { inner: Memory::new(), writes: Arc::clone(&writes) };
            (Box::new(disk), writes)
        }
    }

    impl DiskManager for CountingDisk {
        fn read_page(&self, page_id: PageId, buf: &mut [u8]) -> Result<()> {
            self.inner.read_page(page_id, buf)
        }

        fn write_page(&self, page_id: PageId, data: &[u8]) -> Result<()> {
            self.writes.lock().unwrap().push(page_id);
            self.inner.write_page(page_id, data)
        }

        fn allocate_page(&self) -> Result<PageId> {
            self.inner.allocate_page()
        }

        fn deallocate_page(&self, page_id: PageId) -> Result<()> {
            self.inner.deallocate_page(page_id)
        }
    }

    #[test]
    fn test_buffer_pool_basic() -> Result<()> {
        let pool_size = 10;
        let bpm = BufferPoolManager::new(Box::new(Memory::new()), pool_size, 5, None)?;
        assert_eq!(pool_size, bpm.pool_size()?);

        // Scenario: the buffer pool is empty, we should be able to create a
        // new page.
        let mut page0 = bpm.new_page()?;
        let page0_id = page0.page_id();
        assert_eq!(1, page0.pin_count()?);

        // Scenario: once we have a page, we should be able to read and
        // write its content.
        {
            let mut guard = page0.write()?;
            guard.data[..5].copy_from_slice(b"hello");
        }
        assert_eq!(b"hello", &page0.read()?.data[..5]);

        // Scenario: we should be able to create pages until we fill up the
        // buffer pool.
        let mut handles = Vec::new();
        for _ in 1..pool_size {
            handles.push(bpm.new_page()?);
        }
        // Scenario: once the pool is full, creating any new page fails.
        for _ in 0..pool_size {
            assert!(matches!(bpm.new_page(), Err(Error::NoAvailableFrame)));
        }

        // Scenario: after unpinning page 0 and four other pages, we should
        // be able to create five new pages.
        assert!(page0.unpin(true)?);
        for handle in handles.drain(..4) {
            assert!(handle.unpin(true)?);
        }
        for _ in 0..5 {
            handles.push(bpm.new_page()?);
        }

        // Scenario: all frames are pinned again, page 0 was evicted and
        // cannot be brought back in.
        assert!(matches!(bpm.fetch_page(page0_id), Err(Error::NoAvailableFrame)));

        // Scenario: free one frame and fetch the data we wrote a while ago.
        let handle = handles.pop().unwrap();
        assert!(handle.unpin(false)?);
        let page0 = bpm.fetch_page(page0_id)?;
        assert_eq!(b"hello", &page0.read()?.data[..5]);

        Ok(())
    }

    #[test]
    fn test_pin_blocks_eviction() -> Result<()> {
        let (disk, writes) = CountingDisk::new();
        let bpm = BufferPoolManager::new(disk, 1, 2, None)?;

        let page0 = bpm.new_page()?;
        let page0_id = page0.page_id();

        // the only frame is pinned, nothing can be created or fetched
        assert!(matches!(bpm.new_page(), Err(Error::NoAvailableFrame)));

        // a clean unpin makes the frame reclaimable without a write-back
        assert!(page0.unpin(false)?);
        let page1 = bpm.new_page()?;
        assert_ne!(page0_id, page1.page_id());
        assert!(writes.lock().unwrap().is_empty());

        Ok(())
    }

    #[test]
    fn test_dirty_write_back_exactly_once() -> Result<()> {
        let (disk, writes) = CountingDisk::new();
        let bpm = BufferPoolManager::new(disk, 1, 2, None)?;

        let mut page0 = bpm.new_page()?;
        let page0_id = page0.page_id();
        page0.write()?.data.fill(0xab);
        assert!(page0.unpin(true)?);

        // reusing the frame must write the dirty page back exactly once
        let page1 = bpm.new_page()?;
        assert_eq!(vec![page0_id], *writes.lock().unwrap());

        // page1 was never written, evicting it doesn't touch the disk and
        // the refetched page0 carries the bytes written before eviction
        assert!(page1.unpin(false)?);
        let page0 = bpm.fetch_page(page0_id)?;
        assert!(page0.read()?.data.iter().all(|&b| b == 0xab));
        assert_eq!(vec![page0_id], *writes.lock().unwrap());

        Ok(())
    }

    #[test]
    fn test_unpin_semantics() -> Result<()> {
        let bpm = BufferPoolManager::new(Box::new(Memory::new()), 2, 2, None)?;

        let handle = bpm.new_page()?;
        let page_id = handle.page_id();

        // unknown page
        assert!(!bpm.unpin_page(page_id + 100, false)?);
        // pin count goes 1 -> 0, a second unpin is refused
        assert!(bpm.unpin_page(page_id, false)?);
        assert!(!bpm.unpin_page(page_id, false)?);

        // the handle was already released manually, dropping it is a no-op
        drop(handle);
        assert!(!bpm.unpin_page(page_id, false)?);

        Ok(())
    }

    #[test]
    fn test_dirty_bit_is_sticky() -> Result<()> {
        let (disk, writes) = CountingDisk::new();
        let bpm = BufferPoolManager::new(disk, 1, 2, None)?;

        let page0 = bpm.new_page()?;
        let page0_id = page0.page_id();
        let page0_again = bpm.fetch_page(page0_id)?;
        assert_eq!(2, page0.pin_count()?);

        // dirty unpin followed by a clean unpin must leave the page dirty
        assert!(page0.unpin(true)?);
        assert!(page0_again.unpin(false)?);

        let _page1 = bpm.new_page()?;
        assert_eq!(vec![page0_id], *writes.lock().unwrap());

        Ok(())
    }

    #[test]
    fn test_mark_dirty_without_write_guard() -> Result<()> {
        let (disk, writes) = CountingDisk::new();
        let bpm = BufferPoolManager::new(disk, 1, 2, None)?;

        let mut page0 = bpm.new_page()?;
        let page0_id = page0.page_id();
        page0.mark_dirty();
        // a clean release does not undo the explicit mark
        assert!(page0.unpin(false)?);

        let mut page1 = bpm.new_page()?;
        let page1_id = page1.page_id();
        assert_eq!(vec![page0_id], *writes.lock().unwrap());

        // the mark also rides along when the handle is simply dropped
        page1.mark_dirty();
        drop(page1);
        let _page0 = bpm.fetch_page(page0_id)?;
        assert_eq!(vec![page0_id, page1_id], *writes.lock().unwrap());

        Ok(())
    }

    #[test]
    fn test_flush_page() -> Result<()> {
        let (disk, writes) = CountingDisk::new();
        let bpm = BufferPoolManager::new(disk, 2, 2, None)?;

        let mut page0 = bpm.new_page()?;
        let page0_id = page0.page_id();
        page0.write()?.data.fill(0xab);
        assert!(page0.unpin(true)?);

        // flushing the invalid sentinel or a non-resident page is refused
        assert!(!bpm.flush_page(INVALID_PAGE_ID)?);
        assert!(!bpm.flush_page(page0_id + 100)?);

        assert!(bpm.flush_page(page0_id)?);
        assert_eq!(vec![page0_id], *writes.lock().unwrap());

        // the flush cleared the dirty bit, the later eviction must not
        // write the page a second time
        let page1 = bpm.new_page()?;
        let page2 = bpm.new_page()?;
        assert_eq!(vec![page0_id], *writes.lock().unwrap());

        // the flushed bytes survive the round trip through the disk
        drop(page1);
        drop(page2);
        let page0 = bpm.fetch_page(page0_id)?;
        assert!(page0.read()?.data.iter().all(|&b| b == 0xab));

        Ok(())
    }

    #[test]
    fn test_flush_all_pages() -> Result<()> {
        let (disk, writes) = CountingDisk::new();
        let bpm = BufferPoolManager::new(disk, 4, 2, None)?;

        let mut page_ids = Vec::new();
        for i in 0..3u8 {
            let mut handle = bpm.new_page()?;
            handle.write()?.data.fill(i);
            page_ids.push(handle.page_id());
            assert!(handle.unpin(true)?);
        }

        bpm.flush_all_pages()?;

        // one write per resident page, in no particular order
        let mut flushed = writes.lock().unwrap().clone();
        flushed.sort();
        assert_eq!(page_ids, flushed);

        Ok(())
    }

    #[test]
    fn test_delete_page() -> Result<()> {
        let bpm = BufferPoolManager::new(Box::new(Memory::new()), 2, 2, None)?;

        let mut handle = bpm.new_page()?;
        let page_id = handle.page_id();
        handle.write()?.data.fill(0xcd);

        // a pinned page cannot be deleted
        assert!(!bpm.delete_page(page_id)?);

        assert!(handle.unpin(true)?);
        assert!(bpm.delete_page(page_id)?);
        // deleting a page that is not resident is a no-op that succeeds
        assert!(bpm.delete_page(page_id)?);

        // fetching the deleted page reads storage afresh, no carry-over of
        // the pre-delete in-memory bytes
        let handle = bpm.fetch_page(page_id)?;
        assert!(handle.read()?.data.iter().all(|&b| b == 0));

        Ok(())
    }

    #[test]
    fn test_lru_k_prefers_single_access_frames() -> Result<()> {
        let bpm = BufferPoolManager::new(Box::new(Memory::new()), 3, 2, None)?;

        // access sequence: p0, p1, p2, p0. p0 becomes mature (two
        // accesses), p1 and p2 keep a +inf backward k-distance.
        let handle = bpm.new_page()?;
        let p0_id = handle.page_id();
        assert!(handle.unpin(false)?);
        let handle = bpm.new_page()?;
        let p1_id = handle.page_id();
        assert!(handle.unpin(false)?);
        let handle = bpm.new_page()?;
        let p2_id = handle.page_id();
        assert!(handle.unpin(false)?);
        assert!(bpm.fetch_page(p0_id)?.unpin(false)?);

        // bringing in a fourth page must evict p1: it has the oldest first
        // access among the +inf frames, while p0 is protected by maturity
        let p3 = bpm.new_page()?;
        assert!(bpm.flush_page(p0_id)?);
        assert!(!bpm.flush_page(p1_id)?);
        assert!(bpm.flush_page(p2_id)?);
        assert!(bpm.flush_page(p3.page_id())?);

        Ok(())
    }

    #[test]
    fn test_fetch_invalid_page_id() -> Result<()> {
        let bpm = BufferPoolManager::new(Box::new(Memory::new()), 2, 2, None)?;
        assert!(bpm.fetch_page(INVALID_PAGE_ID).is_err());
        Ok(())
    }

    #[test]
    fn test_constructor_rejects_zero_sizes() {
        assert!(BufferPoolManager::new(Box::new(Memory::new()), 0, 2, None).is_err());
        assert!(BufferPoolManager::new(Box::new(Memory::new()), 2, 0, None).is_err());
    }
}
