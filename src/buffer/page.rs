use std::ops::Deref;
use std::sync::RwLock;

use crate::disk::{PageId, INVALID_PAGE_ID, PAGE_SIZE};

/// The in-memory image of one disk page plus the metadata the buffer pool
/// keeps per frame: the resident page id, the dirty bit and the pin count.
pub struct PageData {
    pub id: PageId,
    /// Always exactly PAGE_SIZE bytes; zeroed while the frame is empty.
    pub data: Vec<u8>,
    pub is_dirty: bool,
    pub pin_count: i32,
}

impl PageData {
    fn new() -> Self {
        PageData {
            id: INVALID_PAGE_ID,
            data: vec![0; PAGE_SIZE],
            is_dirty: false,
            pin_count: 0,
        }
    }

    /// Reset the frame to the empty state, zeroing the page bytes.
    pub fn clear(&mut self) {
        self.id = INVALID_PAGE_ID;
        self.is_dirty = false;
        self.pin_count = 0;
        self.data.fill(0);
    }
}

/// Page is the container of the actual page data, providing concurrent
/// access protection on the bytes. Pool-level bookkeeping (the page table,
/// pin transitions) is protected by the pool latch instead.
pub struct Page {
    inner: RwLock<PageData>,
}

impl Page {
    pub fn new() -> Self {
        Page { inner: RwLock::new(PageData::new()) }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

impl Deref for Page {
    type Target = RwLock<PageData>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
