use std::fmt::Debug;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

pub mod file;
pub mod memory;

/// Identifier of a page in persistent storage.
pub type PageId = i64;

/// Reserved sentinel denoting "no page".
pub const INVALID_PAGE_ID: PageId = -1;

/// Size of a data page in bytes.
pub const PAGE_SIZE: usize = 4096;

/// Block-addressable persistent storage consumed by the buffer pool.
///
/// All operations are synchronous; the pool performs them while holding its
/// latch. The trait is designed as `trait object` compatible so the pool
/// can own any backend behind a `Box<dyn DiskManager>`.
pub trait DiskManager: Debug + Send + Sync {
    /// Copy the on-disk bytes of the given page into `buf`. A page that
    /// was allocated but never written reads as zeroes. `buf` must be
    /// exactly `PAGE_SIZE` bytes.
    fn read_page(&self, page_id: PageId, buf: &mut [u8]) -> Result<()>;

    /// Persist `data` as the on-disk bytes of the given page. `data` must
    /// be exactly `PAGE_SIZE` bytes.
    fn write_page(&self, page_id: PageId, data: &[u8]) -> Result<()>;

    /// Hand out the next page id. Allocation is monotonically increasing;
    /// the disk manager is the authoritative source of page ids.
    fn allocate_page(&self) -> Result<PageId>;

    /// Advisory notice that a page id is no longer referenced. Backends
    /// may reclaim the space or treat this as a no-op.
    fn deallocate_page(&self, page_id: PageId) -> Result<()>;
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Memory,
    File,
}

/// Open a disk manager of the given type. The path is only used by the
/// file storage type.
pub fn new_disk_manager(typ: StorageType, path: &Path) -> Result<Box<dyn DiskManager>> {
    match typ {
        StorageType::Memory => Ok(Box::new(memory::Memory::new())),
        StorageType::File => Ok(Box::new(file::FileDisk::open(path)?)),
    }
}
