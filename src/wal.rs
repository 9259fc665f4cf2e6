use crate::error::Result;

/// Log sequence number assigned to an appended log record.
pub type Lsn = u64;

/// Write-ahead log manager owned by the recovery subsystem.
///
/// The buffer pool accepts a log manager handle at construction so the
/// recovery integration point exists, but the core never invokes it: WAL
/// ordering before page write-back is enforced by the recovery subsystem,
/// not by the cache.
pub trait LogManager: Send + Sync {
    /// Append a serialized log record, returning its sequence number.
    fn append(&self, record: &[u8]) -> Result<Lsn>;

    /// Make all records up to and including the given lsn durable.
    fn flush(&self, lsn: Lsn) -> Result<()>;
}
