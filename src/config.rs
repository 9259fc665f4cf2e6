use serde::Deserialize;

use crate::disk::StorageType;
use crate::error::Result;

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct Config {
    pub log_level: LogLevel,
    pub storage_type: StorageType,
    /// Database file used by the file storage type. Ignored by the
    /// in-memory storage type.
    pub data_file: String,
    /// Number of frames in the buffer pool.
    pub pool_size: usize,
    /// The k in the LRU-k replacement policy.
    pub replacer_k: usize,
}

impl Config {
    pub fn new(file: &str) -> Result<Config> {
        let mut cfg = config::Config::builder()
            .set_default("log_level", "debug")?
            .set_default("storage_type", "memory")?
            .set_default("data_file", "pagecache.db")?
            .set_default("pool_size", 1024_i64)?
            .set_default("replacer_k", 2_i64)?;
        if !file.is_empty() {
            cfg = cfg.add_source(config::File::with_name(file))
        }
        cfg = cfg.add_source(config::Environment::with_prefix("PAGECACHE"));
        Ok(cfg.build()?.try_deserialize()?)
    }
}
