//! `[replay]` section configuration.
//!
//! ```toml
//! [replay]
//! chunk_size = 64   # characters per simulated chunk for raw transcripts
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub chunk_size: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { chunk_size: 64 }
    }
}

impl ReplayConfig {
    pub(crate) const CHUNK_SIZE: FieldPath = FieldPath::new("replay.chunk_size");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.chunk_size == 0 {
            diag.error(Self::CHUNK_SIZE, "must be at least 1");
        }
    }
}
