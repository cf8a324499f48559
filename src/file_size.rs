//! Human readable sizes for the `{file_size}` placeholder

use serde::{Deserialize, Serialize};

use crate::config::PresenceConfig;
use crate::context::EditorSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeStandard {
    /// Powers of 1024 with KiB, MiB, ...
    #[default]
    Iec,
    /// Powers of 1000 with kB, MB, ...
    Si,
}

pub trait FileSizeResolver: Send + Sync {
    fn file_size(&self, config: &PresenceConfig, editor: &EditorSnapshot) -> Option<String>;
}

/// Formats the byte count carried by the editor snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteSizeFormatter;

impl FileSizeResolver for ByteSizeFormatter {
    fn file_size(&self, config: &PresenceConfig, editor: &EditorSnapshot) -> Option<String> {
        let bytes = editor.file_size_bytes?;
        Some(format_size(
            bytes,
            config.file_size.standard,
            config.file_size.precision,
        ))
    }
}

pub fn format_size(bytes: u64, standard: SizeStandard, precision: usize) -> String {
    let (base, units): (f64, &[&str]) = match standard {
        SizeStandard::Iec => (1024.0, &["B", "KiB", "MiB", "GiB", "TiB"]),
        SizeStandard::Si => (1000.0, &["B", "kB", "MB", "GB", "TB"]),
    };

    if (bytes as f64) < base {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= base && unit < units.len() - 1 {
        value /= base;
        unit += 1;
    }

    format!("{:.*} {}", precision, value, units[unit])
}
