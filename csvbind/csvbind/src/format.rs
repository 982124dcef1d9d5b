//! Shared, validated default timestamp format.

use std::{fmt, sync::Arc};

use arc_swap::ArcSwap;
use csvbind_core::{FormatError, timestamp};
use tracing::debug;

/// Shared handle to a decoder's default timestamp format.
///
/// Clones observe the same cell. Readers load a snapshot without blocking;
/// [`set`](Self::set) validates before swapping, so a rejected candidate
/// never becomes visible.
#[derive(Clone)]
pub struct FormatHandle {
    current: Arc<ArcSwap<String>>,
}

impl FormatHandle {
    /// Create a handle holding `format`, after validating it.
    pub fn new(format: impl Into<String>) -> Result<Self, FormatError> {
        let format = format.into();
        timestamp::validate_format(&format)?;
        Ok(Self {
            current: Arc::new(ArcSwap::from_pointee(format)),
        })
    }

    /// Current format snapshot.
    pub fn get(&self) -> Arc<String> {
        self.current.load_full()
    }

    /// Replace the format. On error the previous format stays in effect.
    pub fn set(&self, format: impl Into<String>) -> Result<(), FormatError> {
        let format = format.into();
        if let Err(err) = timestamp::validate_format(&format) {
            debug!(candidate = %format, error = %err, "rejected timestamp format");
            return Err(err);
        }
        let format = Arc::new(format);
        let previous = self.current.swap(Arc::clone(&format));
        debug!(%previous, current = %format, "default timestamp format changed");
        Ok(())
    }
}

impl Default for FormatHandle {
    fn default() -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(timestamp::DEFAULT_FORMAT.to_string())),
        }
    }
}

impl fmt::Debug for FormatHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FormatHandle").field(&*self.get()).finish()
    }
}
