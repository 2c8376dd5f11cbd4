//! Output handlers for generated constants.

mod console;

pub use console::{format_words, ConsoleOutput};

use anyhow::Result;
use crate::generator::{Constant, Tables};

/// Output trait for handling generated constants.
pub trait Output: Send + Sync {
    /// Output one constant. `tables` resolves its position to labels.
    fn constant(&self, constant: &Constant, tables: &Tables) -> Result<()>;

    /// Flush any buffered output.
    fn flush(&self) -> Result<()>;
}
