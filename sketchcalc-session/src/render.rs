//! The formula-renderer seam.
//!
//! The host environment typesets formula markup (MathJax or similar).
//! The sketchpad invokes the renderer with the full entry list whenever
//! the list grows; implementations must be idempotent and safe to call
//! repeatedly.

use sketchcalc_core::FormulaEntry;

/// Consumes markup strings and re-typesets the overlay.
pub trait FormulaRenderer {
    /// Re-typeset the given entries. Called whenever the list grows.
    fn typeset(&mut self, entries: &[FormulaEntry]);
}

/// Renderer that records typeset requests in the log stream. Useful as a
/// default when no host typesetter is attached.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl FormulaRenderer for LogRenderer {
    fn typeset(&mut self, entries: &[FormulaEntry]) {
        tracing::info!("typeset {} formula entries", entries.len());
        for entry in entries {
            tracing::debug!("  {}", entry.markup);
        }
    }
}
