//! Indicator trait definition.

/// Trait for technical indicators.
///
/// Indicators process a price column and produce one output per input
/// element. Rows inside the warm-up are `None`; a short input never fails,
/// it simply yields more `None` rows.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values aligned with `data`.
    ///
    /// The returned vector always has `data.len()` elements.
    fn calculate(&self, data: &[f64]) -> Vec<Option<Self::Output>>;

    /// Number of leading rows left undefined.
    fn warmup(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Whether `len` data points yield at least one defined value.
    fn is_ready(&self, len: usize) -> bool {
        len > self.warmup()
    }
}
