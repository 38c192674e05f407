use std::time::Duration;

/// A signed offset from the centre of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// The centre of the viewport.
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Trait for motion patterns.
///
/// Implementations are pure: the same `(progress, amplitude)` always yields the same result.
pub(crate) trait Trajectory {
    /// Compute the position for a normalized `progress` in `[0, 1)`.
    ///
    /// `None` means the pattern does not emit a point for this phase and the previously
    /// published position should be kept.
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position>;
}

/// Wrap an elapsed time into a normalized progress within one period.
pub fn progress(elapsed: Duration, period: Duration) -> f64 {
    let period = period.as_secs_f64();
    if period <= 0.0 {
        return 0.0;
    }
    let progress = (elapsed.as_secs_f64() % period) / period;
    // Rounding in the division can land exactly on 1.0.
    if progress >= 1.0 { 0.0 } else { progress }
}
