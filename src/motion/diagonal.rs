use super::common::{Position, Trajectory};
use std::f64::consts::TAU;

/// Diagonal motion - First half on the main diagonal, second half on the anti-diagonal
pub(crate) struct Diagonal;

impl Trajectory for Diagonal {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let offset = (progress * TAU).cos() * amplitude;
        let position = if progress < 0.5 {
            Position::new(offset, offset)
        } else {
            Position::new(offset, -offset)
        };
        Some(position)
    }
}
