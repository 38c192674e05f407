use super::common::{Position, Trajectory};
use std::f64::consts::TAU;

/// Circular motion - One full revolution per cycle, starting on the right
pub(crate) struct Circular;

impl Trajectory for Circular {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let angle = progress * TAU;
        Some(Position::new(angle.cos() * amplitude, angle.sin() * amplitude))
    }
}
