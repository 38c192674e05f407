use super::common::{Position, Trajectory};
use std::f64::consts::TAU;

/// Vertical motion - Swings up and down along the centre line
pub(crate) struct Vertical;

impl Trajectory for Vertical {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let angle = progress * TAU;
        Some(Position::new(0.0, angle.sin() * amplitude))
    }
}
