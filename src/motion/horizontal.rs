use super::common::{Position, Trajectory};
use std::f64::consts::TAU;

/// Horizontal motion - Swings left and right along the centre line
pub(crate) struct Horizontal;

impl Trajectory for Horizontal {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let angle = progress * TAU;
        Some(Position::new(angle.cos() * amplitude, 0.0))
    }
}
