use super::common::{Position, Trajectory};
use std::f64::consts::{PI, TAU};

/// Spiral motion - Three turns per cycle while the radius breathes out and back in
pub(crate) struct Spiral;

impl Trajectory for Spiral {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let angle = progress * TAU * 3.0;
        // 1 -> 0 -> 1 over the cycle, so the dot passes through the centre at the halfway mark
        let radius = (progress * PI).cos().abs() * amplitude;
        Some(Position::new(angle.cos() * radius, angle.sin() * radius))
    }
}
