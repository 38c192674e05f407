use super::common::{Position, Trajectory};
use std::f64::consts::TAU;

/// Wave motion - Sweeps left to right while bobbing through two full waves
pub(crate) struct Wave;

impl Trajectory for Wave {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let x = (progress * 2.0 - 1.0) * amplitude;
        let y = (progress * TAU * 2.0).sin() * amplitude * 0.5;
        Some(Position::new(x, y))
    }
}
