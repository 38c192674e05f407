use super::common::{Position, Trajectory};
use std::f64::consts::{FRAC_PI_4, TAU};

/// Diamond motion - A circle phase shifted by a quarter turn back, passing through the
/// corners of a square rotated by 45 degrees
pub(crate) struct Diamond;

impl Trajectory for Diamond {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let angle = progress * TAU - FRAC_PI_4;
        Some(Position::new(angle.cos() * amplitude, angle.sin() * amplitude))
    }
}
