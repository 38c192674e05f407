use super::common::{Position, Trajectory};
use std::f64::consts::TAU;

/// Figure eight - A lemniscate lying on its side, half as tall as it is wide
pub(crate) struct FigureEight;

impl Trajectory for FigureEight {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let t = progress * TAU;
        Some(Position::new(t.sin() * amplitude, (t * 2.0).sin() * amplitude * 0.5))
    }
}
