use super::common::{Position, Trajectory};
use std::f64::consts::TAU;

/// Butterfly motion - Two wing loops whose width opens and closes over the cycle
pub(crate) struct Butterfly;

impl Trajectory for Butterfly {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let wing_angle = progress * TAU * 2.0;
        let wing_scale = (wing_angle / 2.0).sin();
        let x = wing_angle.sin() * wing_scale.abs() * amplitude * 0.8;
        let y = (wing_angle / 2.0).cos() * amplitude * 0.5 + (wing_angle * 2.0).sin() * amplitude * 0.2;
        Some(Position::new(x, y))
    }
}
