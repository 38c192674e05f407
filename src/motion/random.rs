use super::common::{Position, Trajectory};
use std::f64::consts::TAU;

/// Random motion - Irregular looking path driven by a deterministic seed, so it still loops
pub(crate) struct Random;

impl Trajectory for Random {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let seed = (progress * TAU).sin();
        Some(Position::new((seed * 8.3).sin() * amplitude, (seed * 7.5).cos() * amplitude))
    }
}
