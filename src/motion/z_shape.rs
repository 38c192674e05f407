use super::common::{Position, Trajectory};

/// Z shape - Top edge, diagonal back to the bottom left, then the bottom edge
///
/// The cycle is split into six units but the shape only covers four of them. For the
/// remaining third of the cycle no position is emitted and the dot rests where the
/// bottom edge ended.
pub(crate) struct ZShape;

impl Trajectory for ZShape {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let unit = (progress * 6.0) % 6.0;
        if unit < 1.0 {
            Some(Position::new(-amplitude + unit * amplitude * 2.0, -amplitude))
        } else if unit < 3.0 {
            let travelled = (unit - 1.0) * amplitude;
            Some(Position::new(amplitude - travelled, -amplitude + travelled))
        } else if unit < 4.0 {
            Some(Position::new(-amplitude + (unit - 3.0) * amplitude * 2.0, amplitude))
        } else {
            None
        }
    }
}
