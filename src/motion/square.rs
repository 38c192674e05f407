use super::common::{Position, Trajectory};

/// Square motion - Walks the four edges clockwise, one edge per quarter cycle
pub(crate) struct Square;

impl Trajectory for Square {
    fn position_at(&self, progress: f64, amplitude: f64) -> Option<Position> {
        let edge = (progress * 4.0) % 4.0;
        let span = amplitude * 2.0;
        let position = if edge < 1.0 {
            // top: left -> right
            Position::new(-amplitude + edge * span, -amplitude)
        } else if edge < 2.0 {
            // right: top -> bottom
            Position::new(amplitude, -amplitude + (edge - 1.0) * span)
        } else if edge < 3.0 {
            // bottom: right -> left
            Position::new(amplitude - (edge - 2.0) * span, amplitude)
        } else {
            // left: bottom -> top
            Position::new(-amplitude, amplitude - (edge - 3.0) * span)
        };
        Some(position)
    }
}
