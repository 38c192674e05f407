mod common;

// Individual pattern modules
mod butterfly;
mod circular;
mod diagonal;
mod diamond;
mod figure_eight;
mod horizontal;
mod random;
mod spiral;
mod square;
mod vertical;
mod wave;
mod z_shape;

pub use common::{progress, Position};

use common::Trajectory;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumCount, IntoEnumIterator};

/// The path the dot follows during a session.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MotionPattern {
    #[default]
    Circular,
    Horizontal,
    Vertical,
    #[serde(alias = "figure8")]
    #[strum(to_string = "figure-eight", serialize = "figure8")]
    FigureEight,
    Spiral,
    Square,
    Random,
    Diagonal,
    Butterfly,
    #[serde(alias = "zShape")]
    #[strum(to_string = "z-shape", serialize = "zshape")]
    ZShape,
    Diamond,
    Wave,
}

impl MotionPattern {
    /// Parse a user provided pattern name, returning `None` if it isn't known.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name.trim()).ok()
    }

    /// The pattern after this one, wrapping around at the end.
    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// The pattern before this one, wrapping around at the start.
    pub fn previous(self) -> Self {
        self.offset(Self::COUNT - 1)
    }

    fn offset(self, steps: usize) -> Self {
        let index = Self::iter().position(|p| p == self).unwrap_or(0);
        Self::iter().nth((index + steps) % Self::COUNT).unwrap_or_default()
    }
}

/// Get the trajectory implementation for a given pattern
pub(crate) fn get_trajectory(pattern: MotionPattern) -> Box<dyn Trajectory> {
    match pattern {
        MotionPattern::Circular => Box::new(circular::Circular),
        MotionPattern::Horizontal => Box::new(horizontal::Horizontal),
        MotionPattern::Vertical => Box::new(vertical::Vertical),
        MotionPattern::FigureEight => Box::new(figure_eight::FigureEight),
        MotionPattern::Spiral => Box::new(spiral::Spiral),
        MotionPattern::Square => Box::new(square::Square),
        MotionPattern::Random => Box::new(random::Random),
        MotionPattern::Diagonal => Box::new(diagonal::Diagonal),
        MotionPattern::Butterfly => Box::new(butterfly::Butterfly),
        MotionPattern::ZShape => Box::new(z_shape::ZShape),
        MotionPattern::Diamond => Box::new(diamond::Diamond),
        MotionPattern::Wave => Box::new(wave::Wave),
    }
}

/// Compute where the dot should be for a pattern at a given phase.
///
/// A non-positive amplitude collapses every pattern onto the origin. `None` means the
/// pattern emits nothing at this phase and the last published position stays in place.
pub fn position(pattern: MotionPattern, progress: f64, amplitude: f64) -> Option<Position> {
    if !(amplitude.is_finite() && amplitude > 0.0) {
        return Some(Position::ORIGIN);
    }
    let progress = if progress.is_finite() { progress.rem_euclid(1.0) } else { 0.0 };
    get_trajectory(pattern).position_at(progress, amplitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: Position, expected: (f64, f64)) {
        assert!(
            (actual.x - expected.0).abs() < EPSILON && (actual.y - expected.1).abs() < EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn samples() -> impl Iterator<Item = f64> {
        (0..1000).map(|i| i as f64 / 1000.0)
    }

    #[rstest]
    #[case::start(0.0, (100.0, 0.0))]
    #[case::quarter(1.0, (0.0, 100.0))]
    #[case::half(2.0, (-100.0, 0.0))]
    #[case::three_quarters(3.0, (0.0, -100.0))]
    #[case::full_cycle(4.0, (100.0, 0.0))]
    fn test_circular_over_one_period(#[case] elapsed: f64, #[case] expected: (f64, f64)) {
        let progress = progress(Duration::from_secs_f64(elapsed), Duration::from_secs(4));
        let position = position(MotionPattern::Circular, progress, 100.0).expect("no position");
        assert_close(position, expected);
    }

    #[rstest]
    #[case(0.0, (-50.0, -50.0))]
    #[case(0.25, (50.0, -50.0))]
    #[case(0.5, (50.0, 50.0))]
    #[case(0.75, (-50.0, 50.0))]
    fn test_square_corners(#[case] progress: f64, #[case] expected: (f64, f64)) {
        let position = position(MotionPattern::Square, progress, 50.0).expect("no position");
        assert_eq!(position, Position::new(expected.0, expected.1));
    }

    #[test]
    fn test_square_edge_midpoints() {
        assert_close(position(MotionPattern::Square, 0.125, 50.0).unwrap(), (0.0, -50.0));
        assert_close(position(MotionPattern::Square, 0.375, 50.0).unwrap(), (50.0, 0.0));
        assert_close(position(MotionPattern::Square, 0.625, 50.0).unwrap(), (0.0, 50.0));
        assert_close(position(MotionPattern::Square, 0.875, 50.0).unwrap(), (-50.0, 0.0));
    }

    #[test]
    fn test_bounded_for_every_pattern() {
        let amplitude = 120.0;
        for pattern in MotionPattern::iter() {
            for progress in samples() {
                let Some(position) = position(pattern, progress, amplitude) else { continue };
                assert!(position.x.abs() <= amplitude + EPSILON, "{pattern} x out of range at {progress}");
                assert!(position.y.abs() <= amplitude + EPSILON, "{pattern} y out of range at {progress}");
            }
        }
    }

    #[rstest]
    #[case::figure_eight(MotionPattern::FigureEight, 1.0, 0.5)]
    #[case::butterfly(MotionPattern::Butterfly, 0.8, 0.7)]
    #[case::wave(MotionPattern::Wave, 1.0, 0.5)]
    fn test_composite_patterns_stay_within_their_envelope(
        #[case] pattern: MotionPattern,
        #[case] max_x: f64,
        #[case] max_y: f64,
    ) {
        let amplitude = 100.0;
        for progress in samples() {
            let position = position(pattern, progress, amplitude).unwrap();
            assert!(position.x.abs() <= max_x * amplitude + EPSILON);
            assert!(position.y.abs() <= max_y * amplitude + EPSILON);
        }
    }

    #[test]
    fn test_periodic_over_one_period() {
        let period = Duration::from_secs(4);
        for pattern in MotionPattern::iter() {
            for millis in [0_u64, 250, 900, 1500, 2750, 3999] {
                let elapsed = Duration::from_millis(millis);
                let first = position(pattern, progress(elapsed, period), 80.0);
                let second = position(pattern, progress(elapsed + period, period), 80.0);
                match (first, second) {
                    (Some(first), Some(second)) => assert_close(second, (first.x, first.y)),
                    (first, second) => assert_eq!(first, second, "{pattern} at {millis}ms"),
                }
            }
        }
    }

    #[test]
    fn test_random_is_deterministic() {
        for progress in samples() {
            let first = position(MotionPattern::Random, progress, 75.0);
            let second = position(MotionPattern::Random, progress, 75.0);
            assert_eq!(first, second);
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(f64::NAN)]
    fn test_degenerate_amplitude_pins_to_origin(#[case] amplitude: f64) {
        for pattern in MotionPattern::iter() {
            for progress in [0.0, 0.3, 0.8, 0.95] {
                assert_eq!(position(pattern, progress, amplitude), Some(Position::ORIGIN));
            }
        }
    }

    #[test]
    fn test_z_shape_rests_for_the_last_third() {
        assert!(position(MotionPattern::ZShape, 0.5, 100.0).is_some());
        assert!(position(MotionPattern::ZShape, 0.66, 100.0).is_some());
        assert!(position(MotionPattern::ZShape, 0.7, 100.0).is_none());
        assert!(position(MotionPattern::ZShape, 0.99, 100.0).is_none());
    }

    #[test]
    fn test_z_shape_legs() {
        assert_close(position(MotionPattern::ZShape, 0.0, 100.0).unwrap(), (-100.0, -100.0));
        assert_close(position(MotionPattern::ZShape, 1.0 / 6.0, 100.0).unwrap(), (100.0, -100.0));
        assert_close(position(MotionPattern::ZShape, 2.0 / 6.0, 100.0).unwrap(), (0.0, 0.0));
        assert_close(position(MotionPattern::ZShape, 3.0 / 6.0, 100.0).unwrap(), (-100.0, 100.0));
    }

    #[test]
    fn test_diagonal_switches_halves() {
        assert_close(position(MotionPattern::Diagonal, 0.0, 10.0).unwrap(), (10.0, 10.0));
        assert_close(position(MotionPattern::Diagonal, 0.5, 10.0).unwrap(), (-10.0, 10.0));
        let late = position(MotionPattern::Diagonal, 0.9, 10.0).unwrap();
        assert_close(late, (late.x, -late.x));
    }

    #[test]
    fn test_spiral_passes_through_centre() {
        assert_close(position(MotionPattern::Spiral, 0.0, 60.0).unwrap(), (60.0, 0.0));
        assert_close(position(MotionPattern::Spiral, 0.5, 60.0).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn test_diamond_starts_a_quarter_turn_back() {
        let half = 100.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_close(position(MotionPattern::Diamond, 0.0, 100.0).unwrap(), (half, -half));
    }

    #[test]
    fn test_wave_sweeps_left_to_right() {
        assert_close(position(MotionPattern::Wave, 0.0, 40.0).unwrap(), (-40.0, 0.0));
        assert_close(position(MotionPattern::Wave, 0.5, 40.0).unwrap(), (0.0, 0.0));
        assert_close(position(MotionPattern::Wave, 0.125, 40.0).unwrap(), (-30.0, 20.0));
    }

    #[rstest]
    #[case("circular", Some(MotionPattern::Circular))]
    #[case("figure-eight", Some(MotionPattern::FigureEight))]
    #[case("figure8", Some(MotionPattern::FigureEight))]
    #[case("Z-Shape", Some(MotionPattern::ZShape))]
    #[case(" wave ", Some(MotionPattern::Wave))]
    #[case("zigzag", None)]
    fn test_pattern_names(#[case] name: &str, #[case] expected: Option<MotionPattern>) {
        assert_eq!(MotionPattern::from_name(name), expected);
    }

    #[test]
    fn test_pattern_cycling_wraps() {
        assert_eq!(MotionPattern::Wave.next(), MotionPattern::Circular);
        assert_eq!(MotionPattern::Circular.previous(), MotionPattern::Wave);
        assert_eq!(MotionPattern::Circular.next().previous(), MotionPattern::Circular);
        assert_eq!(MotionPattern::iter().count(), MotionPattern::COUNT);
        assert_eq!(MotionPattern::COUNT, 12);

        let mut pattern = MotionPattern::Circular;
        for expected in MotionPattern::iter().skip(1).chain([MotionPattern::Circular]) {
            pattern = pattern.next();
            assert_eq!(pattern, expected);
            assert_eq!(pattern.previous().next(), pattern);
        }
    }

    #[test]
    fn test_display_uses_kebab_case() {
        assert_eq!(MotionPattern::FigureEight.to_string(), "figure-eight");
        assert_eq!(MotionPattern::ZShape.to_string(), "z-shape");
    }
}
