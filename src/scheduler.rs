use crate::motion::{self, MotionPattern, Position};
use std::time::{Duration, Instant};

/// The lowest and highest supported frame rates.
pub const FRAME_RATE_RANGE: (u32, u32) = (10, 240);

/// The inputs of the motion for a scheduling run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    pub pattern: MotionPattern,
    /// Time it takes to complete one cycle of the pattern.
    pub period: Duration,
    pub amplitude: f64,
}

/// A scheduled redraw.
///
/// Tickets carry the generation they were issued for; cancelling bumps the generation so any
/// ticket still held somewhere can no longer fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
    due: Instant,
}

/// The outcome of polling the scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameState {
    /// A tick fired and published a new position.
    Updated(Position),

    /// Nothing to publish yet, either because no tick is due or the pattern held still.
    Unchanged,

    /// The scheduler isn't running.
    Idle,
}

/// Drives the redraw loop.
///
/// Every tick turns the time since the epoch into a progress within the period, runs the
/// trajectory and publishes the result. At most one tick is pending at any time.
#[derive(Debug)]
pub struct AnimationScheduler {
    params: MotionParams,
    frame_interval: Duration,
    epoch: Option<Instant>,
    pending: Option<FrameTicket>,
    generation: u64,
    position: Position,
}

impl AnimationScheduler {
    pub fn new(params: MotionParams, frame_rate: u32) -> Self {
        let (min, max) = FRAME_RATE_RANGE;
        let frame_rate = frame_rate.clamp(min, max);
        Self {
            params,
            frame_interval: Duration::from_secs(1) / frame_rate,
            epoch: None,
            pending: None,
            generation: 0,
            position: Position::ORIGIN,
        }
    }

    /// Start a fresh run at `now`, which becomes progress zero.
    pub fn start(&mut self, params: MotionParams, now: Instant) {
        self.params = params;
        self.restart(now);
    }

    /// Stop scheduling ticks. Calling this while stopped does nothing.
    pub fn stop(&mut self) {
        if self.epoch.take().is_some() {
            self.cancel_pending();
            log::debug!("animation stopped");
        }
    }

    pub fn set_pattern(&mut self, pattern: MotionPattern, now: Instant) {
        if self.params.pattern != pattern {
            self.params.pattern = pattern;
            self.restart_if_running(now);
        }
    }

    pub fn set_period(&mut self, period: Duration, now: Instant) {
        if self.params.period != period {
            self.params.period = period;
            self.restart_if_running(now);
        }
    }

    pub fn set_amplitude(&mut self, amplitude: f64, now: Instant) {
        if self.params.amplitude != amplitude {
            self.params.amplitude = amplitude;
            self.restart_if_running(now);
        }
    }

    /// Fire the pending tick if it's due.
    pub fn poll(&mut self, now: Instant) -> FrameState {
        let Some(epoch) = self.epoch else {
            return FrameState::Idle;
        };
        let Some(ticket) = self.pending else {
            // A run always keeps one tick queued; re-arm if something dropped it.
            self.schedule(now);
            return FrameState::Unchanged;
        };
        if now < ticket.due {
            return FrameState::Unchanged;
        }
        self.pending = None;
        let state = self.fire(ticket, epoch, now);
        self.schedule(now + self.frame_interval);
        state
    }

    /// When the pending tick is due, if there is one.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|ticket| ticket.due)
    }

    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    pub fn is_running(&self) -> bool {
        self.epoch.is_some()
    }

    pub fn epoch(&self) -> Option<Instant> {
        self.epoch
    }

    pub fn params(&self) -> MotionParams {
        self.params
    }

    /// The last published position.
    pub fn position(&self) -> Position {
        self.position
    }

    fn fire(&mut self, ticket: FrameTicket, epoch: Instant, now: Instant) -> FrameState {
        if ticket.generation != self.generation {
            return FrameState::Unchanged;
        }
        let elapsed = now.saturating_duration_since(epoch);
        let progress = motion::progress(elapsed, self.params.period);
        match motion::position(self.params.pattern, progress, self.params.amplitude) {
            Some(position) => {
                self.position = position;
                FrameState::Updated(position)
            }
            None => FrameState::Unchanged,
        }
    }

    fn restart_if_running(&mut self, now: Instant) {
        if self.is_running() {
            self.restart(now);
        }
    }

    fn restart(&mut self, now: Instant) {
        self.cancel_pending();
        self.epoch = Some(now);
        self.schedule(now);
        log::debug!(
            "animation epoch reset: pattern {}, period {:?}, amplitude {:.2}",
            self.params.pattern,
            self.params.period,
            self.params.amplitude
        );
    }

    fn cancel_pending(&mut self) {
        self.pending = None;
        self.generation += 1;
    }

    fn schedule(&mut self, due: Instant) {
        self.pending = Some(FrameTicket { generation: self.generation, due });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pattern: MotionPattern) -> MotionParams {
        MotionParams { pattern, period: Duration::from_secs(4), amplitude: 100.0 }
    }

    fn assert_at(state: FrameState, x: f64, y: f64) {
        let FrameState::Updated(position) = state else {
            panic!("expected an update, got {state:?}");
        };
        assert!((position.x - x).abs() < 1e-9 && (position.y - y).abs() < 1e-9, "got {position:?}");
    }

    #[test]
    fn test_idle_until_started() {
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 60);
        assert_eq!(scheduler.poll(Instant::now()), FrameState::Idle);
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.position(), Position::ORIGIN);
    }

    #[test]
    fn test_first_tick_fires_immediately_at_progress_zero() {
        let now = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 60);
        scheduler.start(params(MotionPattern::Circular), now);
        assert_eq!(scheduler.next_deadline(), Some(now));
        assert_at(scheduler.poll(now), 100.0, 0.0);
    }

    #[test]
    fn test_follows_wall_clock() {
        let epoch = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 60);
        scheduler.start(params(MotionPattern::Circular), epoch);
        scheduler.poll(epoch);

        assert_at(scheduler.poll(epoch + Duration::from_secs(1)), 0.0, 100.0);
        assert_at(scheduler.poll(epoch + Duration::from_secs(2)), -100.0, 0.0);
        assert_at(scheduler.poll(epoch + Duration::from_secs(3)), 0.0, -100.0);
        assert_at(scheduler.poll(epoch + Duration::from_secs(4)), 100.0, 0.0);
    }

    #[test]
    fn test_ticks_wait_for_the_frame_interval() {
        let now = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 50);
        scheduler.start(params(MotionPattern::Circular), now);
        scheduler.poll(now);

        assert_eq!(scheduler.next_deadline(), Some(now + Duration::from_millis(20)));
        assert_eq!(scheduler.poll(now + Duration::from_millis(10)), FrameState::Unchanged);
        assert!(matches!(scheduler.poll(now + Duration::from_millis(20)), FrameState::Updated(_)));
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let now = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 60);
        scheduler.start(params(MotionPattern::Circular), now);
        scheduler.poll(now);

        scheduler.stop();
        assert_eq!(scheduler.pending(), None);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.poll(now + Duration::from_secs(1)), FrameState::Idle);

        // Stopping twice is harmless.
        scheduler.stop();
        assert_eq!(scheduler.poll(now + Duration::from_secs(2)), FrameState::Idle);
    }

    #[test]
    fn test_parameter_change_resets_phase() {
        let epoch = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 60);
        scheduler.start(params(MotionPattern::Circular), epoch);
        scheduler.poll(epoch);

        let changed_at = epoch + Duration::from_millis(1300);
        scheduler.set_pattern(MotionPattern::Square, changed_at);
        assert_eq!(scheduler.epoch(), Some(changed_at));
        assert_eq!(scheduler.next_deadline(), Some(changed_at));
        assert_at(scheduler.poll(changed_at), -100.0, -100.0);
    }

    #[test]
    fn test_only_one_tick_is_ever_pending() {
        let epoch = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 60);
        scheduler.start(params(MotionPattern::Circular), epoch);
        let first = scheduler.pending().expect("no pending tick");

        scheduler.set_period(Duration::from_secs(2), epoch + Duration::from_millis(5));
        let second = scheduler.pending().expect("no pending tick");
        assert_ne!(first, second);

        // The replaced ticket is stale and can't publish anything.
        assert_eq!(scheduler.fire(first, epoch, epoch), FrameState::Unchanged);
    }

    #[test]
    fn test_unchanged_parameters_keep_the_epoch() {
        let epoch = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 60);
        scheduler.start(params(MotionPattern::Circular), epoch);

        scheduler.set_pattern(MotionPattern::Circular, epoch + Duration::from_secs(1));
        scheduler.set_amplitude(100.0, epoch + Duration::from_secs(1));
        assert_eq!(scheduler.epoch(), Some(epoch));
    }

    #[test]
    fn test_changes_while_stopped_do_not_start() {
        let now = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 60);
        scheduler.set_amplitude(20.0, now);
        scheduler.set_pattern(MotionPattern::Wave, now);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.params().amplitude, 20.0);
        assert_eq!(scheduler.params().pattern, MotionPattern::Wave);
    }

    #[test]
    fn test_amplitude_change_is_used_on_the_next_tick() {
        let epoch = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::Circular), 60);
        scheduler.start(params(MotionPattern::Circular), epoch);
        scheduler.poll(epoch);

        let resized_at = epoch + Duration::from_millis(500);
        scheduler.set_amplitude(40.0, resized_at);
        assert_at(scheduler.poll(resized_at), 40.0, 0.0);
    }

    #[test]
    fn test_z_shape_holds_its_last_position() {
        let epoch = Instant::now();
        let mut scheduler = AnimationScheduler::new(params(MotionPattern::ZShape), 60);
        scheduler.start(params(MotionPattern::ZShape), epoch);
        scheduler.poll(epoch);

        assert!(matches!(scheduler.poll(epoch + Duration::from_millis(2600)), FrameState::Updated(_)));
        let held = scheduler.position();
        assert_eq!(scheduler.poll(epoch + Duration::from_millis(3000)), FrameState::Unchanged);
        assert_eq!(scheduler.position(), held);
    }
}
