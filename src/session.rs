use crate::motion::{MotionPattern, Position};
use crate::scheduler::{AnimationScheduler, FrameState, MotionParams};
use crate::viewport::ViewportSizer;
use std::time::{Duration, Instant};

/// Allowed seconds per pattern cycle.
pub const PERIOD_RANGE: (u64, u64) = (1, 10);

/// Allowed session lengths, in minutes.
pub const DURATION_RANGE: (u32, u32) = (1, 10);

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// Where a training session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    /// The countdown ran out. Behaves like `Idle` until the next command.
    Finished,
}

/// Notifications emitted to whoever presents the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The countdown reached zero and the session ended on its own.
    Completed,
}

/// A one second countdown, armed only while a session is running.
#[derive(Debug, Default)]
pub struct Countdown {
    remaining_secs: u32,
    next_tick: Option<Instant>,
}

impl Countdown {
    pub fn reset(&mut self, seconds: u32) {
        self.remaining_secs = seconds;
        self.next_tick = None;
    }

    /// Start ticking, with the first tick one second from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_tick = Some(now + COUNTDOWN_STEP);
    }

    pub fn disarm(&mut self) {
        self.next_tick = None;
    }

    /// Apply every tick that came due by `now`, returning how many fired.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while let Some(due) = self.next_tick {
            if now < due || self.remaining_secs == 0 {
                break;
            }
            self.remaining_secs -= 1;
            fired += 1;
            self.next_tick = Some(due + COUNTDOWN_STEP);
        }
        fired
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }
}

/// A read-only view of a session for presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub remaining_secs: u32,
    pub pattern: MotionPattern,
    pub period: Duration,
    pub amplitude: f64,
    pub position: Position,
}

/// The settings a session starts from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionOptions {
    pub pattern: MotionPattern,
    pub period_secs: u64,
    pub duration_minutes: u32,
    pub frame_rate: u32,
}

/// Owns the session lifecycle and the two clocks that drive it.
///
/// The redraw ticks and the countdown ticks are scheduled independently; they only share
/// whether the session is running.
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    duration_minutes: u32,
    countdown: Countdown,
    scheduler: AnimationScheduler,
    sizer: ViewportSizer,
}

impl SessionController {
    pub fn new(options: SessionOptions, sizer: ViewportSizer) -> Self {
        let params = MotionParams {
            pattern: options.pattern,
            period: period(options.period_secs),
            amplitude: sizer.amplitude(),
        };
        Self {
            state: SessionState::Idle,
            duration_minutes: clamp_duration(options.duration_minutes),
            countdown: Countdown::default(),
            scheduler: AnimationScheduler::new(params, options.frame_rate),
            sizer,
        }
    }

    /// Start a fresh session, or resume a paused one. Returns whether anything changed.
    pub fn start(&mut self, now: Instant) -> bool {
        match self.state {
            SessionState::Running => return false,
            SessionState::Paused => {
                log::info!("resuming session with {}s left", self.countdown.remaining_secs());
            }
            SessionState::Idle | SessionState::Finished => {
                self.countdown.reset(self.duration_minutes * 60);
                log::info!("starting {} minute session", self.duration_minutes);
            }
        }
        self.state = SessionState::Running;
        let params = self.scheduler.params();
        self.scheduler.start(params, now);
        self.countdown.arm(now);
        true
    }

    /// Pause a running session, keeping the time left. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.scheduler.stop();
        self.countdown.disarm();
        self.state = SessionState::Paused;
        log::info!("session paused with {}s left", self.countdown.remaining_secs());
        true
    }

    /// End the session from any state. Returns whether a running or paused session was ended.
    pub fn stop(&mut self) -> bool {
        self.halt();
        let active = !matches!(self.state, SessionState::Idle | SessionState::Finished);
        if active {
            log::info!("session stopped");
        }
        self.state = SessionState::Idle;
        active
    }

    /// Advance the countdown, emitting a completion event when it runs out.
    pub fn poll_countdown(&mut self, now: Instant) -> Option<SessionEvent> {
        if self.state != SessionState::Running {
            return None;
        }
        if self.countdown.poll(now) > 0 && self.countdown.remaining_secs() == 0 {
            self.halt();
            self.state = SessionState::Finished;
            log::info!("session finished");
            return Some(SessionEvent::Completed);
        }
        None
    }

    /// Advance the redraw loop.
    pub fn poll_frame(&mut self, now: Instant) -> FrameState {
        self.scheduler.poll(now)
    }

    /// The earliest moment either clock needs attention.
    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.scheduler.next_deadline(), self.countdown.next_tick()) {
            (Some(frame), Some(tick)) => Some(frame.min(tick)),
            (frame, tick) => frame.or(tick),
        }
    }

    /// Handle a resize notification from the rendering surface.
    pub fn resize(&mut self, width: f64, height: f64, now: Instant) {
        let amplitude = self.sizer.resize(width, height);
        self.scheduler.set_amplitude(amplitude, now);
    }

    pub fn select_pattern(&mut self, pattern: MotionPattern, now: Instant) {
        if pattern != self.pattern() {
            log::info!("switching to {pattern} pattern");
        }
        self.scheduler.set_pattern(pattern, now);
    }

    /// Select a pattern by name. Unknown names leave the current pattern and position as is.
    pub fn select_pattern_name(&mut self, name: &str, now: Instant) -> bool {
        match MotionPattern::from_name(name) {
            Some(pattern) => {
                self.select_pattern(pattern, now);
                true
            }
            None => {
                log::warn!("ignoring unknown motion pattern '{name}'");
                false
            }
        }
    }

    /// Set the seconds per cycle, clamped to the supported range.
    pub fn set_period(&mut self, seconds: u64, now: Instant) {
        self.scheduler.set_period(period(seconds), now);
    }

    /// Set the session length. Applies the next time a session starts from scratch.
    pub fn set_duration_minutes(&mut self, minutes: u32) {
        self.duration_minutes = clamp_duration(minutes);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    pub fn pattern(&self) -> MotionPattern {
        self.scheduler.params().pattern
    }

    pub fn period_secs(&self) -> u64 {
        self.scheduler.params().period.as_secs()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn amplitude(&self) -> f64 {
        self.sizer.amplitude()
    }

    pub fn position(&self) -> Position {
        self.scheduler.position()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let params = self.scheduler.params();
        SessionSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs(),
            pattern: params.pattern,
            period: params.period,
            amplitude: self.amplitude(),
            position: self.position(),
        }
    }

    fn halt(&mut self) {
        self.scheduler.stop();
        self.countdown.reset(0);
    }
}

fn period(seconds: u64) -> Duration {
    let (min, max) = PERIOD_RANGE;
    Duration::from_secs(seconds.clamp(min, max))
}

fn clamp_duration(minutes: u32) -> u32 {
    let (min, max) = DURATION_RANGE;
    minutes.clamp(min, max)
}
