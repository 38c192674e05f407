use crate::config::TrainerConfig;
use crate::scheduler::FrameState;
use crate::session::{SessionController, SessionEvent, PERIOD_RANGE};
use crate::terminal::{status_line, Layout, Renderer, TerminalGuard};
use crate::viewport::ViewportSizer;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// How long to wait for input when neither clock has anything scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

const COMPLETED_MESSAGE: &str = "session complete!";

/// A user command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    StartOrPause,
    Stop,
    NextPattern,
    PreviousPattern,
    Faster,
    Slower,
    Quit,
}

impl Command {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let command = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Char(' ') => Self::StartOrPause,
            KeyCode::Char('s') => Self::Stop,
            KeyCode::Tab => Self::NextPattern,
            KeyCode::BackTab => Self::PreviousPattern,
            KeyCode::Char('+') | KeyCode::Char('=') => Self::Faster,
            KeyCode::Char('-') => Self::Slower,
            KeyCode::Char('q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Whether the event loop should keep going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Ties a session to a renderer.
pub struct App<W: Write> {
    session: SessionController,
    renderer: Renderer<W>,
    message: Option<&'static str>,
    status: String,
}

impl<W: Write> App<W> {
    pub fn new(config: &TrainerConfig, writer: W, layout: Layout) -> Self {
        let sizer = ViewportSizer::new(layout.viewport());
        let session = SessionController::new(config.session_options(), sizer);
        let renderer = Renderer::new(writer, layout, config.dot.clone());
        Self { session, renderer, message: None, status: String::new() }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    /// Paint the whole screen from scratch.
    pub fn repaint(&mut self) -> io::Result<()> {
        self.renderer.clear()?;
        self.renderer.draw_dot(self.session.position())?;
        self.status.clear();
        self.draw_status()?;
        self.renderer.flush()
    }

    pub fn handle_command(&mut self, command: Command, now: Instant) -> Flow {
        match command {
            Command::StartOrPause => {
                if self.session.is_running() {
                    self.session.pause();
                } else {
                    self.message = None;
                    self.session.start(now);
                }
            }
            Command::Stop => {
                self.session.stop();
            }
            Command::NextPattern => self.session.select_pattern(self.session.pattern().next(), now),
            Command::PreviousPattern => self.session.select_pattern(self.session.pattern().previous(), now),
            Command::Faster => {
                let period = self.session.period_secs().saturating_sub(1).max(PERIOD_RANGE.0);
                self.session.set_period(period, now);
            }
            Command::Slower => {
                let period = (self.session.period_secs() + 1).min(PERIOD_RANGE.1);
                self.session.set_period(period, now);
            }
            Command::Quit => return Flow::Exit,
        }
        Flow::Continue
    }

    pub fn handle_resize(&mut self, layout: Layout, now: Instant) -> io::Result<()> {
        let viewport = layout.viewport();
        self.session.resize(viewport.width, viewport.height, now);
        self.renderer.resize(layout)?;
        self.repaint()
    }

    /// Run both clocks and draw whatever changed.
    pub fn tick(&mut self, now: Instant) -> io::Result<()> {
        if let Some(SessionEvent::Completed) = self.session.poll_countdown(now) {
            self.message = Some(COMPLETED_MESSAGE);
        }
        if let FrameState::Updated(position) = self.session.poll_frame(now) {
            self.renderer.draw_dot(position)?;
        }
        self.draw_status()?;
        self.renderer.flush()
    }

    fn draw_status(&mut self) -> io::Result<()> {
        let snapshot = self.session.snapshot();
        let status = status_line(&snapshot, self.message);
        if status != self.status {
            self.renderer.draw_status(&snapshot, self.message)?;
            self.status = status;
        }
        Ok(())
    }
}

/// Run the trainer on the current terminal until the user quits.
pub fn run(config: &TrainerConfig) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter().context("failed to set up terminal")?;
    let (columns, rows) = terminal::size().context("failed to get terminal size")?;
    let mut app = App::new(config, io::stdout(), Layout::new(columns, rows));
    app.repaint()?;

    loop {
        let timeout = match app.session().next_wakeup() {
            Some(wakeup) => wakeup.saturating_duration_since(Instant::now()),
            None => IDLE_POLL,
        };
        if event::poll(timeout)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => {
                    if let Some(command) = Command::from_key(key) {
                        if app.handle_command(command, now) == Flow::Exit {
                            break;
                        }
                    }
                }
                Event::Resize(columns, rows) => app.handle_resize(Layout::new(columns, rows), now)?,
                _ => {}
            }
        }
        app.tick(Instant::now())?;
    }
    log::info!("exiting");
    Ok(())
}
