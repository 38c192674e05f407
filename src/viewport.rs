/// Share of the viewport's shorter side the training area occupies.
const AREA_RATIO: f64 = 0.9;

/// Share of the training area the dot is allowed to travel from the centre.
const TRAVEL_RATIO: f64 = 0.4;

/// The dimensions of the rendering surface, in abstract units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Derives the motion amplitude from the current viewport.
///
/// The sizer is the only source of truth for how far the dot may travel. It is fed resize
/// notifications by whoever owns the rendering surface and recomputes synchronously.
#[derive(Clone, Debug)]
pub struct ViewportSizer {
    viewport: Viewport,
    amplitude: f64,
}

impl ViewportSizer {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport, amplitude: amplitude(viewport.width, viewport.height) }
    }

    /// Handle a resize notification, returning the new amplitude.
    pub fn resize(&mut self, width: f64, height: f64) -> f64 {
        self.viewport = Viewport::new(width, height);
        self.amplitude = amplitude(width, height);
        log::debug!("viewport resized to {width}x{height}, amplitude is now {:.2}", self.amplitude);
        self.amplitude
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Compute the amplitude for a viewport. Never negative.
pub fn amplitude(width: f64, height: f64) -> f64 {
    let side = (width * AREA_RATIO).min(height * AREA_RATIO);
    if side.is_finite() && side > 0.0 { side * TRAVEL_RATIO } else { 0.0 }
}
