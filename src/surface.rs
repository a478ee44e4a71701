//! Freehand drawing engine behind the `<DrawingSurface>` component.
//!
//! The engine owns the stroke state machine and the mapping from client
//! coordinates to backing-store pixels. Painting goes through the
//! [`StrokeTarget`] trait so the same logic drives a real 2D canvas
//! context in the browser and a recording target in tests.

use crate::types::{Dimensions, DrawConfig, Point, ResolvedStyle};

/// Anything that can receive path commands from the engine.
pub trait StrokeTarget {
    /// Recreate the backing store at `size` pixels. Clears the bitmap and
    /// resets the transform and line cap/join.
    fn resize_backing(&mut self, size: Dimensions);

    fn apply_style(&mut self, style: &ResolvedStyle);

    fn begin_path(&mut self);
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    fn stroke(&mut self);
    fn close_path(&mut self);
}

/// On-screen box of the canvas element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub origin: Point,
    pub size: Dimensions,
}

impl DisplayRect {
    pub fn new(origin: Point, size: Dimensions) -> Self {
        Self { origin, size }
    }
}

/// Raw input position from either a mouse or a touch event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSample {
    Mouse { client: Point },
    /// Active touch points in event order.
    Touch { touches: Vec<Point> },
}

impl PointerSample {
    pub fn mouse(x: f64, y: f64) -> Self {
        PointerSample::Mouse {
            client: Point::new(x, y),
        }
    }

    /// Client position driving the stroke. Touch input follows the first
    /// active touch point.
    pub fn client_point(&self) -> Option<Point> {
        match self {
            PointerSample::Mouse { client } => Some(*client),
            PointerSample::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Fall back to 1.0 for missing or nonsensical device pixel ratios.
pub fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

/// Backing-store size for a container of `display` CSS pixels.
pub fn backing_size(display: Dimensions, dpr: f64) -> Dimensions {
    display.scaled(sanitize_dpr(dpr))
}

/// Map a client point into backing-store coordinates. Each axis is scaled
/// independently so non-uniform CSS scaling still lines up.
pub fn map_client_point(client: Point, rect: &DisplayRect, backing: Dimensions) -> Point {
    let scale_x = axis_scale(backing.width, rect.size.width);
    let scale_y = axis_scale(backing.height, rect.size.height);

    Point::new(
        (client.x - rect.origin.x) * scale_x,
        (client.y - rect.origin.y) * scale_y,
    )
}

fn axis_scale(backing: f64, display: f64) -> f64 {
    if display > 0.0 {
        backing / display
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    Idle,
    /// `last` is `None` after a resize wiped the bitmap mid-stroke; the
    /// next move re-anchors the path without painting.
    Drawing { last: Option<Point> },
}

pub struct DrawingEngine<T: StrokeTarget> {
    target: Option<T>,
    backing: Dimensions,
    config: DrawConfig,
    state: StrokeState,
}

impl<T: StrokeTarget> DrawingEngine<T> {
    pub fn new(config: DrawConfig) -> Self {
        Self {
            target: None,
            backing: Dimensions::zero(),
            config,
            state: StrokeState::Idle,
        }
    }

    /// Bind a render target and size it for the first time.
    pub fn attach(&mut self, target: T, backing: Dimensions) {
        self.target = Some(target);
        self.resize(backing);
    }

    pub fn detach(&mut self) -> Option<T> {
        self.state = StrokeState::Idle;
        self.target.take()
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn backing(&self) -> Dimensions {
        self.backing
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Recreate the backing store. The bitmap is lost but a stroke in
    /// progress carries on from the next move.
    pub fn resize(&mut self, backing: Dimensions) {
        self.backing = backing;
        if self.is_drawing() {
            self.state = StrokeState::Drawing { last: None };
        }

        let style = self.config.resolve();
        if let Some(target) = self.target.as_mut() {
            log::debug!(
                "resizing backing store to {}x{}",
                backing.width,
                backing.height
            );
            target.resize_backing(backing);
            target.apply_style(&style);
        }
    }

    /// Take a new configuration. Applies immediately, so a stroke in
    /// progress continues with the new colour and width.
    pub fn configure(&mut self, config: DrawConfig) {
        self.config = config;
        let style = self.config.resolve();
        if let Some(target) = self.target.as_mut() {
            target.apply_style(&style);
        }
    }

    /// Start a stroke. Returns true when an interaction actually began, in
    /// which case the caller should notify its `on_interact` listener.
    pub fn pointer_down(&mut self, sample: &PointerSample, rect: &DisplayRect) -> bool {
        let Some(client) = sample.client_point() else {
            return false;
        };
        let point = map_client_point(client, rect, self.backing);
        let Some(target) = self.target.as_mut() else {
            return false;
        };

        target.begin_path();
        target.move_to(point);
        self.state = StrokeState::Drawing { last: Some(point) };
        true
    }

    /// Extend the current stroke and paint the new segment. Returns the
    /// mapped point when something was painted.
    pub fn pointer_move(&mut self, sample: &PointerSample, rect: &DisplayRect) -> Option<Point> {
        let StrokeState::Drawing { last } = self.state else {
            return None;
        };
        let client = sample.client_point()?;
        let point = map_client_point(client, rect, self.backing);
        let target = self.target.as_mut()?;

        let Some(last) = last else {
            target.begin_path();
            target.move_to(point);
            self.state = StrokeState::Drawing { last: Some(point) };
            return None;
        };

        // Each segment is its own path so a style change only affects
        // what is painted after it.
        target.begin_path();
        target.move_to(last);
        target.line_to(point);
        target.stroke();
        self.state = StrokeState::Drawing { last: Some(point) };
        Some(point)
    }

    /// Pointer released or left the surface.
    pub fn pointer_up(&mut self) {
        if !self.is_drawing() {
            return;
        }
        if let Some(target) = self.target.as_mut() {
            target.close_path();
        }
        self.state = StrokeState::Idle;
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Segment {
        pub from: Point,
        pub to: Point,
        pub color: String,
        pub width: f64,
        pub glow: bool,
    }

    /// Test target that rasterizes nothing but remembers what was painted.
    #[derive(Debug, Default)]
    pub struct RecordingTarget {
        pub size: Option<Dimensions>,
        pub resizes: usize,
        pub style: Option<ResolvedStyle>,
        pub painted: Vec<Segment>,
        pub open_paths: usize,
        pub closed_paths: usize,
        cursor: Option<Point>,
        pending: Option<(Point, Point)>,
    }

    impl StrokeTarget for RecordingTarget {
        fn resize_backing(&mut self, size: Dimensions) {
            self.size = Some(size);
            self.resizes += 1;
            self.painted.clear();
            self.style = None;
            self.cursor = None;
            self.pending = None;
        }

        fn apply_style(&mut self, style: &ResolvedStyle) {
            self.style = Some(style.clone());
        }

        fn begin_path(&mut self) {
            self.open_paths += 1;
            self.pending = None;
        }

        fn move_to(&mut self, point: Point) {
            self.cursor = Some(point);
        }

        fn line_to(&mut self, point: Point) {
            if let Some(from) = self.cursor {
                self.pending = Some((from, point));
            }
            self.cursor = Some(point);
        }

        fn stroke(&mut self) {
            let (Some((from, to)), Some(style)) = (self.pending, self.style.as_ref()) else {
                return;
            };
            self.painted.push(Segment {
                from,
                to,
                color: style.stroke_color.clone(),
                width: style.line_width,
                glow: style.has_glow(),
            });
        }

        fn close_path(&mut self) {
            self.closed_paths += 1;
        }
    }
}
