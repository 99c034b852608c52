// SPDX-License-Identifier: MPL-2.0
//! Pointer and gesture value types.

/// Identifier the platform assigns to an active pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// A position in surface coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to `self`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Displacement {
        Displacement {
            dx: self.x - origin.x,
            dy: self.y - origin.y,
        }
    }
}

/// Signed displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Displacement {
    pub dx: f32,
    pub dy: f32,
}

impl Displacement {
    /// True when the vertical component exceeds `threshold` and dominates.
    #[must_use]
    pub fn is_vertical_beyond(self, threshold: f32) -> bool {
        self.dy.abs() > threshold && self.dy.abs() > self.dx.abs()
    }

    /// True when the horizontal component exceeds `threshold` and dominates.
    #[must_use]
    pub fn is_horizontal_beyond(self, threshold: f32) -> bool {
        self.dx.abs() > threshold && self.dx.abs() > self.dy.abs()
    }

    /// True when both components stay within `tolerance`.
    #[must_use]
    pub fn is_within(self, tolerance: f32) -> bool {
        self.dx.abs() <= tolerance && self.dy.abs() <= tolerance
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if `point` lies inside the rectangle (edges included).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Scrub direction chosen by dragging during a long press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Rewind,
}

/// Mode of the gesture state machine. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureMode {
    /// No pointer interaction in progress.
    #[default]
    Idle,
    /// A pointer is down (or a tap awaits the double-tap window) and may
    /// still become a tap or a long press.
    PendingTap,
    /// The pointer has been held past the long-press delay.
    /// `None` means no direction is in effect (e.g. rewind reached the start).
    LongPressActive { direction: Option<Direction> },
    /// The progress scrubber owns the pointer.
    Seeking,
}

impl GestureMode {
    /// Returns true while a long press is held.
    #[must_use]
    pub fn is_long_press(self) -> bool {
        matches!(self, Self::LongPressActive { .. })
    }

    /// Direction in effect, if a long press is held with one.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::LongPressActive { direction } => direction,
            _ => None,
        }
    }

    /// Short label used in traces.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PendingTap => "pending-tap",
            Self::LongPressActive {
                direction: Some(Direction::Forward),
            } => "long-press:forward",
            Self::LongPressActive {
                direction: Some(Direction::Rewind),
            } => "long-press:rewind",
            Self::LongPressActive { direction: None } => "long-press",
            Self::Seeking => "seeking",
        }
    }
}

/// Discrete output of the gesture classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Single tap: toggle play/pause.
    Tap,
    /// Double tap: like.
    DoubleTap,
    /// Long-press mode entered (fast-forward by default).
    LongPressStarted,
    /// Direction switched while the long press is held.
    DirectionChanged(Direction),
    /// Long press released or cancelled.
    LongPressEnded,
}
