//! Pointer sample types.

/// A position in the component's local coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer sample. Ephemeral: widgets read it and move on, nothing is
/// retained beyond the current gesture.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    /// Sample timestamp in milliseconds; feeds velocity tracking.
    pub time_ms: i64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, time_ms: i64) -> Self {
        Self {
            kind,
            position,
            time_ms,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), time_ms)
    }

    pub fn cancel(time_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::ZERO, time_ms)
    }
}
