//! Floating window geometry: clamping, drag and resize sessions.
//!
//! All values are CSS pixels relative to the windows container.

use serde::{Deserialize, Serialize};

/// Horizontal strip that must stay on-screen after a drag.
pub const MIN_VISIBLE_X: i32 = 50;
/// Vertical strip (roughly the title bar) that must stay on-screen.
pub const MIN_VISIBLE_Y: i32 = 40;
pub const MIN_WIDTH: i32 = 300;
pub const MIN_HEIGHT: i32 = 200;
pub const DEFAULT_WIDTH: i32 = 400;
pub const DEFAULT_HEIGHT: i32 = 300;
/// New windows cascade from here, one step per open window.
pub const CASCADE_ORIGIN: i32 = 50;
pub const CASCADE_STEP: i32 = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Size of the container windows live in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Default-sized rect at the cascade slot for the `index`-th window.
    pub fn cascade(index: usize) -> Self {
        let offset = CASCADE_ORIGIN + CASCADE_STEP * index as i32;
        Self::new(offset, offset, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Keep enough of the window on-screen to grab it again.
    ///
    /// Rules run in order, so on a container narrower than the strip the
    /// right-edge rule wins.
    pub fn constrain_position(mut self, bounds: Bounds) -> Self {
        if self.x < MIN_VISIBLE_X - self.width {
            self.x = MIN_VISIBLE_X - self.width;
        }
        if self.x > bounds.width - MIN_VISIBLE_X {
            self.x = bounds.width - MIN_VISIBLE_X;
        }
        if self.y < 0 {
            self.y = 0;
        }
        if self.y > bounds.height - MIN_VISIBLE_Y {
            self.y = (bounds.height - MIN_VISIBLE_Y).max(0);
        }
        self
    }

    /// Clamp the size to the container; the minimum size wins on tiny containers.
    pub fn constrain_size(mut self, bounds: Bounds) -> Self {
        self.width = self.width.min(bounds.width).max(MIN_WIDTH);
        self.height = self.height.min(bounds.height).max(MIN_HEIGHT);
        self
    }

    /// Size first, then position.
    pub fn constrain(self, bounds: Bounds) -> Self {
        self.constrain_size(bounds).constrain_position(bounds)
    }
}

/// An in-progress header drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSession {
    pointer_start: Point,
    window_start: Point,
}

impl DragSession {
    pub fn begin(pointer: Point, window: &Rect) -> Self {
        Self {
            pointer_start: pointer,
            window_start: window.origin(),
        }
    }

    /// Unclamped window origin for the current pointer position.
    pub fn position_at(&self, pointer: Point) -> Point {
        Point::new(
            self.window_start.x + pointer.x - self.pointer_start.x,
            self.window_start.y + pointer.y - self.pointer_start.y,
        )
    }
}

/// An in-progress resize from the bottom-right handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeSession {
    pointer_start: Point,
    width_start: i32,
    height_start: i32,
}

impl ResizeSession {
    pub fn begin(pointer: Point, window: &Rect) -> Self {
        Self {
            pointer_start: pointer,
            width_start: window.width,
            height_start: window.height,
        }
    }

    /// Size for the current pointer position, floored at the minimum size.
    pub fn size_at(&self, pointer: Point) -> (i32, i32) {
        let width = self.width_start + pointer.x - self.pointer_start.x;
        let height = self.height_start + pointer.y - self.pointer_start.y;
        (width.max(MIN_WIDTH), height.max(MIN_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Bounds = Bounds {
        width: 1200,
        height: 800,
    };

    #[test]
    fn test_position_left_edge_keeps_strip() {
        let r = Rect::new(-1000, 100, 400, 300).constrain_position(SCREEN);
        assert_eq!(r.x, 50 - 400);
        // Exactly at the limit stays put.
        let r = Rect::new(-350, 100, 400, 300).constrain_position(SCREEN);
        assert_eq!(r.x, -350);
    }

    #[test]
    fn test_position_right_and_bottom() {
        let r = Rect::new(5000, 5000, 400, 300).constrain_position(SCREEN);
        assert_eq!(r.origin(), Point::new(1150, 760));
    }

    #[test]
    fn test_position_top() {
        let r = Rect::new(10, -20, 400, 300).constrain_position(SCREEN);
        assert_eq!(r.y, 0);
    }

    #[test]
    fn test_position_tiny_container() {
        let tiny = Bounds::new(30, 20);
        let r = Rect::new(-100, 100, 40, 30).constrain_position(tiny);
        // Left rule moves to 10, then right rule pulls back to 30 - 50.
        assert_eq!(r.x, -20);
        assert_eq!(r.y, 0);
    }

    #[test]
    fn test_size_clamps() {
        let r = Rect::new(0, 0, 2000, 50).constrain_size(SCREEN);
        assert_eq!((r.width, r.height), (1200, 200));

        let r = Rect::new(0, 0, 500, 500).constrain_size(Bounds::new(250, 150));
        assert_eq!((r.width, r.height), (300, 200));
    }

    #[test]
    fn test_cascade() {
        assert_eq!(Rect::cascade(0), Rect::new(50, 50, 400, 300));
        assert_eq!(Rect::cascade(3), Rect::new(140, 140, 400, 300));
    }

    #[test]
    fn test_drag_session() {
        let rect = Rect::new(100, 100, 400, 300);
        let drag = DragSession::begin(Point::new(150, 110), &rect);
        assert_eq!(drag.position_at(Point::new(150, 110)), Point::new(100, 100));
        assert_eq!(drag.position_at(Point::new(-900, 0)), Point::new(-950, -10));
    }

    #[test]
    fn test_resize_session_floors() {
        let rect = Rect::new(0, 0, 400, 300);
        let resize = ResizeSession::begin(Point::new(400, 300), &rect);
        assert_eq!(resize.size_at(Point::new(450, 340)), (450, 340));
        assert_eq!(resize.size_at(Point::new(0, 0)), (300, 200));
    }
}
