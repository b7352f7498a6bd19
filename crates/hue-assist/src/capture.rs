//! Screen sampling: where the cursor is and what is under it.
//!
//! The operating system is reached only through two traits,
//! [`CursorPositionSource`] and [`ScreenSampler`]. [`FixedCursor`] and
//! [`Canvas`] implement them in memory so the full pipeline runs in tests
//! and in the terminal shell without touching a real display.

use std::fmt;

use hue_color::Rgb;
use thiserror::Error;

/// A screen position in pixels. May be negative on multi-monitor setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A half-open pixel box: `left..right` by `top..bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Region {
    /// The sampling box centred on `point`: `half = area / 2`, spanning
    /// `(x - half, y - half)..(x + half, y + half)`.
    ///
    /// An area of 1 would give an empty box, so the result always covers
    /// at least the pixel under the cursor.
    #[must_use]
    pub fn around(point: Point, area: u32) -> Self {
        let half = i32::try_from(area / 2).unwrap_or(i32::MAX / 2);
        let left = point.x.saturating_sub(half);
        let top = point.y.saturating_sub(half);
        let right = point.x.saturating_add(half).max(left.saturating_add(1));
        let bottom = point.y.saturating_add(half).max(top.saturating_add(1));
        Self { left, top, right, bottom }
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})..({}, {})", self.left, self.top, self.right, self.bottom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// No pixel of the requested region is on screen.
    #[error("region {0} is off screen")]
    OffScreen(Region),
    /// The grab succeeded but returned no pixels.
    #[error("no pixels captured")]
    Empty,
    #[error("{0}")]
    Backend(String),
}

/// Reports the current pointer position.
pub trait CursorPositionSource {
    fn position(&self) -> Point;
}

/// Grabs the pixels of a screen region, row-major.
pub trait ScreenSampler {
    /// # Errors
    ///
    /// Returns a [`CaptureError`] when the region cannot be read.
    fn grab(&self, region: Region) -> Result<Vec<Rgb>, CaptureError>;
}

/// Per-channel mean of `pixels`, truncated toward zero.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn average_color(pixels: &[Rgb]) -> Option<Rgb> {
    if pixels.is_empty() {
        return None;
    }
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for px in pixels {
        r += u64::from(px.r);
        g += u64::from(px.g);
        b += u64::from(px.b);
    }
    let n = pixels.len() as u64;
    let mean = |sum: u64| u8::try_from(sum / n).unwrap_or(u8::MAX);
    Some(Rgb::new(mean(r), mean(g), mean(b)))
}

// ─── In-memory implementations ───────────────────────────────────────────────

/// A cursor that stays where it is put.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCursor {
    point: Point,
}

impl FixedCursor {
    #[must_use]
    pub const fn new(point: Point) -> Self {
        Self { point }
    }

    pub const fn move_to(&mut self, point: Point) {
        self.point = point;
    }
}

impl CursorPositionSource for FixedCursor {
    fn position(&self) -> Point {
        self.point
    }
}

/// An in-memory screen. Grabs are clipped to its bounds.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// A `width` x `height` canvas filled with `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Paint a single pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// `region` intersected with the canvas bounds. May be empty.
    #[must_use]
    pub fn clip(&self, region: Region) -> Region {
        let max_x = i32::try_from(self.width).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.height).unwrap_or(i32::MAX);
        Region {
            left: region.left.clamp(0, max_x),
            top: region.top.clamp(0, max_y),
            right: region.right.clamp(0, max_x),
            bottom: region.bottom.clamp(0, max_y),
        }
    }

    /// Paint every on-canvas pixel of `region`.
    pub fn fill(&mut self, region: Region, color: Rgb) {
        let clipped = self.clip(region);
        for y in clipped.top..clipped.bottom {
            for x in clipped.left..clipped.right {
                self.set(x, y, color);
            }
        }
    }
}

impl ScreenSampler for Canvas {
    fn grab(&self, region: Region) -> Result<Vec<Rgb>, CaptureError> {
        let clipped = self.clip(region);
        if clipped.is_empty() {
            return Err(CaptureError::OffScreen(region));
        }

        let mut out = Vec::with_capacity((clipped.width() * clipped.height()).unsigned_abs() as usize);
        for y in clipped.top..clipped.bottom {
            for x in clipped.left..clipped.right {
                if let Some(px) = self.get(x, y) {
                    out.push(px);
                }
            }
        }
        Ok(out)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn region_around_default_area() {
        let r = Region::around(Point::new(100, 50), 10);
        assert_eq!(r, Region { left: 95, top: 45, right: 105, bottom: 55 });
        assert_eq!((r.width(), r.height()), (10, 10));
    }

    #[test]
    fn region_odd_area_truncates_half() {
        let r = Region::around(Point::new(10, 10), 5);
        assert_eq!((r.left, r.right), (8, 12));
    }

    #[test]
    fn region_area_one_covers_cursor_pixel() {
        let r = Region::around(Point::new(7, 3), 1);
        assert_eq!(r, Region { left: 7, top: 3, right: 8, bottom: 4 });
        assert!(!r.is_empty());
    }

    #[test]
    fn average_truncates() {
        let px = [Rgb::new(0, 0, 0), Rgb::new(1, 3, 255)];
        assert_eq!(average_color(&px), Some(Rgb::new(0, 1, 127)));
    }

    #[test]
    fn average_of_nothing() {
        assert_eq!(average_color(&[]), None);
    }

    #[test]
    fn canvas_grab_uniform() {
        let canvas = Canvas::new(20, 20, Rgb::new(52, 152, 219));
        let px = canvas.grab(Region::around(Point::new(10, 10), 4)).unwrap();
        assert_eq!(px.len(), 16);
        assert_eq!(average_color(&px), Some(Rgb::new(52, 152, 219)));
    }

    #[test]
    fn canvas_grab_clips_at_edges() {
        let canvas = Canvas::new(10, 10, Rgb::WHITE);
        let px = canvas.grab(Region::around(Point::new(0, 0), 4)).unwrap();
        assert_eq!(px.len(), 4);
    }

    #[test]
    fn canvas_grab_off_screen() {
        let canvas = Canvas::new(10, 10, Rgb::WHITE);
        let err = canvas.grab(Region::around(Point::new(-50, -50), 4)).unwrap_err();
        assert!(matches!(err, CaptureError::OffScreen(_)));
    }

    #[test]
    fn canvas_fill_half_and_half() {
        let mut canvas = Canvas::new(4, 2, Rgb::BLACK);
        canvas.fill(Region { left: 2, top: 0, right: 4, bottom: 2 }, Rgb::WHITE);
        let px = canvas.grab(Region { left: 0, top: 0, right: 4, bottom: 2 }).unwrap();
        assert_eq!(average_color(&px), Some(Rgb::new(127, 127, 127)));
        assert_eq!(canvas.get(3, 1), Some(Rgb::WHITE));
        assert_eq!(canvas.get(4, 1), None);
    }

    #[test]
    fn canvas_fill_clips_huge_region() {
        let mut canvas = Canvas::new(80, 40, Rgb::WHITE);
        canvas.fill(Region { left: 0, top: 0, right: 40_000, bottom: 40_000 }, Rgb::BLACK);
        let px = canvas.grab(Region { left: 0, top: 0, right: 80, bottom: 40 }).unwrap();
        assert_eq!(px.len(), 80 * 40);
        assert!(px.iter().all(|&p| p == Rgb::BLACK));

        let full = Region { left: i32::MIN, top: i32::MIN, right: i32::MAX, bottom: i32::MAX };
        canvas.fill(full, Rgb::WHITE);
        assert_eq!(canvas.get(0, 0), Some(Rgb::WHITE));
        assert_eq!(canvas.get(79, 39), Some(Rgb::WHITE));
    }

    #[test]
    fn canvas_fill_off_canvas_changes_nothing() {
        let mut canvas = Canvas::new(10, 10, Rgb::WHITE);
        canvas.fill(Region { left: -500, top: -500, right: -1, bottom: -1 }, Rgb::BLACK);
        canvas.fill(Region { left: 10, top: 0, right: 9_999, bottom: 10 }, Rgb::BLACK);
        let px = canvas.grab(Region { left: 0, top: 0, right: 10, bottom: 10 }).unwrap();
        assert!(px.iter().all(|&p| p == Rgb::WHITE));
    }

    #[test]
    fn clip_keeps_region_inside_canvas() {
        let canvas = Canvas::new(10, 5, Rgb::WHITE);
        let r = canvas.clip(Region { left: -3, top: 2, right: 40, bottom: 4 });
        assert_eq!(r, Region { left: 0, top: 2, right: 10, bottom: 4 });
        assert!(canvas.clip(Region { left: 20, top: 0, right: 30, bottom: 5 }).is_empty());
    }

    #[test]
    fn fixed_cursor_moves() {
        let mut cursor = FixedCursor::default();
        assert_eq!(cursor.position(), Point::new(0, 0));
        cursor.move_to(Point::new(3, 4));
        assert_eq!(cursor.position(), Point::new(3, 4));
    }
}
