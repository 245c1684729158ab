//! Pixel grid abstraction and pixel sources
//!
//! Image detectors never touch raw byte offsets. They read a [`PixelGrid`]
//! through bounds-checked lookups and the shared window helpers here.

use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One RGBA8 pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque pixel
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Direction of a one-dimensional neighborhood window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Square tile inside a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub side: usize,
}

impl Tile {
    pub fn area(&self) -> usize {
        self.side * self.side
    }
}

/// Row-major RGBA8 pixel buffer with its dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelGrid {
    /// Create a grid, checking the buffer matches the dimensions
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or(Error::InvalidDimensions {
            width,
            height,
            expected: usize::MAX,
            actual: pixels.len(),
        })?;

        if pixels.len() != expected {
            return Err(Error::InvalidDimensions {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from a flat `[r, g, b, a, r, g, b, a, ...]` buffer
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(Error::decode(format!(
                "rgba buffer length {} is not a multiple of 4",
                bytes.len()
            )));
        }

        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
            .collect();

        Self::new(width, height, pixels)
    }

    /// Grid where every pixel has the same value
    pub fn filled(width: usize, height: usize, pixel: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Grid computed pixel by pixel from `(x, y)`
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgba) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels in the grid
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels in row-major order
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, if inside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Pixel at a signed offset from `(x, y)`, if inside the grid
    pub fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<Rgba> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.get(nx, ny)
    }

    /// Count in-bounds pixels matching `pred` within `radius` of `(x, y)`
    /// along one axis, the center included
    pub fn count_in_window(
        &self,
        x: usize,
        y: usize,
        axis: Axis,
        radius: usize,
        pred: impl Fn(Rgba) -> bool,
    ) -> usize {
        let r = radius as isize;
        (-r..=r)
            .filter_map(|d| match axis {
                Axis::Horizontal => self.offset(x, y, d, 0),
                Axis::Vertical => self.offset(x, y, 0, d),
            })
            .filter(|p| pred(*p))
            .count()
    }

    /// Top, bottom, left and right neighbors; `None` on the border
    pub fn orthogonal_neighbors(&self, x: usize, y: usize) -> Option<[Rgba; 4]> {
        Some([
            self.offset(x, y, 0, -1)?,
            self.offset(x, y, 0, 1)?,
            self.offset(x, y, -1, 0)?,
            self.offset(x, y, 1, 0)?,
        ])
    }

    /// Coordinates of every pixel, row-major
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    /// Coordinates excluding a one-pixel border
    pub fn interior_coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let xs = 1..self.width.saturating_sub(1);
        (1..self.height.saturating_sub(1)).flat_map(move |y| xs.clone().map(move |x| (x, y)))
    }

    /// Non-overlapping square tiles of `side`, starting at the origin.
    ///
    /// A tile is emitted only while its origin is strictly less than
    /// `dimension - side`, so the last row and column of tiles that would
    /// sit flush against the edge are skipped.
    pub fn tiles(&self, side: usize) -> impl Iterator<Item = Tile> + '_ {
        let (width, height) = (self.width, self.height);
        let step = side.max(1);
        let rows = if side == 0 { 0 } else { height };
        (0..rows)
            .step_by(step)
            .take_while(move |y| y + side < height)
            .flat_map(move |y| {
                (0..width)
                    .step_by(step)
                    .take_while(move |x| x + side < width)
                    .map(move |x| Tile { x, y, side })
            })
    }

    /// Pixels inside a tile
    pub fn tile_pixels(&self, tile: Tile) -> impl Iterator<Item = Rgba> + '_ {
        (tile.y..tile.y + tile.side)
            .flat_map(move |y| (tile.x..tile.x + tile.side).filter_map(move |x| self.get(x, y)))
    }

    /// `count` as a percentage of all pixels; a zero-area grid divides by 1
    pub fn percentage_of(&self, count: usize) -> f64 {
        count as f64 * 100.0 / self.pixels.len().max(1) as f64
    }
}

/// Anything that can produce decoded pixels for analysis
///
/// Decoding from uploads, URLs or files belongs to the caller; the engine
/// only sees the resulting grid or the failure.
#[async_trait]
pub trait PixelSource: Send + Sync {
    async fn decode(&self) -> Result<PixelGrid>;
}

#[async_trait]
impl PixelSource for PixelGrid {
    async fn decode(&self) -> Result<PixelGrid> {
        Ok(self.clone())
    }
}

/// Raw RGBA8 bytes with declared dimensions
#[derive(Debug, Clone)]
pub struct RawRgba {
    pub width: usize,
    pub height: usize,
    pub bytes: Vec<u8>,
}

#[async_trait]
impl PixelSource for RawRgba {
    async fn decode(&self) -> Result<PixelGrid> {
        PixelGrid::from_rgba_bytes(self.width, self.height, &self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_buffer() {
        let err = PixelGrid::new(2, 2, vec![Rgba::WHITE; 3]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { expected: 4, actual: 3, .. }));
    }

    #[test]
    fn test_offset_bounds() {
        let grid = PixelGrid::filled(3, 3, Rgba::BLACK);
        assert!(grid.offset(0, 0, -1, 0).is_none());
        assert!(grid.offset(2, 2, 1, 0).is_none());
        assert_eq!(grid.offset(1, 1, 1, 1), Some(Rgba::BLACK));
    }

    #[test]
    fn test_count_in_window_clips_at_edges() {
        let grid = PixelGrid::filled(5, 1, Rgba::BLACK);
        assert_eq!(grid.count_in_window(0, 0, Axis::Horizontal, 2, |_| true), 3);
        assert_eq!(grid.count_in_window(2, 0, Axis::Horizontal, 2, |_| true), 5);
        assert_eq!(grid.count_in_window(2, 0, Axis::Vertical, 2, |_| true), 1);
    }

    #[test]
    fn test_orthogonal_neighbors_border() {
        let grid = PixelGrid::from_fn(3, 3, |x, y| Rgba::opaque((x * 10) as u8, (y * 10) as u8, 0));
        assert!(grid.orthogonal_neighbors(0, 1).is_none());
        let [top, bottom, left, right] = grid.orthogonal_neighbors(1, 1).unwrap();
        assert_eq!((top.g, bottom.g, left.r, right.r), (0, 20, 0, 20));
    }

    #[test]
    fn test_interior_coords() {
        let grid = PixelGrid::filled(4, 3, Rgba::WHITE);
        let coords: Vec<_> = grid.interior_coords().collect();
        assert_eq!(coords, vec![(1, 1), (2, 1)]);

        let tiny = PixelGrid::filled(1, 1, Rgba::WHITE);
        assert_eq!(tiny.interior_coords().count(), 0);
    }

    #[test]
    fn test_tiles_skip_flush_edge() {
        let grid = PixelGrid::filled(100, 100, Rgba::WHITE);
        assert_eq!(grid.tiles(20).count(), 16);

        let grid = PixelGrid::filled(10, 10, Rgba::WHITE);
        assert_eq!(grid.tiles(0).count(), 0);
    }

    #[test]
    fn test_percentage_of_empty_grid() {
        let grid = PixelGrid::filled(0, 0, Rgba::WHITE);
        assert_eq!(grid.percentage_of(0), 0.0);
    }

    #[tokio::test]
    async fn test_raw_rgba_source() {
        let ok = RawRgba {
            width: 1,
            height: 2,
            bytes: vec![255, 0, 0, 255, 0, 255, 0, 255],
        };
        let grid = ok.decode().await.unwrap();
        assert_eq!(grid.get(0, 1), Some(Rgba::opaque(0, 255, 0)));

        let truncated = RawRgba {
            width: 2,
            height: 2,
            bytes: vec![0; 7],
        };
        assert!(truncated.decode().await.unwrap_err().is_decode());
    }
}
