// src/mask.rs
//! Painted-region capture for masked edits.
//!
//! The surface is a transparent RGBA layer sized to the displayed image.
//! Export turns every touched pixel white and every untouched pixel black.

use std::io::Cursor;

use bytes::Bytes;
use image::{ImageOutputFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::errors::{EditorError, Result};

/// The capability the editor uses to obtain and reset the mask.
pub trait MaskCapture {
    /// `None` when nothing is rendered or nothing has been painted.
    fn export_mask(&self) -> Option<MaskBitmap>;
    fn clear(&mut self);
}

pub type EmptinessObserver = Box<dyn FnMut(bool) + Send>;

const BRUSH_ALPHA: u8 = 179;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
}

impl BrushColor {
    pub fn rgba(&self) -> Rgba<u8> {
        let [r, g, b] = match self {
            BrushColor::Red => [239, 68, 68],
            BrushColor::Blue => [59, 130, 246],
            BrushColor::Green => [34, 197, 94],
            BrushColor::Yellow => [234, 179, 8],
        };
        Rgba([r, g, b, BRUSH_ALPHA])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One freehand stroke in surface pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub brush_size: f32,
    #[serde(default)]
    pub color: BrushColor,
}

/// Opaque two-tone mask: white is edited, black is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBitmap {
    image: RgbaImage,
}

impl MaskBitmap {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn pixels(&self) -> impl Iterator<Item = &Rgba<u8>> {
        self.image.pixels()
    }

    pub fn to_png(&self) -> Result<Bytes> {
        let mut buffer = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .map_err(|_| EditorError::MaskExport)?;
        Ok(Bytes::from(buffer.into_inner()))
    }
}

pub struct MaskCanvas {
    surface: RgbaImage,
    painted_pixels: usize,
    observer: Option<EmptinessObserver>,
}

impl std::fmt::Debug for MaskCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskCanvas")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("painted_pixels", &self.painted_pixels)
            .finish()
    }
}

impl Default for MaskCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskCanvas {
    /// A zero-area surface; nothing is rendered yet.
    pub fn new() -> Self {
        Self {
            surface: RgbaImage::new(0, 0),
            painted_pixels: 0,
            observer: None,
        }
    }

    pub fn with_observer(observer: EmptinessObserver) -> Self {
        Self {
            observer: Some(observer),
            ..Self::new()
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.surface.dimensions()
    }

    /// Matches the surface to the rendered image. Existing paint is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface = RgbaImage::new(width, height);
        self.painted_pixels = 0;
        self.notify(true);
    }

    pub fn is_empty(&self) -> bool {
        self.painted_pixels == 0
    }

    fn notify(&mut self, empty: bool) {
        if let Some(observer) = self.observer.as_mut() {
            observer(empty);
        }
    }

    /// Paints a round-capped polyline. A single point paints a disc.
    pub fn stroke(&mut self, stroke: &Stroke) {
        let Some(first) = stroke.points.first().copied() else {
            return;
        };
        let was_empty = self.is_empty();

        let radius = (stroke.brush_size / 2.0).max(0.5);
        let color = stroke.color.rgba();
        if stroke.points.len() == 1 {
            self.paint_segment(first, first, radius, color);
        } else {
            for pair in stroke.points.windows(2) {
                self.paint_segment(pair[0], pair[1], radius, color);
            }
        }

        if was_empty && !self.is_empty() {
            self.notify(false);
        }
    }

    fn paint_segment(&mut self, from: Point, to: Point, radius: f32, color: Rgba<u8>) {
        let (width, height) = self.surface.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let min_x = (from.x.min(to.x) - radius).floor().max(0.0) as u32;
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0) as u32;
        let max_x = ((from.x.max(to.x) + radius).ceil().max(0.0) as u32).min(width - 1);
        let max_y = ((from.y.max(to.y) + radius).ceil().max(0.0) as u32).min(height - 1);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let center = Point {
                    x: x as f32 + 0.5,
                    y: y as f32 + 0.5,
                };
                if distance_to_segment(center, from, to) <= radius {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let pixel = self.surface.get_pixel_mut(x, y);
        if pixel[3] == 0 {
            self.painted_pixels += 1;
            *pixel = color;
            return;
        }
        let src_a = f32::from(color[3]) / 255.0;
        let dst_a = f32::from(pixel[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        for channel in 0..3 {
            let src = f32::from(color[channel]) * src_a;
            let dst = f32::from(pixel[channel]) * dst_a * (1.0 - src_a);
            pixel[channel] = ((src + dst) / out_a).round() as u8;
        }
        pixel[3] = (out_a * 255.0).round() as u8;
    }
}

impl MaskCapture for MaskCanvas {
    fn export_mask(&self) -> Option<MaskBitmap> {
        let (width, height) = self.surface.dimensions();
        if width == 0 || height == 0 || self.is_empty() {
            return None;
        }
        let image = RgbaImage::from_fn(width, height, |x, y| {
            if self.surface.get_pixel(x, y)[3] > 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        Some(MaskBitmap { image })
    }

    fn clear(&mut self) {
        self.surface.pixels_mut().for_each(|pixel| *pixel = Rgba([0, 0, 0, 0]));
        self.painted_pixels = 0;
        self.notify(true);
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn stroke(points: &[(f32, f32)], size: f32) -> Stroke {
        Stroke {
            points: points.iter().map(|&(x, y)| Point { x, y }).collect(),
            brush_size: size,
            color: BrushColor::Blue,
        }
    }

    #[test]
    fn untouched_or_zero_area_surface_exports_nothing() {
        let mut canvas = MaskCanvas::new();
        assert!(canvas.export_mask().is_none());
        canvas.resize(16, 16);
        assert!(canvas.export_mask().is_none());
    }

    #[test]
    fn painted_pixels_export_white_and_rest_black() {
        let mut canvas = MaskCanvas::new();
        canvas.resize(32, 32);
        canvas.stroke(&stroke(&[(4.0, 16.0), (28.0, 16.0)], 4.0));

        let mask = canvas.export_mask().unwrap();
        assert_eq!((mask.width(), mask.height()), (32, 32));
        assert_eq!(mask.pixel(16, 16), Rgba([255, 255, 255, 255]));
        assert_eq!(mask.pixel(16, 2), Rgba([0, 0, 0, 255]));
        assert!(mask.pixels().all(|p| p[3] == 255));
        assert!(mask
            .pixels()
            .all(|p| *p == Rgba([255, 255, 255, 255]) || *p == Rgba([0, 0, 0, 255])));
        assert!(!mask.to_png().unwrap().is_empty());
    }

    #[test]
    fn single_point_paints_a_disc() {
        let mut canvas = MaskCanvas::new();
        canvas.resize(20, 20);
        canvas.stroke(&stroke(&[(10.0, 10.0)], 6.0));
        let mask = canvas.export_mask().unwrap();
        assert_eq!(mask.pixel(10, 10)[0], 255);
        assert_eq!(mask.pixel(10, 14)[0], 0);
    }

    #[test]
    fn observer_sees_strokes_and_clears() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let mut canvas = MaskCanvas::with_observer(Box::new(move |empty| {
            sink.lock().unwrap().push(empty);
        }));
        canvas.resize(8, 8);
        canvas.stroke(&stroke(&[(1.0, 1.0), (2.0, 2.0)], 2.0));
        canvas.stroke(&stroke(&[], 2.0));
        canvas.clear();

        assert_eq!(*events.lock().unwrap(), vec![true, false, true]);
        assert!(canvas.is_empty());
        assert!(canvas.export_mask().is_none());
    }

    #[test]
    fn stroke_off_the_surface_leaves_mask_empty() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let mut canvas = MaskCanvas::with_observer(Box::new(move |empty| {
            sink.lock().unwrap().push(empty);
        }));
        canvas.resize(16, 16);
        canvas.stroke(&stroke(&[(500.0, 500.0)], 4.0));

        assert_eq!(*events.lock().unwrap(), vec![true]);
        assert!(canvas.is_empty());
        assert!(canvas.export_mask().is_none());

        canvas.stroke(&stroke(&[(8.0, 8.0)], 4.0));
        canvas.stroke(&stroke(&[(4.0, 4.0)], 4.0));
        assert_eq!(*events.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn overlapping_paint_stays_counted_once() {
        let mut canvas = MaskCanvas::new();
        canvas.resize(10, 10);
        canvas.stroke(&stroke(&[(5.0, 5.0)], 2.0));
        let first = canvas.painted_pixels;
        canvas.stroke(&stroke(&[(5.0, 5.0)], 2.0));
        assert_eq!(canvas.painted_pixels, first);
        assert!(canvas.surface.get_pixel(5, 5)[3] > BRUSH_ALPHA);
    }
}
