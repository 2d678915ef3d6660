//! Letterboxed ("contain") placement of an image inside a canvas, and the
//! mapping between canvas (logical pixel) and native image coordinates.

use crate::consts::{MARKER_ARM, MARKER_RADIUS};

/// How an image of native size `native_width x native_height` is placed in its
/// canvas. All screen quantities are logical (CSS-like) pixels relative to the
/// canvas's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawTransform {
    pub origin_x: f32,
    pub origin_y: f32,
    pub drawn_width: f32,
    pub drawn_height: f32,
    pub native_width: u32,
    pub native_height: u32,
}

/// A data-space pixel picked on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

/// Screen-space geometry of the selection crosshair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub center: [f32; 2],
    pub radius: f32,
    pub arm: f32,
}

impl DrawTransform {
    /// Compute the centered, aspect-preserving placement of a `native` image in a
    /// `container`. Returns `None` for degenerate sizes.
    pub fn contain(container: [f32; 2], native: [u32; 2]) -> Option<Self> {
        let [cont_w, cont_h] = container;
        let [nat_w, nat_h] = native;
        if !(cont_w > 0.0 && cont_h > 0.0) || nat_w == 0 || nat_h == 0 {
            return None;
        }

        let image_aspect = nat_w as f32 / nat_h as f32;
        let container_aspect = cont_w / cont_h;

        let (drawn_width, drawn_height, origin_x, origin_y) = if container_aspect > image_aspect {
            let h = cont_h;
            let w = (h * nat_w as f32 / nat_h as f32).floor();
            (w, h, ((cont_w - w) / 2.0).floor(), 0.0)
        } else {
            let w = cont_w;
            let h = (w * nat_h as f32 / nat_w as f32).floor();
            (w, h, 0.0, ((cont_h - h) / 2.0).floor())
        };

        if drawn_width <= 0.0 || drawn_height <= 0.0 {
            return None;
        }

        Some(Self {
            origin_x,
            origin_y,
            drawn_width,
            drawn_height,
            native_width: nat_w,
            native_height: nat_h,
        })
    }

    /// Data → screen.
    pub fn to_screen(&self, data_x: f32, data_y: f32) -> [f32; 2] {
        [
            self.origin_x + data_x / self.native_width as f32 * self.drawn_width,
            self.origin_y + data_y / self.native_height as f32 * self.drawn_height,
        ]
    }

    /// Screen → data. `None` when the point is outside the drawn rectangle.
    pub fn to_data(&self, screen_x: f32, screen_y: f32) -> Option<PixelCoord> {
        if !self.contains(screen_x, screen_y) {
            return None;
        }
        let u = (screen_x - self.origin_x) / self.drawn_width;
        let v = (screen_y - self.origin_y) / self.drawn_height;

        // The far edge rounds to `native`, which is not a valid pixel index.
        let x = ((u * self.native_width as f32).round() as u32).min(self.native_width - 1);
        let y = ((v * self.native_height as f32).round() as u32).min(self.native_height - 1);
        Some(PixelCoord { x, y })
    }

    /// Inclusive bounds test against the drawn rectangle.
    pub fn contains(&self, screen_x: f32, screen_y: f32) -> bool {
        screen_x >= self.origin_x
            && screen_x <= self.origin_x + self.drawn_width
            && screen_y >= self.origin_y
            && screen_y <= self.origin_y + self.drawn_height
    }

    /// Screen pixels per native pixel along x.
    pub fn scale(&self) -> f32 {
        self.drawn_width / self.native_width as f32
    }

    pub fn marker_at(&self, pixel: PixelCoord) -> Marker {
        Marker {
            center: self.to_screen(pixel.x as f32, pixel.y as f32),
            radius: MARKER_RADIUS,
            arm: MARKER_ARM,
        }
    }
}

/// Physical backing-buffer size for a canvas of `logical` size at the given
/// device pixel ratio. Never smaller than 1x1.
pub fn buffer_size(logical: [f32; 2], device_pixel_ratio: f32) -> [u32; 2] {
    let dpr = if device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    [
        (logical[0] * dpr).round().max(1.0) as u32,
        (logical[1] * dpr).round().max(1.0) as u32,
    ]
}
