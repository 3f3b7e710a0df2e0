use image::Rgba;

use crate::bitmap::QRBitmap;
use crate::config::Color;

// Rounded corners
// The clip path is the canvas rounded rectangle: straight edges joined by one quadratic
// curve per corner, with the control point on the bitmap corner. For the top-left corner
// the curve runs (0, r) -> (r, 0) with control (0, 0), i.e. x = t²r, y = (1-t)²r, which
// is the parabola √x + √y = √r. The other corners mirror it.
//------------------------------------------------------------------------------

/// Largest radius that still yields a valid rounded rectangle for a bitmap of `size`.
pub fn clamp_radius(radius: u32, size: u32) -> u32 {
    radius.min(size / 2)
}

/// Whether point `(px, py)` lies inside the rounded rectangle `[0, size]²` with radius `r`.
pub fn inside_rounded_rect(px: f64, py: f64, size: f64, r: f64) -> bool {
    if r <= 0.0 {
        return true;
    }

    // Distances to the nearest vertical and horizontal edge
    let u = px.min(size - px);
    let v = py.min(size - py);
    if u >= r || v >= r {
        return true;
    }
    if u < 0.0 || v < 0.0 {
        return false;
    }
    u.sqrt() + v.sqrt() >= r.sqrt()
}

/// Clears every pixel whose center falls outside the rounded rectangle. Radius 0 is a no-op.
pub fn apply_rounded_corners(bmp: &mut QRBitmap, radius: u32) {
    let sz = bmp.size();
    let r = clamp_radius(radius, sz);
    if r == 0 {
        return;
    }

    let clear: Rgba<u8> = Color::TRANSPARENT.into();
    let (size, rf) = (sz as f64, r as f64);

    // Only the four r×r corner squares can be clipped
    let near = |i: u32| i < r || i >= sz - r;
    for y in (0..sz).filter(|&y| near(y)) {
        for x in (0..sz).filter(|&x| near(x)) {
            if !inside_rounded_rect(x as f64 + 0.5, y as f64 + 0.5, size, rf) {
                bmp.put_pixel(x, y, clear);
            }
        }
    }
}
