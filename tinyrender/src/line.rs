use lib_tga::{Color, Image};
use log::trace;

/// Draws a line between two pixels, both endpoints included.
///
/// Steep lines are walked along y so every row gets a pixel. The walk is
/// clipped to the image along its major axis, so far-away endpoints cost no
/// more than the image is wide. Minor-axis points outside the image are
/// skipped.
pub fn line(x0: i32, y0: i32, x1: i32, y1: i32, image: &mut Image, color: &Color) {
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let major_len = i64::from(if steep { image.height() } else { image.width() });
    if x1 < 0 || x0 >= major_len {
        trace!("Line ({}, {}) -> ({}, {}) misses the image", x0, y0, x1, y1);
        return;
    }

    let dx = x1 - x0;
    let step_error = (y1 - y0).abs() * 2;
    let y_step = if y1 > y0 { 1 } else { -1 };

    // Bresenham state after the steps that fall left of the image
    let first = x0.max(0);
    let skipped = (first - x0) as i128;
    let increments = match step_error as i128 * skipped - dx as i128 {
        n if n <= 0 => 0,
        n => (n + 2 * dx as i128 - 1) / (2 * dx as i128),
    };
    let mut y = y0 + y_step * increments as i64;
    let mut error = (step_error as i128 * skipped - 2 * dx as i128 * increments) as i64;

    for x in first..=x1.min(major_len - 1) {
        let (px, py) = if steep { (y, x) } else { (x, y) };
        if image.set(px as i32, py as i32, color).is_err() {
            trace!("Skipping pixel ({}, {}) outside the image", px, py);
        }

        error += step_error;
        if error > dx {
            y += y_step;
            error -= dx * 2;
        }
    }
}
