use lib_tga::{Color, Image, ImageError};
use log::{debug, warn};

use crate::geometry::Vec3;
use crate::line::line;
use crate::model::Model;

/// Maps x and y from [-1, 1] onto the image, dropping z.
pub fn to_screen(vertex: &Vec3, width: u16, height: u16) -> (i32, i32) {
    let x = (vertex.x + 1.0) * (width as f32 - 1.0) / 2.0;
    let y = (vertex.y + 1.0) * (height as f32 - 1.0) / 2.0;
    (x.round() as i32, y.round() as i32)
}

/// Draws every edge of `model` and returns how many were drawn.
pub fn wireframe(model: &Model, image: &mut Image, color: &Color) -> usize {
    let (width, height) = (image.width(), image.height());
    let mut drawn = 0;

    for &(from, to) in model.edges() {
        let (Some(a), Some(b)) = (model.vertex(from), model.vertex(to)) else {
            warn!("Skipping edge {} -> {} with a missing vertex", from, to);
            continue;
        };

        let (x0, y0) = to_screen(a, width, height);
        let (x1, y1) = to_screen(b, width, height);
        line(x0, y0, x1, y1, image, color);
        drawn += 1;
    }

    debug!("Wireframe: drew {} of {} edges", drawn, model.edge_count());
    drawn
}

/// The three-point demo: a 64x64 RGB triangle outline.
///
/// The corners are painted white first and the edges drawn over them.
pub fn triangle_demo() -> Result<Image, ImageError> {
    let mut framebuffer = Image::new(64, 64, lib_tga::Format::Rgb)?;

    let (ax, ay) = (7, 3);
    let (bx, by) = (12, 37);
    let (cx, cy) = (62, 53);

    framebuffer.set(ax, ay, &Color::WHITE)?;
    framebuffer.set(bx, by, &Color::WHITE)?;
    framebuffer.set(cx, cy, &Color::WHITE)?;

    line(ax, ay, bx, by, &mut framebuffer, &Color::BLUE);
    line(bx, by, cx, cy, &mut framebuffer, &Color::GREEN);
    line(ax, ay, cx, cy, &mut framebuffer, &Color::RED);
    line(cx, cy, ax, ay, &mut framebuffer, &Color::YELLOW);

    Ok(framebuffer)
}
