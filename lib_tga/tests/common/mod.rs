#![allow(dead_code)]

use lib_tga::{Color, Format, Image};

pub const HEADER_SIZE: usize = lib_tga::constants::HEADER_SIZE;

/// Every pixel a different color, alpha varying as well.
pub fn gradient(width: u16, height: u16, format: Format) -> Image {
    let mut image = Image::new(width, height, format).unwrap();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let i = (y * width as i32 + x) as u32;
            let color = Color::rgba(i as u8, (i >> 8) as u8, (x * 7) as u8, (y * 3) as u8);
            image.set(x, y, &color).unwrap();
        }
    }
    image
}

/// Horizontal stripes of repeated colors with a few isolated pixels, so
/// both packet kinds show up.
pub fn mixed(width: u16, height: u16, format: Format) -> Image {
    let mut image = Image::new(width, height, format).unwrap();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let color = if x % 11 == 3 {
                Color::rgba(x as u8, y as u8, 1, 2)
            } else {
                Color::rgba(0, ((y / 2) * 40) as u8, 200, 255)
            };
            image.set(x, y, &color).unwrap();
        }
    }
    image
}

pub fn uniform(width: u16, height: u16, format: Format, color: Color) -> Image {
    let mut image = Image::new(width, height, format).unwrap();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            image.set(x, y, &color).unwrap();
        }
    }
    image
}

/// Walks the run-length body and returns `(is_run, pixel_count, byte_len)`
/// for every packet.
pub fn packets(body: &[u8], bytes_per_pixel: usize) -> Vec<(bool, usize, usize)> {
    let mut packets = Vec::new();
    let mut i = 0;
    while i < body.len() {
        let run = body[i] & 0x80 != 0;
        let count = (body[i] & 0x7f) as usize + 1;
        let len = if run {
            1 + bytes_per_pixel
        } else {
            1 + count * bytes_per_pixel
        };
        packets.push((run, count, len));
        i += len;
    }
    packets
}
