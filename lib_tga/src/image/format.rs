use log::{debug, trace};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },
    #[error("unsupported pixel depth: {0} bytes per pixel")]
    UnsupportedFormat(u8),
    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfRange {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Pixel depths the codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Grayscale = 1,
    Rgb = 3,
    Rgba = 4,
}

impl Format {
    pub fn from_bytes_per_pixel(bytes_per_pixel: u8) -> Result<Self, ImageError> {
        match bytes_per_pixel {
            1 => Ok(Format::Grayscale),
            3 => Ok(Format::Rgb),
            4 => Ok(Format::Rgba),
            other => Err(ImageError::UnsupportedFormat(other)),
        }
    }

    pub fn bytes_per_pixel(self) -> u8 {
        self as u8
    }

    pub fn bits_per_pixel(self) -> u8 {
        self.bytes_per_pixel() * 8
    }
}

/// A single pixel value, channels stored blue, green, red, alpha.
///
/// `bytes_per_pixel` says how many leading channels are meaningful, so a
/// grayscale value only uses `bgra[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub bgra: [u8; 4],
    pub bytes_per_pixel: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    pub const GREEN: Color = Color::rgba(0, 255, 0, 255);
    pub const BLUE: Color = Color::rgba(64, 128, 255, 255);
    pub const YELLOW: Color = Color::rgba(255, 200, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            bgra: [b, g, r, 0],
            bytes_per_pixel: 3,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            bgra: [b, g, r, a],
            bytes_per_pixel: 4,
        }
    }

    pub const fn gray(value: u8) -> Self {
        Self {
            bgra: [value, 0, 0, 0],
            bytes_per_pixel: 1,
        }
    }

    /// Builds a color from raw channel bytes already in blue-green-red-alpha
    /// order. Only the first four bytes are kept.
    pub fn from_bgra(channels: &[u8]) -> Self {
        let mut bgra = [0u8; 4];
        let len = channels.len().min(4);
        bgra[..len].copy_from_slice(&channels[..len]);
        Self {
            bgra,
            bytes_per_pixel: len as u8,
        }
    }

    pub fn r(&self) -> u8 {
        self.bgra[2]
    }

    pub fn g(&self) -> u8 {
        self.bgra[1]
    }

    pub fn b(&self) -> u8 {
        self.bgra[0]
    }

    pub fn a(&self) -> u8 {
        self.bgra[3]
    }

    /// The meaningful channel bytes.
    pub fn channels(&self) -> &[u8] {
        &self.bgra[..self.bytes_per_pixel as usize]
    }
}

/// A `width * height` pixel buffer.
///
/// Rows are stored bottom to top, so `(0, 0)` is the bottom-left pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u16,
    height: u16,
    format: Format,
    data: Vec<u8>,
}

impl Image {
    pub fn new(width: u16, height: u16, format: Format) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }

        let len = width as usize * height as usize * format.bytes_per_pixel() as usize;
        debug!(
            "Allocated {}x{} {:?} image ({} bytes)",
            width, height, format, len
        );

        Ok(Self {
            width,
            height,
            format,
            data: vec![0; len],
        })
    }

    /// Wraps an existing pixel buffer laid out bottom row first.
    pub fn from_raw(
        width: u16,
        height: u16,
        format: Format,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }

        let expected = width as usize * height as usize * format.bytes_per_pixel() as usize;
        if data.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel() as usize
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn offset(&self, x: i32, y: i32) -> Result<usize, ImageError> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Err(ImageError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y as usize * self.width as usize + x as usize) * self.bytes_per_pixel())
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Color, ImageError> {
        let offset = self.offset(x, y)?;
        Ok(Color::from_bgra(
            &self.data[offset..offset + self.bytes_per_pixel()],
        ))
    }

    /// Writes as many channels as both the color and the image carry.
    ///
    /// A narrower color leaves the remaining channels alone, a wider one is
    /// truncated.
    pub fn set(&mut self, x: i32, y: i32, color: &Color) -> Result<(), ImageError> {
        let offset = self.offset(x, y)?;
        let len = (color.bytes_per_pixel as usize).min(self.bytes_per_pixel());
        self.data[offset..offset + len].copy_from_slice(&color.bgra[..len]);
        Ok(())
    }

    pub fn flip_horizontally(&mut self) {
        let bpp = self.bytes_per_pixel();
        let width = self.width as usize;

        for row in self.data.chunks_exact_mut(width * bpp) {
            for i in 0..width / 2 {
                let (left, right) = row.split_at_mut((width - 1 - i) * bpp);
                left[i * bpp..(i + 1) * bpp].swap_with_slice(&mut right[..bpp]);
            }
        }
        trace!("Flipped {}x{} image horizontally", self.width, self.height);
    }

    pub fn flip_vertically(&mut self) {
        let row_len = self.width as usize * self.bytes_per_pixel();
        let height = self.height as usize;

        for i in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - 1 - i) * row_len);
            top[i * row_len..(i + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
        }
        trace!("Flipped {}x{} image vertically", self.width, self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u16, height: u16, format: Format) -> Image {
        let mut image = Image::new(width, height, format).unwrap();
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let v = (y * width as i32 + x) as u8;
                image
                    .set(x, y, &Color::rgba(v, v.wrapping_add(1), v.wrapping_add(2), 255))
                    .unwrap();
            }
        }
        image
    }

    #[test]
    fn test_new_zero_filled() {
        let image = Image::new(3, 2, Format::Rgb).unwrap();
        assert_eq!(image.as_bytes().len(), 3 * 2 * 3);
        assert!(image.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_invalid_dimensions() {
        assert_eq!(
            Image::new(0, 4, Format::Rgba),
            Err(ImageError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(Image::new(4, 0, Format::Grayscale).is_err());
    }

    #[test]
    fn test_format_from_bytes_per_pixel() {
        assert_eq!(Format::from_bytes_per_pixel(3), Ok(Format::Rgb));
        assert_eq!(
            Format::from_bytes_per_pixel(2),
            Err(ImageError::UnsupportedFormat(2))
        );
        assert_eq!(Format::Rgba.bits_per_pixel(), 32);
    }

    #[test]
    fn test_from_raw_size_mismatch() {
        let result = Image::from_raw(2, 2, Format::Rgb, vec![0; 11]);
        assert_eq!(
            result,
            Err(ImageError::BufferSizeMismatch {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn test_get_set() {
        let mut image = Image::new(4, 4, Format::Rgb).unwrap();
        image.set(1, 2, &Color::rgb(10, 20, 30)).unwrap();

        let color = image.get(1, 2).unwrap();
        assert_eq!(color, Color::rgb(10, 20, 30));
        assert_eq!((color.r(), color.g(), color.b()), (10, 20, 30));
        assert_eq!(image.get(2, 1).unwrap(), Color::rgb(0, 0, 0));
    }

    #[test]
    fn test_out_of_range_leaves_buffer_untouched() {
        let mut image = gradient(3, 3, Format::Rgba);
        let before = image.clone();

        for (x, y) in [(3, 0), (0, 3), (-1, 0), (0, -1)] {
            assert!(matches!(
                image.set(x, y, &Color::WHITE),
                Err(ImageError::OutOfRange { .. })
            ));
            assert!(matches!(image.get(x, y), Err(ImageError::OutOfRange { .. })));
        }
        assert_eq!(image, before);
    }

    #[test]
    fn test_set_rgb_into_rgba_keeps_alpha() {
        let mut image = Image::new(1, 1, Format::Rgba).unwrap();
        image.set(0, 0, &Color::rgba(1, 2, 3, 77)).unwrap();
        image.set(0, 0, &Color::rgb(9, 8, 7)).unwrap();

        assert_eq!(image.get(0, 0).unwrap(), Color::rgba(9, 8, 7, 77));
    }

    #[test]
    fn test_set_rgba_into_grayscale_truncates() {
        let mut image = Image::new(2, 1, Format::Grayscale).unwrap();
        image.set(1, 0, &Color::rgba(1, 2, 3, 4)).unwrap();

        // blue is the first channel
        assert_eq!(image.as_bytes(), &[0, 3]);
        assert_eq!(image.get(1, 0).unwrap(), Color::gray(3));
    }

    #[test]
    fn test_flip_horizontally() {
        let mut image = gradient(3, 2, Format::Rgb);
        let original = image.clone();

        image.flip_horizontally();
        assert_eq!(image.get(0, 0).unwrap(), original.get(2, 0).unwrap());
        assert_eq!(image.get(1, 1).unwrap(), original.get(1, 1).unwrap());
        assert_eq!(image.get(2, 1).unwrap(), original.get(0, 1).unwrap());

        image.flip_horizontally();
        assert_eq!(image, original);
    }

    #[test]
    fn test_flip_horizontally_single_column() {
        let mut image = gradient(1, 5, Format::Grayscale);
        let original = image.clone();
        image.flip_horizontally();
        assert_eq!(image, original);
    }

    #[test]
    fn test_flip_vertically() {
        let mut image = gradient(2, 3, Format::Rgba);
        let original = image.clone();

        image.flip_vertically();
        assert_eq!(image.get(0, 0).unwrap(), original.get(0, 2).unwrap());
        assert_eq!(image.get(1, 1).unwrap(), original.get(1, 1).unwrap());
        assert_eq!(image.get(1, 2).unwrap(), original.get(1, 0).unwrap());

        image.flip_vertically();
        assert_eq!(image, original);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut image = gradient(2, 2, Format::Rgb);
        let copy = image.clone();
        image.set(0, 0, &Color::WHITE).unwrap();
        assert_ne!(image, copy);
    }
}
