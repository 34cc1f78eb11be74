use std::io::{self, Read, Write};

use log::{debug, error};
use thiserror::Error;

use super::format::Format;
use crate::constants::{DESCRIPTOR_TOP_LEFT, HEADER_SIZE};

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("header is truncated: expected 18 bytes")]
    Truncated(#[source] io::Error),
    #[error("color-mapped images are not supported (color map type {0})")]
    ColorMapNotSupported(u8),
    #[error("unsupported image type code {0}")]
    UnsupportedImageType(u8),
    #[error("unsupported depth: {0} bits per pixel")]
    UnsupportedDepth(u8),
    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },
}

/// Image type codes carried in the third header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    TrueColor = 2,
    Grayscale = 3,
    RleTrueColor = 10,
    RleGrayscale = 11,
}

impl ImageType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(ImageType::TrueColor),
            3 => Some(ImageType::Grayscale),
            10 => Some(ImageType::RleTrueColor),
            11 => Some(ImageType::RleGrayscale),
            _ => None,
        }
    }

    pub fn for_format(format: Format, rle: bool) -> Self {
        match (format, rle) {
            (Format::Grayscale, false) => ImageType::Grayscale,
            (Format::Grayscale, true) => ImageType::RleGrayscale,
            (_, false) => ImageType::TrueColor,
            (_, true) => ImageType::RleTrueColor,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_rle(self) -> bool {
        matches!(self, ImageType::RleTrueColor | ImageType::RleGrayscale)
    }
}

/// The fixed 18-byte file header.
///
/// Color map and origin fields are kept so foreign files can be inspected,
/// the encoder always writes them as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: ImageType,
    pub color_map_origin: u16,
    pub color_map_length: u16,
    pub color_map_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub image_descriptor: u8,
}

impl Header {
    pub fn new(width: u16, height: u16, format: Format, rle: bool, top_left: bool) -> Self {
        Self {
            id_length: 0,
            color_map_type: 0,
            image_type: ImageType::for_format(format, rle),
            color_map_origin: 0,
            color_map_length: 0,
            color_map_depth: 0,
            x_origin: 0,
            y_origin: 0,
            width,
            height,
            bits_per_pixel: format.bits_per_pixel(),
            image_descriptor: if top_left { DESCRIPTOR_TOP_LEFT } else { 0 },
        }
    }

    /// Whether the first stored row is the top row of the image.
    pub fn is_top_left(&self) -> bool {
        self.image_descriptor & DESCRIPTOR_TOP_LEFT != 0
    }

    /// Pixel depth, already checked when the header was parsed.
    pub fn format(&self) -> Format {
        match self.bits_per_pixel {
            8 => Format::Grayscale,
            24 => Format::Rgb,
            _ => Format::Rgba,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0] = self.id_length;
        bytes[1] = self.color_map_type;
        bytes[2] = self.image_type.code();
        bytes[3..5].copy_from_slice(&self.color_map_origin.to_le_bytes());
        bytes[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        bytes[7] = self.color_map_depth;
        bytes[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.width.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.height.to_le_bytes());
        bytes[16] = self.bits_per_pixel;
        bytes[17] = self.image_descriptor;
        bytes
    }

    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Result<Self, HeaderError> {
        let le16 = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);

        let color_map_type = bytes[1];
        if color_map_type != 0 {
            error!("Color map type {} is not supported", color_map_type);
            return Err(HeaderError::ColorMapNotSupported(color_map_type));
        }

        let image_type = ImageType::from_code(bytes[2]).ok_or_else(|| {
            error!("Unsupported image type code {}", bytes[2]);
            HeaderError::UnsupportedImageType(bytes[2])
        })?;

        let bits_per_pixel = bytes[16];
        if !matches!(bits_per_pixel, 8 | 24 | 32) {
            error!("Unsupported depth of {} bits per pixel", bits_per_pixel);
            return Err(HeaderError::UnsupportedDepth(bits_per_pixel));
        }

        let width = le16(12);
        let height = le16(14);
        if width == 0 || height == 0 {
            error!("Invalid image dimensions {}x{}", width, height);
            return Err(HeaderError::InvalidDimensions { width, height });
        }

        Ok(Self {
            id_length: bytes[0],
            color_map_type,
            image_type,
            color_map_origin: le16(3),
            color_map_length: le16(5),
            color_map_depth: bytes[7],
            x_origin: le16(8),
            y_origin: le16(10),
            width,
            height,
            bits_per_pixel,
            image_descriptor: bytes[17],
        })
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, HeaderError> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader.read_exact(&mut bytes).map_err(|e| {
            error!("Failed to read the {} byte header: {}", HEADER_SIZE, e);
            HeaderError::Truncated(e)
        })?;

        let header = Self::from_bytes(&bytes)?;
        debug!(
            "Header read: type={:?} {}x{} bpp={} descriptor={:#04x}",
            header.image_type,
            header.width,
            header.height,
            header.bits_per_pixel,
            header.image_descriptor
        );
        Ok(header)
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        debug!(
            "Header written: type={:?} {}x{} bpp={} descriptor={:#04x}",
            self.image_type, self.width, self.height, self.bits_per_pixel, self.image_descriptor
        );
        Ok(())
    }
}
