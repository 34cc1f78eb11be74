use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use log::{debug, error, info};
use thiserror::Error;

use super::format::{Image, ImageError};
use super::header::{Header, HeaderError};
use crate::compression::{rle_decompression, RleDecompressionError};
use crate::constants::{FOOTER_SIGNATURE, FOOTER_SIZE};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid header")]
    Header(#[from] HeaderError),
    #[error("Unexpected end of data in the {0} byte image id field")]
    TruncatedId(u8),
    #[error("Pixel data is truncated: expected {expected} bytes, got {actual}")]
    TruncatedBody { expected: usize, actual: usize },
    #[error("Run-length data is corrupt")]
    Rle(#[from] RleDecompressionError),
    #[error("Decoded pixels do not fit the image")]
    Image(#[from] ImageError),
    #[error("Failed to read image data")]
    Io(#[from] io::Error),
}

pub fn decode(encoded_data: &[u8]) -> Result<Image, DecodeError> {
    info!("Starting decoding");
    let mut cursor = encoded_data;

    let header = Header::read(&mut cursor)?;

    // Image id field, never written by the encoder
    let id_length = header.id_length as usize;
    if cursor.len() < id_length {
        error!("Unexpected end of data in the image id field");
        return Err(DecodeError::TruncatedId(header.id_length));
    }
    cursor = &cursor[id_length..];

    let format = header.format();
    let bytes_per_pixel = format.bytes_per_pixel() as usize;
    let pixel_count = header.width as usize * header.height as usize;

    let pixels = if header.image_type.is_rle() {
        rle_decompression(&mut cursor, bytes_per_pixel, pixel_count)?
    } else {
        let expected = pixel_count * bytes_per_pixel;
        if cursor.len() < expected {
            error!(
                "Pixel data is truncated: expected {} bytes, got {}",
                expected,
                cursor.len()
            );
            return Err(DecodeError::TruncatedBody {
                expected,
                actual: cursor.len(),
            });
        }
        let (body, rest) = cursor.split_at(expected);
        cursor = rest;
        body.to_vec()
    };
    debug!("Pixel data read: {} bytes", pixels.len());

    if cursor.len() >= FOOTER_SIZE && cursor.ends_with(FOOTER_SIGNATURE) {
        debug!("Footer present, ignored");
    } else if !cursor.is_empty() {
        debug!("Ignoring {} trailing bytes", cursor.len());
    }

    let mut image = Image::from_raw(header.width, header.height, format, pixels)?;
    if header.is_top_left() {
        debug!("Stored top row first, flipping to bottom-first");
        image.flip_vertically();
    }

    info!(
        "Decoding completed: {}x{} {:?}",
        image.width(),
        image.height(),
        image.format()
    );
    Ok(image)
}

pub fn decode_from<R: Read>(reader: &mut R) -> Result<Image, DecodeError> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    decode(&buffer)
}

impl Image {
    /// Reads an image file, taking dimensions and format from its header.
    pub fn read_tga_file<P: AsRef<Path>>(path: P) -> Result<Image, DecodeError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            error!("Can't open {}: {}", path.display(), e);
            e
        })?;

        let image = decode_from(&mut BufReader::new(file))?;
        info!("Image loaded from {}", path.display());
        Ok(image)
    }
}
