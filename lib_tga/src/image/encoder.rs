use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{error, info};
use thiserror::Error;

use super::format::Image;
use super::header::Header;
use crate::compression::rle_compression;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Failed to write image data")]
    Io(#[from] io::Error),
}

/// Pixel bytes in the order they are stored on disk.
///
/// Memory is bottom row first; `top_first` reverses the rows without
/// touching the image.
fn scan_order(image: &Image, top_first: bool) -> Cow<'_, [u8]> {
    if !top_first {
        return Cow::Borrowed(image.as_bytes());
    }

    let row_len = image.width() as usize * image.bytes_per_pixel();
    let mut rows = Vec::with_capacity(image.as_bytes().len());
    for row in image.as_bytes().chunks_exact(row_len).rev() {
        rows.extend_from_slice(row);
    }
    Cow::Owned(rows)
}

/// Encoded pixel body: rows in disk order, run-length packed when `rle` is set.
fn body(image: &Image, vflip: bool, rle: bool) -> Cow<'_, [u8]> {
    let pixels = scan_order(image, vflip);
    let body = if rle {
        Cow::Owned(rle_compression(&pixels, image.bytes_per_pixel()))
    } else {
        pixels
    };

    info!(
        "Encoding completed: {} bytes of pixels stored in {} bytes",
        image.as_bytes().len(),
        body.len()
    );
    body
}

fn header_for(image: &Image, vflip: bool, rle: bool) -> Header {
    Header::new(image.width(), image.height(), image.format(), rle, vflip)
}

/// Serializes an image into the file layout: header, then body.
///
/// `vflip` stores the top row first and marks it in the descriptor, `rle`
/// selects the run-length image types.
pub fn encode(image: &Image, vflip: bool, rle: bool) -> Vec<u8> {
    info!("Starting encoding");

    let mut encoded_data: Vec<u8> = header_for(image, vflip, rle).to_bytes().to_vec();
    encoded_data.extend_from_slice(&body(image, vflip, rle));
    encoded_data
}

/// Streams the same bytes as [`encode`] into `writer`.
pub fn encode_to<W: Write>(
    writer: &mut W,
    image: &Image,
    vflip: bool,
    rle: bool,
) -> Result<(), EncodingError> {
    info!("Starting encoding");

    header_for(image, vflip, rle).write(writer)?;
    writer.write_all(&body(image, vflip, rle))?;
    Ok(())
}

impl Image {
    /// Writes the image to `path`, replacing any existing file.
    pub fn write_tga_file<P: AsRef<Path>>(
        &self,
        path: P,
        vflip: bool,
        rle: bool,
    ) -> Result<(), EncodingError> {
        let path = path.as_ref();
        let result = File::create(path)
            .map_err(EncodingError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                encode_to(&mut writer, self, vflip, rle)?;
                writer.flush()?;
                Ok(())
            });

        if let Err(ref e) = result {
            error!("Can't write {}: {}", path.display(), e);
        }
        result?;

        info!("Image saved to {}", path.display());
        Ok(())
    }
}
