use std::io::{self, Read};

use log::{debug, error};
use thiserror::Error;

use crate::constants::{MAX_PACKET_PIXELS, MAX_RESERVED_BYTES, RLE_PACKET_FLAG};

#[derive(Error, Debug)]
pub enum RleDecompressionError {
    #[error("packet data ended after {decoded} of {expected} pixels")]
    UnexpectedEof { decoded: usize, expected: usize },
    #[error("packet of {count} pixels overflows the {remaining} pixels left in the image")]
    PacketOverflow { count: usize, remaining: usize },
    #[error("failed to read packet data")]
    Io(#[from] io::Error),
}

/// Splits a pixel sequence into run and raw packets.
///
/// # Arguments
/// * `pixels` - Pixel bytes in scan order, `bytes_per_pixel` bytes each
/// * `bytes_per_pixel` - Size of one pixel
///
/// # Returns
/// * `Vec<u8>` - Packet stream. A run packet is `0x80 | (n - 1)` followed by
///   one pixel, a raw packet is `n - 1` followed by `n` pixels. No packet
///   covers more than 128 pixels.
pub fn rle_compression(pixels: &[u8], bytes_per_pixel: usize) -> Vec<u8> {
    let pixel_count = pixels.len() / bytes_per_pixel;
    let pixel = |i: usize| &pixels[i * bytes_per_pixel..(i + 1) * bytes_per_pixel];

    let mut encoded = Vec::with_capacity(pixels.len() / 2);
    let mut packets = 0usize;
    let mut current = 0;

    while current < pixel_count {
        let mut count = 1;
        let mut raw = true;

        while current + count < pixel_count && count < MAX_PACKET_PIXELS {
            let same = pixel(current + count - 1) == pixel(current + count);

            if count == 1 {
                raw = !same;
            }
            if raw && same {
                // the previous pixel opens a run, leave it for the next packet
                count -= 1;
                break;
            }
            if !raw && !same {
                break;
            }
            count += 1;
        }

        let start = current * bytes_per_pixel;
        if raw {
            encoded.push((count - 1) as u8);
            encoded.extend_from_slice(&pixels[start..start + count * bytes_per_pixel]);
        } else {
            encoded.push(RLE_PACKET_FLAG | (count - 1) as u8);
            encoded.extend_from_slice(pixel(current));
        }

        current += count;
        packets += 1;
    }

    debug!(
        "RLE: {} pixels packed into {} packets ({} bytes)",
        pixel_count,
        packets,
        encoded.len()
    );
    encoded
}

/// Expands a packet stream until `pixel_count` pixels are decoded.
///
/// Bytes after the last packet are left unread in `reader`.
///
/// # Errors
/// * `UnexpectedEof` if the stream ends before the image is full
/// * `PacketOverflow` if a packet covers more pixels than remain
pub fn rle_decompression<R: Read>(
    reader: &mut R,
    bytes_per_pixel: usize,
    pixel_count: usize,
) -> Result<Vec<u8>, RleDecompressionError> {
    // the header claims the size, the packets have to back it up
    let mut decoded =
        Vec::with_capacity(pixel_count.saturating_mul(bytes_per_pixel).min(MAX_RESERVED_BYTES));
    let mut pixel = vec![0u8; bytes_per_pixel];
    let mut filled = 0;

    let eof = |filled: usize, e: io::Error| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            error!("Packet data ended after {} of {} pixels", filled, pixel_count);
            RleDecompressionError::UnexpectedEof {
                decoded: filled,
                expected: pixel_count,
            }
        } else {
            RleDecompressionError::Io(e)
        }
    };

    while filled < pixel_count {
        let mut header = [0u8; 1];
        reader.read_exact(&mut header).map_err(|e| eof(filled, e))?;

        let run = header[0] & RLE_PACKET_FLAG != 0;
        let count = (header[0] & !RLE_PACKET_FLAG) as usize + 1;
        let remaining = pixel_count - filled;
        if count > remaining {
            error!(
                "Packet of {} pixels overflows the {} pixels left",
                count, remaining
            );
            return Err(RleDecompressionError::PacketOverflow { count, remaining });
        }

        if run {
            reader.read_exact(&mut pixel).map_err(|e| eof(filled, e))?;
            for _ in 0..count {
                decoded.extend_from_slice(&pixel);
            }
        } else {
            let start = decoded.len();
            decoded.resize(start + count * bytes_per_pixel, 0);
            reader
                .read_exact(&mut decoded[start..])
                .map_err(|e| eof(filled, e))?;
        }

        filled += count;
    }

    debug!("RLE: decoded {} pixels", filled);
    Ok(decoded)
}
