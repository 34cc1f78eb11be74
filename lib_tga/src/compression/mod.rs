pub mod rle;

pub use rle::{rle_compression, rle_decompression, RleDecompressionError};
