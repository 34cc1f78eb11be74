pub mod decoder;
pub mod encoder;
pub mod format;
pub mod header;

pub use decoder::{decode, decode_from, DecodeError};
pub use encoder::{encode, encode_to, EncodingError};
