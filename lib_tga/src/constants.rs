pub const FORMAT_NAME: &str = "Truevision TGA";
pub const FILE_EXT: &str = "tga";

/// Size of the fixed file header in bytes.
pub const HEADER_SIZE: usize = 18;

/// Largest number of pixels a single run-length packet may cover.
pub const MAX_PACKET_PIXELS: usize = 128;

/// Upper bound on the output buffer reserved before any packet is read.
pub const MAX_RESERVED_BYTES: usize = 1 << 20;

/// Packet header bit marking a run packet.
pub const RLE_PACKET_FLAG: u8 = 0x80;

/// Image descriptor bit set when the first stored row is the top one.
pub const DESCRIPTOR_TOP_LEFT: u8 = 0x20;

/// Signature closing the optional 26-byte footer written by some encoders.
pub const FOOTER_SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";
pub const FOOTER_SIZE: usize = 26;
