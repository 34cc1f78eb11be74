pub mod compression;
pub mod constants;
pub mod image;

use log::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub use crate::image::format::{Color, Format, Image, ImageError};
pub use crate::image::header::{Header, HeaderError, ImageType};
pub use crate::image::{decode, decode_from, encode, encode_to, DecodeError, EncodingError};

/// Installs the global logger.
///
/// Records go to `log_file` when one is given and to stderr otherwise.
/// `RUST_LOG` is honoured on top of the default debug filter for the codec
/// and the renderer. Calling this twice keeps the first logger.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();

    if let Some(path) = log_file {
        let target = Box::new(File::create(path)?);
        builder.target(env_logger::Target::Pipe(target));
    }

    builder
        .filter(Some("lib_tga"), LevelFilter::Debug)
        .filter(Some("tinyrender"), LevelFilter::Debug)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        });

    if builder.try_init().is_err() {
        warn!("Logger already initialised, keeping the existing one");
    }

    Ok(())
}
