mod common;

use common::{gradient, mixed, HEADER_SIZE};
use lib_tga::{decode, encode, Color, DecodeError, Format, Header, Image, ImageType};
use tempfile::tempdir;

const FORMATS: [Format; 3] = [Format::Grayscale, Format::Rgb, Format::Rgba];

#[test]
fn test_round_trip_in_memory() {
    for format in FORMATS {
        for image in [gradient(17, 9, format), mixed(40, 6, format)] {
            for vflip in [false, true] {
                for rle in [false, true] {
                    let decoded = decode(&encode(&image, vflip, rle)).unwrap();
                    assert_eq!(
                        decoded, image,
                        "format={:?} vflip={} rle={}",
                        format, vflip, rle
                    );
                }
            }
        }
    }
}

#[test]
fn test_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let image = mixed(64, 48, Format::Rgb);

    for vflip in [false, true] {
        for rle in [false, true] {
            let path = dir.path().join(format!("out_{}_{}.tga", vflip, rle));
            image.write_tga_file(&path, vflip, rle).unwrap();

            let loaded = Image::read_tga_file(&path).unwrap();
            assert_eq!(loaded.width(), 64);
            assert_eq!(loaded.height(), 48);
            assert_eq!(loaded.format(), Format::Rgb);
            assert_eq!(loaded, image);
        }
    }
}

#[test]
fn test_file_header_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("header.tga");
    gradient(5, 3, Format::Rgba)
        .write_tga_file(&path, true, true)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let header = Header::read(&mut bytes.as_slice()).unwrap();
    assert_eq!(header.image_type, ImageType::RleTrueColor);
    assert_eq!((header.width, header.height), (5, 3));
    assert_eq!(header.bits_per_pixel, 32);
    assert!(header.is_top_left());
    assert_eq!(header.id_length, 0);
}

#[test]
fn test_read_missing_file() {
    let dir = tempdir().unwrap();
    let result = Image::read_tga_file(dir.path().join("missing.tga"));
    assert!(matches!(result, Err(DecodeError::Io(_))));
}

#[test]
fn test_write_to_missing_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.tga");
    let image = Image::new(2, 2, Format::Rgb).unwrap();
    assert!(image.write_tga_file(&path, true, true).is_err());
}

#[test]
fn test_vflip_only_changes_disk_order() {
    let image = gradient(4, 4, Format::Grayscale);
    let bottom_first = encode(&image, false, false);
    let top_first = encode(&image, true, false);

    let row = 4;
    assert_eq!(&bottom_first[HEADER_SIZE..HEADER_SIZE + row], &image.as_bytes()[..row]);
    assert_eq!(
        &top_first[HEADER_SIZE..HEADER_SIZE + row],
        &image.as_bytes()[3 * row..]
    );
    assert_eq!(decode(&bottom_first).unwrap(), decode(&top_first).unwrap());
}

#[test]
fn test_rle_scenario_independent_of_packetization() {
    let red = [0u8, 0, 255];
    let green = [0u8, 255, 0];
    let blue = [255u8, 0, 0];

    // one raw packet for all four pixels, unlike the encoder's run + raw split
    let mut data = Header::new(2, 2, Format::Rgb, true, false).to_bytes().to_vec();
    data.push(0x03);
    for pixel in [red, red, green, blue] {
        data.extend_from_slice(&pixel);
    }
    let from_raw_packet = decode(&data).unwrap();

    let mut image = Image::new(2, 2, Format::Rgb).unwrap();
    image.set(0, 0, &Color::rgb(255, 0, 0)).unwrap();
    image.set(1, 0, &Color::rgb(255, 0, 0)).unwrap();
    image.set(0, 1, &Color::rgb(0, 255, 0)).unwrap();
    image.set(1, 1, &Color::rgb(0, 0, 255)).unwrap();
    let encoded = encode(&image, false, true);
    assert_ne!(&encoded[HEADER_SIZE..], &data[HEADER_SIZE..]);

    let from_encoder = decode(&encoded).unwrap();
    assert_eq!(from_raw_packet, image);
    assert_eq!(from_encoder, image);
}
