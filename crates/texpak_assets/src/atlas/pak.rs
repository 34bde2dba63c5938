//! Parser for the texture pack container format.
//!
//! A pack file is a sequence of records, each one atlas image plus its
//! sub-texture table. Numeric fields are whitespace-delimited decimal
//! ASCII tokens; names, paths and pixel payloads are length-prefixed
//! binary runs separated from their length token by exactly one
//! whitespace byte:
//!
//! ```text
//! "D" width height zlibLen <delim> <zlibLen raw bytes>   embedded image
//! tag nameLen <delim> <nameLen raw bytes>                referenced image
//! count { nameLen <delim> <nameLen raw bytes> x y w h }  sub-texture table
//! ```
//!
//! Any tag other than `"D"` starts a referenced-image record. Embedded
//! payloads are zlib streams that must inflate to exactly
//! `width * height * 4` RGBA8 bytes.

use std::{collections::HashMap, path::Path, str};

use texpak_geometry::Rect;

use super::{Atlas, AtlasError};
use crate::{image::RgbaImage, png, reader::Reader};

const EMBEDDED_TAG: &[u8] = b"D";

pub(super) fn parse(bytes: &[u8], dir: &Path) -> Result<Vec<Atlas>, AtlasError> {
    let mut reader = Reader::new(bytes);
    let mut atlases: Vec<Atlas> = Vec::new();

    // A missing tag here is the normal end of the stream.
    while let Some(tag) = reader.token() {
        match parse_record(&mut reader, tag, dir, atlases.len()) {
            Ok(atlas) => atlases.push(atlas),
            // A record cut off or corrupt partway through is dropped,
            // never retained half-built. Records that parsed completely
            // before it stay usable; the caller fails the load when
            // nothing did.
            Err(AtlasError::MalformedRecord { record, reason }) if !atlases.is_empty() => {
                log::warn!("discarding malformed trailing record {record}: {reason}");
                break;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(atlases)
}

fn parse_record(
    reader: &mut Reader,
    tag: &[u8],
    dir: &Path,
    record: usize,
) -> Result<Atlas, AtlasError> {
    let image = if tag == EMBEDDED_TAG {
        embedded_image(reader, record)?
    } else {
        referenced_image(reader, dir, record)?
    };

    let table = sub_texture_table(reader, record)?;
    Ok(Atlas::new(image, table))
}

#[cfg(feature = "zlib")]
fn embedded_image(reader: &mut Reader, record: usize) -> Result<RgbaImage, AtlasError> {
    let malformed = |reason| AtlasError::MalformedRecord { record, reason };

    let width = reader
        .read_u32()
        .ok_or_else(|| malformed("missing embedded image width"))?;
    let height = reader
        .read_u32()
        .ok_or_else(|| malformed("missing embedded image height"))?;
    let compressed_len = reader
        .read_u32()
        .ok_or_else(|| malformed("missing compressed payload length"))?;
    reader
        .skip_delimiter()
        .ok_or_else(|| malformed("stream ends before compressed payload"))?;
    let payload = reader
        .bytes(compressed_len as usize)
        .ok_or_else(|| malformed("compressed payload cut off"))?;

    let pixel_len = width as usize * height as usize * 4;
    let pixels =
        decompress(payload, pixel_len).map_err(|reason| AtlasError::Decode { record, reason })?;

    log::debug!("decoded embedded {width}x{height} atlas image");
    Ok(RgbaImage::from_raw((width, height), pixels))
}

/// Embedded data cannot be represented without the codec, so refuse the
/// file instead of producing a record with no pixels.
#[cfg(not(feature = "zlib"))]
fn embedded_image(_reader: &mut Reader, _record: usize) -> Result<RgbaImage, AtlasError> {
    Err(AtlasError::UnsupportedFormat)
}

#[cfg(feature = "zlib")]
fn decompress(payload: &[u8], expected_len: usize) -> Result<Vec<u8>, String> {
    use std::io::Read;

    let mut pixels = Vec::with_capacity(expected_len);
    flate2::bufread::ZlibDecoder::new(payload)
        .read_to_end(&mut pixels)
        .map_err(|e| e.to_string())?;

    if pixels.len() != expected_len {
        return Err(format!(
            "decompressed to {} bytes, expected {}",
            pixels.len(),
            expected_len
        ));
    }

    Ok(pixels)
}

fn referenced_image(
    reader: &mut Reader,
    dir: &Path,
    record: usize,
) -> Result<RgbaImage, AtlasError> {
    let relative = prefixed_str(reader).ok_or(AtlasError::MalformedRecord {
        record,
        reason: "image path cut off or not utf-8",
    })?;
    let path = dir.join(relative);

    log::info!("loading referenced atlas image {:?}", path);
    png::load_png(&path).map_err(|source| AtlasError::ImageLoad { path, source })
}

fn sub_texture_table(
    reader: &mut Reader,
    record: usize,
) -> Result<HashMap<String, Rect<i32>>, AtlasError> {
    let malformed = |reason| AtlasError::MalformedRecord { record, reason };

    let count = reader
        .read_u32()
        .ok_or_else(|| malformed("missing sub-texture count"))?;
    let mut table = HashMap::new();

    for _ in 0..count {
        let name = prefixed_str(reader)
            .ok_or_else(|| malformed("sub-texture name cut off or not utf-8"))?;
        let rect = read_rect(reader).ok_or_else(|| malformed("sub-texture rectangle cut off"))?;

        // Duplicate names within one record keep the last definition.
        table.insert(name.to_owned(), rect);
    }

    Ok(table)
}

/// Length token, one delimiter byte, then that many raw bytes.
fn prefixed_str<'a>(reader: &mut Reader<'a>) -> Option<&'a str> {
    let len = reader.read_u32()?;
    reader.skip_delimiter()?;
    str::from_utf8(reader.bytes(len as usize)?).ok()
}

fn read_rect(reader: &mut Reader) -> Option<Rect<i32>> {
    Some(Rect::new(
        reader.read_i32()?,
        reader.read_i32()?,
        reader.read_i32()?,
        reader.read_i32()?,
    ))
}
