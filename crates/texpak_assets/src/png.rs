use std::path::Path;

use rgb::ComponentBytes;

use crate::image::RgbaImage;

pub fn decode_png(png: &[u8]) -> Result<RgbaImage, lodepng::Error> {
    let image = lodepng::decode32(png)?;
    Ok(RgbaImage::from_raw(
        (image.width as u32, image.height as u32),
        image.buffer.as_bytes().to_owned(),
    ))
}

pub fn load_png(path: impl AsRef<Path>) -> Result<RgbaImage, lodepng::Error> {
    let image = lodepng::decode32_file(path)?;
    Ok(RgbaImage::from_raw(
        (image.width as u32, image.height as u32),
        image.buffer.as_bytes().to_owned(),
    ))
}
