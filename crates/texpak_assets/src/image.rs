use texpak_geometry::Size;

/// An owned, decoded RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    size: Size<u32>,
    pixels: Vec<u8>,
}

impl RgbaImage {
    /// Wraps raw RGBA8 bytes. The buffer length must be exactly
    /// `w * h * 4`.
    pub fn from_raw(size: impl Into<Size<u32>>, pixels: Vec<u8>) -> Self {
        let size = size.into();
        assert_eq!(
            pixels.len(),
            size.w as usize * size.h as usize * 4,
            "pixel buffer does not match an RGBA8 image of {}x{}",
            size.w,
            size.h,
        );
        Self { size, pixels }
    }

    pub fn size(&self) -> Size<u32> {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
