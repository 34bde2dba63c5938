use derive_more::Constructor;

/// Axis-aligned rectangle in the pixel space of its owning image.
#[derive(Default, Constructor, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T,
}

impl<T> From<(T, T, T, T)> for Rect<T> {
    fn from((x, y, w, h): (T, T, T, T)) -> Self {
        Self::new(x, y, w, h)
    }
}

impl<T: Default> From<Size<T>> for Rect<T> {
    fn from(value: Size<T>) -> Self {
        Self::new(T::default(), T::default(), value.w, value.h)
    }
}

/// Image size in pixels.
#[derive(Default, Constructor, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<T> From<(T, T)> for Size<T> {
    fn from((w, h): (T, T)) -> Self {
        Self::new(w, h)
    }
}
