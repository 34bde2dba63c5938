use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use texpak_geometry::Rect;
use thiserror::Error;

use crate::image::RgbaImage;

mod pak;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("failed to open atlas file {path:?}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The token stream ended inside a record, or a numeric field did
    /// not parse.
    #[error("malformed record {record}: {reason}")]
    MalformedRecord { record: usize, reason: &'static str },

    #[error("failed to load referenced image {path:?}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: lodepng::Error,
    },

    /// Embedded pixel data failed to decompress, or decompressed to a
    /// size other than `width * height * 4`.
    #[error("failed to decode embedded image in record {record}: {reason}")]
    Decode { record: usize, reason: String },

    /// The file contains an embedded data block, but zlib support is
    /// compiled out.
    #[error("atlas file contains zlib-compressed image data, but the `zlib` feature is disabled")]
    UnsupportedFormat,

    /// The file opened and parsed cleanly, but contains no records.
    #[error("atlas file {path:?} contains no records")]
    Empty { path: PathBuf },
}

/// One atlas image and the named regions packed into it.
///
/// Built by the pack parser; immutable afterwards.
#[derive(Debug)]
pub struct Atlas {
    image: RgbaImage,
    table: HashMap<String, Rect<i32>>,
}

impl Atlas {
    fn new(image: RgbaImage, table: HashMap<String, Rect<i32>>) -> Self {
        Self { image, table }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// The region registered under `name`, if any.
    pub fn rect(&self, name: &str) -> Option<Rect<i32>> {
        self.table.get(name).copied()
    }

    /// Names of every region in this atlas, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// A named region of an atlas image.
///
/// Borrows the pixel data from the [`TextureAtlas`] that owns it, so it
/// cannot outlive the atlas.
#[derive(Debug, Clone, Copy)]
pub struct SubTexture<'a> {
    pub image: &'a RgbaImage,
    pub rect: Rect<i32>,
}

/// Every atlas loaded from a single texture pack file, in file order.
///
/// One of these normally serves a whole application: rendering code
/// looks regions up by the name the packer recorded for them.
#[derive(Debug, Default)]
pub struct TextureAtlas {
    atlases: Vec<Atlas>,
}

impl TextureAtlas {
    /// Loads a texture pack file.
    ///
    /// Referenced images are resolved relative to the directory of
    /// `path`. Codec failures abort the whole load; a record cut off
    /// at the end of the file is discarded rather than kept
    /// half-built. Loading fails unless at least one complete record
    /// remains, so a returned value always holds at least one atlas.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AtlasError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| AtlasError::FileOpen {
            path: path.to_owned(),
            source,
        })?;

        let dir = path.parent().unwrap_or(Path::new(""));
        let atlases = pak::parse(&bytes, dir)?;

        if atlases.is_empty() {
            return Err(AtlasError::Empty {
                path: path.to_owned(),
            });
        }

        log::debug!("loaded {} atlas(es) from {:?}", atlases.len(), path);
        Ok(Self { atlases })
    }

    /// Looks `name` up across every atlas, in load order.
    ///
    /// When several atlases define the same name, the first one in file
    /// order wins; shadowed entries stay reachable only through
    /// [`TextureAtlas::atlases`].
    pub fn find_sub_texture(&self, name: &str) -> Option<SubTexture<'_>> {
        self.atlases.iter().find_map(|atlas| {
            atlas.rect(name).map(|rect| SubTexture {
                image: atlas.image(),
                rect,
            })
        })
    }

    /// Every sub-texture name in the pack, including duplicates defined
    /// by more than one atlas.
    pub fn sub_texture_names(&self) -> Vec<String> {
        self.atlases
            .iter()
            .flat_map(|atlas| atlas.names().map(str::to_owned))
            .collect()
    }

    /// The loaded atlases in file order.
    pub fn atlases(&self) -> &[Atlas] {
        &self.atlases
    }
}
