//! Prints every atlas and sub-texture in a texture pack file.
//!
//! Usage: cargo run --example dump -- path/to/pack.tpak

use anyhow::{Context, Result};
use texpak_assets::atlas::TextureAtlas;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: dump <pack file>")?;
    let atlas = TextureAtlas::load(&path)?;

    for (index, record) in atlas.atlases().iter().enumerate() {
        let size = record.image().size();
        println!(
            "atlas {index}: {}x{}, {} sub-textures",
            size.w,
            size.h,
            record.len()
        );

        let mut names: Vec<_> = record.names().collect();
        names.sort_unstable();
        for name in names {
            let rect = record.rect(name).unwrap();
            println!("  {name}: {},{} {}x{}", rect.x, rect.y, rect.w, rect.h);
        }
    }

    Ok(())
}
