// ----------------------------------------------------------------------------
// Demo-only heightmap storage and PNG loading, adapted from the teacher's
// `TerrainHeightMap` / `LoaderPlugin`: narrowed from 16-bit to 8-bit samples
// to match the `get_height(x, y) -> u8` callback contract, and with the ECS
// resource and async task plumbing stripped (this is not part of the core;
// it only exists to feed the demo binary a heightmap from the filesystem).
// ----------------------------------------------------------------------------
use std::fs::File;

use png::{BitDepth, ColorType, Decoder, Transformations};
use tracing::debug;
// ----------------------------------------------------------------------------
/// a square, row-major grid of 8-bit height samples.
pub struct Heightmap {
    size: u32,
    data: Vec<u8>,
}
// ----------------------------------------------------------------------------
impl Heightmap {
    // ------------------------------------------------------------------------
    pub fn size(&self) -> u32 {
        self.size
    }
    // ------------------------------------------------------------------------
    /// samples at integer grid coordinates, clamped to the valid range so a
    /// triangle vertex exactly on the domain edge never samples out of
    /// bounds.
    pub fn get(&self, x: i32, y: i32) -> u8 {
        let max = self.size as i32 - 1;
        let x = x.clamp(0, max) as u32;
        let y = y.clamp(0, max) as u32;
        self.data[(y * self.size + x) as usize]
    }
    // ------------------------------------------------------------------------
    /// loads an 8-bit grayscale PNG exactly `size` x `size` pixels.
    pub fn load_png(path: &str, size: u32) -> Result<Self, String> {
        debug!(path, size, "loading heightmap from PNG");
        let data = load_png_data(ColorType::Grayscale, BitDepth::Eight, size, path)?;
        Ok(Self { size, data })
    }
    // ------------------------------------------------------------------------
    /// a deterministic synthetic heightmap, for demos and tests that don't
    /// want to depend on a file on disk.
    pub fn generate_placeholder(size: u32) -> Self {
        debug!(size, "generating placeholder heightmap");
        let mut data = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let scale = 7.0 / size as f32 * (size as f32 / 256.0);
                let (x, y) = (x as f32, y as f32);
                let v = 1.0 + (scale * (x + 0.76 * y)).sin() * (scale * y / 2.0).cos();
                data.push(((u8::MAX / 4) as f32 * v) as u8);
            }
        }
        Self { size, data }
    }
    // ------------------------------------------------------------------------
}
// ----------------------------------------------------------------------------
fn load_png_data(colortype: ColorType, bitdepth: BitDepth, resolution: u32, filepath: &str) -> Result<Vec<u8>, String> {
    let file = File::open(filepath).map_err(|e| format!("failed to open file {}: {}", filepath, e))?;

    let mut decoder = Decoder::new(file);
    decoder.set_transformations(Transformations::IDENTITY);

    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("failed to decode png file {}: {}", filepath, e))?;

    let mut img_data = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut img_data)
        .map_err(|e| format!("failed to read image format info for {}: {}", filepath, e))?;

    if info.color_type != colortype || info.bit_depth != bitdepth {
        return Err(format!(
            "file {}: format must be {:?}-bit {:?}, found {:?}-bit {:?}",
            filepath, bitdepth, colortype, info.bit_depth, info.color_type
        ));
    }
    if info.width != resolution || info.height != resolution {
        return Err(format!(
            "file {}: expected {} x {}, found {} x {}",
            filepath, resolution, resolution, info.width, info.height
        ));
    }

    Ok(img_data)
}
