//! PNG encoding for RGBA pixel buffers.
//!
//! Map tiles are mostly flat fills with a handful of line colours, so the
//! encoder first tries an indexed PNG (color type 3) and only falls back to
//! full RGBA (color type 6) when the image has more than 256 colours.

use std::collections::HashMap;
use std::io::Write;

use crate::RenderError;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

type Palette = Vec<[u8; 4]>;

/// Encode RGBA pixels, choosing indexed or truecolor output automatically.
pub fn encode(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, RenderError> {
    check_len(pixels.len(), width * height * 4)?;

    match extract_palette(pixels) {
        Some((palette, indices)) => encode_indexed(width, height, &palette, &indices),
        None => encode_rgba(pixels, width, height),
    }
}

/// Encode RGBA pixels as a color type 6 PNG.
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, RenderError> {
    check_len(pixels.len(), width * height * 4)?;

    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &header(width, height, 6));

    let idat = deflate_rows(pixels, width * 4, height)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Encode palette indices as a color type 3 PNG.
pub fn encode_indexed(
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    indices: &[u8],
) -> Result<Vec<u8>, RenderError> {
    check_len(indices.len(), width * height)?;
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(RenderError::Encode(format!(
            "palette must hold 1..={} colors, got {}",
            MAX_PALETTE_SIZE,
            palette.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &header(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS only when some entry is not fully opaque
    if palette.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_rows(indices, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Build a palette and per-pixel indices, or `None` past 256 colors.
fn extract_palette(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let mut lookup: HashMap<[u8; 4], u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices = Vec::with_capacity(pixels.len() / 4);

    for px in pixels.chunks_exact(4) {
        let color = [px[0], px[1], px[2], px[3]];
        let index = match lookup.get(&color) {
            Some(&idx) => idx,
            None => {
                if palette.len() == MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push(color);
                lookup.insert(color, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

fn check_len(actual: usize, expected: usize) -> Result<(), RenderError> {
    if actual != expected {
        return Err(RenderError::Encode(format!(
            "buffer holds {} bytes, expected {}",
            actual, expected
        )));
    }
    Ok(())
}

fn header(width: usize, height: usize, color_type: u8) -> [u8; 13] {
    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&(width as u32).to_be_bytes());
    ihdr[4..8].copy_from_slice(&(height as u32).to_be_bytes());
    ihdr[8] = 8; // bit depth
    ihdr[9] = color_type;
    // compression, filter and interlace methods stay 0
    ihdr
}

/// Prefix every scanline with filter byte 0 and zlib-compress the result.
fn deflate_rows(data: &[u8], row_bytes: usize, height: usize) -> Result<Vec<u8>, RenderError> {
    let mut raw = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes.max(1)).take(height) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&raw).map_err(compression_failed)?;
    encoder.finish().map_err(compression_failed)
}

fn compression_failed(e: std::io::Error) -> RenderError {
    RenderError::Encode(format!("IDAT compression failed: {}", e))
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_palette_simple() {
        let pixels = [
            255, 0, 0, 255, // red
            0, 255, 0, 255, // green
            0, 0, 255, 255, // blue
            255, 0, 0, 255, // red again
        ];

        let (palette, indices) = extract_palette(&pixels).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(indices, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_extract_palette_too_many_colors() {
        let pixels: Vec<u8> = (0..300u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0, 255])
            .collect();
        assert!(extract_palette(&pixels).is_none());
    }

    #[test]
    fn test_signature_and_ihdr() {
        let png = encode(&[0, 0, 0, 255], 1, 1).unwrap();
        assert_eq!(&png[..8], &SIGNATURE);
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(png[16..20], 1u32.to_be_bytes());
        assert_eq!(png[25], 3); // indexed
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_many_colors_fall_back_to_rgba() {
        let (width, height) = (20usize, 20usize);
        let pixels: Vec<u8> = (0..(width * height) as u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 128, 255 - (i % 7) as u8])
            .collect();

        let png = encode(&pixels, width, height).unwrap();
        assert_eq!(png[25], 6); // truecolor with alpha

        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (20, 20));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn test_indexed_with_alpha_decodes() {
        let pixels = [10, 20, 30, 255, 10, 20, 30, 0, 200, 100, 50, 128, 10, 20, 30, 255];
        let png = encode(&pixels, 2, 2).unwrap();
        assert_eq!(png[25], 3);

        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.into_raw(), pixels.to_vec());
    }

    #[test]
    fn test_wrong_buffer_length() {
        assert!(matches!(
            encode(&[0, 0, 0], 1, 1),
            Err(RenderError::Encode(_))
        ));
    }
}
