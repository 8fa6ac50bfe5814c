#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// A PNG whose signature and 10x10 IHDR chunk are well formed, followed by
/// bytes that are not a valid chunk stream.
pub fn truncated_png_bytes() -> Vec<u8> {
    let mut bytes = vec![
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x00, 0x00, 0x0a, 0x08, 0x02, 0x00, 0x00, 0x00, 0x02,
        0x50, 0x58, 0xea,
    ];
    bytes.extend_from_slice(&[0xab; 21]);
    bytes
}

/// Writes `<dir>/<base>.json` from `(char, [xmin, ymin, xmax, ymax])` pairs.
pub fn write_annotations(dir: &Path, base: &str, anns: &[(&str, [f64; 4])]) {
    fs::create_dir_all(dir).expect("create raw dir");
    let items: Vec<serde_json::Value> = anns
        .iter()
        .map(|(ch, bbox)| serde_json::json!({ "char": ch, "bbox": bbox }))
        .collect();
    fs::write(
        dir.join(format!("{base}.json")),
        serde_json::to_string(&items).expect("serialize annotations"),
    )
    .expect("write annotation file");
}

/// Seven Brahmi letters used across the end-to-end fixtures.
pub const LETTERS: [&str; 7] = ["𑀅", "𑀓", "𑀕", "𑀢", "𑀦", "𑀧", "𑀫"];

/// Ten `.bmp` + `.json` samples covering all seven letters, 100x200 images.
pub fn write_ten_sample_dataset(raw: &Path) {
    for i in 0..10 {
        let base = format!("page_{i:02}");
        let a = LETTERS[i % 7];
        let b = LETTERS[(i + 3) % 7];
        write_annotations(
            raw,
            &base,
            &[(a, [10.0, 20.0, 50.0, 80.0]), (b, [0.0, 0.0, 100.0, 200.0])],
        );
        write_bmp(&raw.join(format!("{base}.bmp")), 100, 200);
    }
}
