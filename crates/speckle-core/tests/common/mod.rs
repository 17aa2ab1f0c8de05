#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use ndarray::Array2;

use speckle_core::io::crop::RoiRect;
use speckle_core::pipeline::config::{AnalysisConfig, FrameSize};

pub const TEST_WIDTH: u32 = 64;
pub const TEST_HEIGHT: u32 = 48;

/// Template centred in a 64x48 frame: (24 + 8) - 32 = 0, (16 + 8) - 24 = 0.
pub const TEST_ROI: RoiRect = RoiRect {
    x: 24,
    y: 16,
    width: 16,
    height: 16,
};

/// Deterministic pseudo-random gray level for a scene coordinate.
pub fn speckle_value(x: i64, y: i64) -> u8 {
    let mut h = (x as u32).wrapping_mul(0x9E37_79B1) ^ (y as u32).wrapping_mul(0x85EB_CA77);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297A_2D39);
    h ^= h >> 15;
    (h & 0xFF) as u8
}

/// A speckle scene seen by a sensor that moved so the scene appears shifted
/// by `(dx, dy)` pixels.
pub fn speckle_frame(width: u32, height: u32, dx: i64, dy: i64) -> Array2<f32> {
    Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        speckle_value(c as i64 - dx, r as i64 - dy) as f32
    })
}

/// Write an array of gray levels as an 8-bit PNG.
pub fn write_gray_png(path: &Path, data: &Array2<f32>) {
    let (h, w) = data.dim();
    let img = GrayImage::from_fn(w as u32, h as u32, |x, y| {
        Luma([data[[y as usize, x as usize]].clamp(0.0, 255.0) as u8])
    });
    img.save(path).expect("write test png");
}

/// Populate one experiment folder with `frames` shifted speckle frames.
/// Frame `i` is shifted by `(i, -i)`.
pub fn write_experiment(dir: &Path, frames: usize) {
    fs::create_dir_all(dir).expect("create experiment dir");
    for i in 0..frames {
        let data = speckle_frame(TEST_WIDTH, TEST_HEIGHT, i as i64, -(i as i64));
        write_gray_png(&dir.join(format!("frame_{i}.png")), &data);
    }
}

/// Build a `gains x movements x exposures` tree with `frames` frames per
/// experiment and return the experiment folders in walk order.
pub fn build_tree(
    root: &Path,
    gains: usize,
    movements: usize,
    exposures: usize,
    frames: usize,
) -> Vec<PathBuf> {
    let mut leaves = Vec::new();
    for g in 0..gains {
        for m in 0..movements {
            for e in 0..exposures {
                let dir = root
                    .join(format!("Gain_{}", g + 1))
                    .join(format!("Move_{}", m + 1))
                    .join(format!("Exp_{}", e + 1));
                write_experiment(&dir, frames);
                leaves.push(dir);
            }
        }
    }
    leaves
}

/// Config sized for the synthetic frames.
pub fn test_config(input: &Path, output: &Path) -> AnalysisConfig {
    AnalysisConfig {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        roi: TEST_ROI,
        frame_size: FrameSize {
            width: TEST_WIDTH,
            height: TEST_HEIGHT,
        },
        ..Default::default()
    }
}
