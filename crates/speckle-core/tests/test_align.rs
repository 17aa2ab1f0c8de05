mod common;

use ndarray::Array2;
use proptest::prelude::*;

use speckle_core::align::{locate, match_template};
use speckle_core::error::SpeckleError;
use speckle_core::frame::Frame;
use speckle_core::io::crop::extract_template;

use common::{speckle_frame, speckle_value, TEST_HEIGHT, TEST_ROI, TEST_WIDTH};

fn direct_ncc(image: &Array2<f32>, template: &Array2<f32>, x: usize, y: usize) -> f64 {
    let (th, tw) = template.dim();
    let (mut cross, mut t2, mut i2) = (0.0f64, 0.0f64, 0.0f64);
    for r in 0..th {
        for c in 0..tw {
            let t = template[[r, c]] as f64;
            let i = image[[y + r, x + c]] as f64;
            cross += t * i;
            t2 += t * t;
            i2 += i * i;
        }
    }
    cross / (t2 * i2).sqrt()
}

#[test]
fn test_template_found_in_its_own_frame() {
    let frame = Frame::new(speckle_frame(TEST_WIDTH, TEST_HEIGHT, 0, 0), 0);
    let template = extract_template(&frame, &TEST_ROI).unwrap();

    let m = locate(&frame, &template).unwrap();
    assert_eq!((m.x, m.y), (TEST_ROI.x, TEST_ROI.y));
    assert_eq!((m.shift_x, m.shift_y), (0, 0));
    assert!(
        (m.confidence - 100.0).abs() < 1e-6,
        "confidence {} should be 100",
        m.confidence
    );
    assert!((m.score - 1.0).abs() < 1e-8);
}

#[test]
fn test_known_shift_is_recovered() {
    let reference = Frame::new(speckle_frame(TEST_WIDTH, TEST_HEIGHT, 0, 0), 0);
    let template = extract_template(&reference, &TEST_ROI).unwrap();

    // Scene moved 3 px right and 2 px up.
    let moved = Frame::new(speckle_frame(TEST_WIDTH, TEST_HEIGHT, 3, -2), 1);
    let m = locate(&moved, &template).unwrap();

    assert_eq!((m.x, m.y), (TEST_ROI.x + 3, TEST_ROI.y - 2));
    assert_eq!(m.shift_x, 3);
    assert_eq!(m.shift_y, -2);
    assert!(m.confidence > 99.99);
}

#[test]
fn test_shift_is_relative_to_frame_centre() {
    // Template taken from the top-left corner of a 64x48 frame.
    let frame = Frame::new(speckle_frame(TEST_WIDTH, TEST_HEIGHT, 0, 0), 0);
    let roi = speckle_core::io::crop::RoiRect {
        x: 0,
        y: 0,
        width: 10,
        height: 7,
    };
    let template = extract_template(&frame, &roi).unwrap();

    let m = locate(&frame, &template).unwrap();
    // (0 + 10/2) - 64/2 = -27 ; (0 + 7/2) - 48/2 = -21
    assert_eq!((m.shift_x, m.shift_y), (-27, -21));
}

#[test]
fn test_surface_matches_direct_formula() {
    let image = speckle_frame(13, 11, 5, 2);
    let template = speckle_frame(4, 3, -1, 7);

    let scores = match_template(&image, &template).unwrap();
    assert_eq!(scores.dim(), (11 - 3 + 1, 13 - 4 + 1));

    for ((y, x), &score) in scores.indexed_iter() {
        let expected = direct_ncc(&image, &template, x, y);
        assert!(
            (score - expected).abs() < 1e-9,
            "({x},{y}): {score} vs {expected}"
        );
    }
}

#[test]
fn test_template_larger_than_frame_is_error() {
    let image = Array2::<f32>::from_elem((8, 8), 10.0);
    let template = Array2::<f32>::from_elem((9, 4), 10.0);
    assert!(matches!(
        match_template(&image, &template),
        Err(SpeckleError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_empty_input_is_error() {
    let image = Array2::<f32>::zeros((0, 0));
    let template = Array2::<f32>::from_elem((1, 1), 10.0);
    assert!(matches!(
        match_template(&image, &template),
        Err(SpeckleError::EmptyFrame(_))
    ));
}

#[test]
fn test_black_template_scores_zero() {
    let frame = Frame::new(speckle_frame(20, 20, 0, 0), 0);
    let template = Frame::new(Array2::<f32>::zeros((5, 5)), 0);
    let m = locate(&frame, &template).unwrap();
    assert_eq!(m.confidence, 0.0);
    assert_eq!((m.x, m.y), (0, 0));
}

#[test]
fn test_black_window_scores_zero() {
    let mut image = Array2::<f32>::zeros((10, 10));
    image[[9, 9]] = 255.0;
    let template = Array2::<f32>::from_elem((3, 3), 50.0);

    let scores = match_template(&image, &template).unwrap();
    assert_eq!(scores[[0, 0]], 0.0);
    assert!(scores[[7, 7]] > 0.0);
}

#[test]
fn test_disjoint_supports_never_score_negative() {
    // Image lit only in its right half, template only in its left half:
    // the single valid position has no overlapping light.
    let (rows, cols) = (53, 37);
    for seed in 0..50i64 {
        let image = Array2::from_shape_fn((rows, cols), |(r, c)| {
            if c >= cols / 2 {
                f32::from(speckle_value(c as i64 + seed, r as i64).max(1))
            } else {
                0.0
            }
        });
        let template = Array2::from_shape_fn((rows, cols), |(r, c)| {
            if c < cols / 2 {
                f32::from(speckle_value(r as i64, c as i64 - seed).max(1))
            } else {
                0.0
            }
        });

        let scores = match_template(&image, &template).unwrap();
        assert_eq!(scores.dim(), (1, 1));
        assert!(scores[[0, 0]] >= 0.0, "seed {seed}: {}", scores[[0, 0]]);

        let m = locate(&Frame::new(image, 0), &Frame::new(template, 0)).unwrap();
        assert!(m.confidence >= 0.0, "seed {seed}: {}", m.confidence);
        assert!(m.confidence < 1e-6, "seed {seed}: {}", m.confidence);
    }
}

#[test]
fn test_signed_inputs_keep_negative_scores() {
    let sign = |r: usize, c: usize| if (r + c) % 2 == 0 { 1.0f32 } else { -1.0 };
    let image = Array2::from_shape_fn((4, 4), |(r, c)| sign(r, c));
    let template = Array2::from_shape_fn((2, 2), |(r, c)| -sign(r, c));

    let scores = match_template(&image, &template).unwrap();
    assert!((scores[[0, 0]] + 1.0).abs() < 1e-9, "{}", scores[[0, 0]]);
}

proptest! {
    #[test]
    fn prop_confidence_is_a_percentage(
        image in prop::collection::vec(any::<u8>(), 12 * 10),
        template in prop::collection::vec(any::<u8>(), 5 * 4),
    ) {
        let image: Vec<f32> = image.into_iter().map(f32::from).collect();
        let template: Vec<f32> = template.into_iter().map(f32::from).collect();
        let image = Array2::from_shape_vec((10, 12), image).unwrap();
        let template = Array2::from_shape_vec((4, 5), template).unwrap();

        let m = locate(&Frame::new(image, 0), &Frame::new(template, 0)).unwrap();
        prop_assert!(m.confidence >= 0.0, "confidence {}", m.confidence);
        prop_assert!(m.confidence <= 100.0, "confidence {}", m.confidence);
    }
}
