use std::fs;
use std::path::Path;

use proptest::prelude::*;

use speckle_core::error::SpeckleError;
use speckle_core::io::frames::{frame_index, list_frames, reference_entry, sort_frame_names};

#[test]
fn test_frame_index_parses_first_digit_run() {
    assert_eq!(frame_index("frame_0.png").unwrap(), 0);
    assert_eq!(frame_index("frame_12.png").unwrap(), 12);
    assert_eq!(frame_index("007.tif").unwrap(), 7);
    assert_eq!(frame_index("cam2_frame_7.png").unwrap(), 2);
}

#[test]
fn test_frame_index_without_digit_is_error() {
    match frame_index("notes.txt") {
        Err(SpeckleError::MalformedFrameName(name)) => assert_eq!(name, "notes.txt"),
        other => panic!("expected MalformedFrameName, got {other:?}"),
    }
}

#[test]
fn test_frame_index_overflow_is_error() {
    assert!(frame_index("frame_99999999999999999999999.png").is_err());
}

#[test]
fn test_sort_is_numeric_not_lexicographic() {
    let names = ["frame_10.png", "frame_2.png", "frame_1.png"];
    let sorted = sort_frame_names(Path::new("exp"), &names).unwrap();
    let order: Vec<_> = sorted.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(order, ["frame_1.png", "frame_2.png", "frame_10.png"]);
    assert_eq!(sorted[2].path, Path::new("exp").join("frame_10.png"));
    assert_eq!(sorted[2].index, 10);
}

#[test]
fn test_sort_fails_on_malformed_name() {
    let names = ["frame_1.png", "README"];
    assert!(matches!(
        sort_frame_names(Path::new("exp"), &names),
        Err(SpeckleError::MalformedFrameName(_))
    ));
}

#[test]
fn test_sort_ties_are_deterministic() {
    let a = sort_frame_names(Path::new("."), &["frame_1.tif", "frame_1.png"]).unwrap();
    let b = sort_frame_names(Path::new("."), &["frame_1.png", "frame_1.tif"]).unwrap();
    assert_eq!(a, b);
    assert_eq!(a[0].file_name, "frame_1.png");
}

#[test]
fn test_list_frames_skips_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["frame_3.png", "frame_0.png", "frame_11.png"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    fs::create_dir(dir.path().join("thumbs")).unwrap();

    let frames = list_frames(dir.path()).unwrap();
    let indices: Vec<_> = frames.iter().map(|f| f.index).collect();
    assert_eq!(indices, [0, 3, 11]);
}

#[test]
fn test_reference_entry_missing() {
    let frames = sort_frame_names(Path::new("exp"), &["frame_1.png", "frame_2.png"]).unwrap();
    assert!(matches!(
        reference_entry(Path::new("exp"), &frames),
        Err(SpeckleError::MissingReferenceFrame(_))
    ));
}

#[test]
fn test_reference_entry_found() {
    let frames = sort_frame_names(Path::new("exp"), &["frame_1.png", "frame_0.png"]).unwrap();
    let reference = reference_entry(Path::new("exp"), &frames).unwrap();
    assert_eq!(reference.file_name, "frame_0.png");
}

proptest! {
    #[test]
    fn prop_sorted_indices_are_non_decreasing(
        indices in prop::collection::vec(0u32..100_000, 0..40),
    ) {
        let names: Vec<String> = indices.iter().map(|i| format!("frame_{i}.png")).collect();
        let sorted = sort_frame_names(Path::new("."), &names).unwrap();

        prop_assert_eq!(sorted.len(), names.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].index <= pair[1].index);
        }
    }
}
