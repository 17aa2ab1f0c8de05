use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::REFERENCE_FRAME_INDEX;
use crate::error::{Result, SpeckleError};

/// An image file inside an experiment folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameEntry {
    pub index: u64,
    pub file_name: String,
    pub path: PathBuf,
}

/// Parse the frame index embedded in a file name.
///
/// The index is the run of digits starting at the first digit, so
/// `frame_12.png` is 12 and `cam2_frame_7.png` is 2.
pub fn frame_index(file_name: &str) -> Result<u64> {
    let start = file_name
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| SpeckleError::MalformedFrameName(file_name.to_string()))?;
    let digits: &str = &file_name[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse()
        .map_err(|_| SpeckleError::MalformedFrameName(file_name.to_string()))
}

/// Order file names by their embedded frame index.
///
/// Names sharing an index keep lexicographic order, so the result does not
/// depend on the order the names were supplied in.
pub fn sort_frame_names<S: AsRef<str>>(dir: &Path, names: &[S]) -> Result<Vec<FrameEntry>> {
    let mut entries = names
        .iter()
        .map(|name| {
            let file_name = name.as_ref().to_string();
            Ok(FrameEntry {
                index: frame_index(&file_name)?,
                path: dir.join(&file_name),
                file_name,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    entries.sort_by_key(|e| e.index);
    Ok(entries)
}

/// List the regular files of an experiment folder in frame order.
pub fn list_frames(dir: &Path) -> Result<Vec<FrameEntry>> {
    let read_err = |source| SpeckleError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    sort_frame_names(dir, &names)
}

/// The first frame carrying index 0.
pub fn reference_entry<'a>(dir: &Path, frames: &'a [FrameEntry]) -> Result<&'a FrameEntry> {
    frames
        .iter()
        .find(|f| f.index == REFERENCE_FRAME_INDEX)
        .ok_or_else(|| SpeckleError::MissingReferenceFrame(dir.to_path_buf()))
}
