use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::consts::EXPERIMENT_DEPTH;
use crate::error::{Result, SpeckleError};

/// A leaf folder of the input tree: `<root>/<gain>/<movement>/<exposure>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperimentDir {
    pub gain: String,
    pub movement: String,
    pub exposure: String,
    /// Absolute or root-relative path of the exposure folder.
    pub path: PathBuf,
}

impl ExperimentDir {
    /// `gain/movement/exposure`, used to mirror the folder into output trees.
    pub fn relative_path(&self) -> PathBuf {
        [&self.gain, &self.movement, &self.exposure].iter().collect()
    }
}

impl std::fmt::Display for ExperimentDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.gain, self.movement, self.exposure)
    }
}

struct Pending {
    path: PathBuf,
    labels: Vec<String>,
}

/// Lazy depth-first enumeration of experiment folders.
///
/// Each level is visited in lexicographic name order. Entries that are not
/// directories are skipped. A folder that cannot be listed yields one `Err`
/// and the walk carries on with its siblings.
pub struct ExperimentWalker {
    stack: Vec<Pending>,
}

impl Iterator for ExperimentWalker {
    type Item = Result<ExperimentDir>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pending) = self.stack.pop() {
            if pending.labels.len() == EXPERIMENT_DEPTH {
                let mut labels = pending.labels.into_iter();
                let (gain, movement, exposure) = (labels.next()?, labels.next()?, labels.next()?);
                return Some(Ok(ExperimentDir {
                    gain,
                    movement,
                    exposure,
                    path: pending.path,
                }));
            }

            debug!(path = %pending.path.display(), level = pending.labels.len(), "Inside folder");
            let children = match subdirectories(&pending.path) {
                Ok(children) => children,
                Err(e) => return Some(Err(e)),
            };

            // Reverse so the lexicographically first child is popped next.
            for (name, path) in children.into_iter().rev() {
                let mut labels = pending.labels.clone();
                labels.push(name);
                self.stack.push(Pending { path, labels });
            }
        }
        None
    }
}

/// Start walking the three-level tree under `root`.
pub fn walk_experiments(root: &Path) -> Result<ExperimentWalker> {
    if !root.is_dir() {
        return Err(SpeckleError::InputRootMissing(root.to_path_buf()));
    }
    info!(root = %root.display(), "Input directory found");

    Ok(ExperimentWalker {
        stack: vec![Pending {
            path: root.to_path_buf(),
            labels: Vec::new(),
        }],
    })
}

/// Immediate subdirectories of `dir`, sorted by name.
fn subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let read_err = |source| SpeckleError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name() {
            dirs.push((name.to_string_lossy().into_owned(), path));
        }
    }
    dirs.sort();
    Ok(dirs)
}
