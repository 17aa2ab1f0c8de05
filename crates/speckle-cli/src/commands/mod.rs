pub mod config;
pub mod measure;
pub mod run;

use std::path::Path;

use anyhow::{bail, Context, Result};
use speckle_core::io::crop::RoiRect;
use speckle_core::pipeline::config::{AnalysisConfig, FrameSize};

/// Load a TOML config file, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid analysis config")
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Parse `X,Y,WIDTH,HEIGHT`.
pub fn parse_roi(s: &str) -> Result<RoiRect> {
    let parts: Vec<u32> = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid ROI '{s}'"))?;
    let [x, y, width, height] = parts[..] else {
        bail!("ROI must be X,Y,WIDTH,HEIGHT, got '{s}'");
    };
    Ok(RoiRect {
        x,
        y,
        width,
        height,
    })
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_frame_size(s: &str) -> Result<FrameSize> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        bail!("Frame size must be WIDTHxHEIGHT, got '{s}'");
    };
    Ok(FrameSize {
        width: w.trim().parse().with_context(|| format!("Invalid width in '{s}'"))?,
        height: h.trim().parse().with_context(|| format!("Invalid height in '{s}'"))?,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_parse_roi() {
        let roi = parse_roi("300, 208,128,64").unwrap();
        assert_eq!(
            roi,
            RoiRect {
                x: 300,
                y: 208,
                width: 128,
                height: 64
            }
        );
        assert!(parse_roi("1,2,3").is_err());
        assert!(parse_roi("1,2,3,-4").is_err());
    }

    #[test]
    fn test_parse_frame_size() {
        let size = parse_frame_size("728x544").unwrap();
        assert_eq!((size.width, size.height), (728, 544));
        assert!(parse_frame_size("728").is_err());
        assert!(parse_frame_size("axb").is_err());
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        assert_eq!(load_config(None).unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speckle.toml");
        std::fs::write(&path, "input = \"a\"\noutput = \"b\"\nmode = \"Calibration\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.input, PathBuf::from("a"));
        assert_eq!(
            config.mode,
            speckle_core::pipeline::config::OutputMode::Calibration
        );
    }
}
