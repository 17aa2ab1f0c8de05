use std::path::Path;

use tracing::{debug, info};

use crate::align::locate;
use crate::consts::{ANNOTATION_THICKNESS, ANNOTATION_VALUE};
use crate::error::{Result, SpeckleError};
use crate::frame::{Frame, FrameMetrics};
use crate::io::crop::extract_template;
use crate::io::frames::{list_frames, reference_entry};
use crate::io::image_io::{draw_rectangle, load_gray, save_png};
use crate::io::results::{ensure_dir, ResultWriter};
use crate::io::walker::ExperimentDir;
use crate::quality::mean_intensity_gradient;

use super::config::{AnalysisConfig, FrameSize, OutputMode};
use super::types::{ExperimentReport, ProgressReporter};

/// Fail if a frame does not have the configured sensor dimensions.
pub fn check_frame_size(frame: &Frame, expected: &FrameSize) -> Result<()> {
    let (w, h) = (frame.width() as u32, frame.height() as u32);
    if w != expected.width || h != expected.height {
        return Err(SpeckleError::FrameSizeMismatch {
            expected_width: expected.width,
            expected_height: expected.height,
            actual_width: w,
            actual_height: h,
        });
    }
    Ok(())
}

/// Match the template in one frame, convert the shift and measure sharpness.
pub fn measure_frame(
    frame: &Frame,
    file_name: &str,
    template: &Frame,
    config: &AnalysisConfig,
) -> Result<FrameMetrics> {
    let matched = locate(frame, template)?;
    let displacement = match config.mode {
        OutputMode::Measurement => Some(
            config
                .calibration
                .to_millimetres(matched.shift_x as f64, matched.shift_y as f64)?,
        ),
        OutputMode::Calibration => None,
    };
    let mig = mean_intensity_gradient(frame)?;

    debug!(
        frame = frame.index,
        shift_x = matched.shift_x,
        shift_y = matched.shift_y,
        confidence = matched.confidence,
        mig,
        "Frame measured"
    );

    Ok(FrameMetrics {
        frame_index: frame.index,
        file_name: file_name.to_string(),
        matched,
        displacement,
        mig,
    })
}

/// Process one experiment folder and write its results table.
///
/// Frames are loaded, measured and released one at a time, in index order.
pub fn process_experiment(
    config: &AnalysisConfig,
    experiment: &ExperimentDir,
    reporter: &dyn ProgressReporter,
) -> Result<ExperimentReport> {
    info!(experiment = %experiment, path = %experiment.path.display(), "Inside experiment folder");

    let relative = experiment.relative_path();
    let out_dir = config.output.join(&relative);
    let dir_status = ensure_dir(&out_dir)?;

    let annotated_dir = match &config.annotated_output {
        Some(root) => {
            let dir = root.join(&relative);
            ensure_dir(&dir)?;
            Some(dir)
        }
        None => None,
    };

    let frames = list_frames(&experiment.path)?;
    let reference = reference_entry(&experiment.path, &frames)?;
    let reference_frame = load_gray(&reference.path, reference.index)?;
    check_frame_size(&reference_frame, &config.frame_size)?;
    let template = extract_template(&reference_frame, &config.roi)?;
    drop(reference_frame);

    let mut writer = ResultWriter::create(&out_dir.join(&config.results_file_name))?;

    reporter.begin_experiment(experiment, frames.len());
    let outcome = frames.iter().enumerate().try_for_each(|(done, entry)| {
        debug!(path = %entry.path.display(), "Reading image");
        let frame = load_gray(&entry.path, entry.index)?;
        check_frame_size(&frame, &config.frame_size)?;

        let metrics = measure_frame(&frame, &entry.file_name, &template, config)?;
        writer.write_row(&metrics)?;

        if let Some(dir) = &annotated_dir {
            save_annotated(frame, &metrics, &template, &dir.join(&entry.file_name))?;
        }

        reporter.advance(done + 1);
        Ok::<(), SpeckleError>(())
    });
    reporter.finish_experiment();
    outcome?;

    let rows = writer.rows_written();
    let csv_path = writer.finish()?;
    info!(experiment = %experiment, frames = rows, csv = %csv_path.display(), "Experiment done");

    Ok(ExperimentReport {
        experiment: experiment.clone(),
        csv_path,
        frames: rows,
        dir_status,
    })
}

/// Save the frame as PNG with the matched template outlined.
fn save_annotated(
    mut frame: Frame,
    metrics: &FrameMetrics,
    template: &Frame,
    path: &Path,
) -> Result<()> {
    draw_rectangle(
        &mut frame,
        metrics.matched.x,
        metrics.matched.y,
        template.width() as u32,
        template.height() as u32,
        ANNOTATION_THICKNESS,
        ANNOTATION_VALUE,
    );
    save_png(&frame, &path.with_extension("png"))
}
