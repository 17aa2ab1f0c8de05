use console::Style;
use speckle_core::pipeline::config::AnalysisConfig;
use speckle_core::pipeline::BatchSummary;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red().bold(),
        }
    }
}

pub fn print_run_summary(config: &AnalysisConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Speckle Batch"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    match config.annotated_output {
        Some(ref dir) => println!(
            "  {:<14}{}",
            s.label.apply_to("Annotated"),
            s.path.apply_to(dir.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Annotated"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(config.mode)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("On failure"),
        s.method.apply_to(config.on_failure)
    );
    println!();

    // Geometry
    println!("  {}", s.header.apply_to("Geometry"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Frame"),
        s.value.apply_to(format!(
            "{}x{}",
            config.frame_size.width, config.frame_size.height
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Template"),
        s.value.apply_to(format!(
            "{}x{} at ({}, {})",
            config.roi.width, config.roi.height, config.roi.x, config.roi.y
        ))
    );
    println!();

    // Calibration
    let cal = &config.calibration;
    println!("  {}", s.header.apply_to("Calibration"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Txx, Txy"),
        s.value.apply_to(format!("{}, {}", cal.txx, cal.txy))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Tyx, Tyy"),
        s.value.apply_to(format!("{}, {}", cal.tyx, cal.tyy))
    );
    println!();
}

pub fn print_batch_summary(summary: &BatchSummary) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Results"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Experiments"),
        s.value.apply_to(summary.experiments.len())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(summary.frames_processed())
    );
    for report in &summary.experiments {
        println!("      {}", s.path.apply_to(report.csv_path.display()));
    }

    if summary.failures.is_empty() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Failures"),
            s.disabled.apply_to("none")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Failures"),
            s.error.apply_to(summary.failures.len())
        );
        for failure in &summary.failures {
            println!("      {}", s.error.apply_to(failure));
        }
        if summary.aborted {
            println!("    {}", s.disabled.apply_to("stopped after first failure"));
        }
    }
    println!();
}
