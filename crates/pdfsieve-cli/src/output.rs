use std::io::Write;

use owo_colors::OwoColorize;
use pdfsieve_core::{AggregateFailure, FailureReason};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the success line with the output path.
pub fn print_success(
    w: &mut dyn Write,
    output_path: &std::path::Path,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "\n{} Text extracted to: {}",
            "OK".bold().green(),
            output_path.display()
        )
    } else {
        writeln!(w, "\nOK Text extracted to: {}", output_path.display())
    }
}

/// Print the per-method failure breakdown plus remediation guidance.
pub fn print_failure_report(
    w: &mut dyn Write,
    failure: &AggregateFailure,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "\n{}", "Extraction failed.".bold().red())?;
    } else {
        writeln!(w, "\nExtraction failed.")?;
    }

    if failure.attempts.is_empty() {
        writeln!(w, "No extraction method was attempted.")?;
    } else {
        writeln!(w, "Methods tried:")?;
        for attempt in &failure.attempts {
            let reason = attempt.reason.to_string();
            if color.enabled() {
                let tag = match attempt.reason {
                    FailureReason::Unavailable(_) => "unavailable".yellow().to_string(),
                    FailureReason::Failed(_) => "failed".red().to_string(),
                    FailureReason::LowQuality(_) => "low quality".yellow().to_string(),
                };
                let detail = reason.split_once(": ").map(|(_, d)| d).unwrap_or(&reason);
                writeln!(w, "  {:<12} {} ({})", attempt.method.to_string(), tag, detail)?;
            } else {
                writeln!(w, "  {:<12} {}", attempt.method.to_string(), reason)?;
            }
        }
    }

    writeln!(w, "\nPossible causes:")?;
    writeln!(w, "  1. The PDF is a scan (image-only, no text layer)")?;
    writeln!(w, "  2. The PDF is encrypted or protected")?;
    writeln!(w, "  3. The pdfium native library is not installed")?;
    writeln!(w, "  4. The file is corrupted")?;
    writeln!(w, "\nSuggestions:")?;
    writeln!(
        w,
        "  1. Install libpdfium or place the platform library next to the executable"
    )?;
    writeln!(w, "  2. Try a specific method: pdfsieve file.pdf -m lopdf")?;
    writeln!(w, "  3. For scanned documents, use an OCR tool instead")?;
    Ok(())
}
