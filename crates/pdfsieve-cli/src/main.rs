use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use pdfsieve_core::backends::{LopdfBackend, PdfExtractBackend};
use pdfsieve_core::{
    ExtractError, Extractor, Method, MethodSelector, PdfDocument, TracingSink,
};
use pdfsieve_pdfium::PdfiumBackend;

mod output;

use output::ColorMode;

/// Extract plain text from PDF documents, falling back across extraction
/// backends until one yields acceptable output
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF file
    pdf_file: PathBuf,

    /// Output text file path (default: <input-basename>_extracted.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extraction method
    #[arg(short, long, value_enum, default_value = "auto")]
    method: MethodArg,

    /// Verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Persistent log file
    #[arg(long, default_value = "pdfsieve.log")]
    log_file: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum MethodArg {
    /// Try every method in priority order
    #[value(alias = "automatic")]
    Auto,
    Pdfium,
    Lopdf,
    PdfExtract,
}

impl MethodArg {
    fn selector(self) -> MethodSelector {
        match self {
            MethodArg::Auto => MethodSelector::Auto,
            MethodArg::Pdfium => MethodSelector::Only(Method::Pdfium),
            MethodArg::Lopdf => MethodSelector::Only(Method::Lopdf),
            MethodArg::PdfExtract => MethodSelector::Only(Method::PdfExtract),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, &cli.log_file)?;
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let color = ColorMode(!cli.no_color);
    let mut stdout = std::io::stdout();
    let start = Instant::now();

    let doc = match PdfDocument::open(&cli.pdf_file) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!("{}", e);
            anyhow::bail!("{}", e);
        }
    };

    tracing::info!(
        "starting extraction: {} ({:.2} MB)",
        doc.path().display(),
        doc.size_mb()
    );

    // The full fixed priority list; explicit -m selection narrows it to
    // one method inside the orchestrator.
    let extractor = Extractor::new(vec![
        Box::new(PdfiumBackend::new()),
        Box::new(LopdfBackend::new()),
        Box::new(PdfExtractBackend::new()),
    ]);

    let extraction = match extractor.extract(&doc, cli.method.selector(), &TracingSink) {
        Ok(extraction) => extraction,
        Err(failure) => {
            tracing::error!("{}", failure);
            output::print_failure_report(&mut stdout, &failure, color)?;
            stdout.flush()?;
            return Err(ExtractError::Exhausted(failure).into());
        }
    };

    let text = extraction.to_text();
    tracing::info!(
        "extraction complete: {} non-empty lines, {} characters (method: {})",
        extraction.content_line_count(),
        text.chars().count(),
        extraction.method
    );

    let output_path = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.pdf_file));
    write_output(&output_path, &text)?;
    tracing::info!("text saved to: {}", output_path.display());
    tracing::info!("done in {:.2} s", start.elapsed().as_secs_f64());

    output::print_success(&mut stdout, &output_path, color)?;
    stdout.flush()?;
    Ok(())
}

/// `<input-basename>_extracted.txt`, in the current directory.
fn default_output_path(pdf_file: &Path) -> PathBuf {
    let stem = pdf_file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("{}_extracted.txt", stem))
}

/// Write the extracted text, creating parent directories as needed.
fn write_output(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, text)
        .with_context(|| format!("failed to write output file {}", path.display()))
}

/// Console (stderr) plus persistent-file logging for one invocation.
///
/// `RUST_LOG` overrides the default level; `--verbose` lowers it to
/// debug. The returned guard must stay alive so the non-blocking file
/// writer flushes on exit.
fn init_logging(
    verbose: bool,
    log_file: &Path,
) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let log_dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let log_name = log_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "pdfsieve.log".to_string());
    let appender = tracing_appender::rolling::never(log_dir, log_name);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(guard)
}
