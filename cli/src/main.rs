//! pdf2md CLI - PDF to structured Markdown converter

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf2md::parser::{DEFAULT_HEADING_FONT_THRESHOLD, DEFAULT_LINE_SPACING_THRESHOLD};
use pdf2md::{convert_batch_with, BatchItem, Conversion, ConvertOptions, Converter, JsonFormat};

#[derive(Parser)]
#[command(name = "pdf2md")]
#[command(version)]
#[command(about = "Convert PDF documents to structured Markdown", long_about = None)]
#[command(after_help = "Examples:
  pdf2md document.pdf
  pdf2md research_paper.pdf --output paper.md
  pdf2md reports/*.pdf --out-dir markdown/ --verbose

Scanned PDFs carry no text layer; run them through OCR first.")]
struct Cli {
    /// Input PDF files (or .json span dumps)
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (single input only; default: <name>.md)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Directory for generated files (default: current directory)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Show stage diagnostics and detailed statistics
    #[arg(short, long)]
    verbose: bool,

    /// Font size above which a line becomes a heading
    #[arg(long, value_name = "PT", env = "PDF2MD_HEADING_THRESHOLD", default_value_t = DEFAULT_HEADING_FONT_THRESHOLD)]
    heading_threshold: f32,

    /// Line spacing multiplier for paragraph breaks
    #[arg(long, value_name = "FACTOR", env = "PDF2MD_LINE_SPACING_THRESHOLD", default_value_t = DEFAULT_LINE_SPACING_THRESHOLD)]
    line_spacing_threshold: f32,

    /// Output format
    #[arg(long, value_enum, default_value = "markdown")]
    format: OutputFormat,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Markdown with a statistics preamble
    Markdown,
    /// Classified elements and statistics as JSON
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.output.is_some() && cli.inputs.len() > 1 {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                "--output can only be used with a single input file",
            )
            .exit();
    }

    let options = ConvertOptions::new()
        .with_heading_threshold(cli.heading_threshold)
        .with_line_spacing_threshold(cli.line_spacing_threshold)
        .with_verbose(cli.verbose);

    let items = match run(&cli, &options) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut failed = 0;
    let mut written = HashSet::new();
    for item in items {
        if let Err(e) = report(&cli, item, &mut written) {
            eprintln!("{}: {}", "Error".red().bold(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: &Cli, options: &ConvertOptions) -> pdf2md::Result<Vec<BatchItem>> {
    log::debug!("converting {} input(s)", cli.inputs.len());

    if let [input] = cli.inputs.as_slice() {
        let converter = Converter::new(options.clone())?;
        return Ok(vec![BatchItem {
            path: input.clone(),
            result: converter.convert_file(input),
        }]);
    }

    options.validate()?;

    let pb = ProgressBar::new(cli.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Converting...");

    let items = convert_batch_with(cli.inputs.as_slice(), options, |_| pb.inc(1));
    pb.finish_with_message("Done!");
    println!();

    Ok(items)
}

fn report(
    cli: &Cli,
    item: BatchItem,
    written: &mut HashSet<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = item.path;
    let conversion = item
        .result
        .map_err(|e| format!("{}: {}", input.display(), e))?;

    let output_path = output_path(cli, &input, written)?;
    let content = render(cli, &conversion)?;
    fs::write(&output_path, &content)?;

    if let Some(ref analysis) = conversion.analysis {
        if analysis.is_image_based() {
            println!(
                "{} {} appears to be a scanned/image-based PDF.",
                "Warning:".yellow().bold(),
                input.display()
            );
            println!("Text extraction may be limited. Consider running OCR first.");
        }
    }

    if conversion.is_empty() {
        println!(
            "{} No text content could be extracted from {}; wrote error notice to {}",
            "Warning:".yellow().bold(),
            input.display(),
            output_path.display()
        );
        return Ok(());
    }

    println!("{}", "Conversion successful!".green().bold());
    println!("{}: {}", "Output file".bold(), output_path.display());
    println!(
        "Generated {} lines, {} characters",
        content.lines().count(),
        content.chars().count()
    );
    if let Some(ref analysis) = conversion.analysis {
        println!(
            "Document analysis: {} with {:.1} chars/page",
            analysis.estimated_type, analysis.avg_chars_per_page
        );
    }

    if cli.verbose {
        println!();
        println!("{}", "Detailed Statistics".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (label, value) in conversion.stats.entries() {
            println!("  {}: {}", label.bold(), value);
        }
    }
    println!();

    Ok(())
}

fn render(cli: &Cli, conversion: &Conversion) -> pdf2md::Result<String> {
    match cli.format {
        OutputFormat::Markdown => Ok(conversion.to_markdown()),
        OutputFormat::Json => {
            let format = if cli.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            conversion.to_json(format)
        }
    }
}

/// Resolve where `input` is written. A name already claimed by an earlier
/// input in this run gets a `-2`, `-3`, ... suffix.
fn output_path(
    cli: &Cli,
    input: &Path,
    written: &mut HashSet<PathBuf>,
) -> std::io::Result<PathBuf> {
    if let Some(ref path) = cli.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        written.insert(path.clone());
        return Ok(path.clone());
    }

    let dir = cli.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)?;

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let extension = cli.format.extension();
    let mut path = dir.join(format!("{}.{}", stem, extension));
    let mut suffix = 2;
    while written.contains(&path) {
        path = dir.join(format!("{}-{}.{}", stem, suffix, extension));
        suffix += 1;
    }

    if suffix > 2 {
        log::warn!(
            "{} shares its name with an earlier input; writing {}",
            input.display(),
            path.display()
        );
    }
    written.insert(path.clone());
    Ok(path)
}
