use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use inkline::ink::segment::DEFAULT_THRESHOLD;
use inkline::pipeline::{self, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "inkline")]
#[command(version, about = "Handwritten ink line segmentation and math recognition assembly", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Segment an ink file, recognize each line and assemble the results
    Recognize {
        /// Input ink (InkML) file path
        input: PathBuf,

        /// Working directory for staged fragments and outputs
        /// (default: ./<input_name>_work)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Vertical distance threshold for line segmentation
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Path to the recognizer binary
        #[arg(long, default_value = "./seshat")]
        recognizer: PathBuf,

        /// Recognizer configuration file, relative to the working directory
        #[arg(long, default_value = "Config/CONFIG")]
        config: PathBuf,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Segment an ink file into per-line fragments without recognizing
    Segment {
        /// Input ink (InkML) file path
        input: PathBuf,

        /// Working directory for staged fragments
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Vertical distance threshold for line segmentation
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,
    },

    /// Show stroke and line statistics for an ink file
    Info {
        /// Input ink (InkML) file path
        input: PathBuf,

        /// Vertical distance threshold for line segmentation
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recognize {
            input,
            output,
            threshold,
            recognizer,
            config,
            quiet,
        } => recognize(input, output, threshold, recognizer, config, quiet),
        Commands::Segment {
            input,
            output,
            threshold,
        } => segment(input, output, threshold),
        Commands::Info { input, threshold } => show_info(input, threshold),
    }
}

fn recognize(
    input: PathBuf,
    output: Option<PathBuf>,
    threshold: f64,
    recognizer: PathBuf,
    config_path: PathBuf,
    quiet: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let work_dir = output.unwrap_or_else(|| default_work_dir(&input));

    if !quiet {
        println!("[*] Processing: {}", input.display());
        println!("[*] Work dir: {}", work_dir.display());
        println!("[*] Threshold: {}", threshold);
    }

    let mut config = PipelineConfig::new(input.clone(), work_dir.clone());
    config.threshold = threshold;
    config.recognizer = recognizer;
    config.config = config_path;

    let output = pipeline::run_request(&config)
        .with_context(|| format!("Failed to process ink file: {}", input.display()))?;

    if !quiet {
        println!("\n[+] Recognized {} line(s):", output.results.len());
    }
    for result in &output.results {
        println!("  [{}] {}", result.role.tag(), result.text);
    }

    if !quiet {
        println!(
            "\n[✓] Done! Merged document saved to: {}",
            work_dir.join("out/outFinal.inkml").display()
        );
    }

    Ok(())
}

fn segment(input: PathBuf, output: Option<PathBuf>, threshold: f64) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let work_dir = output.unwrap_or_else(|| default_work_dir(&input));

    let mut config = PipelineConfig::new(input.clone(), work_dir.clone());
    config.threshold = threshold;

    let line_numbers = pipeline::segment_only(&config)
        .with_context(|| format!("Failed to segment ink file: {}", input.display()))?;

    println!(
        "[✓] Wrote {} fragment(s) to: {}",
        line_numbers.len(),
        work_dir.join("temp").display()
    );

    Ok(())
}

fn show_info(input: PathBuf, threshold: f64) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let summary = pipeline::inspect(&input, threshold)
        .with_context(|| format!("Failed to read ink file: {}", input.display()))?;

    println!("Ink Information");
    println!("===============");
    println!("File: {}", input.display());
    println!("Strokes: {}", summary.strokes);
    println!("Lines: {}", summary.lines);

    Ok(())
}

fn default_work_dir(input: &PathBuf) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "inkline".to_string());
    PathBuf::from(format!("{stem}_work"))
}
