use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vrm_meta::extract::{inspect, inspect_path, Extraction};
use vrm_meta::AvatarMetadata;

#[derive(Parser)]
#[command(name = "vrm-meta", about = "Inspect avatar metadata in VRM / binary glTF files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the model report (sample data when no path is given)
    Show {
        input: Option<PathBuf>,
        /// Number of bones to list in the technical section
        #[arg(long, default_value = "10")]
        bones: usize,
    },
    /// Print the metadata record as JSON
    Json {
        input: Option<PathBuf>,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// Exit non-zero if the file would fall back to sample data
    Check {
        input: PathBuf,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    match Cli::parse().command {

        // ── Show ─────────────────────────────────────────────────────────────
        Commands::Show { input, bones } => {
            let ex = load(input.as_ref());
            report_source(&ex);
            print_model(&ex.metadata);
            print_blendshapes(&ex.metadata);
            print_license(&ex.metadata);
            print_technical(&ex.metadata, bones);
        }

        // ── Json ─────────────────────────────────────────────────────────────
        Commands::Json { input, compact } => {
            let ex = load(input.as_ref());
            if let Some(sig) = ex.fallback() {
                eprintln!("Using sample data: {}", sig);
            }
            let out = if compact { ex.metadata.to_json()? } else { ex.metadata.to_json_pretty()? };
            println!("{}", out);
        }

        // ── Check ────────────────────────────────────────────────────────────
        Commands::Check { input } => {
            let ex = inspect_path(&input);
            match ex.fallback() {
                Some(sig) => {
                    println!("{}: {:?}: {}", input.display(), sig.reason(), sig);
                    return Ok(ExitCode::FAILURE);
                }
                None => println!("{}: ok", input.display()),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn load(input: Option<&PathBuf>) -> Extraction {
    match input {
        Some(path) => {
            println!("Loading VRM from: {}", path.display());
            if let Ok(meta) = std::fs::metadata(path) {
                println!("{}", found_file_line(path, meta.len()));
            }
            inspect_path(path)
        }
        None => inspect(None),
    }
}

fn found_file_line(path: &Path, len: u64) -> String {
    let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
    format!("Found VRM file: {} ({:.1} KB)", name, len as f64 / 1024.0)
}

fn report_source(ex: &Extraction) {
    if let Some(info) = &ex.container {
        println!("  glTF version: {}", info.version);
        println!("  File size: {} bytes", info.total_length);
    }
    match ex.fallback() {
        Some(sig) => eprintln!("Using sample data ({:?}): {}", sig.reason(), sig),
        None      => println!("Parsed VRM metadata."),
    }
    println!();
}

fn rule(title: &str) {
    println!("{}", title);
    println!("{}", "━".repeat(60));
}

fn print_model(md: &AvatarMetadata) {
    rule("Model Information:");
    println!("  Name:    {}", md.name);
    println!("  Version: {}", md.version);
    println!("  Author:  {}", md.author);
    println!("  Title:   {}", md.title);
    println!();
}

fn expression_emoji(name: &str) -> &'static str {
    match name {
        "Joy"     => "😊",
        "Angry"   => "😠",
        "Sorrow"  => "😢",
        "Fun"     => "😆",
        "Blink"   => "😑",
        "Neutral" => "😐",
        _         => "🎭",
    }
}

fn print_blendshapes(md: &AvatarMetadata) {
    rule("Available Expressions:");
    for (i, name) in md.blendshapes.iter().enumerate() {
        println!("  {}. {} {}", i + 1, expression_emoji(name), name);
    }
    println!();
}

fn print_license(md: &AvatarMetadata) {
    rule("Usage License:");
    println!("  Commercial Use:  {}", md.commercial_usage);
    println!("  Violent Content: {}", md.violent_usage);
    println!("  Sexual Content:  {}", md.sexual_usage);
    println!("  License Type:    {}", md.license_type);
    println!();
}

fn print_technical(md: &AvatarMetadata, preview: usize) {
    rule("Technical Details:");
    println!("  Blendshapes:  {} shapes", md.blendshapes.len());
    println!("  Bones:        {} bones", md.bones.len());
    println!();
    println!("  Bone Hierarchy Sample:");
    for bone in md.bones.iter().take(preview) {
        println!("    - {}", bone);
    }
    if md.bones.len() > preview {
        println!("    ... and {} more", md.bones.len() - preview);
    }
    println!();
}
