//! Command-line interface for the splitters.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::abilities::split_abilities_file;
use crate::error::{Result, SplitError};
use crate::splitter::{split_markdown_file, SplitOptions};
use crate::sync::{collect_candidates, record_outcome, sync_file, SyncOptions, SyncReport};

/// CSRD Splitter - split the rulebook markdown into per-section files.
#[derive(Parser)]
#[command(name = "csrd-split")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a markdown document into files using a headings file.
    SplitMarkdown {
        /// The input markdown file
        #[arg(short, long)]
        input_file: PathBuf,

        /// A file containing the heading info
        #[arg(short = 's', long)]
        headings_file: PathBuf,

        /// Directory the target files are resolved against (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Start every generated file with a source reference comment
        #[arg(long)]
        source_reference: bool,
    },

    /// Split the abilities chapter into ability group and ability files.
    SplitAbilities {
        /// The input markdown file containing the abilities
        #[arg(short, long)]
        input_file: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Point original files at the translations listing them as their source.
    SyncTranslationLocation {
        /// Directory used to resolve the source paths listed in the translations
        #[arg(short, long)]
        source_dir: Option<PathBuf>,

        /// Directory the recorded translation paths are relative to
        #[arg(short, long)]
        translations_dir: Option<PathBuf>,

        /// Glob patterns matching the translated files
        #[arg(required = true, num_args = 1..)]
        patterns: Vec<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::SplitMarkdown {
            input_file,
            headings_file,
            output_dir,
            source_reference,
        } => split_markdown_command(
            &input_file,
            &headings_file,
            output_dir.as_deref(),
            source_reference,
        ),
        Commands::SplitAbilities {
            input_file,
            output_dir,
        } => split_abilities_command(&input_file, output_dir.as_deref()),
        Commands::SyncTranslationLocation {
            source_dir,
            translations_dir,
            patterns,
        } => sync_command(source_dir, translations_dir, &patterns),
    }
}

/// Resolve an optional output directory, rejecting paths that are not directories.
fn output_dir_or_cwd(output: Option<&Path>) -> Result<PathBuf> {
    let dir = output.unwrap_or(Path::new(".")).to_path_buf();
    if dir.exists() && !dir.is_dir() {
        return Err(SplitError::Write {
            path: dir,
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "output path is not a directory",
            ),
        });
    }
    Ok(dir)
}

/// Execute the split-markdown command.
fn split_markdown_command(
    input_file: &Path,
    headings_file: &Path,
    output: Option<&Path>,
    source_reference: bool,
) -> Result<()> {
    let options = SplitOptions {
        output_root: output_dir_or_cwd(output)?,
        source_reference,
    };

    let report = split_markdown_file(input_file, headings_file, &options)?;

    println!(
        "{} {} into {} files",
        style("Split").bold(),
        style(input_file.display()).cyan(),
        style(report.files.len()).green()
    );
    println!("  Headings matched: {}", report.matched_headings);
    if !report.warnings.is_empty() {
        println!("  Warnings: {}", style(report.warnings.len()).yellow().bold());
    }
    Ok(())
}

/// Execute the split-abilities command.
fn split_abilities_command(input_file: &Path, output: Option<&Path>) -> Result<()> {
    let output_dir = output_dir_or_cwd(output)?;
    let report = split_abilities_file(input_file, &output_dir)?;

    println!(
        "{} {}",
        style("Split abilities from").bold(),
        style(input_file.display()).cyan()
    );
    println!("  Ability groups: {}", style(report.groups).green());
    println!("  Abilities: {}", style(report.abilities).green());
    if !report.warnings.is_empty() {
        println!("  Warnings: {}", style(report.warnings.len()).yellow().bold());
    }
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_dir.display()
    );
    Ok(())
}

/// Execute the sync-translation-location command.
fn sync_command(
    source_dir: Option<PathBuf>,
    translations_dir: Option<PathBuf>,
    patterns: &[String],
) -> Result<()> {
    let options = SyncOptions {
        source_dir: source_dir.unwrap_or_else(|| PathBuf::from(".")),
        translations_dir: translations_dir.unwrap_or_else(|| PathBuf::from(".")),
    };

    let candidates = collect_candidates(patterns)?;

    let pb = ProgressBar::new(candidates.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut report = SyncReport::default();
    for translation in &candidates {
        pb.set_message(translation.display().to_string());
        let outcome = match sync_file(translation, &options) {
            Ok(outcome) => outcome,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };
        record_outcome(&mut report, translation, outcome);
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{} {} files",
        style("Checked").bold(),
        style(candidates.len()).cyan()
    );
    println!("  Updated: {}", style(report.updated.len()).green());
    println!("  Unchanged: {}", report.unchanged.len());
    if !report.skipped.is_empty() {
        println!("  Skipped: {}", style(report.skipped.len()).yellow().bold());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_split_markdown() {
        let cli = Cli::parse_from([
            "csrd-split",
            "split-markdown",
            "-i",
            "csrd.md",
            "-s",
            "headings.txt",
        ]);

        let Commands::SplitMarkdown {
            input_file,
            headings_file,
            output_dir,
            source_reference,
        } = cli.command
        else {
            panic!("expected split-markdown");
        };
        assert_eq!(input_file, PathBuf::from("csrd.md"));
        assert_eq!(headings_file, PathBuf::from("headings.txt"));
        assert!(output_dir.is_none());
        assert!(!source_reference);
    }

    #[test]
    fn test_cli_parse_split_abilities_long_flags() {
        let cli = Cli::parse_from([
            "csrd-split",
            "split-abilities",
            "--input-file",
            "abilities.md",
            "--output-dir",
            "out",
        ]);

        let Commands::SplitAbilities {
            input_file,
            output_dir,
        } = cli.command
        else {
            panic!("expected split-abilities");
        };
        assert_eq!(input_file, PathBuf::from("abilities.md"));
        assert_eq!(output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_cli_parse_sync() {
        let cli = Cli::parse_from([
            "csrd-split",
            "sync-translation-location",
            "-s",
            "en",
            "-t",
            "de",
            "de/**/*.md",
            "de/*.txt",
        ]);

        let Commands::SyncTranslationLocation {
            source_dir,
            translations_dir,
            patterns,
        } = cli.command
        else {
            panic!("expected sync-translation-location");
        };
        assert_eq!(source_dir, Some(PathBuf::from("en")));
        assert_eq!(translations_dir, Some(PathBuf::from("de")));
        assert_eq!(patterns, vec!["de/**/*.md", "de/*.txt"]);
    }

    #[test]
    fn test_cli_sync_requires_pattern() {
        assert!(Cli::try_parse_from(["csrd-split", "sync-translation-location"]).is_err());
    }

    #[test]
    fn test_output_dir_rejects_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("file.md");
        std::fs::write(&file, "").unwrap();

        assert!(output_dir_or_cwd(Some(&file)).is_err());
        assert!(output_dir_or_cwd(Some(temp_dir.path())).is_ok());
    }
}
