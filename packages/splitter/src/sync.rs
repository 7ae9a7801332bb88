//! Synchronization of translation locations.
//!
//! Every translated file starts with a `<!-- Quelle: <original> -->` comment.
//! This module rewrites the matching comment in the original file so that it
//! points back at the translation: `<!-- Übersetzung: <translation> -->`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::translation_reference;
use crate::document::{relative_path, Document};
use crate::error::{Result, SplitError};

/// A `<!-- Quelle: path -->` comment; group 1 is the path.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SOURCE_COMMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*<!--\s*Quelle:\s*(\S.*\S)\s*-->\s*").expect("valid regex")
});

/// Either traceability comment, as found in an original file.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOCATION_COMMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*<!--\s*(Quelle|Übersetzung):.*-->\s*").expect("valid regex")
});

/// Directories used to resolve and record paths.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory that source comments are resolved against.
    pub source_dir: PathBuf,

    /// Directory that recorded translation paths are relative to.
    pub translations_dir: PathBuf,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            translations_dir: PathBuf::from("."),
        }
    }
}

/// What happened to a single translated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The original was rewritten.
    Updated { original: PathBuf },
    /// The original already pointed at the translation.
    Unchanged { original: PathBuf },
    /// The translated file has no source comment.
    MissingSource,
}

/// Summary of a synchronizer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub updated: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Extract the path named by the first `Quelle` comment of `document`.
#[must_use]
pub fn find_source_reference(document: &Document) -> Option<String> {
    document.lines().iter().find_map(|line| {
        SOURCE_COMMENT_PATTERN
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Whether `line` is a `Quelle` or `Übersetzung` comment.
#[must_use]
pub fn is_location_comment(line: &str) -> bool {
    LOCATION_COMMENT_PATTERN.is_match(line)
}

/// Replace every location comment in `original` with `replacement`.
///
/// Returns the new lines and whether any line actually changed.
#[must_use]
pub fn rewrite_location_comments(original: &Document, replacement: &str) -> (Vec<String>, bool) {
    let mut changed = false;
    let lines = original
        .lines()
        .iter()
        .map(|line| {
            if is_location_comment(line) {
                if line != replacement {
                    changed = true;
                }
                replacement.to_string()
            } else {
                line.clone()
            }
        })
        .collect();
    (lines, changed)
}

/// Expand glob patterns (`**` included) into a sorted, deduplicated file list.
pub fn collect_candidates(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        let paths = glob::glob(pattern).map_err(|source| SplitError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        for path in paths {
            let path = path?;
            if path.is_file() {
                files.insert(path);
            }
        }
    }
    Ok(files.into_iter().collect())
}

/// Point the original of `translation` back at `translation`.
pub fn sync_file(translation: &Path, options: &SyncOptions) -> Result<SyncOutcome> {
    let document = Document::load(translation)?;
    let Some(source) = find_source_reference(&document) else {
        return Ok(SyncOutcome::MissingSource);
    };

    let original = options.source_dir.join(&source);
    let location = relative_path(translation, &options.translations_dir);
    let replacement = translation_reference(&location);

    let (lines, changed) = rewrite_location_comments(&Document::load(&original)?, &replacement);
    if !changed {
        tracing::debug!(original = %original.display(), "translation location already up to date");
        return Ok(SyncOutcome::Unchanged { original });
    }

    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&original, content).map_err(|source| SplitError::Write {
        path: original.clone(),
        source,
    })?;
    tracing::info!(
        original = %original.display(),
        translation = %location.display(),
        "updated translation location"
    );
    Ok(SyncOutcome::Updated { original })
}

/// Record the outcome for `translation` in `report`.
pub fn record_outcome(report: &mut SyncReport, translation: &Path, outcome: SyncOutcome) {
    match outcome {
        SyncOutcome::Updated { original } => report.updated.push(original),
        SyncOutcome::Unchanged { original } => report.unchanged.push(original),
        SyncOutcome::MissingSource => {
            tracing::warn!(
                file = %translation.display(),
                "input file does not contain a listed source"
            );
            report.warnings.push(format!(
                "input file \"{}\" does not contain a listed source",
                translation.display()
            ));
            report.skipped.push(translation.to_path_buf());
        }
    }
}

/// Synchronize every file matched by `patterns`.
pub fn sync_translation_locations(patterns: &[String], options: &SyncOptions) -> Result<SyncReport> {
    let mut report = SyncReport::default();
    for translation in collect_candidates(patterns)? {
        let outcome = sync_file(&translation, options)?;
        record_outcome(&mut report, &translation, outcome);
    }
    Ok(report)
}
