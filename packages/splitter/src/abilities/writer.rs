//! Output of the parsed abilities chapter.

use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::parser::{parse_abilities, ParsedAbilities, ABILITY_START_PATTERN};
use super::types::{Ability, AbilityGroup, Tier};
use crate::config::{source_reference, ABILITIES_DIR, ABILITIES_PROLOGUE_FILE, ABILITY_GROUPS_DIR};
use crate::document::Document;
use crate::error::{Result, SplitError};
use crate::output::OutputFile;

/// Characters replaced by `_` in ability file names.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FILE_NAME_SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ ?./\\!&%]+").expect("valid regex"));

/// Files written by an ability split run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityReport {
    /// Every generated file, prologue first.
    pub files: Vec<PathBuf>,

    pub groups: usize,
    pub abilities: usize,

    /// Non-fatal problems, such as two abilities sharing a file name.
    pub warnings: Vec<String>,
}

/// File name of an ability group (`"Air Magic"` → `"Air_Magic.md"`).
#[must_use]
pub fn group_file_name(title: &str) -> String {
    format!("{}.md", title.replace(' ', "_"))
}

/// File name of an ability, built from its name without the parenthetical.
///
/// `"Fly (Air)"` → `"Fly.md"`, `"Hit & Run"` → `"Hit_Run.md"`.
pub fn ability_file_name(title: &str) -> Result<String> {
    let with_colon = format!("{title}:");
    let name = ABILITY_START_PATTERN
        .captures(&with_colon)
        .and_then(|caps| caps.get(2))
        .ok_or_else(|| SplitError::InvalidAbilityTitle(title.to_string()))?;
    Ok(format!(
        "{}.md",
        FILE_NAME_SPECIAL_CHARS.replace_all(name.as_str(), "_")
    ))
}

/// Create a generated file below `output_dir`, starting with its source comment.
fn create_with_reference(output_dir: &Path, relative: &Path) -> Result<OutputFile> {
    let mut file = OutputFile::create(&output_dir.join(relative))?;
    file.write_line(&source_reference(relative))?;
    file.write_line("")?;
    Ok(file)
}

fn write_prologue(output_dir: &Path, prologue: &[String]) -> Result<PathBuf> {
    let mut file = create_with_reference(output_dir, Path::new(ABILITIES_PROLOGUE_FILE))?;
    for line in prologue {
        file.write_line(line)?;
    }
    file.finish()
}

fn write_group(output_dir: &Path, group: &AbilityGroup) -> Result<PathBuf> {
    let relative = Path::new(ABILITY_GROUPS_DIR).join(group_file_name(&group.title));
    let mut file = create_with_reference(output_dir, &relative)?;

    file.write_line(&format!("### {}", group.title))?;
    file.write_line("")?;
    if !group.description.is_empty() {
        file.write_line(&group.description)?;
        file.write_line("")?;
    }

    for (index, tier) in Tier::ALL.iter().enumerate() {
        if index > 0 {
            file.write_line("")?;
        }
        file.write_line(&format!("#### {}", tier.heading()))?;
        file.write_line("")?;
        for name in group.tier(*tier) {
            file.write_line(&format!(" - {name}"))?;
        }
    }
    file.finish()
}

fn write_ability(output_dir: &Path, relative: &Path, ability: &Ability) -> Result<PathBuf> {
    let mut file = create_with_reference(output_dir, relative)?;

    let mut lines = ability.description.iter();
    match lines.next() {
        Some(first) if !first.is_empty() => {
            file.write_line(&format!("**{}:** {first}", ability.title))?;
        }
        _ => file.write_line(&format!("**{}:**", ability.title))?,
    }
    for line in lines {
        file.write_line(line)?;
    }
    file.finish()
}

/// Write the prologue, group and ability files below `output_dir`.
pub fn write_abilities(parsed: &ParsedAbilities, output_dir: &Path) -> Result<AbilityReport> {
    let mut report = AbilityReport {
        groups: parsed.groups.len(),
        abilities: parsed.abilities.len(),
        ..AbilityReport::default()
    };

    report.files.push(write_prologue(output_dir, &parsed.prologue)?);

    for group in &parsed.groups {
        report.files.push(write_group(output_dir, group)?);
    }

    let mut seen = HashSet::new();
    for ability in &parsed.abilities {
        let relative = Path::new(ABILITIES_DIR).join(ability_file_name(&ability.title)?);
        if !seen.insert(relative.clone()) {
            tracing::warn!(
                ability = %ability.title,
                path = %relative.display(),
                "ability file written more than once"
            );
            report.warnings.push(format!(
                "ability \"{}\" overwrites {}",
                ability.title,
                relative.display()
            ));
        }
        report.files.push(write_ability(output_dir, &relative, ability)?);
    }

    tracing::info!(
        groups = report.groups,
        abilities = report.abilities,
        "abilities split finished"
    );
    Ok(report)
}

/// Parse the abilities chapter in `input_file` and write it below `output_dir`.
pub fn split_abilities_file(input_file: &Path, output_dir: &Path) -> Result<AbilityReport> {
    let document = Document::load(input_file)?;
    let parsed = parse_abilities(&document)?;
    write_abilities(&parsed, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_group_file_name() {
        assert_eq!(group_file_name("Air Magic"), "Air_Magic.md");
    }

    #[test]
    fn test_ability_file_name() {
        assert_eq!(ability_file_name("Fly (Air)").unwrap(), "Fly.md");
        assert_eq!(ability_file_name("Hit & Run").unwrap(), "Hit_Run.md");
        assert_eq!(ability_file_name("What?!").unwrap(), "What_.md");
        assert_eq!(ability_file_name("Sense 5.0/x").unwrap(), "Sense_5_0_x.md");
    }

    #[test]
    fn test_invalid_ability_title() {
        assert!(matches!(
            ability_file_name("(Air)"),
            Err(SplitError::InvalidAbilityTitle(_))
        ));
    }

    #[test]
    fn test_write_group_and_ability() {
        let temp_dir = tempdir().unwrap();
        let parsed = ParsedAbilities {
            prologue: vec!["# Abilities".to_string()],
            groups: vec![AbilityGroup {
                title: "Air Magic".to_string(),
                description: "Wind and sky.".to_string(),
                low_tier: vec!["Glide".to_string()],
                mid_tier: vec!["Fly (Air)".to_string()],
                high_tier: vec![],
            }],
            abilities: vec![Ability::new(
                "Fly (Air)",
                vec!["You can fly.".to_string(), "Really.".to_string()],
            )],
        };

        let report = write_abilities(&parsed, temp_dir.path()).unwrap();

        assert_eq!(report.files.len(), 3);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("abilities.md")).unwrap(),
            "<!-- Quelle: abilities.md -->\n\n# Abilities\n"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("ability_groups/Air_Magic.md")).unwrap(),
            "<!-- Quelle: ability_groups/Air_Magic.md -->\n\n\
             ### Air Magic\n\nWind and sky.\n\n\
             #### Low Tier\n\n - Glide\n\n\
             #### Mid Tier\n\n - Fly (Air)\n\n\
             #### High Tier\n\n"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("abilities/Fly.md")).unwrap(),
            "<!-- Quelle: abilities/Fly.md -->\n\n**Fly (Air):** You can fly.\nReally.\n"
        );
    }

    #[test]
    fn test_duplicate_ability_file_is_warned() {
        let temp_dir = tempdir().unwrap();
        let parsed = ParsedAbilities {
            abilities: vec![
                Ability::new("Fly (Air)", vec!["One.".to_string()]),
                Ability::new("Fly (Magic)", vec!["Two.".to_string()]),
            ],
            ..ParsedAbilities::default()
        };

        let report = write_abilities(&parsed, temp_dir.path()).unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(fs::read_to_string(temp_dir.path().join("abilities/Fly.md"))
            .unwrap()
            .contains("Two."));
    }

    #[test]
    fn test_ability_without_description() {
        let temp_dir = tempdir().unwrap();
        let relative = Path::new("abilities").join("Fly.md");
        write_ability(temp_dir.path(), &relative, &Ability::new("Fly", vec![String::new()]))
            .unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join(&relative)).unwrap(),
            "<!-- Quelle: abilities/Fly.md -->\n\n**Fly:**\n"
        );
    }
}
