//! Parser for the fixed structure of the abilities chapter.

use regex::Regex;
use std::sync::LazyLock;

use super::types::{Ability, AbilityGroup, Tier};
use crate::classify::is_blank;
use crate::document::Document;
use crate::error::{Result, SplitError};

/// Start of an ability paragraph: `Name[ (parenthetical)]: description`.
///
/// Group 1 is the title, group 2 the bare name, group 4 the description start.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(super) static ABILITY_START_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(([^(:]+\S)(\s*\([^)]+\)\s*)?):(.*)").expect("valid regex")
});

/// Alphabetical section heading of the abilities list, e.g. `## Abilities—B`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ABILITY_SECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*## abilities\x{2014}[a-z]\s*").expect("valid regex")
});

const GROUP_PREFIX: &str = "### ";
const TIER_PREFIX: &str = "#### ";
const ABILITIES_START: &str = "## abilities\u{2014}a";

/// Everything extracted from the abilities chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAbilities {
    /// Lines before the first ability group.
    pub prologue: Vec<String>,
    pub groups: Vec<AbilityGroup>,
    pub abilities: Vec<Ability>,
}

fn is_group_start(line: &str) -> bool {
    line.trim().starts_with(GROUP_PREFIX)
}

fn is_abilities_start(line: &str) -> bool {
    line.trim().to_lowercase().starts_with(ABILITIES_START)
}

/// Index of the next group title or the start of the abilities list, or `lines.len()`.
fn find_next_start(lines: &[String], from: usize) -> usize {
    (from..lines.len())
        .find(|&i| is_group_start(&lines[i]) || is_abilities_start(&lines[i]))
        .unwrap_or(lines.len())
}

/// Index of the next tier marker line, checked against the expected tier.
fn find_tier(lines: &[String], from: usize, tier: Tier, group: &str) -> Result<usize> {
    let index = (from..lines.len())
        .find(|&i| lines[i].trim().starts_with(TIER_PREFIX))
        .ok_or_else(|| SplitError::MissingTier {
            expected: tier.marker(),
            group: group.to_string(),
        })?;

    let marker = lines[index].trim()[TIER_PREFIX.len()..].to_lowercase();
    if !marker.starts_with(tier.marker()) {
        return Err(SplitError::UnexpectedTier {
            expected: tier.marker(),
            found: lines[index].clone(),
        });
    }
    Ok(index)
}

/// Ability names of one tier: the non-blank lines.
fn tier_names(lines: &[String]) -> Vec<String> {
    lines.iter().filter(|l| !is_blank(l)).cloned().collect()
}

/// Parse one ability group starting at its title line.
///
/// Returns the group and the index of the line following it.
fn parse_group(lines: &[String], start: usize) -> Result<(AbilityGroup, usize)> {
    let stripped = lines[start].trim();
    let title = stripped
        .strip_prefix(GROUP_PREFIX)
        .unwrap_or(stripped)
        .to_string();

    let low = find_tier(lines, start + 1, Tier::Low, &title)?;
    let mid = find_tier(lines, low + 1, Tier::Mid, &title)?;
    let high = find_tier(lines, mid + 1, Tier::High, &title)?;
    let next = find_next_start(lines, high + 1);

    let description = lines[start + 1..low]
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join(" ");

    let group = AbilityGroup {
        title,
        description,
        low_tier: tier_names(&lines[low + 1..mid]),
        mid_tier: tier_names(&lines[mid + 1..high]),
        high_tier: tier_names(&lines[high + 1..next]),
    };
    Ok((group, next))
}

/// Parse the alphabetical list of abilities.
fn parse_ability_list(lines: &[String]) -> Vec<Ability> {
    let mut abilities = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;
    // The section heading is treated as if a blank line preceded it.
    let mut previous_line_blank = true;

    for line in lines {
        if previous_line_blank {
            if let Some(caps) = ABILITY_START_PATTERN.captures(line.trim()) {
                if let Some((title, description)) = current.take() {
                    abilities.push(Ability::new(title, description));
                }
                let title = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
                let first = caps.get(4).map_or("", |m| m.as_str()).trim().to_string();
                current = Some((title, vec![first]));
            } else if ABILITY_SECTION_PATTERN.is_match(line) {
                if let Some((title, description)) = current.take() {
                    abilities.push(Ability::new(title, description));
                }
            } else if let Some((_, description)) = current.as_mut() {
                description.push(line.trim().to_string());
            }
        } else if let Some((_, description)) = current.as_mut() {
            description.push(line.trim().to_string());
        }
        previous_line_blank = is_blank(line);
    }

    if let Some((title, description)) = current {
        abilities.push(Ability::new(title, description));
    }
    abilities
}

/// Parse the abilities chapter into prologue, groups and abilities.
pub fn parse_abilities(document: &Document) -> Result<ParsedAbilities> {
    let lines = document.lines();
    let mut index = find_next_start(lines, 0);
    let prologue = lines[..index].to_vec();

    let mut groups = Vec::new();
    let mut abilities_start = None;
    while index < lines.len() {
        if is_abilities_start(&lines[index]) {
            abilities_start = Some(index);
            break;
        }
        let (group, next) = parse_group(lines, index)?;
        tracing::debug!(group = %group.title, "parsed ability group");
        groups.push(group);
        index = next;
    }

    let abilities = match abilities_start {
        Some(start) => parse_ability_list(&lines[start..]),
        None => {
            tracing::warn!("abilities list heading not found, no abilities extracted");
            Vec::new()
        }
    };

    Ok(ParsedAbilities {
        prologue,
        groups,
        abilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CHAPTER: &str = "\
# Abilities

Abilities are special powers.

### Air

Masters of wind
and sky.

#### Low Tier

Glide
Gust

#### Mid Tier

Fly (Air)

#### High Tier

Tornado

### Earth

Solid.
#### LOW TIER
Quake
#### Mid Tier
#### High Tier
Mountain

## Abilities\u{2014}A

Armor: You gain armor.
It stacks.

Awareness (Sense): You notice things.

## Abilities\u{2014}F

Fly (Air): You can fly.

Flying costs effort.


## Abilities\u{2014}G

Glide: You glide.
";

    fn parse(text: &str) -> Result<ParsedAbilities> {
        parse_abilities(&Document::from_text(text))
    }

    #[test]
    fn test_prologue() {
        let parsed = parse(CHAPTER).unwrap();
        assert_eq!(
            parsed.prologue,
            vec!["# Abilities", "", "Abilities are special powers.", ""]
        );
    }

    #[test]
    fn test_groups() {
        let parsed = parse(CHAPTER).unwrap();
        assert_eq!(parsed.groups.len(), 2);

        let air = &parsed.groups[0];
        assert_eq!(air.title, "Air");
        assert_eq!(air.description, "Masters of wind and sky.");
        assert_eq!(air.low_tier, vec!["Glide", "Gust"]);
        assert_eq!(air.mid_tier, vec!["Fly (Air)"]);
        assert_eq!(air.high_tier, vec!["Tornado"]);

        let earth = &parsed.groups[1];
        assert_eq!(earth.title, "Earth");
        assert_eq!(earth.low_tier, vec!["Quake"]);
        assert!(earth.mid_tier.is_empty());
        assert_eq!(earth.high_tier, vec!["Mountain"]);
    }

    #[test]
    fn test_abilities() {
        let parsed = parse(CHAPTER).unwrap();
        let titles: Vec<_> = parsed.abilities.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Armor", "Awareness (Sense)", "Fly (Air)", "Glide"]);

        assert_eq!(
            parsed.abilities[0].description,
            vec!["You gain armor.", "It stacks."]
        );
        assert_eq!(
            parsed.abilities[2].description,
            vec!["You can fly.", "", "Flying costs effort."]
        );
        assert_eq!(parsed.abilities[3].description, vec!["You glide."]);
    }

    #[test]
    fn test_wrong_tier_order_is_fatal() {
        let err = parse("### Air\n#### Mid Tier\n#### Low Tier\n#### High Tier\n").unwrap_err();
        assert!(matches!(
            err,
            SplitError::UnexpectedTier {
                expected: "low tier",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_tier_is_fatal() {
        let err = parse("### Air\n#### Low Tier\nGlide\n#### Mid Tier\n").unwrap_err();
        assert!(matches!(
            err,
            SplitError::MissingTier {
                expected: "high tier",
                ..
            }
        ));
    }

    #[test]
    fn test_no_groups_and_no_list() {
        let parsed = parse("just text\n").unwrap();
        assert_eq!(parsed.prologue, vec!["just text"]);
        assert!(parsed.groups.is_empty());
        assert!(parsed.abilities.is_empty());
    }

    #[test]
    fn test_ability_start_pattern() {
        let caps = ABILITY_START_PATTERN.captures("Fly (Air): You fly.").unwrap();
        assert_eq!(&caps[1], "Fly (Air)");
        assert_eq!(&caps[2], "Fly");
        assert_eq!(&caps[4], " You fly.");
        assert!(ABILITY_START_PATTERN.captures("No colon here").is_none());
    }
}
