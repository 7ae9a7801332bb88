//! Case normalization for headings without an explicit replacement.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::MINOR_HEADING_WORDS;

/// Matches a run of word characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Normalize the case of a heading.
///
/// The first word is always capitalized. Every later word is lower-cased if it
/// is one of the minor words (`of`, `the`, `and`, `as`, `a`, `an`) and
/// capitalized otherwise. Everything between words is kept as is.
///
/// # Examples
/// ```
/// use csrd_splitter::headings::fix_header_case;
///
/// assert_eq!(fix_header_case("the great ability"), "The Great Ability");
/// assert_eq!(fix_header_case("BOOK OF THE DEAD"), "Book of the Dead");
/// ```
#[must_use]
pub fn fix_header_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for (index, word) in WORD_PATTERN.find_iter(text).enumerate() {
        result.push_str(&text[last_end..word.start()]);
        let lower = word.as_str().to_lowercase();
        if index > 0 && MINOR_HEADING_WORDS.contains(&lower.as_str()) {
            result.push_str(&lower);
        } else {
            result.push_str(&capitalize(word.as_str()));
        }
        last_end = word.end();
    }

    result.push_str(&text[last_end..]);
    result
}
