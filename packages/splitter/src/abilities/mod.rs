//! Splitting of the abilities chapter.
//!
//! The chapter has a fixed shape:
//!
//! ```text
//! prologue
//! ### <group title>            (repeated per ability group)
//! <description>
//! #### Low Tier / Mid Tier / High Tier
//! <one ability name per line>
//! ## Abilities—A
//! <Name> [(parenthetical)]: <description>
//! ## Abilities—B
//! ...
//! ```
//!
//! The prologue goes to `abilities.md`, every group to
//! `ability_groups/<Title>.md` and every ability to `abilities/<Name>.md`.

mod parser;
mod types;
mod writer;

pub use parser::{parse_abilities, ParsedAbilities};
pub use types::{Ability, AbilityGroup, Tier};
pub use writer::{
    ability_file_name, group_file_name, split_abilities_file, write_abilities, AbilityReport,
};
