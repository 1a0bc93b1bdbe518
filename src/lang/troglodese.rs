/*
    Troglodese, the language of the clan, and the fragments that grow it
*/

use clap::ValueEnum;
use log::debug;

use super::{ExtendError, Language, LanguageErrors};
use crate::grammar::Grammar;

const NAME: &str = "troglodese";

const SYMBOLS: &[&str] = &[
    "me", "you", "Og", "Grug", "tribe",
    "want", "see", "take", "give", "smash", "eat",
    "rock", "stick", "meat", "cave", "mammoth",
    "ugh", "hunga", "ooga", "booga",
];

const RULES: &[&str] = &[
    "sentence = clause \".\" | clause \"!\" | exclaim \"!\"",
    "clause = actor \" \" action | actor \" \" action \" \" thing",
    "actor = \"me\" | \"you\" | \"Og\" | \"Grug\" | \"tribe\"",
    "action = \"want\" | \"see\" | \"take\" | \"give\" | \"smash\" | \"eat\"",
    "thing = \"rock\" | \"stick\" | \"meat\" | \"cave\" | \"mammoth\"",
    "exclaim = \"ugh\" | \"hunga\" | \"ooga booga\"",
];

const STONE_TOOLS_SYMBOLS: &[&str] = &[
    "flint", "hand", "axe", "scraper", "spear", "point", "hammerstone",
    "knap", "chip", "sharpen", "make", "sharp", "with",
];

const STONE_TOOLS_RULES: &[&str] = &[
    "; tools are things too, and making them is something to do",
    "thing = tool | \"sharp \" tool",
    "tool = \"flint\" | \"hand axe\" | \"scraper\" | \"spear point\" | \"hammerstone\"",
    "action = craft",
    "craft = \"knap\" | \"chip\" | \"sharpen\" | \"make\"",
    "clause = actor \" \" craft \" \" tool \" with \" tool",
];

const FIRE_SYMBOLS: &[&str] = &[
    "fire", "ember", "smoke", "ash", "termites",
    "burn", "cook", "light", "toss", "into", "embers", "fetch", "with",
    "hot", "good",
];

const FIRE_RULES: &[&str] = &[
    "thing = fire.thing",
    "fire.thing = \"fire\" | \"ember\" | \"smoke\" | \"ash\" | \"termites\"",
    "action = fire.verb",
    "fire.verb = \"burn\" | \"cook\" | \"light\"",
    "; termite poppers",
    "clause = actor \" toss \" thing \" into embers\" | actor \" fetch \" thing \" with stick\"",
    "exclaim = \"hot\" | \"fire good\"",
];

fn language(name: &str, symbols: &[&str], rules: &[&str]) -> Language {
    Language::new(name, symbols.iter().copied(), rules.iter().copied())
}

/// The base language of the clan: who does what to which thing.
pub fn troglodese() -> Language {
    language(NAME, SYMBOLS, RULES)
}

/// The verified grammar of [`troglodese`], starting at `sentence`.
pub fn grammar() -> Result<Grammar, LanguageErrors> {
    troglodese().grammar()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Fragment {
    StoneTools,
    Fire,
}

impl Fragment {
    pub fn language(self) -> Language {
        match self {
            Fragment::StoneTools => language("stone tools", STONE_TOOLS_SYMBOLS, STONE_TOOLS_RULES),
            Fragment::Fire => language("fire", FIRE_SYMBOLS, FIRE_RULES),
        }
    }

    pub fn apply(self, g: &mut Grammar) -> Result<(), ExtendError> {
        match self {
            Fragment::StoneTools => add_stone_tools(g),
            Fragment::Fire => add_fire(g),
        }
    }

    fn extend(self, g: &mut Grammar) -> Result<(), ExtendError> {
        let added = self.language().extend(g)?;
        debug!("{:?} fragment added {} alternatives", self, added);
        Ok(())
    }
}

/// Adds stone tool words and rules to the grammar: tools become things, and
/// crafting becomes an action.
///
/// The grammar has to define `thing`, `action`, `actor` and `clause`, as the
/// Troglodese grammar does. On failure the grammar is left untouched.
pub fn add_stone_tools(g: &mut Grammar) -> Result<(), ExtendError> {
    Fragment::StoneTools.extend(g)
}

/// Adds fire words and rules to the grammar: fire things, fire verbs, cooking
/// clauses and a couple of exclamations.
///
/// The grammar has to define `thing`, `action`, `actor`, `clause` and
/// `exclaim`. On failure the grammar is left untouched.
pub fn add_fire(g: &mut Grammar) -> Result<(), ExtendError> {
    Fragment::Fire.extend(g)
}
