/*
    This module generates sentences
*/

use rand::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use crate::grammar::*;
use crate::error_handling::*;

// Deeper than this and the grammar is almost certainly looping
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    #[error("No definition for nonterminal `{0}`")]
    UndefinedNonterminal(String),
    // Expansion went deeper than MAX_DEPTH
    #[error("Gave up expanding `{0}` after {max} levels of nesting", max = MAX_DEPTH)]
    TooDeep(String),
}

impl ErrorType for GenerateErrorType {}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<String, GenerateError>;

type Rules = HashMap<String, Rewrite>;

// Generates a sentence in the given grammar from its start symbol
pub fn generate(grammar: &Grammar, source: &Path, rng: &mut impl Rng) -> GenResult {
    generate_with_override(grammar, &grammar.start_symbol, source, rng)
}

// Generates a sentence in the given grammar starting with the given symbol
pub fn generate_with_override(grammar: &Grammar, start: &str, source: &Path, rng: &mut impl Rng) -> GenResult {
    let location = Location::whole(source);
    let mut result = String::new();
    generate_nonterminal(start, &grammar.rules, &location, rng, 0, &mut result)?;
    Ok(result)
}

fn generate_nonterminal(nonterminal: &str, rules: &Rules, location: &Location, rng: &mut impl Rng, depth: usize, out: &mut String) -> Result<(), GenerateError> {
    if depth >= MAX_DEPTH {
        return Err(GenerateError::new(location.clone(), GenerateErrorType::TooDeep(nonterminal.to_string())));
    }

    let rewrite = rules
        .get(nonterminal)
        .ok_or_else(|| GenerateError::new(
            location.clone(),
            GenerateErrorType::UndefinedNonterminal(nonterminal.to_string())
        ))?;

    // A rule with no alternatives is the empty string
    let Some(alternative) = rewrite.choose(rng) else {
        return Ok(());
    };

    for symbol in alternative {
        match symbol {
            Symbol::Nonterminal(t) => generate_nonterminal(t, rules, location, rng, depth + 1, out)?,
            Symbol::Terminal(t) => out.push_str(t),
        }
    }

    Ok(())
}
