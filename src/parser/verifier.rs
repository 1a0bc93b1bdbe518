use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::grammar::Symbol::{Nonterminal, Terminal};
use super::CompileErrorType::{NonProductive, UndefinedNonterminal};
use super::{Alternative, CompileError, CompileErrors, FileResult, Location};

// Rules before verification. Each alternative remembers the line that
// defined it, since one nonterminal can be defined in several places
pub type LocatedRewrite = Vec<(Alternative, Location)>;
pub type IntermediateRuleset = HashMap<String, LocatedRewrite>;

fn get_alternative_undefined_symbols(alternative: &Alternative, location: &Location, rules: &IntermediateRuleset) -> CompileErrors {
    alternative.iter()
        .filter_map(|symbol| match symbol {
            Nonterminal(symbol) => Some(symbol),
            _ => None
        })
        .filter(|symbol| !rules.contains_key(*symbol))
        .map(|symbol_text| CompileError {
            location: location.to_owned(),
            error: UndefinedNonterminal(symbol_text.to_owned())
        })
        .collect()
}

// Sorted by location so reports come out in source order
fn get_undefined_symbols(rules: &IntermediateRuleset) -> CompileErrors {
    rules.values()
        .flatten()
        .sorted_by(|(_, a), (_, b)| a.file.cmp(&b.file).then(a.line.cmp(&b.line)))
        .flat_map(|(alternative, location)| get_alternative_undefined_symbols(alternative, location, rules))
        .collect()
}

fn alternative_is_productive(alternative: &Alternative, productive: &HashSet<&str>) -> bool {
    alternative.iter().all(|symbol| match symbol {
        Terminal(_) => true,
        Nonterminal(name) => productive.contains(name.as_str())
    })
}

// A nonterminal is productive once one of its alternatives only uses
// terminals and productive nonterminals. Iterate until nothing changes.
// A rule without alternatives generates the empty string.
fn get_nonproductive_symbols(rules: &IntermediateRuleset) -> CompileErrors {
    let mut productive = HashSet::<&str>::with_capacity(rules.len());

    loop {
        let newly_productive = rules.iter()
            .filter(|(symbol, _)| !productive.contains(symbol.as_str()))
            .filter(|(_, rewrite)| {
                rewrite.is_empty() || rewrite.iter().any(|(a, _)| alternative_is_productive(a, &productive))
            })
            .map(|(symbol, _)| symbol.as_str())
            .collect_vec();

        if newly_productive.is_empty() {
            break;
        }
        productive.extend(newly_productive);
    }

    rules.iter()
        .filter(|(symbol, _)| !productive.contains(symbol.as_str()))
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .filter_map(|(symbol, rewrite)| rewrite.first().map(|(_, location)| CompileError {
            location: location.to_owned(),
            error: NonProductive(symbol.to_owned())
        }))
        .collect()
}

pub fn verify_rules(rules: &IntermediateRuleset) -> FileResult<()> {
    let mut errors = get_undefined_symbols(rules);

    // Undefined nonterminals are never productive, so reporting both would
    // repeat the same problem
    if errors.is_empty() {
        errors = get_nonproductive_symbols(rules);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
