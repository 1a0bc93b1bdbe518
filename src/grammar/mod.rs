/*
    This module is for storing and manipulating grammars
*/

use std::collections::HashMap;

use itertools::Itertools;

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Grammar {
    pub start_symbol: String,
    pub rules: HashMap<String, Rewrite>,
}

impl Grammar {
    pub fn new(start_symbol: impl Into<String>) -> Self {
        Grammar {
            start_symbol: start_symbol.into(),
            rules: HashMap::new()
        }
    }

    /// Appends the alternatives of `rewrite` to the rule for `symbol`,
    /// creating the rule if needed. Repeats are kept, since writing an
    /// alternative twice makes it twice as likely.
    pub fn add_rewrite(&mut self, symbol: &str, rewrite: Rewrite) {
        self.rules.entry(symbol.to_string()).or_default().extend(rewrite);
    }

    // The alternatives of `rewrite` that the rule for `symbol` doesn't
    // already have
    pub fn fresh_alternatives(&self, symbol: &str, rewrite: Rewrite) -> Rewrite {
        match self.rules.get(symbol) {
            Some(known) => rewrite.into_iter().filter(|a| !known.contains(a)).collect(),
            None => rewrite
        }
    }

    pub fn nonterminals(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).sorted().collect()
    }

    pub fn terminals(&self) -> impl Iterator<Item = &str> {
        self.rules.values()
            .flatten()
            .flatten()
            .filter_map(|symbol| match symbol {
                Symbol::Terminal(text) => Some(text.as_str()),
                Symbol::Nonterminal(_) => None
            })
    }

    // Every word that can appear in a generated sentence, sorted and without
    // repeats
    pub fn vocabulary(&self) -> Vec<&str> {
        self.terminals()
            .flat_map(words)
            .unique()
            .sorted()
            .collect()
    }
}

// The words of a terminal, leaving out spacing and punctuation
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace().filter(|word| word.chars().any(char::is_alphanumeric))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    fn n(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    #[test]
    fn add_keeps_repeats() {
        let mut grammar = Grammar::new("thing");
        grammar.add_rewrite("thing", vec![vec![t("rock")], vec![t("stick")]]);
        grammar.add_rewrite("thing", vec![vec![t("stick")], vec![t("bone")]]);
        assert_eq!(grammar.rules["thing"], vec![vec![t("rock")], vec![t("stick")], vec![t("stick")], vec![t("bone")]]);
    }

    #[test]
    fn fresh_skips_known_alternatives() {
        let mut grammar = Grammar::new("thing");
        grammar.add_rewrite("thing", vec![vec![t("rock")], vec![t("stick")]]);

        assert_eq!(
            grammar.fresh_alternatives("thing", vec![vec![t("stick")], vec![t("bone")], vec![t("bone")]]),
            vec![vec![t("bone")], vec![t("bone")]]
        );
        assert_eq!(grammar.fresh_alternatives("tool", vec![vec![t("flint")]]), vec![vec![t("flint")]]);
    }

    #[test]
    fn vocabulary_splits_and_sorts_words() {
        let mut grammar = Grammar::new("clause");
        grammar.add_rewrite("clause", vec![vec![n("actor"), t(" "), t("toss into"), t("!")]]);
        grammar.add_rewrite("actor", vec![vec![t("Og")], vec![t("me")], vec![t("me")]]);

        assert_eq!(grammar.vocabulary(), vec!["Og", "into", "me", "toss"]);
        assert_eq!(grammar.nonterminals(), vec!["actor", "clause"]);
        assert!(grammar.rules.contains_key("actor"));
        assert!(!grammar.rules.contains_key("fire"));
    }
}
