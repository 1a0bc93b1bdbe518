/*
    This module holds languages: a name, the vocabulary words the language
    brings, and the rule lines that use them
*/

pub mod troglodese;

use std::collections::HashSet;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::error_handling::*;
use crate::grammar::{words, Grammar, Symbol};
use crate::parser::{self, CompileErrorType, CompileErrors, Rule};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LanguageErrorType {
    // The name is empty or only whitespace
    #[error("Language has no name")]
    EmptyName,
    // The same symbol is listed twice
    #[error("Symbol `{0}` is listed more than once")]
    DuplicateSymbol(String),
    // A symbol that no terminal of the rules ever produces
    #[error("Symbol `{0}` is not used by any rule")]
    UnusedSymbol(String),
    // One of the rule lines is broken
    #[error(transparent)]
    Rule(#[from] CompileErrorType),
}

impl ErrorType for LanguageErrorType {}

pub type LanguageError = Error<LanguageErrorType>;
pub type LanguageErrors = Errors<LanguageErrorType>;

fn from_compile_errors(errors: CompileErrors) -> LanguageErrors {
    errors.into_iter()
        .map(|e| LanguageError::new(e.location, e.error.into()))
        .collect()
}

/// A fragment could not be added to a grammar. The grammar is unchanged.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("Could not add `{language}` to the grammar ({} problems)", .errors.len())]
pub struct ExtendError {
    pub language: String,
    pub errors: LanguageErrors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub name: String,
    pub symbols: Vec<String>,
    pub rules: Vec<String>,
}

impl Language {
    pub fn new<S: Into<String>>(name: impl Into<String>, symbols: impl IntoIterator<Item = S>, rules: impl IntoIterator<Item = S>) -> Self {
        Language {
            name: name.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    // Stands in for a file path in error locations
    pub fn origin(&self) -> PathBuf {
        PathBuf::from(format!("<{}>", self.name.trim()))
    }

    /// Checks the language and parses its rules.
    ///
    /// Every problem is reported, not just the first: an empty name, a
    /// duplicate symbol, a symbol that no terminal produces, and every rule
    /// line that fails to parse.
    pub fn validate(&self) -> Result<Vec<Rule>, LanguageErrors> {
        let origin = self.origin();
        let whole = Location::whole(&origin);
        let mut errors = LanguageErrors::new();

        if self.name.trim().is_empty() {
            errors.push(LanguageError::new(whole.clone(), LanguageErrorType::EmptyName));
        }

        let mut seen = HashSet::with_capacity(self.symbols.len());
        for symbol in &self.symbols {
            if !seen.insert(symbol.as_str()) {
                errors.push(LanguageError::new(whole.clone(), LanguageErrorType::DuplicateSymbol(symbol.clone())));
            }
        }

        // Symbols are checked against the rules that did parse, so a broken
        // line doesn't hide the other problems
        let (rules, rule_errors) = parser::parse_rules(&self.rules, &origin);
        errors.extend(from_compile_errors(rule_errors));

        let used: HashSet<&str> = rules.iter()
            .flat_map(|rule| rule.rewrite.iter().flatten())
            .filter_map(|symbol| match symbol {
                Symbol::Terminal(text) => Some(text.as_str()),
                Symbol::Nonterminal(_) => None,
            })
            .flat_map(words)
            .collect();

        errors.extend(self.symbols.iter()
            .filter(|symbol| !used.contains(symbol.as_str()))
            .map(|symbol| LanguageError::new(whole.clone(), LanguageErrorType::UnusedSymbol(symbol.clone()))));

        if errors.is_empty() {
            Ok(rules)
        } else {
            Err(errors)
        }
    }

    /// Builds a verified grammar from this language alone. The start symbol
    /// is the nonterminal of the first rule.
    pub fn grammar(&self) -> Result<Grammar, LanguageErrors> {
        let rules = self.validate()?;
        debug!("building grammar for {} from {} rules", self.name, rules.len());
        parser::grammar_from_rules(rules).map_err(from_compile_errors)
    }

    /// Adds this language's rules to `grammar`. Alternatives the grammar
    /// already has are skipped, and the start symbol stays the same.
    ///
    /// Either every rule goes in and the result verifies, or `grammar` is
    /// left exactly as it was. Returns how many alternatives were added.
    pub fn extend(&self, grammar: &mut Grammar) -> Result<usize, ExtendError> {
        let fail = |errors| ExtendError { language: self.name.clone(), errors };

        let rules = self.validate().map_err(fail)?;
        let (extended, added) = parser::extend_grammar(grammar, rules)
            .map_err(|errors| fail(from_compile_errors(errors)))?;
        *grammar = extended;

        if added == 0 {
            warn!("{} adds nothing the grammar did not already have", self.name);
        } else {
            info!("added {} alternatives from {}", added, self.name);
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn cave() -> Language {
        Language::new(
            "cave",
            ["Og", "rock", "smash"],
            ["clause = actor \" smash \" thing", "actor = \"Og\"", "thing = \"rock\""]
        )
    }

    #[test]
    fn valid_language_builds_grammar() {
        let grammar = cave().grammar().unwrap();
        assert_eq!(grammar.start_symbol, "clause");
        assert_eq!(grammar.vocabulary(), vec!["Og", "rock", "smash"]);
    }

    #[test]
    fn reports_every_language_problem() {
        let language = Language::new(
            " ",
            ["Og", "rock", "Og", "flint"],
            ["actor = \"Og\" | \"rock\""]
        );
        let origin = Location::whole(Path::new("<>"));

        assert_eq!(language.validate().unwrap_err(), vec![
            LanguageError::new(origin.clone(), LanguageErrorType::EmptyName),
            LanguageError::new(origin.clone(), LanguageErrorType::DuplicateSymbol("Og".to_string())),
            LanguageError::new(origin, LanguageErrorType::UnusedSymbol("flint".to_string())),
        ]);
    }

    #[test]
    fn rule_errors_keep_their_lines() {
        let language = Language::new(
            "broken",
            Vec::<String>::new(),
            vec!["thing = \"rock\"".to_string(), "thing \"stick\"".to_string()]
        );
        let errors = language.validate().unwrap_err();

        assert_eq!(errors, vec![LanguageError::new(
            Location::at(Path::new("<broken>"), 2),
            LanguageErrorType::Rule(CompileErrorType::MissingEquals)
        )]);
        assert_eq!(errors[0].error.to_string(), "Expected `=` after nonterminal");
    }

    #[test]
    fn broken_rule_keeps_other_problems() {
        let language = Language::new("pit", ["Og", "flint"], ["actor = \"Og\"", "thing \"rock\""]);

        assert_eq!(language.validate().unwrap_err(), vec![
            LanguageError::new(
                Location::at(Path::new("<pit>"), 2),
                LanguageErrorType::Rule(CompileErrorType::MissingEquals)
            ),
            LanguageError::new(
                Location::whole(Path::new("<pit>")),
                LanguageErrorType::UnusedSymbol("flint".to_string())
            ),
        ]);
    }

    #[test]
    fn grammar_reports_undefined() {
        let language = Language::new("lonely", ["Og"], ["clause = \"Og \" action"]);
        let errors = language.grammar().unwrap_err();

        assert_eq!(errors[0].error, LanguageErrorType::Rule(CompileErrorType::UndefinedNonterminal("action".to_string())));
    }

    #[test]
    fn failed_extend_changes_nothing() {
        let mut grammar = cave().grammar().unwrap();
        let before = grammar.clone();
        let fragment = Language::new("spear", ["spear"], ["thing = weapon", "tool = \"spear\""]);

        let error = fragment.extend(&mut grammar).unwrap_err();
        assert_eq!(error.language, "spear");
        assert_eq!(error.errors[0].location, Location::at(Path::new("<spear>"), 1));
        assert_eq!(grammar, before);
    }

    #[test]
    fn extend_errors_name_the_fragment() {
        let mut grammar = cave().grammar().unwrap();
        let fragment = Language::new("spear", ["spear"], ["thing = weapon", "tool = \"spear\""]);

        let error = fragment.extend(&mut grammar).unwrap_err();
        assert!(!error.errors.is_empty());
        for located in &error.errors {
            assert!(located.to_string().starts_with("\x1b[31;49;1m[<spear>"));
        }
    }
}
