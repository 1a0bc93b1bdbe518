/*
    This module parses rule lines of the form `symbol = alternative | ...`,
    either from files or from the rule lists of built-in languages
*/

mod lexer;
mod verifier;

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use log::debug;
use verifier::verify_rules;
pub use verifier::{IntermediateRuleset, LocatedRewrite};

#[derive(Debug, thiserror::Error)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    #[error("Expected `=` after nonterminal")]
    MissingEquals,
    // A rule has multiple equals signs
    #[error("Unexpected `=` encountered")]
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    #[error("Tried to define something other than a nonterminal")]
    MissingNonterminal,
    // There is an unclosed quote
    #[error("Unmatched quotes")]
    UnmatchedQuote,
    // A backslash in a terminal is followed by something we can't escape
    #[error("Unknown escape `\\{0}` in terminal")]
    UnknownEscape(char),
    // An undefined token was used
    #[error("Could not find definition for `{0}`")]
    UndefinedNonterminal(String),
    // Every alternative of the nonterminal recurses forever
    #[error("`{0}` can never finish generating")]
    NonProductive(String),
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with clan, not the grammar
    #[error("Rewrite was not fully split (this is a problem with clan, not the grammar)")]
    UnsplitRewrite,
    // A blank line got too deep into the parser
    // This is a problem with clan, not the grammar
    #[error("Blank line encountered in rule parser (this is a problem with clan, not the grammar)")]
    UnexpectedBlankLine,
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::UnknownEscape(a), CompileErrorType::UnknownEscape(b)) => a == b,
            (CompileErrorType::UndefinedNonterminal(a), CompileErrorType::UndefinedNonterminal(b)) => a == b,
            (CompileErrorType::NonProductive(a), CompileErrorType::NonProductive(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: &Path) -> CompileError {
    CompileError::new(Location::whole(file), CompileErrorType::FileError(error))
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

// Pseudo-path for rules that were already part of a grammar being extended
const EXISTING_RULES: &str = "<grammar>";

#[derive(PartialEq, Debug, Clone)]
pub struct Rule {
    pub symbol: String,
    pub rewrite: Rewrite,
    pub location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter().map(|t| match t {
        Token::Equals => Err(CompileErrorType::UnexpectedEquals),
        Token::Or => Err(CompileErrorType::UnsplitRewrite),
        Token::Nonterminal(s) => Ok(Symbol::Nonterminal(s.clone())),
        Token::Terminal(s) => Ok(Symbol::Terminal(s.clone()))
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let symbol = match tokens.first() {
        Some(Token::Nonterminal(s)) => Ok(s.clone()),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    Ok(Rule {
        symbol,
        rewrite,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| CompileError::new(location, error))
}

pub fn is_rule_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with(';')
}

// Returns an iterator over the rule lines of a source, with the io errors
// wrapped in CompileError and numbered from 1
fn source_line_nums<'a>(reader: impl BufRead + 'a, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path)))
        .enumerate()
        .filter(|(_, line)| line.as_ref().map_or(true, |l| is_rule_line(l)))
        .map(|(num, line)| (num + 1, line))
}

// Parses every line, keeping going after failures so all errors get reported.
// Returns the rules that parsed alongside the errors of those that didn't
fn partition_numbered_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &Path) -> (Vec<Rule>, CompileErrors) {
    lines
        .map(|(num, line_res)| {
            line_res.and_then(|line| parse_lex_line(&line, Location::at(path, num)))
        })
        .partition_result()
}

fn parse_numbered_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &Path) -> FileResult<Vec<Rule>> {
    let (rules, errors) = partition_numbered_lines(lines, path);

    if errors.is_empty() {
        Ok(rules)
    } else {
        Err(errors)
    }
}

/// Parses rule lines that are already in memory, such as the rules of a
/// built-in language. Blank and comment lines are skipped but still counted.
///
/// Unlike the other parse functions this never gives up: the rules that
/// parsed come back together with the errors of the lines that didn't.
pub fn parse_rules<S: AsRef<str>>(lines: &[S], origin: &Path) -> (Vec<Rule>, CompileErrors) {
    let numbered = lines.iter()
        .enumerate()
        .filter(|(_, line)| is_rule_line(line.as_ref()))
        .map(|(num, line)| (num + 1, Ok(line.as_ref().to_string())));

    partition_numbered_lines(numbered, origin)
}

fn locate(rewrite: Rewrite, location: &Location) -> LocatedRewrite {
    rewrite.into_iter().map(|alternative| (alternative, location.clone())).collect()
}

fn add_located(ruleset: &mut IntermediateRuleset, symbol: String, rewrite: Rewrite, location: &Location) {
    ruleset.entry(symbol).or_default().extend(locate(rewrite, location));
}

// Collects rules into a ruleset. A nonterminal defined more than once gets
// the alternatives of every definition, in order
fn ruleset_from_rules(ruleset: &mut IntermediateRuleset, rules: Vec<Rule>) {
    for rule in rules {
        add_located(ruleset, rule.symbol, rule.rewrite, &rule.location);
    }
}

fn grammar_from_ruleset(start_symbol: String, ruleset: IntermediateRuleset) -> FileResult<Grammar> {
    verify_rules(&ruleset)?;

    let mut grammar = Grammar::new(start_symbol);
    for (symbol, located) in ruleset {
        grammar.add_rewrite(&symbol, located.into_iter().map(|(alternative, _)| alternative).collect());
    }

    Ok(grammar)
}

pub fn grammar_from_rules(rule_list: Vec<Rule>) -> FileResult<Grammar> {
    let start_symbol = rule_list.first()
        .map(|rule| rule.symbol.clone())
        .unwrap_or_default();

    let mut ruleset = IntermediateRuleset::with_capacity(rule_list.len());
    ruleset_from_rules(&mut ruleset, rule_list);

    grammar_from_ruleset(start_symbol, ruleset)
}

/// Builds the grammar that results from adding `rules` to `grammar`. The
/// original grammar is not touched, and the result is verified as a whole.
///
/// Returns the new grammar and how many alternatives the rules added.
pub fn extend_grammar(grammar: &Grammar, rules: Vec<Rule>) -> FileResult<(Grammar, usize)> {
    let existing = Location::whole(&PathBuf::from(EXISTING_RULES));
    let mut ruleset: IntermediateRuleset = grammar.rules.iter()
        .map(|(symbol, rewrite)| (symbol.clone(), locate(rewrite.clone(), &existing)))
        .collect();

    // Only alternatives the grammar already had are skipped, so extending
    // twice with the same rules changes nothing
    let mut added = 0;
    for rule in rules {
        let fresh = grammar.fresh_alternatives(&rule.symbol, rule.rewrite);
        added += fresh.len();
        add_located(&mut ruleset, rule.symbol, fresh, &rule.location);
    }
    debug!("extension adds {} alternatives to {} rules", added, grammar.rules.len());

    let extended = grammar_from_ruleset(grammar.start_symbol.clone(), ruleset)?;
    Ok((extended, added))
}

pub fn parse_str(text: &str, origin: &Path) -> FileResult<Grammar> {
    let rules = parse_numbered_lines(source_line_nums(text.as_bytes(), origin), origin)?;
    grammar_from_rules(rules)
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let text = std::fs::read_to_string(path).map_err(|e| vec![io_error(e, path)])?;
    debug!("read {} lines from {}", text.lines().count(), path.display());

    parse_str(&text, path)
}
