use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Nonterminal(String),
    Terminal(String)
}

fn ends_nonterminal(c: char) -> bool {
    c.is_whitespace() || c == '=' || c == '|' || c == '\"'
}

// Expects the iterator to sit on the opening quote
pub fn lex_terminal(line: &mut impl Iterator<Item = char>) -> Result<Token> {
    line.next();

    let mut text = String::new();
    loop {
        match line.next() {
            Some('\"') => return Ok(Token::Terminal(text)),
            Some('\\') => text.push(match line.next() {
                Some('\"') => '\"',
                Some('\\') => '\\',
                Some('n') => '\n',
                Some(other) => return Err(CompileErrorType::UnknownEscape(other)),
                None => return Err(CompileErrorType::UnmatchedQuote)
            }),
            Some(c) => text.push(c),
            None => return Err(CompileErrorType::UnmatchedQuote)
        }
    }
}

pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Token {
    Token::Nonterminal(line.peeking_take_while(|&c| !ends_nonterminal(c)).collect())
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '=' => {
                chars.next();
                tokens.push(Token::Equals);
            }
            '|' => {
                chars.next();
                tokens.push(Token::Or);
            }
            '\"' => tokens.push(lex_terminal(&mut chars)?),
            c if c.is_whitespace() => {
                chars.next();
            }
            _ => tokens.push(lex_nonterminal(&mut chars))
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn lex_normal_terminal() {
        let lines = vec![
            "\"flint\" knap chip",
            "\"hand axe\"",
            "\"ugh\"\"hunga\"",
            "\"Og say \\\"hot\\\"\\n\" rest"
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Terminal("flint".to_string()), " knap chip"),
            (Token::Terminal("hand axe".to_string()), ""),
            (Token::Terminal("ugh".to_string()), "\"hunga\""),
            (Token::Terminal("Og say \"hot\"\n".to_string()), " rest")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_broken_terminal() {
        let unclosed = vec!["\"ember", "\"toss into embers", "\"trailing\\"];
        for line in unclosed {
            let mut chars = line.chars();
            assert_eq!(lex_terminal(&mut chars).unwrap_err(), CompileErrorType::UnmatchedQuote);
        }

        let mut chars = "\"smoke\\t\"".chars();
        assert_eq!(lex_terminal(&mut chars).unwrap_err(), CompileErrorType::UnknownEscape('t'));
    }

    #[test]
    fn lex_normal_nonterminal() {
        let lines = vec![
            "fire.thing | ash",
            "actor",
            "tool=\"flint\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Nonterminal("fire.thing".to_string()), " | ash"),
            (Token::Nonterminal("actor".to_string()), ""),
            (Token::Nonterminal("tool".to_string()), "=\"flint\"")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_nonterminal(&mut chars), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "clause = actor \" \" action | exclaim",
            "tool=\"flint\"|\"\""
        ];
        let answers = vec![
            vec![
                Token::Nonterminal("clause".to_string()),
                Token::Equals,
                Token::Nonterminal("actor".to_string()),
                Token::Terminal(" ".to_string()),
                Token::Nonterminal("action".to_string()),
                Token::Or,
                Token::Nonterminal("exclaim".to_string())
            ],
            vec![
                Token::Nonterminal("tool".to_string()),
                Token::Equals,
                Token::Terminal("flint".to_string()),
                Token::Or,
                Token::Terminal("".to_string())
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }
}
