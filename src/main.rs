mod cli;
mod error_handling;
mod generator;
mod grammar;
mod lang;
mod parser;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::Cli;
use error_handling::report;
use grammar::Grammar;
use lang::troglodese;

// Reads the grammar the user asked for, with fragments applied. Errors have
// already been reported when this returns None
fn load_grammar(cli: &Cli) -> Option<(Grammar, PathBuf)> {
    let (mut grammar, source) = match &cli.file {
        Some(path) => match parser::parse_file(path) {
            Ok(grammar) => (grammar, path.clone()),
            Err(errors) => {
                report(&errors);
                return None;
            }
        },
        None => match troglodese::grammar() {
            Ok(grammar) => (grammar, troglodese::troglodese().origin()),
            Err(errors) => {
                report(&errors);
                return None;
            }
        },
    };

    for fragment in &cli.fragment {
        if let Err(error) = fragment.apply(&mut grammar) {
            debug!("{}", error);
            report(&error.errors);
            return None;
        }
    }

    debug!("grammar defines {}", grammar.nonterminals().join(", "));
    Some((grammar, source))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.initialize_logging();

    let Some((grammar, source)) = load_grammar(&cli) else {
        return ExitCode::FAILURE;
    };

    if cli.symbols {
        for word in grammar.vocabulary() {
            println!("{}", word);
        }
        return ExitCode::SUCCESS;
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for _ in 0..cli.amount {
        let generated = match &cli.start {
            Some(start) => generator::generate_with_override(&grammar, start, &source, &mut rng),
            None => generator::generate(&grammar, &source, &mut rng),
        };
        match generated {
            Ok(sentence) => println!("{}", sentence),
            Err(error) => {
                report(&[error]);
                return ExitCode::FAILURE;
            }
        }
    }

    info!("generated {} sentences from {}", cli.amount, source.display());
    ExitCode::SUCCESS
}
