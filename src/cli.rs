use std::path::PathBuf;

use clap::Parser;

use crate::lang::troglodese::Fragment;

#[derive(Parser, Debug)]
#[command(version, about = "Babble in Troglodese, or in any grammar you give it")]
pub struct Cli {
    /// File containing the grammar (default: built-in Troglodese)
    pub file: Option<PathBuf>,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Amount to generate
    #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 1)]
    pub amount: u32,

    /// Fragment to add to the grammar before generating (repeatable)
    #[arg(short, long, value_enum, value_name = "FRAGMENT")]
    pub fragment: Vec<Fragment>,

    /// Seed for reproducible output
    #[arg(long, env = "CLAN_SEED")]
    pub seed: Option<u64>,

    /// Print the vocabulary instead of generating
    #[arg(long)]
    pub symbols: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn level_filter(&self) -> Option<log::LevelFilter> {
        match self.verbose {
            0 => None,
            1 => Some(log::LevelFilter::Info),
            2 => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }

    /// Sets up logging. `-v` flags win over `CLAN_LOG`, which wins over the
    /// default of `warn`.
    pub fn initialize_logging(&self) {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Warn);
        builder.parse_env("CLAN_LOG");

        if let Some(level) = self.level_filter() {
            builder.filter_level(level);
        }
        builder.init();
    }
}
