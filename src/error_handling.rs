use std::fmt::Display;
use std::path::{Path, PathBuf};

pub trait ErrorType: Display + PartialEq {}

// Where an error came from. Line 0 means the whole source
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn whole(file: &Path) -> Self {
        Location { file: file.to_path_buf(), line: 0 }
    }

    pub fn at(file: &Path, line: usize) -> Self {
        Location { file: file.to_path_buf(), line }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn new(location: Location, error: T) -> Self {
        Error { location, error }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;

// Prints every error on its own line to stderr
pub fn report<T: ErrorType>(errors: &[Error<T>]) {
    for error in errors {
        eprintln!("{}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        let path = PathBuf::from("caves/lascaux.bnf");
        assert_eq!(Location::whole(&path).to_string(), "caves/lascaux.bnf");
        assert_eq!(Location::at(&path, 12).to_string(), "caves/lascaux.bnf:12");
    }
}
