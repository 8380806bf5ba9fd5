//! A single pip dependency declaration

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// The argument prefix a declaration was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    /// No prefix: a plain requirement like `package==1.0` or `.[tests]`
    None,
    /// `-c`: a constraints file
    Constraint,
    /// `-e`: an editable install
    Editable,
    /// `-r`: a reference to another requirements file
    Reference,
}

impl ArgType {
    /// Map a two character prefix onto its argument type
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "-c" => Some(Self::Constraint),
            "-e" => Some(Self::Editable),
            "-r" => Some(Self::Reference),
            _ => None,
        }
    }
}

/// One line of a pip dependency declaration.
///
/// The argument type and its payload are one value: plain and editable
/// requirements carry a requirement string, references and constraints carry
/// a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// `package`, `package==1.2.3`, `.[tests]`
    Plain(String),
    /// `-e <target>`
    Editable(String),
    /// `-r <file>`
    Reference(PathBuf),
    /// `-c <file>`
    Constraint(PathBuf),
}

impl Requirement {
    /// Parse one raw declaration.
    ///
    /// Surrounding whitespace is ignored, as is whitespace between a prefix
    /// and its value, so `-r reqs.txt` and `-rreqs.txt` are the same thing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the line starts with `-` but the first two
    /// characters are not one of `-c`, `-e` or `-r`.
    pub fn parse(raw: &str) -> Result<Self> {
        let line = raw.trim();

        if !line.starts_with('-') {
            return Ok(Self::Plain(line.to_string()));
        }

        let arg_type = line
            .get(..2)
            .and_then(ArgType::from_prefix)
            .ok_or_else(|| Error::parse(line))?;
        let value = line[2..].trim();

        Ok(match arg_type {
            ArgType::Constraint => Self::Constraint(PathBuf::from(value)),
            ArgType::Reference => Self::Reference(PathBuf::from(value)),
            ArgType::Editable => Self::Editable(value.to_string()),
            ArgType::None => Self::Plain(value.to_string()),
        })
    }

    pub fn arg_type(&self) -> ArgType {
        match self {
            Self::Plain(_) => ArgType::None,
            Self::Editable(_) => ArgType::Editable,
            Self::Reference(_) => ArgType::Reference,
            Self::Constraint(_) => ArgType::Constraint,
        }
    }

    /// The requirement string for plain and editable declarations
    pub fn requirement(&self) -> Option<&str> {
        match self {
            Self::Plain(spec) | Self::Editable(spec) => Some(spec),
            Self::Reference(_) | Self::Constraint(_) => None,
        }
    }

    /// The referenced file for `-r` and `-c` declarations
    pub fn filename(&self) -> Option<&Path> {
        match self {
            Self::Reference(path) | Self::Constraint(path) => Some(path),
            Self::Plain(_) | Self::Editable(_) => None,
        }
    }

    /// Whether this points at the local project, e.g. `.` or `-e .[tests]`
    pub fn is_local(&self) -> bool {
        self.requirement().is_some_and(|spec| spec.starts_with('.'))
    }
}

impl FromStr for Requirement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(spec) => write!(f, "{spec}"),
            Self::Editable(spec) => write!(f, "-e {spec}"),
            Self::Reference(path) => write!(f, "-r {}", path.display()),
            Self::Constraint(path) => write!(f, "-c {}", path.display()),
        }
    }
}
