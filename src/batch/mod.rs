//! Batch Module
//!
//! Commands handed to the dispatcher, and the reader for batch files.
//!
//! ## File Format
//! One comma-separated command per line:
//! ```text
//! threads,4
//! insert,Alice,100
//! delete,Alice
//! search,Bob
//! print
//! ```
//! `threads,<n>` is advisory only; one worker is always started per command.

mod parser;

pub use parser::{load_batch, parse_batch, read_batch};

/// Kind of a batch command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Insert,
    Delete,
    Search,
    Print,
}

impl CommandKind {
    /// Keyword as written in batch files
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Insert => "insert",
            CommandKind::Delete => "delete",
            CommandKind::Search => "search",
            CommandKind::Print => "print",
        }
    }

    /// Upper-case label used in the audit trail
    pub fn label(&self) -> &'static str {
        match self {
            CommandKind::Insert => "INSERT",
            CommandKind::Delete => "DELETE",
            CommandKind::Search => "SEARCH",
            CommandKind::Print => "PRINT",
        }
    }
}

/// A parsed command
///
/// `name` is empty for `Print`; `value` is only meaningful for `Insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub name: String,
    pub value: u32,
}

impl Command {
    pub fn insert(name: impl Into<String>, value: u32) -> Self {
        Self {
            kind: CommandKind::Insert,
            name: name.into(),
            value,
        }
    }

    pub fn delete(name: impl Into<String>) -> Self {
        Self {
            kind: CommandKind::Delete,
            name: name.into(),
            value: 0,
        }
    }

    pub fn search(name: impl Into<String>) -> Self {
        Self {
            kind: CommandKind::Search,
            name: name.into(),
            value: 0,
        }
    }

    pub fn print() -> Self {
        Self {
            kind: CommandKind::Print,
            name: String::new(),
            value: 0,
        }
    }
}

/// An ordered set of commands for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub commands: Vec<Command>,

    /// Value of a `threads,<n>` directive, if present
    pub thread_hint: Option<usize>,
}

impl Batch {
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            thread_hint: None,
        }
    }

    /// Number of `Insert` commands, i.e. the barrier's initial count
    pub fn insert_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| command.kind == CommandKind::Insert)
            .count()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<Command> for Batch {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
