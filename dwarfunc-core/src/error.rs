use thiserror::Error;

/// Errors raised while loading a binary or resolving its functions.
#[derive(Error, Debug)]
pub enum Error {
    /// A compilation unit's root entry lacks an attribute every unit must carry.
    #[error("compilation unit at offset {unit_offset:#x} has no {attribute} attribute")]
    MissingRequiredAttribute {
        unit_offset: u64,
        attribute: gimli::DwAt,
    },

    /// A file or directory index points outside its line program table.
    #[error("{table} index {index} out of range (table has {len} entries)")]
    IndexOutOfRange {
        table: Table,
        index: i64,
        len: usize,
    },

    /// More than one function symbol shares a (name, address) pair.
    #[error(
        "symbol `{name}` at {address:#x} is ambiguous: matches entries {first} and {second}"
    )]
    AmbiguousSymbolMatch {
        name: String,
        address: u64,
        first: usize,
        second: usize,
    },

    /// A function references a declaring file but its unit has no line program.
    #[error("compilation unit at offset {unit_offset:#x} has no line program")]
    MissingLineProgram { unit_offset: u64 },

    #[error("unsupported binary format: {0}")]
    UnsupportedFormat(String),

    #[error("DWARF error: {0}")]
    Dwarf(#[from] gimli::Error),

    #[error("ELF error: {0}")]
    Elf(#[from] goblin::error::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The line program table an index was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    FileEntries,
    IncludeDirectories,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::FileEntries => write!(f, "file entry"),
            Table::IncludeDirectories => write!(f, "include directory"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
