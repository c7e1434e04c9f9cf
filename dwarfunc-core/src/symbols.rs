pub mod index;
pub mod symtab;

pub use index::SymbolIndex;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Other,
}

/// One `.symtab` entry. Its position in [`SymbolTable::entries`] is its
/// symbol-table index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTableEntry {
    pub name: String,
    pub address: u64,
    pub kind: SymbolKind,
}

impl SymbolTableEntry {
    pub fn function(name: impl Into<String>, address: u64) -> Self {
        Self {
            name: name.into(),
            address,
            kind: SymbolKind::Function,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    pub entries: Vec<SymbolTableEntry>,
}

/// Maps a function's (name, address) to its symbol-table index.
///
/// Implementations must report [`Error::AmbiguousSymbolMatch`] instead of
/// picking one of several matching function symbols.
pub trait SymbolLookup {
    fn find_symbol(&self, name: &str, address: u64) -> Result<Option<usize>>;
}

impl SymbolTable {
    pub fn new(entries: Vec<SymbolTableEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SymbolLookup for SymbolTable {
    /// Linear scan over the whole table, so ambiguity is always detected.
    fn find_symbol(&self, name: &str, address: u64) -> Result<Option<usize>> {
        let mut found = None;
        for (i, sym) in self.entries.iter().enumerate() {
            if sym.kind != SymbolKind::Function {
                continue;
            }
            if sym.name != name || sym.address != address {
                continue;
            }
            if let Some(first) = found {
                return Err(Error::AmbiguousSymbolMatch {
                    name: name.to_string(),
                    address,
                    first,
                    second: i,
                });
            }
            found = Some(i);
        }
        Ok(found)
    }
}
