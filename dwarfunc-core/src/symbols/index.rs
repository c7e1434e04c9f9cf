use std::collections::HashMap;

use super::{SymbolKind, SymbolLookup, SymbolTable};
use crate::{Error, Result};

/// Where a (name, address) key was seen among function symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Unique(usize),
    Ambiguous(usize, usize),
}

/// Function symbols of a [`SymbolTable`] keyed by name, then address.
///
/// Built once per run; lookups agree with [`SymbolTable::find_symbol`],
/// including which two indices an ambiguity error reports. Keying by name
/// first lets a lookup borrow the queried `&str`.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    by_name: HashMap<String, HashMap<u64, Slot>>,
}

impl SymbolIndex {
    pub fn new(table: &SymbolTable) -> Self {
        let mut by_name: HashMap<String, HashMap<u64, Slot>> = HashMap::new();
        for (i, sym) in table.entries.iter().enumerate() {
            if sym.kind != SymbolKind::Function {
                continue;
            }
            by_name
                .entry(sym.name.clone())
                .or_default()
                .entry(sym.address)
                .and_modify(|slot| {
                    if let Slot::Unique(first) = *slot {
                        *slot = Slot::Ambiguous(first, i);
                    }
                })
                .or_insert(Slot::Unique(i));
        }
        let index = Self { by_name };
        log::debug!("Indexed {} distinct function symbols", index.len());
        index
    }

    /// Number of distinct (name, address) pairs.
    pub fn len(&self) -> usize {
        self.by_name.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl SymbolLookup for SymbolIndex {
    fn find_symbol(&self, name: &str, address: u64) -> Result<Option<usize>> {
        let slot = self
            .by_name
            .get(name)
            .and_then(|addresses| addresses.get(&address));
        match slot {
            None => Ok(None),
            Some(Slot::Unique(i)) => Ok(Some(*i)),
            Some(Slot::Ambiguous(first, second)) => Err(Error::AmbiguousSymbolMatch {
                name: name.to_string(),
                address,
                first: *first,
                second: *second,
            }),
        }
    }
}
