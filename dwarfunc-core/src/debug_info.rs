//! Owned view of the DWARF data the resolver works on.
//!
//! [`reader`] fills these types from a binary with `gimli`; tests build them by
//! hand. Nothing here is mutated once a unit has been materialized.

pub mod reader;

use std::collections::HashMap;

/// A raw attribute value as handed out by the DWARF reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Inline or string-table string, undecoded.
    Bytes(Vec<u8>),
    /// Unsigned constant, including file indices.
    Udata(u64),
    /// Target address.
    Address(u64),
}

/// A debugging information entry.
#[derive(Debug, Clone)]
pub struct DebugEntry {
    pub tag: gimli::DwTag,
    pub attributes: HashMap<gimli::DwAt, AttrValue>,
}

impl DebugEntry {
    pub fn new(tag: gimli::DwTag) -> Self {
        Self {
            tag,
            attributes: HashMap::new(),
        }
    }

    pub fn with_attr(mut self, name: gimli::DwAt, value: AttrValue) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn attr(&self, name: gimli::DwAt) -> Option<&AttrValue> {
        self.attributes.get(&name)
    }

    pub fn is_function(&self) -> bool {
        self.tag == gimli::DW_TAG_subprogram
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: Vec<u8>,
    pub dir_index: u64,
}

/// File and directory tables of a unit's line-number program header.
///
/// Before DWARF 5 the compilation directory and the primary source file are
/// implicit and do not appear in either table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineProgram {
    pub version: u16,
    pub file_entries: Vec<FileEntry>,
    pub include_directories: Vec<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct CompilationUnit {
    /// Offset of the unit header in `.debug_info`.
    pub offset: u64,
    pub root: DebugEntry,
    pub line_program: Option<LineProgram>,
    /// Every entry below the root, depth-first pre-order.
    pub entries: Vec<DebugEntry>,
}
