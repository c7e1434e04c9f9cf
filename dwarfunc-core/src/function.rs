pub mod attributes;
pub mod path;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::debug_info::{DebugEntry, LineProgram};
use crate::symbols::SymbolLookup;
use crate::{EmissionPolicy, Error, ExtractOptions, Result};

pub use path::{clean_relative_path, resolve_file};

/// What the debug info says about one function definition.
///
/// Under [`EmissionPolicy::Strict`] name, file, line and address are always
/// set; under [`EmissionPolicy::Lenient`] any of them may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    pub name: Option<String>,
    pub file: Option<PathBuf>,
    pub line: Option<u64>,
    pub address: Option<u64>,
    pub symbol_index: Option<usize>,
}

struct Opt<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Opt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "None"),
        }
    }
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file.as_ref().map(|p| p.display().to_string());
        let address = self.address.map(|a| format!("{a:#x}"));
        write!(
            f,
            "{} {} {} {} {}",
            Opt(&self.name),
            Opt(&file),
            Opt(&self.line),
            Opt(&address),
            Opt(&self.symbol_index)
        )
    }
}

/// The unit-level context a function entry is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct UnitContext<'a> {
    pub offset: u64,
    pub line_program: Option<&'a LineProgram>,
}

/// Builds the descriptor for a `DW_TAG_subprogram` entry.
///
/// Returns `Ok(None)` when the function filter rejects the entry or the
/// emission policy finds too little to report.
pub fn build<S: SymbolLookup + ?Sized>(
    entry: &DebugEntry,
    unit: UnitContext<'_>,
    symbols: &S,
    options: &ExtractOptions,
) -> Result<Option<FunctionDescriptor>> {
    debug_assert!(entry.is_function());

    let name = attributes::name(entry);
    if let Some(filter) = &options.function_filter {
        if name.as_deref() != Some(filter.as_str()) {
            return Ok(None);
        }
    }

    let file = match attributes::decl_file(entry) {
        Some(index) => {
            let program = unit.line_program.ok_or(Error::MissingLineProgram {
                unit_offset: unit.offset,
            })?;
            Some(resolve_file(program, index, options.legacy_indexing)?)
        }
        None => None,
    };
    let line = attributes::decl_line(entry);
    let address = attributes::low_pc(entry);

    // An empty name, line 0 or address 0 (a body dropped by the linker) carry
    // no location and count as unresolved.
    let has_name = name.as_deref().is_some_and(|n| !n.is_empty());
    let has_line = line.is_some_and(|l| l != 0);
    let has_address = address.is_some_and(|a| a != 0);
    let emit = match options.emission {
        EmissionPolicy::Strict => has_name && file.is_some() && has_line && has_address,
        EmissionPolicy::Lenient => has_name || file.is_some() || has_line,
    };
    if !emit {
        log::debug!(
            "Skipping {} in unit {:#x}: incomplete under {} emission",
            name.as_deref().unwrap_or("<anonymous>"),
            unit.offset,
            options.emission
        );
        return Ok(None);
    }

    let file = file.map(|file| {
        let file = clean_relative_path(&file);
        match &options.base_path {
            Some(base) => base.join(file),
            None => file,
        }
    });

    let symbol_index = match (&name, address) {
        (Some(name), Some(address)) => symbols.find_symbol(name, address)?,
        _ => None,
    };

    Ok(Some(FunctionDescriptor {
        name,
        file,
        line,
        address,
        symbol_index,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_info::{AttrValue, FileEntry};
    use crate::symbols::{SymbolTable, SymbolTableEntry};
    use crate::LegacyIndexing;

    fn program() -> LineProgram {
        LineProgram {
            version: 4,
            file_entries: vec![FileEntry {
                name: b"src/a.c".to_vec(),
                dir_index: 1,
            }],
            include_directories: vec![b"../..".to_vec()],
        }
    }

    fn main_entry() -> DebugEntry {
        DebugEntry::new(gimli::DW_TAG_subprogram)
            .with_attr(gimli::DW_AT_name, AttrValue::Bytes(b"main".to_vec()))
            .with_attr(gimli::DW_AT_decl_file, AttrValue::Udata(1))
            .with_attr(gimli::DW_AT_decl_line, AttrValue::Udata(10))
            .with_attr(gimli::DW_AT_low_pc, AttrValue::Address(0x1000))
    }

    fn symbols() -> SymbolTable {
        SymbolTable::new(vec![
            SymbolTableEntry::function("other", 0x2000),
            SymbolTableEntry::function("main", 0x1000),
        ])
    }

    fn ctx(program: &LineProgram) -> UnitContext<'_> {
        UnitContext {
            offset: 0,
            line_program: Some(program),
        }
    }

    #[test]
    fn builds_complete_descriptor() {
        let p = program();
        let desc = build(&main_entry(), ctx(&p), &symbols(), &ExtractOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            desc,
            FunctionDescriptor {
                name: Some("main".to_string()),
                file: Some(PathBuf::from("src/a.c")),
                line: Some(10),
                address: Some(0x1000),
                symbol_index: Some(1),
            }
        );
        assert_eq!(desc.to_string(), "main src/a.c 10 0x1000 1");
    }

    #[test]
    fn base_path_prefixes_cleaned_file() {
        let p = program();
        let options = ExtractOptions {
            base_path: Some(PathBuf::from("/work")),
            ..Default::default()
        };
        let desc = build(&main_entry(), ctx(&p), &symbols(), &options).unwrap().unwrap();
        assert_eq!(desc.file, Some(PathBuf::from("/work/src/a.c")));
    }

    #[test]
    fn function_filter_skips_other_names() {
        let p = program();
        let options = ExtractOptions {
            function_filter: Some("bar".to_string()),
            ..Default::default()
        };
        assert_eq!(build(&main_entry(), ctx(&p), &symbols(), &options).unwrap(), None);
    }

    #[test]
    fn strict_policy_requires_every_field() {
        let p = program();
        let mut entry = main_entry();
        entry.attributes.remove(&gimli::DW_AT_low_pc);
        let options = ExtractOptions::default();
        assert_eq!(build(&entry, ctx(&p), &symbols(), &options).unwrap(), None);
    }

    #[test]
    fn strict_policy_drops_zero_address_and_line() {
        let p = program();
        let discarded = main_entry().with_attr(gimli::DW_AT_low_pc, AttrValue::Address(0));
        let options = ExtractOptions::default();
        assert_eq!(build(&discarded, ctx(&p), &symbols(), &options).unwrap(), None);

        let no_line = main_entry().with_attr(gimli::DW_AT_decl_line, AttrValue::Udata(0));
        assert_eq!(build(&no_line, ctx(&p), &symbols(), &options).unwrap(), None);

        let unnamed = main_entry().with_attr(gimli::DW_AT_name, AttrValue::Bytes(Vec::new()));
        assert_eq!(build(&unnamed, ctx(&p), &symbols(), &options).unwrap(), None);
    }

    #[test]
    fn lenient_policy_keeps_zero_address_functions() {
        let p = program();
        let options = ExtractOptions {
            emission: EmissionPolicy::Lenient,
            ..Default::default()
        };
        let discarded = main_entry().with_attr(gimli::DW_AT_low_pc, AttrValue::Address(0));
        let desc = build(&discarded, ctx(&p), &symbols(), &options).unwrap().unwrap();
        assert_eq!(desc.address, Some(0));
        assert_eq!(desc.symbol_index, None);
    }

    #[test]
    fn lenient_policy_reports_partial_functions() {
        let p = program();
        let options = ExtractOptions {
            emission: EmissionPolicy::Lenient,
            ..Default::default()
        };
        let entry = DebugEntry::new(gimli::DW_TAG_subprogram)
            .with_attr(gimli::DW_AT_name, AttrValue::Bytes(b"decl_only".to_vec()));
        let desc = build(&entry, ctx(&p), &symbols(), &options).unwrap().unwrap();
        assert_eq!(desc.name.as_deref(), Some("decl_only"));
        assert_eq!(desc.symbol_index, None);
        assert_eq!(desc.to_string(), "decl_only None None None None");

        let bare = DebugEntry::new(gimli::DW_TAG_subprogram)
            .with_attr(gimli::DW_AT_low_pc, AttrValue::Address(0x1000));
        assert_eq!(build(&bare, ctx(&p), &symbols(), &options).unwrap(), None);
    }

    #[test]
    fn decl_file_without_line_program_fails() {
        let unit = UnitContext {
            offset: 0x40,
            line_program: None,
        };
        let err = build(&main_entry(), unit, &symbols(), &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingLineProgram { unit_offset: 0x40 }));
    }

    #[test]
    fn bad_file_index_is_fatal() {
        let p = program();
        let options = ExtractOptions {
            legacy_indexing: LegacyIndexing::PlusOne,
            ..Default::default()
        };
        let err = build(&main_entry(), ctx(&p), &symbols(), &options).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { .. }));
    }

    #[test]
    fn ambiguous_symbol_is_fatal() {
        let p = program();
        let table = SymbolTable::new(vec![
            SymbolTableEntry::function("main", 0x1000),
            SymbolTableEntry::function("main", 0x1000),
        ]);
        let err = build(&main_entry(), ctx(&p), &table, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::AmbiguousSymbolMatch { .. }));
    }
}
