use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::debug_info::CompilationUnit;
use crate::function::{self, attributes, clean_relative_path, FunctionDescriptor, UnitContext};
use crate::symbols::SymbolLookup;
use crate::{Error, ExtractOptions, Result};

/// Functions found in one compilation unit, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFunctions {
    pub offset: u64,
    pub name: PathBuf,
    pub functions: Vec<FunctionDescriptor>,
}

/// Resolves every function defined in `unit`.
///
/// Returns `Ok(None)` when the unit filter excludes the unit.
pub fn walk<S: SymbolLookup + ?Sized>(
    unit: &CompilationUnit,
    symbols: &S,
    options: &ExtractOptions,
) -> Result<Option<UnitFunctions>> {
    let raw_name = attributes::name(&unit.root).ok_or(Error::MissingRequiredAttribute {
        unit_offset: unit.offset,
        attribute: gimli::DW_AT_name,
    })?;
    let name = clean_relative_path(Path::new(&raw_name));

    if let Some(filter) = &options.unit_filter {
        if name.as_path() != Path::new(filter) {
            log::debug!("Unit {} filtered out", name.display());
            return Ok(None);
        }
    }

    let context = UnitContext {
        offset: unit.offset,
        line_program: unit.line_program.as_ref(),
    };
    let mut functions = Vec::new();
    for entry in unit.entries.iter().filter(|e| e.is_function()) {
        if let Some(desc) = function::build(entry, context, symbols, options)? {
            functions.push(desc);
        }
    }
    log::debug!(
        "Unit {} at {:#x}: {} functions",
        name.display(),
        unit.offset,
        functions.len()
    );

    Ok(Some(UnitFunctions {
        offset: unit.offset,
        name,
        functions,
    }))
}

/// Walks `units` in order, handing each non-filtered result to `on_unit` as
/// soon as it is complete.
///
/// Stops at the first failing unit; earlier units have already been handed
/// out by then.
pub fn walk_all<'a, S, I, F>(
    units: I,
    symbols: &S,
    options: &ExtractOptions,
    mut on_unit: F,
) -> Result<()>
where
    S: SymbolLookup + ?Sized,
    I: IntoIterator<Item = &'a CompilationUnit>,
    F: FnMut(UnitFunctions),
{
    for unit in units {
        if let Some(found) = walk(unit, symbols, options)? {
            on_unit(found);
        }
    }
    Ok(())
}
