//! Resolves function definitions in a binary's DWARF to source locations and
//! symbol-table entries.

pub mod binary;
pub mod debug_info;
mod error;
pub mod function;
mod options;
pub mod sections;
pub mod symbols;
pub mod walker;

pub use binary::*;
pub use error::{Error, Result, Table};
pub use function::FunctionDescriptor;
pub use options::*;
pub use sections::*;
pub use symbols::{SymbolIndex, SymbolLookup, SymbolTable};
pub use walker::{walk, walk_all, UnitFunctions};
