use goblin::elf::sym::STT_FUNC;
use goblin::elf::Elf;

use super::{SymbolKind, SymbolTable, SymbolTableEntry};

/// Collects `.symtab` in table order, keeping the null symbol at index 0 so
/// positions match ELF symbol indices.
pub fn from_elf(elf: &Elf) -> SymbolTable {
    let entries: Vec<SymbolTableEntry> = elf
        .syms
        .iter()
        .map(|sym| {
            let name = elf.strtab.get_at(sym.st_name).unwrap_or("").to_string();
            let kind = if sym.st_type() == STT_FUNC {
                SymbolKind::Function
            } else {
                SymbolKind::Other
            };
            SymbolTableEntry {
                name,
                address: sym.st_value,
                kind,
            }
        })
        .collect();

    if entries.is_empty() {
        log::warn!("No .symtab found; symbol indices will be unavailable");
    } else {
        let functions = entries
            .iter()
            .filter(|s| s.kind == SymbolKind::Function)
            .count();
        log::info!("Loaded {} symbols ({} functions)", entries.len(), functions);
    }
    SymbolTable::new(entries)
}
