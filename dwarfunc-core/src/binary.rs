use std::io::Read;

use gimli::{EndianSlice, RunTimeEndian};
use goblin::Object;

use crate::debug_info::{reader, CompilationUnit};
use crate::symbols::{symtab, SymbolTable};
use crate::{Error, Result, Section};

/// An ELF file loaded for debug-info and symbol-table lookups.
pub struct Binary {
    pub sections: Vec<Section>,
    pub symbols: SymbolTable,
    pub endian: RunTimeEndian,
}

impl Binary {
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let mut file = std::fs::File::open(&path)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        let obj = Object::parse(&buf)?;

        let mut cursor = std::io::Cursor::new(&buf);
        let (sections, symbols, endian) = match obj {
            Object::Elf(elf) => {
                let sections = if elf.header.e_shnum > 0 && elf.header.e_shoff != 0 {
                    elf.section_headers
                        .iter()
                        .map(|sh| Section::from_goblin_sh(&mut cursor, sh, &elf))
                        .collect::<std::io::Result<Vec<_>>>()?
                } else {
                    log::warn!("No section headers; debug info and symbols are unavailable");
                    Vec::new()
                };
                let endian = if elf.little_endian {
                    RunTimeEndian::Little
                } else {
                    RunTimeEndian::Big
                };
                (sections, symtab::from_elf(&elf), endian)
            }
            Object::PE(_) => return Err(Error::UnsupportedFormat("PE".to_string())),
            Object::Mach(_) => return Err(Error::UnsupportedFormat("Mach-O".to_string())),
            _ => return Err(Error::UnsupportedFormat("not an ELF file".to_string())),
        };

        log::info!(
            "Opened {} ({} sections)",
            path.as_ref().display(),
            sections.len()
        );
        Ok(Self {
            sections,
            symbols,
            endian,
        })
    }

    pub fn section_data(&self, name: &str) -> Option<&[u8]> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.raw_data.as_slice())
    }

    pub fn has_debug_info(&self) -> bool {
        self.section_data(".debug_info")
            .is_some_and(|data| !data.is_empty())
    }

    /// Parses `.debug_*` and materializes every compilation unit.
    pub fn compilation_units(&self) -> Result<Vec<CompilationUnit>> {
        let dwarf: gimli::Dwarf<EndianSlice<'_, RunTimeEndian>> = gimli::Dwarf::load(|id| {
            let data = self.section_data(id.name()).unwrap_or(&[]);
            Ok::<_, Error>(EndianSlice::new(data, self.endian))
        })?;
        reader::read_units(&dwarf)
    }
}
