use gimli::{AttributeValue, EndianSlice, RunTimeEndian};

use super::{AttrValue, CompilationUnit, DebugEntry, FileEntry, LineProgram};
use crate::Result;

type R<'data> = EndianSlice<'data, RunTimeEndian>;

/// Attributes copied out of each entry; everything else is dropped.
const KEPT_ATTRIBUTES: [gimli::DwAt; 4] = [
    gimli::DW_AT_name,
    gimli::DW_AT_decl_file,
    gimli::DW_AT_decl_line,
    gimli::DW_AT_low_pc,
];

/// Materializes every compilation unit of `dwarf`, in `.debug_info` order.
pub fn read_units(dwarf: &gimli::Dwarf<R<'_>>) -> Result<Vec<CompilationUnit>> {
    let mut units = Vec::new();
    let mut headers = dwarf.units();
    while let Some(header) = headers.next()? {
        let offset = header
            .offset()
            .as_debug_info_offset()
            .map(|o| o.0 as u64)
            .unwrap_or_default();
        let unit = dwarf.unit(header)?;
        let unit_ref = unit.unit_ref(dwarf);
        units.push(read_unit(unit_ref, offset)?);
    }
    log::info!("Read {} compilation units", units.len());
    Ok(units)
}

fn read_unit(unit: gimli::UnitRef<'_, R<'_>>, offset: u64) -> Result<CompilationUnit> {
    let mut root = None;
    let mut entries = Vec::new();
    let mut cursor = unit.entries();
    while let Some((_, entry)) = cursor.next_dfs()? {
        let mut die = DebugEntry::new(entry.tag());
        for name in KEPT_ATTRIBUTES {
            let Some(value) = entry.attr_value(name)? else {
                continue;
            };
            if let Some(value) = convert_value(unit, name, value)? {
                die.attributes.insert(name, value);
            }
        }
        if root.is_none() {
            root = Some(die);
        } else {
            entries.push(die);
        }
    }

    let line_program = match &unit.line_program {
        Some(program) => Some(read_line_program(unit, program.header())?),
        None => None,
    };

    Ok(CompilationUnit {
        offset,
        // A unit without entries still gets an empty root so the walker can
        // report the missing name.
        root: root.unwrap_or_else(|| DebugEntry::new(gimli::DW_TAG_compile_unit)),
        line_program,
        entries,
    })
}

fn convert_value<'data>(
    unit: gimli::UnitRef<'_, R<'data>>,
    name: gimli::DwAt,
    value: AttributeValue<R<'data>>,
) -> Result<Option<AttrValue>> {
    let converted = match value {
        AttributeValue::Addr(addr) => Some(AttrValue::Address(addr)),
        AttributeValue::DebugAddrIndex(index) => Some(AttrValue::Address(unit.address(index)?)),
        AttributeValue::FileIndex(index) => Some(AttrValue::Udata(index)),
        AttributeValue::Sdata(v) => u64::try_from(v).ok().map(AttrValue::Udata),
        value if name == gimli::DW_AT_name => match unit.attr_string(value) {
            Ok(s) => Some(AttrValue::Bytes(s.slice().to_vec())),
            Err(err) => {
                log::warn!("Skipping unreadable {name} string: {err}");
                None
            }
        },
        value => value.udata_value().map(AttrValue::Udata),
    };
    Ok(converted)
}

fn read_line_program<'data>(
    unit: gimli::UnitRef<'_, R<'data>>,
    header: &gimli::LineProgramHeader<R<'data>>,
) -> Result<LineProgram> {
    let include_directories = header
        .include_directories()
        .iter()
        .map(|dir| Ok(unit.attr_string(dir.clone())?.slice().to_vec()))
        .collect::<Result<Vec<_>>>()?;

    let file_entries = header
        .file_names()
        .iter()
        .map(|file| {
            Ok(FileEntry {
                name: unit.attr_string(file.path_name())?.slice().to_vec(),
                dir_index: file.directory_index(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LineProgram {
        version: header.version(),
        file_entries,
        include_directories,
    })
}
