use std::path::{Component, Path, PathBuf};

use crate::debug_info::LineProgram;
use crate::error::Table;
use crate::{Error, LegacyIndexing, Result};

/// Resolves a `DW_AT_decl_file` value to `directory/file` using `program`'s
/// tables.
///
/// Pre-DWARF 5 values are shifted by the offset selected through `mode`; both
/// the file and the directory index must land inside their table.
pub fn resolve_file(
    program: &LineProgram,
    file_index: u64,
    mode: LegacyIndexing,
) -> Result<PathBuf> {
    let offset = mode.offset(program.version);

    let file = checked_index(offset, file_index, program.file_entries.len(), Table::FileEntries)?;
    let entry = &program.file_entries[file];

    let dir = checked_index(
        offset,
        entry.dir_index,
        program.include_directories.len(),
        Table::IncludeDirectories,
    )?;
    let dir_path = bytes_to_path(&program.include_directories[dir]);

    Ok(dir_path.join(bytes_to_path(&entry.name)))
}

fn checked_index(offset: i64, raw: u64, len: usize, table: Table) -> Result<usize> {
    let index = i64::try_from(raw).unwrap_or(i64::MAX).saturating_add(offset);
    match usize::try_from(index) {
        Ok(i) if i < len => Ok(i),
        _ => Err(Error::IndexOutOfRange { table, index, len }),
    }
}

fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Drops the leading run of `..` components from `path`.
pub fn clean_relative_path(path: &Path) -> PathBuf {
    path.components()
        .skip_while(|c| *c == Component::ParentDir)
        .collect()
}
