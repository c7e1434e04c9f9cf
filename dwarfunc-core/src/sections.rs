use std::io::{self, SeekFrom};

use goblin::elf::section_header::SHT_NOBITS;
use goblin::elf::{Elf, SectionHeader};

/// A named section and its file contents.
#[derive(Debug)]
pub struct Section {
    pub name: String,
    pub raw_data: Vec<u8>,
}

impl Section {
    pub fn from_goblin_sh<R: io::Seek + io::Read>(
        cursor: &mut R,
        sh: &SectionHeader,
        elf: &Elf,
    ) -> io::Result<Self> {
        let name = elf.shdr_strtab.get_at(sh.sh_name).unwrap_or("").to_string();

        // .bss and friends occupy no file space.
        let raw = if sh.sh_type == SHT_NOBITS {
            Vec::new()
        } else {
            let mut raw = vec![0u8; sh.sh_size as usize];
            cursor.seek(SeekFrom::Start(sh.sh_offset))?;
            cursor.read_exact(&mut raw)?;
            raw
        };

        Ok(Section {
            name,
            raw_data: raw,
        })
    }
}

