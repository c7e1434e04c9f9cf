mod output;

use anyhow::{Context, Result};
use clap::Parser;
use dwarfunc_core::{walk_all, Binary, EmissionPolicy, ExtractOptions, LegacyIndexing, SymbolIndex};

use crate::output::{Format, Printer};

/// Map function definitions in DWARF debug info to source locations
#[derive(Parser, Debug)]
#[command(
    name = "dwarfunc",
    about = "List functions with their declaring file, line, address and symbol index",
    version,
    author
)]
struct Cli {
    /// ELF file carrying the DWARF debug info
    #[arg(long)]
    debug_info: std::path::PathBuf,

    /// ELF file whose symbol table is searched (defaults to --debug-info)
    #[arg(long)]
    elf: Option<std::path::PathBuf>,

    /// Prefix joined in front of every resolved source path
    #[arg(long)]
    base_path: Option<std::path::PathBuf>,

    /// Only report the compilation unit with this name
    #[arg(long)]
    cu: Option<String>,

    /// Only report functions with this name
    #[arg(long)]
    function: Option<String>,

    /// strict: require name, file, line and address; lenient: any of name, file, line
    #[arg(long, default_value_t = EmissionPolicy::Strict)]
    emission: EmissionPolicy,

    /// Offset applied to pre-DWARF 5 file indices (minus-one or plus-one)
    #[arg(long, default_value_t = LegacyIndexing::MinusOne)]
    legacy_indexing: LegacyIndexing,

    /// Output format: text, table or json
    #[arg(long, default_value_t = Format::Text)]
    format: Format,
}

impl Cli {
    fn options(&self) -> ExtractOptions {
        ExtractOptions {
            base_path: self.base_path.clone(),
            unit_filter: self.cu.clone(),
            function_filter: self.function.clone(),
            emission: self.emission,
            legacy_indexing: self.legacy_indexing,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let debug_bin = Binary::open(&cli.debug_info)
        .with_context(|| format!("failed to open {}", cli.debug_info.display()))?;
    let symbol_bin = match &cli.elf {
        Some(path) => {
            Some(Binary::open(path).with_context(|| format!("failed to open {}", path.display()))?)
        }
        None => None,
    };
    let symbols = &symbol_bin.as_ref().unwrap_or(&debug_bin).symbols;

    if !debug_bin.has_debug_info() {
        println!("No DWARF info found.");
        return Ok(());
    }

    let units = debug_bin
        .compilation_units()
        .context("failed to read DWARF compilation units")?;
    let index = SymbolIndex::new(symbols);

    let mut printer = Printer::new(cli.format);
    let walked = walk_all(&units, &index, &cli.options(), |unit| printer.unit(unit));
    // Whatever was collected before a failure is still printed.
    printer.finish()?;
    walked.context("failed to resolve functions")?;

    Ok(())
}
