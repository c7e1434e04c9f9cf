use std::fmt;

use anyhow::Result;
use colored::Colorize;
use dwarfunc_core::{FunctionDescriptor, UnitFunctions};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Text,
    Table,
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "table" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Text => "text",
            Format::Table => "table",
            Format::Json => "json",
        };
        write!(f, "{}", name)
    }
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Function")]
    name: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl From<&FunctionDescriptor> for Row {
    fn from(desc: &FunctionDescriptor) -> Self {
        Row {
            name: or_dash(desc.name.as_deref()),
            file: or_dash(desc.file.as_ref().map(|p| p.display())),
            line: or_dash(desc.line),
            address: or_dash(desc.address.map(|a| format!("{a:#x}"))),
            symbol: or_dash(desc.symbol_index),
        }
    }
}

/// Renders units as they arrive; JSON is buffered until [`Printer::finish`].
pub struct Printer {
    format: Format,
    pending: Vec<UnitFunctions>,
}

impl Printer {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            pending: Vec::new(),
        }
    }

    pub fn unit(&mut self, unit: UnitFunctions) {
        match self.format {
            Format::Text => {
                println!("\n{}", header(&unit).bold().cyan());
                for func in &unit.functions {
                    println!("{func}");
                }
            }
            Format::Table => {
                println!("\n{}", header(&unit).bold().cyan());
                if unit.functions.is_empty() {
                    println!("No functions found.");
                } else {
                    let mut table = Table::new(unit.functions.iter().map(Row::from));
                    table.with(Style::rounded());
                    println!("{table}");
                }
            }
            Format::Json => self.pending.push(unit),
        }
    }

    pub fn finish(self) -> Result<()> {
        if self.format == Format::Json {
            println!("{}", json_report(&self.pending)?);
        }
        Ok(())
    }
}

/// A JSON array with one object per unit, in walk order.
fn json_report(units: &[UnitFunctions]) -> Result<String> {
    Ok(serde_json::to_string_pretty(units)?)
}

fn header(unit: &UnitFunctions) -> String {
    format!(
        "[Compilation Unit] Offset: {}, Name: {}",
        unit.offset,
        unit.name.display()
    )
}
