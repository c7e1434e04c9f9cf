use std::fmt;
use std::path::PathBuf;

/// Which functions are reported when some of their attributes can't be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmissionPolicy {
    /// Name, file, line and address must all be present.
    #[default]
    Strict,
    /// Any one of name, file or line is enough.
    Lenient,
}

impl std::str::FromStr for EmissionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(EmissionPolicy::Strict),
            "lenient" => Ok(EmissionPolicy::Lenient),
            _ => Err(format!("Unknown emission policy: {}", s)),
        }
    }
}

impl fmt::Display for EmissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmissionPolicy::Strict => "strict",
            EmissionPolicy::Lenient => "lenient",
        };
        write!(f, "{}", name)
    }
}

/// How `DW_AT_decl_file` values index the line program tables before DWARF 5.
///
/// DWARF 5 tables are 0-based and need no adjustment. Earlier versions leave
/// the compilation directory and primary source file implicit, so producers
/// disagree on the offset to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LegacyIndexing {
    /// Attribute values are 1-based: subtract one.
    #[default]
    MinusOne,
    /// Attribute values skip an extra leading entry: add one.
    PlusOne,
}

impl LegacyIndexing {
    pub fn offset(self, version: u16) -> i64 {
        if version >= 5 {
            return 0;
        }
        match self {
            LegacyIndexing::MinusOne => -1,
            LegacyIndexing::PlusOne => 1,
        }
    }
}

impl std::str::FromStr for LegacyIndexing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minus-one" | "-1" => Ok(LegacyIndexing::MinusOne),
            "plus-one" | "+1" => Ok(LegacyIndexing::PlusOne),
            _ => Err(format!("Unknown legacy indexing mode: {}", s)),
        }
    }
}

impl fmt::Display for LegacyIndexing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LegacyIndexing::MinusOne => "minus-one",
            LegacyIndexing::PlusOne => "plus-one",
        };
        write!(f, "{}", name)
    }
}

/// Filters and knobs applied while walking compilation units.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Prefix joined in front of every resolved source path.
    pub base_path: Option<PathBuf>,
    /// Only walk the unit whose normalized name equals this.
    pub unit_filter: Option<String>,
    /// Only report functions with exactly this name.
    pub function_filter: Option<String>,
    pub emission: EmissionPolicy,
    pub legacy_indexing: LegacyIndexing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes_case_insensitively() {
        assert_eq!("Lenient".parse::<EmissionPolicy>(), Ok(EmissionPolicy::Lenient));
        assert_eq!("plus-one".parse::<LegacyIndexing>(), Ok(LegacyIndexing::PlusOne));
        assert_eq!("-1".parse::<LegacyIndexing>(), Ok(LegacyIndexing::MinusOne));
        assert!("loose".parse::<EmissionPolicy>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let mode = LegacyIndexing::PlusOne;
        assert_eq!(mode.to_string().parse::<LegacyIndexing>(), Ok(mode));
    }

    #[test]
    fn dwarf5_tables_need_no_offset() {
        assert_eq!(LegacyIndexing::MinusOne.offset(5), 0);
        assert_eq!(LegacyIndexing::PlusOne.offset(5), 0);
        assert_eq!(LegacyIndexing::MinusOne.offset(4), -1);
        assert_eq!(LegacyIndexing::PlusOne.offset(2), 1);
    }
}
