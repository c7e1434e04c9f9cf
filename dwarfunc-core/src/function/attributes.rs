//! Typed access to the handful of attributes a function descriptor needs.
//!
//! Each decoder is a pure function of the raw value. A missing attribute, or a
//! value of an unexpected kind, decodes to `None`.

use crate::debug_info::{AttrValue, DebugEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Name(String),
    FileIndex(u64),
    Line(u64),
    Address(u64),
}

type Decoder = fn(&AttrValue) -> Option<Decoded>;

const DECODERS: [(gimli::DwAt, Decoder); 4] = [
    (gimli::DW_AT_name, decode_name),
    (gimli::DW_AT_decl_file, decode_file),
    (gimli::DW_AT_decl_line, decode_line),
    (gimli::DW_AT_low_pc, decode_address),
];

fn decode_name(value: &AttrValue) -> Option<Decoded> {
    match value {
        AttrValue::Bytes(bytes) => {
            Some(Decoded::Name(String::from_utf8_lossy(bytes).into_owned()))
        }
        _ => None,
    }
}

fn decode_file(value: &AttrValue) -> Option<Decoded> {
    match value {
        AttrValue::Udata(index) => Some(Decoded::FileIndex(*index)),
        _ => None,
    }
}

fn decode_line(value: &AttrValue) -> Option<Decoded> {
    match value {
        AttrValue::Udata(line) => Some(Decoded::Line(*line)),
        _ => None,
    }
}

fn decode_address(value: &AttrValue) -> Option<Decoded> {
    match value {
        AttrValue::Address(addr) | AttrValue::Udata(addr) => Some(Decoded::Address(*addr)),
        AttrValue::Bytes(_) => None,
    }
}

/// Decodes `attribute` of `entry` with the decoder registered for it.
pub fn decode(entry: &DebugEntry, attribute: gimli::DwAt) -> Option<Decoded> {
    let value = entry.attr(attribute)?;
    let (_, decoder) = DECODERS.iter().find(|(name, _)| *name == attribute)?;
    decoder(value)
}

pub fn name(entry: &DebugEntry) -> Option<String> {
    match decode(entry, gimli::DW_AT_name)? {
        Decoded::Name(name) => Some(name),
        _ => None,
    }
}

pub fn decl_file(entry: &DebugEntry) -> Option<u64> {
    match decode(entry, gimli::DW_AT_decl_file)? {
        Decoded::FileIndex(index) => Some(index),
        _ => None,
    }
}

pub fn decl_line(entry: &DebugEntry) -> Option<u64> {
    match decode(entry, gimli::DW_AT_decl_line)? {
        Decoded::Line(line) => Some(line),
        _ => None,
    }
}

pub fn low_pc(entry: &DebugEntry) -> Option<u64> {
    match decode(entry, gimli::DW_AT_low_pc)? {
        Decoded::Address(addr) => Some(addr),
        _ => None,
    }
}
