//! Calibration tables.

use heapless::{String, Vec};
use stream::{Sink, Source};
use wire::field::{self, message, repeated, string};
use wire::{read_tag, size, DecodeResult, Message, WireType};

use crate::limits::{TABLE_NAME_LEN, TABLE_ROWS, TABLE_VALUES};

/// A table or axis name.
pub type TableName = String<TABLE_NAME_LEN>;

/// One row of table data.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableRow {
    pub values: Vec<f32, TABLE_VALUES>,
}

impl Message for TableRow {
    const MAX_SIZE: usize = size::packed_floats(1, TABLE_VALUES);

    fn encoded_len(&self) -> usize {
        repeated::packed_floats_len(1, &self.values)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        repeated::encode_packed_floats(1, &self.values, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => {
                    repeated::merge_packed_floats(&mut self.values, 1, source)?;
                }
                (1, WireType::Fixed32) => repeated::merge_unpacked_float(&mut self.values, 1, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// A named axis with its breakpoints.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableAxis {
    pub name: Option<TableName>,
    pub values: Vec<f32, TABLE_VALUES>,
}

impl Message for TableAxis {
    const MAX_SIZE: usize = size::string(1, TABLE_NAME_LEN) + size::packed_floats(2, TABLE_VALUES);

    fn encoded_len(&self) -> usize {
        string::optional_len(1, self.name.as_deref()) + repeated::packed_floats_len(2, &self.values)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        string::encode_optional(1, self.name.as_deref(), sink)?;
        repeated::encode_packed_floats(2, &self.values, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => self.name = Some(string::merge(1, source)?),
                (2, WireType::LengthDelimited) => {
                    repeated::merge_packed_floats(&mut self.values, 2, source)?;
                }
                (2, WireType::Fixed32) => repeated::merge_unpacked_float(&mut self.values, 2, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// A lookup table over one axis.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Table1d {
    pub name: Option<TableName>,
    pub cols: Option<TableAxis>,
    pub data: Option<TableRow>,
}

impl Message for Table1d {
    const MAX_SIZE: usize = size::string(1, TABLE_NAME_LEN)
        + size::message(2, TableAxis::MAX_SIZE)
        + size::message(3, TableRow::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        string::optional_len(1, self.name.as_deref())
            + message::optional_len(2, self.cols.as_ref())
            + message::optional_len(3, self.data.as_ref())
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        string::encode_optional(1, self.name.as_deref(), sink)?;
        message::encode_optional(2, self.cols.as_ref(), sink)?;
        message::encode_optional(3, self.data.as_ref(), sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => self.name = Some(string::merge(1, source)?),
                (2, WireType::LengthDelimited) => message::merge_optional(&mut self.cols, source)?,
                (3, WireType::LengthDelimited) => message::merge_optional(&mut self.data, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// A lookup table over two axes, one data row per row breakpoint.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Table2d {
    pub name: Option<TableName>,
    pub cols: Option<TableAxis>,
    pub rows: Option<TableAxis>,
    pub data: Vec<TableRow, TABLE_ROWS>,
}

impl Message for Table2d {
    const MAX_SIZE: usize = size::string(1, TABLE_NAME_LEN)
        + size::message(2, TableAxis::MAX_SIZE)
        + size::message(3, TableAxis::MAX_SIZE)
        + size::repeated_message(4, TABLE_ROWS, TableRow::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        string::optional_len(1, self.name.as_deref())
            + message::optional_len(2, self.cols.as_ref())
            + message::optional_len(3, self.rows.as_ref())
            + repeated::messages_len(4, &self.data)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        string::encode_optional(1, self.name.as_deref(), sink)?;
        message::encode_optional(2, self.cols.as_ref(), sink)?;
        message::encode_optional(3, self.rows.as_ref(), sink)?;
        repeated::encode_messages(4, &self.data, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => self.name = Some(string::merge(1, source)?),
                (2, WireType::LengthDelimited) => message::merge_optional(&mut self.cols, source)?,
                (3, WireType::LengthDelimited) => message::merge_optional(&mut self.rows, source)?,
                (4, WireType::LengthDelimited) => {
                    repeated::merge_message(&mut self.data, 4, source)?;
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}
