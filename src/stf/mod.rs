//! sbf2stf tables: comma separated values, the first line describes
//! the columns, the second line is a units/description row.
use log::{debug, trace};

use std::{fs::File, io::Read, path::Path, str::FromStr};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use hifitime::prelude::{Epoch, TimeScale};

mod interface;

pub mod geodetic;
pub mod rxstatus;

use interface::Interface;

use crate::error::Error;

/// Septentrio "do-not-use" value for floating point fields
pub const DO_NOT_USE_F64: f64 = -2.0E10;

/// Week number "do-not-use" value
pub const DO_NOT_USE_WNC: u32 = 65535;

/// Time of week "do-not-use" value, in milliseconds
pub const DO_NOT_USE_TOW_MS: u32 = u32::MAX;

pub struct StfFile<R: Read> {
    /// Column names, in order of appearance
    columns: Vec<String>,

    /// Remaining rows
    records: StringRecordsIntoIter<R>,
}

impl StfFile<Interface> {
    /// Opens a plain or gzip compressed (.gz) STF file
    pub fn open(fullpath: &Path) -> Result<Self, Error> {
        let handle = File::open(fullpath)?;

        let is_gzip = fullpath
            .extension()
            .map(|ext| ext == "gz")
            .unwrap_or(false);

        let interface = if is_gzip {
            Interface::from_gzip_file_handle(handle)
        } else {
            Interface::from_file_handle(handle)
        };

        debug!("{} - opened (gzip={})", fullpath.display(), is_gzip);
        Self::from_reader(interface)
    }
}

impl<R: Read> StfFile<R> {
    /// Builds [StfFile] from any readable content, consuming the
    /// header and units rows.
    pub fn from_reader(reader: R) -> Result<Self, Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns = reader
            .headers()?
            .iter()
            .map(|col| col.to_string())
            .collect::<Vec<_>>();

        if columns.iter().all(|col| col.is_empty()) {
            return Err(Error::EmptyFile);
        }

        trace!("stf columns: {:?}", columns);

        let mut records = reader.into_records();

        // units row
        if let Some(units) = records.next() {
            let _ = units?;
        }

        Ok(Self { columns, records })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of the column named `name`
    pub fn column(&self, name: &str) -> Result<usize, Error> {
        self.columns
            .iter()
            .position(|col| col == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }
}

impl<R: Read> Iterator for StfFile<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let fields = match self.records.next()? {
                Ok(fields) => fields,
                Err(e) => return Some(Err(e.into())),
            };

            // blank (whitespace only) rows
            if fields.iter().all(|field| field.is_empty()) {
                continue;
            }

            return Some(Ok(Record::new(fields)));
        }
    }
}

/// One data row of a STF table
#[derive(Debug, Clone)]
pub struct Record {
    /// Line number within the file
    pub line: usize,
    fields: StringRecord,
}

impl Record {
    pub fn new(fields: StringRecord) -> Self {
        let line = fields
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or_default();

        Self { line, fields }
    }

    /// Field content, None when absent or not available
    pub fn field(&self, index: usize) -> Option<&str> {
        let field = self.fields.get(index)?;
        if field.is_empty() || field.eq_ignore_ascii_case("nan") {
            None
        } else {
            Some(field)
        }
    }

    /// Parses field at `index`. `column` only serves error reporting.
    pub fn parse<T: FromStr>(&self, index: usize, column: &str) -> Result<Option<T>, Error> {
        match self.field(index) {
            Some(field) => match field.parse::<T>() {
                Ok(value) => Ok(Some(value)),
                Err(_) => Err(Error::InvalidField {
                    line: self.line,
                    column: column.to_string(),
                    value: field.to_string(),
                }),
            },
            None => Ok(None),
        }
    }

    /// Parses a floating point field, "do-not-use" values are not available.
    pub fn parse_f64(&self, index: usize, column: &str) -> Result<Option<f64>, Error> {
        let value = self.parse::<f64>(index, column)?;
        Ok(value.filter(|v| v.is_finite() && *v > DO_NOT_USE_F64))
    }

    /// Parses an integer field. sbf2stf may format integers as floats ("3.0").
    pub fn parse_u32(&self, index: usize, column: &str) -> Result<Option<u32>, Error> {
        match self.parse::<u32>(index, column) {
            Ok(value) => Ok(value),
            Err(e) => {
                let value = self.parse::<f64>(index, column).map_err(|_| e)?;
                match value {
                    Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => {
                        Ok(Some(v as u32))
                    },
                    Some(_) => Err(Error::InvalidField {
                        line: self.line,
                        column: column.to_string(),
                        value: self.field(index).unwrap_or_default().to_string(),
                    }),
                    None => Ok(None),
                }
            },
        }
    }

    /// Builds the GPST [Epoch] from week number and time of week (s) fields.
    /// "do-not-use" week or time of week leave the record undated.
    pub fn gpst_epoch(&self, wnc: usize, tow: usize) -> Result<Option<Epoch>, Error> {
        let week = self
            .parse_u32(wnc, WNC)?
            .filter(|week| *week != DO_NOT_USE_WNC);

        let tow_s = self
            .parse_f64(tow, TOW)?
            .filter(|tow_s| (tow_s * 1.0E3).round() < DO_NOT_USE_TOW_MS as f64);

        match (week, tow_s) {
            (Some(week), Some(tow_s)) if tow_s >= 0.0 => {
                let tow_nanos = (tow_s * 1.0E9).round() as u64;
                Ok(Some(Epoch::from_time_of_week(
                    week,
                    tow_nanos,
                    TimeScale::GPST,
                )))
            },
            _ => Ok(None),
        }
    }
}

/// Week number column
pub const WNC: &str = "WNc[week]";

/// Time of week column
pub const TOW: &str = "TOW[s]";
