use super::traits::RecordFile;
use crate::core::models::cluster::AtomRecord;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: SiteParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteParseErrorKind {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Coordinate in columns {columns} is not finite (value: '{value}')")]
    NonFiniteCoordinate { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for an ATOM record (must reach column 78)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Reader for the binding-site structure: one [`AtomRecord`] per `ATOM` line of a PDB file.
///
/// Only `ATOM` records contribute; `HETATM`, `CONECT`, headers and everything else is
/// skipped. The element symbol is taken from columns 77-78, with the leading digit of the
/// charge field (column 79) appended when present, so a charged oxygen reads as `O1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteFile;

impl SiteFile {
    fn parse_coordinate(
        line: &str,
        line_num: usize,
        start: usize,
        end: usize,
    ) -> Result<f64, SiteFileError> {
        let value = slice_and_trim(line, start, end);
        let columns = format!("{}-{}", start + 1, end);
        if value.is_empty() {
            return Err(SiteFileError::Parse {
                line: line_num,
                kind: SiteParseErrorKind::MissingRequiredField { columns },
            });
        }
        let coordinate: f64 = value.parse().map_err(|_| SiteFileError::Parse {
            line: line_num,
            kind: SiteParseErrorKind::InvalidFloat {
                columns: columns.clone(),
                value: value.to_string(),
            },
        })?;
        if !coordinate.is_finite() {
            return Err(SiteFileError::Parse {
                line: line_num,
                kind: SiteParseErrorKind::NonFiniteCoordinate {
                    columns,
                    value: value.to_string(),
                },
            });
        }
        Ok(coordinate)
    }

    fn element_symbol(line: &str, line_num: usize) -> Result<String, SiteFileError> {
        let element = slice_and_trim(line, 76, 78);
        if element.is_empty() {
            return Err(SiteFileError::Parse {
                line: line_num,
                kind: SiteParseErrorKind::MissingRequiredField {
                    columns: "77-78".into(),
                },
            });
        }
        let mut symbol = element.to_string();
        if let Some(digit) = line
            .get(78..79)
            .and_then(|c| c.chars().next())
            .filter(|c| c.is_ascii_digit())
        {
            symbol.push(digit);
        }
        Ok(symbol)
    }
}

impl RecordFile for SiteFile {
    type Record = AtomRecord;
    type Error = SiteFileError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Vec<AtomRecord>, SiteFileError> {
        let mut atoms = Vec::new();

        for (line_idx, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_idx + 1;

            if slice_and_trim(&line, 0, 6) != "ATOM" {
                continue;
            }
            if line.len() < 78 {
                return Err(SiteFileError::Parse {
                    line: line_num,
                    kind: SiteParseErrorKind::LineTooShort,
                });
            }

            let x = Self::parse_coordinate(&line, line_num, 30, 38)?;
            let y = Self::parse_coordinate(&line, line_num, 38, 46)?;
            let z = Self::parse_coordinate(&line, line_num, 46, 54)?;
            let element = Self::element_symbol(&line, line_num)?;

            atoms.push(AtomRecord::new(x, y, z, &element));
        }

        Ok(atoms)
    }
}
