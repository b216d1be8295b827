use super::traits::RecordFile;
use crate::core::models::cluster::{AtomRecord, Cluster};
use crate::core::models::feature::InteractionKind;
use std::io::{self, BufRead};
use thiserror::Error;

const CLUSTER_SIZE_TAG: &str = "> <CLUSTER_SIZE>";
const RECORD_TERMINATOR: &str = "$$$$";

#[derive(Debug, Error)]
pub enum ClusterFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: ClusterParseErrorKind,
    },
    #[error("Record ending on line {line} has no CLUSTER_SIZE annotation")]
    MissingClusterSize { line: usize },
    #[error("Record is not closed by '$$$$' before end of file (line {line})")]
    UnterminatedRecord { line: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClusterParseErrorKind {
    #[error("Invalid cluster size (value: '{value}')")]
    InvalidClusterSize { value: String },
    #[error("CLUSTER_SIZE tag is not followed by a value line")]
    MissingClusterSizeValue,
    #[error("Atom coordinate is not finite (value: '{value}')")]
    NonFiniteCoordinate { value: String },
}

/// Reader for the SDF-style files that hold one pre-computed atom cluster per record.
///
/// Each record lists its atoms in the usual atom block and carries a `> <CLUSTER_SIZE>`
/// data item; `$$$$` closes the record. The file format does not say which interaction
/// the clusters represent, so the reader is constructed with that kind and stamps it on
/// every cluster it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterFile {
    kind: InteractionKind,
}

impl ClusterFile {
    pub fn new(kind: InteractionKind) -> Self {
        Self { kind }
    }
}

fn is_element_symbol(field: &str) -> bool {
    field.starts_with(|c: char| c.is_ascii_alphabetic())
}

/// Reads the fixed V2000 atom columns: x, y and z in 10-character fields, the element
/// symbol in columns 32-34.
fn v2000_fields(line: &str) -> Option<([f64; 3], &str)> {
    let column = |start: usize, end: usize| line.get(start..end).map(str::trim);
    let x = column(0, 10)?.parse().ok()?;
    let y = column(10, 20)?.parse().ok()?;
    let z = column(20, 30)?.parse().ok()?;
    let element = line.get(31..)?.split_whitespace().next()?;
    if element.len() > 3 || !is_element_symbol(element) {
        return None;
    }
    Some(([x, y, z], element))
}

fn whitespace_fields(line: &str) -> Option<([f64; 3], &str)> {
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    let z = fields.next()?.parse().ok()?;
    let element = fields.next()?;
    if !is_element_symbol(element) {
        return None;
    }
    Some(([x, y, z], element))
}

/// Recognizes atom-block lines: three coordinates followed by an element symbol.
///
/// The fixed V2000 columns are tried first, so coordinates that fill their whole field
/// (`-1000.0000` and beyond) still read correctly. Lines that do not follow the column
/// layout fall back to whitespace-separated fields. Counts and bond lines also start with
/// numbers but their fourth field is numeric, so they fall through and are ignored along
/// with headers and other data items.
fn parse_atom_line(line: &str) -> Result<Option<AtomRecord>, ClusterParseErrorKind> {
    let Some(([x, y, z], element)) = v2000_fields(line).or_else(|| whitespace_fields(line))
    else {
        return Ok(None);
    };
    if let Some(value) = [x, y, z].into_iter().find(|v| !v.is_finite()) {
        return Err(ClusterParseErrorKind::NonFiniteCoordinate {
            value: value.to_string(),
        });
    }
    Ok(Some(AtomRecord::new(x, y, z, element)))
}

impl RecordFile for ClusterFile {
    type Record = Cluster;
    type Error = ClusterFileError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Vec<Cluster>, ClusterFileError> {
        let mut clusters = Vec::new();
        let mut atoms = Vec::new();
        let mut cluster_size: Option<u32> = None;
        let mut last_line = 0;

        let mut lines = reader.lines().enumerate();
        while let Some((line_idx, line_res)) = lines.next() {
            let line = line_res?;
            let line_num = line_idx + 1;
            last_line = line_num;

            if line.starts_with(CLUSTER_SIZE_TAG) {
                let (value_idx, value_res) = lines.next().ok_or(ClusterFileError::Parse {
                    line: line_num,
                    kind: ClusterParseErrorKind::MissingClusterSizeValue,
                })?;
                let value_line = value_res?;
                let value = value_line.trim();
                let size = value.parse::<u32>().map_err(|_| ClusterFileError::Parse {
                    line: value_idx + 1,
                    kind: ClusterParseErrorKind::InvalidClusterSize {
                        value: value.to_string(),
                    },
                })?;
                cluster_size = Some(size);
                last_line = value_idx + 1;
            } else if line.starts_with(RECORD_TERMINATOR) {
                let size = cluster_size
                    .take()
                    .ok_or(ClusterFileError::MissingClusterSize { line: line_num })?;
                clusters.push(Cluster::new(self.kind, std::mem::take(&mut atoms), size));
            } else if let Some(atom) =
                parse_atom_line(&line).map_err(|kind| ClusterFileError::Parse {
                    line: line_num,
                    kind,
                })?
            {
                atoms.push(atom);
            }
        }

        if !atoms.is_empty() || cluster_size.is_some() {
            return Err(ClusterFileError::UnterminatedRecord { line: last_line });
        }

        Ok(clusters)
    }
}
