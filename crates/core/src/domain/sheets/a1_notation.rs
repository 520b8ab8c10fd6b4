use std::{fmt::Formatter, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use super::column::{parse_col, Column, ColumnParseError};

/// A sheet-qualified range in A1 notation, such as `Sheet1!A:A` or `'Sign ups'!B2:B`.
///
/// Only ranges that name a sheet are accepted, since an append call without a
/// sheet title would silently target the first sheet of the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct A1Notation {
    raw: String,
    sheet_title: String,
    start: CellReference,
    end: CellReference,
}

/// One side of a range: a column and, optionally, a 1-based row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellReference {
    pub column: Column,
    pub row: Option<u32>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum A1NotationParseError {
    #[error("Range must be qualified with a sheet title, e.g. Sheet1!A:A")]
    MissingSheetTitle,
    #[error("Unterminated quoted sheet title")]
    UnterminatedQuote,
    #[error("Error parsing column: {0}")]
    ColumnParseError(#[from] ColumnParseError),
    #[error("Error parsing row")]
    RowParseError,
}

impl A1Notation {
    pub fn parse(a1_notation: &str) -> Result<Self, A1NotationParseError> {
        let a1_notation = a1_notation.trim();

        let (sheet_part, local_part) = a1_notation
            .rsplit_once('!')
            .ok_or(A1NotationParseError::MissingSheetTitle)?;

        let sheet_title = unquote_sheet_title(sheet_part)?;
        if sheet_title.is_empty() {
            return Err(A1NotationParseError::MissingSheetTitle);
        }

        let (start, end) = match local_part.split_once(':') {
            Some((start, end)) => (start, end),
            None => (local_part, local_part),
        };

        Ok(A1Notation {
            raw: a1_notation.to_owned(),
            sheet_title,
            start: parse_cell_reference(start)?,
            end: parse_cell_reference(end)?,
        })
    }

    pub fn sheet_title(&self) -> &str {
        &self.sheet_title
    }

    pub fn start(&self) -> CellReference {
        self.start
    }

    pub fn end(&self) -> CellReference {
        self.end
    }
}

fn unquote_sheet_title(sheet_part: &str) -> Result<String, A1NotationParseError> {
    match sheet_part.strip_prefix('\'') {
        Some(quoted) => quoted
            .strip_suffix('\'')
            .map(|title| title.replace("''", "'"))
            .ok_or(A1NotationParseError::UnterminatedQuote),
        None => Ok(sheet_part.to_owned()),
    }
}

fn parse_cell_reference(cell: &str) -> Result<CellReference, A1NotationParseError> {
    let split_at = cell
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(cell.len());
    let (letters, digits) = cell.split_at(split_at);

    let column = parse_col(letters)?;
    let row = match digits {
        "" => None,
        digits => {
            let row = digits
                .parse::<u32>()
                .map_err(|_| A1NotationParseError::RowParseError)?;
            if row == 0 {
                return Err(A1NotationParseError::RowParseError);
            }
            Some(row)
        }
    };

    Ok(CellReference { column, row })
}

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl FromStr for A1Notation {
    type Err = A1NotationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        A1Notation::parse(s)
    }
}

impl TryFrom<String> for A1Notation {
    type Error = A1NotationParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        A1Notation::parse(&value)
    }
}
