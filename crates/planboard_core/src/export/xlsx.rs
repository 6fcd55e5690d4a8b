//! Spreadsheet writer for board projections.
//!
//! # Responsibility
//! - Write a projected table into a one-sheet `.xlsx` workbook.
//! - Apply sheet orientation and fixed column widths.

use crate::export::projector::project;
use crate::model::board::Board;
use log::{error, info};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Xlsx(XlsxError),
    /// The target directory could not be prepared.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xlsx(err) => write!(f, "spreadsheet export failed: {err}"),
            Self::Io { path, source } => {
                write!(f, "cannot prepare export directory `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Xlsx(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<XlsxError> for ExportError {
    fn from(value: XlsxError) -> Self {
        Self::Xlsx(value)
    }
}

/// Layout options of the exported workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub sheet_name: String,
    /// Default file name offered to callers that do not choose a path.
    pub file_name: String,
    pub name_column_width: f64,
    pub week_column_width: f64,
    pub right_to_left: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: "לוח ניסויים".to_string(),
            file_name: "לוח_ניסויים.xlsx".to_string(),
            name_column_width: 25.0,
            week_column_width: 15.0,
            right_to_left: true,
        }
    }
}

/// Builds a workbook holding the projection of `board`.
pub fn build_workbook(board: &Board, options: &ExportOptions) -> ExportResult<Workbook> {
    let rows = project(board);
    let mut workbook = Workbook::new();
    let wrap = Format::new().set_text_wrap();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(options.sheet_name.as_str())?;
    sheet.set_right_to_left(options.right_to_left);

    let column_count = rows.first().map_or(0, Vec::len);
    for col in (0u16..).take(column_count) {
        let width = if col == 0 {
            options.name_column_width
        } else {
            options.week_column_width
        };
        sheet.set_column_width(col, width)?;
    }

    for (row_num, row) in (0u32..).zip(rows.iter()) {
        let format = if row_num == 0 { &header } else { &wrap };
        for (col_num, value) in (0u16..).zip(row.iter()) {
            sheet.write_string_with_format(row_num, col_num, value.as_str(), format)?;
        }
    }

    Ok(workbook)
}

/// Writes the board export to `path`, creating missing parent directories.
pub fn export_to_path(
    board: &Board,
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> ExportResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| {
            error!(
                "event=board_export module=export status=error error_code=export_dir_failed error={}",
                source
            );
            ExportError::Io {
                path: parent.to_path_buf(),
                source,
            }
        })?;
    }
    let mut workbook = build_workbook(board, options)?;
    match workbook.save(path) {
        Ok(()) => {
            info!(
                "event=board_export module=export status=ok experiments={} path={}",
                board.experiments.len(),
                path.display()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=board_export module=export status=error error_code=xlsx_save_failed error={}",
                err
            );
            Err(err.into())
        }
    }
}

/// Renders the board export into an in-memory `.xlsx` buffer.
pub fn export_to_buffer(board: &Board, options: &ExportOptions) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(board, options)?;
    Ok(workbook.save_to_buffer()?)
}
