//! Spreadsheet host interface
//!
//! The wrapper never talks to a spreadsheet service directly. Everything it
//! needs from the host (range reads and writes, row insertion, hide/show,
//! toasts) goes through [`SpreadsheetHost`] and [`SheetHost`]. Rows and
//! columns are 1-based throughout, as in the host APIs.

mod memory;

pub use memory::*;

use std::fmt;

use crate::error::HostError;
use crate::model::Table;
use crate::model::Value;

/// A rectangular range of cells, addressed from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeRef {
    /// First row of the range.
    pub row: usize,
    /// First column of the range.
    pub column: usize,
    /// Number of rows.
    pub num_rows: usize,
    /// Number of columns.
    pub num_columns: usize,
}

impl RangeRef {
    /// Creates a range.
    pub fn new(row: usize, column: usize, num_rows: usize, num_columns: usize) -> Self {
        Self {
            row,
            column,
            num_rows,
            num_columns,
        }
    }

    /// Creates a single-row range starting at column 1.
    pub fn row(row: usize, num_columns: usize) -> Self {
        Self::new(row, 1, 1, num_columns)
    }

    /// Returns `true` if the range addresses at least one real cell.
    pub fn is_valid(&self) -> bool {
        self.row >= 1 && self.column >= 1 && self.num_rows >= 1 && self.num_columns >= 1
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{}C{}:{}x{}",
            self.row, self.column, self.num_rows, self.num_columns
        )
    }
}

/// A single sheet of a hosted spreadsheet.
///
/// Implementations talk to the remote service; each call may be slow. The
/// wrapper batches where it can (one `hide_rows` per contiguous block).
pub trait SheetHost {
    /// Returns the sheet name.
    fn name(&self) -> String;

    /// Reads the whole data range: rows `1..=last_row`, every used column.
    fn data_values(&self) -> Result<Table, HostError>;

    /// Returns the last row holding any content, or 0 for an empty sheet.
    fn last_row(&self) -> Result<usize, HostError>;

    /// Reads a rectangular range.
    fn get_values(&self, range: RangeRef) -> Result<Table, HostError>;

    /// Writes a rectangular range. `values` must match the range dimensions.
    fn set_values(&self, range: RangeRef, values: &[Vec<Value>]) -> Result<(), HostError>;

    /// Writes a single cell.
    fn set_cell_value(&self, row: usize, column: usize, value: &Value) -> Result<(), HostError>;

    /// Clears cell contents (not formatting) of a range.
    fn clear_content(&self, range: RangeRef) -> Result<(), HostError>;

    /// Appends a row after the last row with content and returns its row id.
    fn append_row(&self, values: &[Value]) -> Result<usize, HostError>;

    /// Inserts an empty row before `row_id`.
    fn insert_row_before(&self, row_id: usize) -> Result<(), HostError>;

    /// Hides `count` rows starting at `start_row_id`.
    fn hide_rows(&self, start_row_id: usize, count: usize) -> Result<(), HostError>;

    /// Shows `count` rows starting at `start_row_id`.
    fn show_rows(&self, start_row_id: usize, count: usize) -> Result<(), HostError>;

    /// Returns the row of the active (selected) cell.
    fn active_row(&self) -> Result<usize, HostError>;

    /// Resets the font weight of a range to the sheet default.
    fn reset_font_weight(&self, _range: RangeRef) -> Result<(), HostError> {
        Ok(())
    }
}

/// A hosted spreadsheet: a set of sheets plus UI and flush hooks.
pub trait SpreadsheetHost {
    /// Sheet handle type.
    type Sheet: SheetHost;

    /// Returns an identifier for the spreadsheet, used to scope cache keys.
    fn id(&self) -> String;

    /// Returns the currently active sheet.
    fn active_sheet(&self) -> Result<Self::Sheet, HostError>;

    /// Looks up a sheet by name.
    fn sheet_by_name(&self, name: &str) -> Result<Option<Self::Sheet>, HostError>;

    /// Shows a transient notification to the user.
    fn toast(&self, message: &str);

    /// Applies all pending changes.
    fn flush(&self) -> Result<(), HostError>;
}
