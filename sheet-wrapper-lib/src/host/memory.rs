//! In-memory spreadsheet host
//!
//! Keeps sheets as plain tables and records every call it receives, so tests
//! and demos can check exactly which range operations a wrapper issued.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use super::RangeRef;
use super::SheetHost;
use super::SpreadsheetHost;
use crate::error::HostError;
use crate::model::Table;
use crate::model::Value;

/// A call received by a [`MemorySheet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// Whole-sheet read.
    DataValues,
    /// Last row with content.
    LastRow,
    /// Range read.
    GetValues(RangeRef),
    /// Range write.
    SetValues(RangeRef),
    /// Single-cell write.
    SetCellValue {
        /// 1-based row.
        row: usize,
        /// 1-based column.
        column: usize,
    },
    /// Range cleared, formatting kept.
    ClearContent(RangeRef),
    /// Row appended after the last row with content.
    AppendRow,
    /// Empty row inserted before the given row id.
    InsertRowBefore(usize),
    /// Rows hidden.
    HideRows {
        /// First hidden row.
        start_row_id: usize,
        /// Number of rows hidden.
        count: usize,
    },
    /// Rows shown.
    ShowRows {
        /// First shown row.
        start_row_id: usize,
        /// Number of rows shown.
        count: usize,
    },
    /// Active cell lookup.
    ActiveRow,
    /// Bold formatting removed from a range.
    ResetFontWeight(RangeRef),
}

#[derive(Debug, Default)]
struct SheetState {
    name: String,
    rows: Table,
    hidden: BTreeSet<usize>,
    active_row: usize,
    calls: Vec<HostCall>,
    failing: Option<&'static str>,
}

impl SheetState {
    fn record(&mut self, operation: &'static str, call: HostCall) -> Result<(), HostError> {
        self.calls.push(call);
        if self.failing == Some(operation) {
            return Err(HostError::call(operation, "injected failure"));
        }
        Ok(())
    }

    fn last_row(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |i| i + 1)
    }

    fn last_column(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.iter().rposition(|cell| !cell.is_empty()))
            .max()
            .map_or(0, |i| i + 1)
    }

    fn cell(&self, row: usize, column: usize) -> Value {
        self.rows
            .get(row - 1)
            .and_then(|cells| cells.get(column - 1))
            .cloned()
            .unwrap_or_default()
    }

    fn read(&self, range: RangeRef) -> Table {
        (range.row..range.row + range.num_rows)
            .map(|row| {
                (range.column..range.column + range.num_columns)
                    .map(|column| self.cell(row, column))
                    .collect()
            })
            .collect()
    }

    fn write(&mut self, row: usize, column: usize, value: Value) {
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() < column {
            cells.resize(column, Value::Null);
        }
        cells[column - 1] = value;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn rows_range(start_row_id: usize, count: usize) -> RangeRef {
    RangeRef::new(start_row_id, 1, count, 1)
}

/// An in-memory sheet. Clones share the same underlying sheet.
#[derive(Debug, Clone)]
pub struct MemorySheet {
    state: Arc<Mutex<SheetState>>,
}

impl MemorySheet {
    /// Creates a sheet holding `rows`, with the active cell on row 1.
    pub fn new(name: impl Into<String>, rows: Table) -> Self {
        Self {
            state: Arc::new(Mutex::new(SheetState {
                name: name.into(),
                rows,
                active_row: 1,
                ..Default::default()
            })),
        }
    }

    /// Returns a copy of the sheet contents.
    pub fn rows(&self) -> Table {
        lock(&self.state).rows.clone()
    }

    /// Returns the hidden rows in ascending order.
    pub fn hidden_rows(&self) -> Vec<usize> {
        lock(&self.state).hidden.iter().copied().collect()
    }

    /// Moves the active cell to `row_id`.
    pub fn set_active_row(&self, row_id: usize) {
        lock(&self.state).active_row = row_id;
    }

    /// Returns every call received so far.
    pub fn calls(&self) -> Vec<HostCall> {
        lock(&self.state).calls.clone()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        lock(&self.state).calls.clear();
    }

    /// Makes every later call to `operation` fail.
    pub fn fail_on(&self, operation: &'static str) {
        lock(&self.state).failing = Some(operation);
    }

    /// Stops injecting failures.
    pub fn clear_failure(&self) {
        lock(&self.state).failing = None;
    }
}

impl SheetHost for MemorySheet {
    fn name(&self) -> String {
        lock(&self.state).name.clone()
    }

    fn data_values(&self) -> Result<Table, HostError> {
        let mut state = lock(&self.state);
        state.record("data_values", HostCall::DataValues)?;

        let (last_row, last_column) = (state.last_row(), state.last_column());
        if last_row == 0 || last_column == 0 {
            return Ok(Table::new());
        }
        Ok(state.read(RangeRef::new(1, 1, last_row, last_column)))
    }

    fn last_row(&self) -> Result<usize, HostError> {
        let mut state = lock(&self.state);
        state.record("last_row", HostCall::LastRow)?;
        Ok(state.last_row())
    }

    fn get_values(&self, range: RangeRef) -> Result<Table, HostError> {
        let mut state = lock(&self.state);
        state.record("get_values", HostCall::GetValues(range))?;
        if !range.is_valid() {
            return Err(HostError::InvalidRange(range));
        }
        Ok(state.read(range))
    }

    fn set_values(&self, range: RangeRef, values: &[Vec<Value>]) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        state.record("set_values", HostCall::SetValues(range))?;

        let fits = values.len() == range.num_rows
            && values.iter().all(|row| row.len() == range.num_columns);
        if !range.is_valid() || !fits {
            return Err(HostError::InvalidRange(range));
        }

        for (r, row) in values.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                state.write(range.row + r, range.column + c, value.clone());
            }
        }
        Ok(())
    }

    fn set_cell_value(&self, row: usize, column: usize, value: &Value) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        state.record("set_cell_value", HostCall::SetCellValue { row, column })?;
        if row == 0 || column == 0 {
            return Err(HostError::InvalidRange(RangeRef::new(row, column, 1, 1)));
        }
        state.write(row, column, value.clone());
        Ok(())
    }

    fn clear_content(&self, range: RangeRef) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        state.record("clear_content", HostCall::ClearContent(range))?;
        if !range.is_valid() {
            return Err(HostError::InvalidRange(range));
        }

        let columns = range.column - 1..range.column - 1 + range.num_columns;
        for row in state
            .rows
            .iter_mut()
            .skip(range.row - 1)
            .take(range.num_rows)
        {
            for cell in row.iter_mut().take(columns.end).skip(columns.start) {
                *cell = Value::Null;
            }
        }
        Ok(())
    }

    fn append_row(&self, values: &[Value]) -> Result<usize, HostError> {
        let mut state = lock(&self.state);
        state.record("append_row", HostCall::AppendRow)?;

        let row = state.last_row() + 1;
        for (c, value) in values.iter().enumerate() {
            state.write(row, c + 1, value.clone());
        }
        Ok(row)
    }

    fn insert_row_before(&self, row_id: usize) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        state.record("insert_row_before", HostCall::InsertRowBefore(row_id))?;
        if row_id == 0 {
            return Err(HostError::InvalidRange(RangeRef::row(row_id, 1)));
        }

        if state.rows.len() < row_id - 1 {
            state.rows.resize_with(row_id - 1, Vec::new);
        }
        state.rows.insert(row_id - 1, Vec::new());
        state.hidden = state
            .hidden
            .iter()
            .map(|&hidden| if hidden >= row_id { hidden + 1 } else { hidden })
            .collect();
        Ok(())
    }

    fn hide_rows(&self, start_row_id: usize, count: usize) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        state.record("hide_rows", HostCall::HideRows { start_row_id, count })?;
        let range = rows_range(start_row_id, count);
        if !range.is_valid() {
            return Err(HostError::InvalidRange(range));
        }
        state.hidden.extend(start_row_id..start_row_id + count);
        Ok(())
    }

    fn show_rows(&self, start_row_id: usize, count: usize) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        state.record("show_rows", HostCall::ShowRows { start_row_id, count })?;
        let range = rows_range(start_row_id, count);
        if !range.is_valid() {
            return Err(HostError::InvalidRange(range));
        }
        for row_id in start_row_id..start_row_id + count {
            state.hidden.remove(&row_id);
        }
        Ok(())
    }

    fn active_row(&self) -> Result<usize, HostError> {
        let mut state = lock(&self.state);
        state.record("active_row", HostCall::ActiveRow)?;
        Ok(state.active_row)
    }

    fn reset_font_weight(&self, range: RangeRef) -> Result<(), HostError> {
        lock(&self.state).record("reset_font_weight", HostCall::ResetFontWeight(range))
    }
}

#[derive(Debug)]
struct SpreadsheetState {
    id: String,
    sheets: Vec<MemorySheet>,
    active: usize,
    toasts: Vec<String>,
    flushes: usize,
}

/// An in-memory spreadsheet. Clones share the same sheets.
///
/// # Example
///
/// ```
/// use sheet_wrapper_lib::host::{MemorySpreadsheet, SheetHost};
/// use sheet_wrapper_lib::model::Value;
///
/// let spreadsheet = MemorySpreadsheet::new("demo");
/// let sheet = spreadsheet.add_sheet("Tasks", vec![vec![Value::from("task")]]);
/// assert_eq!(sheet.last_row().unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemorySpreadsheet {
    state: Arc<Mutex<SpreadsheetState>>,
}

impl MemorySpreadsheet {
    /// Creates an empty spreadsheet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SpreadsheetState {
                id: id.into(),
                sheets: Vec::new(),
                active: 0,
                toasts: Vec::new(),
                flushes: 0,
            })),
        }
    }

    /// Adds a sheet and returns a handle to it.
    ///
    /// The first sheet added is the active one.
    pub fn add_sheet(&self, name: impl Into<String>, rows: Table) -> MemorySheet {
        let sheet = MemorySheet::new(name, rows);
        lock(&self.state).sheets.push(sheet.clone());
        sheet
    }

    /// Adds a sheet (builder form).
    pub fn with_sheet(self, name: impl Into<String>, rows: Table) -> Self {
        self.add_sheet(name, rows);
        self
    }

    /// Returns the sheet named `name`.
    pub fn sheet(&self, name: &str) -> Option<MemorySheet> {
        lock(&self.state)
            .sheets
            .iter()
            .find(|sheet| sheet.name() == name)
            .cloned()
    }

    /// Makes the sheet named `name` active. Returns `false` if there is none.
    pub fn activate(&self, name: &str) -> bool {
        let mut state = lock(&self.state);
        match state.sheets.iter().position(|sheet| sheet.name() == name) {
            Some(position) => {
                state.active = position;
                true
            }
            None => false,
        }
    }

    /// Returns the toasts shown so far.
    pub fn toasts(&self) -> Vec<String> {
        lock(&self.state).toasts.clone()
    }

    /// Returns how many times the spreadsheet was flushed.
    pub fn flush_count(&self) -> usize {
        lock(&self.state).flushes
    }
}

impl SpreadsheetHost for MemorySpreadsheet {
    type Sheet = MemorySheet;

    fn id(&self) -> String {
        lock(&self.state).id.clone()
    }

    fn active_sheet(&self) -> Result<MemorySheet, HostError> {
        let state = lock(&self.state);
        state
            .sheets
            .get(state.active)
            .cloned()
            .ok_or_else(|| HostError::call("active_sheet", "spreadsheet has no sheets"))
    }

    fn sheet_by_name(&self, name: &str) -> Result<Option<MemorySheet>, HostError> {
        Ok(self.sheet(name))
    }

    fn toast(&self, message: &str) {
        lock(&self.state).toasts.push(message.to_string());
    }

    fn flush(&self) -> Result<(), HostError> {
        lock(&self.state).flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Value> {
        cells.iter().map(|c| Value::from(*c)).collect()
    }

    #[test]
    fn test_data_values_is_rectangular() {
        let sheet = MemorySheet::new("s", vec![row(&["a", "b", "c"]), row(&["d"]), vec![]]);
        let values = sheet.data_values().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], vec![Value::from("d"), Value::Null, Value::Null]);
    }

    #[test]
    fn test_append_after_last_row() {
        let sheet = MemorySheet::new("s", vec![row(&["h"]), row(&["x"]), vec![Value::Null]]);
        assert_eq!(sheet.append_row(&row(&["y"])).unwrap(), 3);
        assert_eq!(sheet.last_row().unwrap(), 3);
    }

    #[test]
    fn test_set_values_checks_dimensions() {
        let sheet = MemorySheet::new("s", Table::new());
        let range = RangeRef::row(2, 2);
        assert_eq!(
            sheet.set_values(range, &[row(&["only one"])]),
            Err(HostError::InvalidRange(range))
        );
        sheet.set_values(range, &[row(&["a", "b"])]).unwrap();
        assert_eq!(sheet.rows()[1], row(&["a", "b"]));
    }

    #[test]
    fn test_clear_content_keeps_other_cells() {
        let sheet = MemorySheet::new("s", vec![row(&["h1", "h2"]), row(&["a", "b"]), row(&["c", "d"])]);
        sheet.clear_content(RangeRef::new(2, 2, 2, 1)).unwrap();
        assert_eq!(
            sheet.rows(),
            vec![
                row(&["h1", "h2"]),
                vec![Value::from("a"), Value::Null],
                vec![Value::from("c"), Value::Null],
            ]
        );
    }

    #[test]
    fn test_insert_shifts_hidden_rows() {
        let sheet = MemorySheet::new("s", vec![row(&["h"]), row(&["a"]), row(&["b"])]);
        sheet.hide_rows(3, 1).unwrap();
        sheet.insert_row_before(2).unwrap();
        assert_eq!(sheet.hidden_rows(), vec![4]);
        assert_eq!(sheet.rows()[1], Vec::<Value>::new());
    }

    #[test]
    fn test_hide_and_show() {
        let sheet = MemorySheet::new("s", Table::new());
        sheet.hide_rows(2, 3).unwrap();
        sheet.show_rows(3, 1).unwrap();
        assert_eq!(sheet.hidden_rows(), vec![2, 4]);
        assert!(sheet.hide_rows(0, 1).is_err());
    }

    #[test]
    fn test_injected_failure() {
        let sheet = MemorySheet::new("s", Table::new());
        sheet.fail_on("hide_rows");
        let err = sheet.hide_rows(1, 1).unwrap_err();
        assert_eq!(err.operation(), Some("hide_rows"));
        assert!(sheet.hidden_rows().is_empty());

        sheet.clear_failure();
        sheet.hide_rows(1, 1).unwrap();
        assert_eq!(sheet.hidden_rows(), vec![1]);
    }

    #[test]
    fn test_calls_recorded_until_cleared() {
        let sheet = MemorySheet::new("s", vec![row(&["h"])]);
        sheet.last_row().unwrap();
        sheet.active_row().unwrap();
        assert_eq!(sheet.calls(), vec![HostCall::LastRow, HostCall::ActiveRow]);

        sheet.clear_calls();
        assert!(sheet.calls().is_empty());
    }

    #[test]
    fn test_spreadsheet_sheet_lookup() {
        let spreadsheet = MemorySpreadsheet::new("book")
            .with_sheet("First", Table::new())
            .with_sheet("Second", Table::new());

        assert_eq!(spreadsheet.active_sheet().unwrap().name(), "First");
        assert!(spreadsheet.activate("Second"));
        assert_eq!(spreadsheet.active_sheet().unwrap().name(), "Second");
        assert!(spreadsheet.sheet_by_name("Third").unwrap().is_none());
    }
}
