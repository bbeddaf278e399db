//! Row-level operations over one hosted sheet

use std::sync::Arc;

use crate::SheetConfig;
use crate::blocks::Block;
use crate::blocks::matching_blocks;
use crate::blocks::try_apply_blocks;
use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::CachedTable;
use crate::cache::InMemoryCache;
use crate::cache::Snapshot;
use crate::error::Error;
use crate::error::HostError;
use crate::error::Result;
use crate::host::RangeRef;
use crate::host::SheetHost;
use crate::host::SpreadsheetHost;
use crate::mapper;
use crate::model::FieldMap;
use crate::model::RowInput;
use crate::model::RowRecord;
use crate::model::Schema;
use crate::model::Table;
use crate::model::Value;

/// Field-aware access to one sheet of a hosted spreadsheet.
///
/// The wrapper holds the sheet's [`SheetConfig`] and delegates all mapping to
/// [`mapper`]. Whole-sheet reads go through a snapshot cache which every
/// write issued by the wrapper invalidates.
///
/// # Example
///
/// ```
/// use sheet_wrapper_lib::host::MemorySpreadsheet;
/// use sheet_wrapper_lib::model::{Schema, Value};
/// use sheet_wrapper_lib::{SheetConfig, SheetWrapper};
///
/// let spreadsheet = MemorySpreadsheet::new("demo");
/// let sheet = spreadsheet.add_sheet(
///     "Tasks",
///     vec![
///         vec![Value::from("task"), Value::from("done")],
///         vec![Value::from("write"), Value::from(true)],
///         vec![Value::from("test"), Value::from(true)],
///         vec![Value::from("ship"), Value::from(false)],
///     ],
/// );
///
/// let config = SheetConfig::new(Schema::parse("task, done", 1).unwrap()).with_sheet_name("Tasks");
/// let wrapper = SheetWrapper::builder(spreadsheet).config(config).build().unwrap();
///
/// let blocks = wrapper.hide(|r| r.get_bool("done") == Ok(Some(true))).unwrap();
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(sheet.hidden_rows(), vec![2, 3]);
/// ```
pub struct SheetWrapper<H: SpreadsheetHost> {
    host: H,
    sheet: H::Sheet,
    sheet_name: String,
    schema: Schema,
    cache: Arc<dyn CacheProvider>,
    cache_config: CacheConfig,
    cache_key: String,
}

impl<H: SpreadsheetHost> SheetWrapper<H> {
    /// Creates a new builder for wrapping a sheet of `host`.
    pub fn builder(host: H) -> SheetWrapperBuilder<H, Missing> {
        SheetWrapperBuilder::new(host)
    }

    /// Wraps a sheet with the default in-memory cache.
    pub fn new(host: H, config: SheetConfig) -> Result<Self> {
        Self::builder(host).config(config).build()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the wrapped sheet's name.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the spreadsheet host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the sheet handle.
    pub fn sheet(&self) -> &H::Sheet {
        &self.sheet
    }

    /// Returns the id of the first data row (right after the headers).
    pub fn first_row(&self) -> usize {
        self.schema.first_row()
    }

    /// Returns the 1-based column of `field`, or `0` if the schema lacks it.
    pub fn find_column_index(&self, field: &str) -> usize {
        mapper::find_column_index(&self.schema, field)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns a snapshot of the whole sheet, from the cache when fresh.
    pub fn values(&self) -> Result<Snapshot> {
        if !self.cache_config.is_enabled() {
            log::debug!("{}: reading sheet (cache disabled)", self.sheet_name);
            return Ok(Snapshot::bypassed(self.sheet.data_values()?));
        }

        if let Some(cached) = self.cache.get(&self.cache_key) {
            log::trace!("{}: snapshot served from cache", self.sheet_name);
            return Ok(Snapshot::hit(cached));
        }

        let table = self.sheet.data_values()?;
        log::debug!("{}: read {} rows from sheet", self.sheet_name, table.len());
        let cached = CachedTable::with_ttl(Arc::new(table), self.cache_config.snapshot_ttl);
        self.cache.set(&self.cache_key, cached.clone());
        Ok(Snapshot::miss(&cached))
    }

    /// Returns the header rows of the current snapshot.
    pub fn header_values(&self) -> Result<Table> {
        let snapshot = self.values()?;
        Ok(snapshot
            .iter()
            .take(self.schema.num_headers())
            .cloned()
            .collect())
    }

    /// Returns every data row as a record.
    pub fn records(&self) -> Result<Vec<RowRecord>> {
        let snapshot = self.values()?;
        Ok(mapper::to_row_records(&snapshot, &self.schema))
    }

    /// Reads a single data row straight from the sheet.
    ///
    /// With an empty schema there is nothing to read and the record is empty.
    pub fn row_record(&self, row_id: usize) -> Result<RowRecord> {
        self.ensure_data_row(row_id)?;
        if self.schema.is_empty() {
            return mapper::record_from_row(&[], &self.schema, row_id);
        }
        let values = self.sheet.get_values(self.row_range(row_id))?;
        let row = values.into_iter().next().unwrap_or_default();
        mapper::record_from_row(&row, &self.schema, row_id)
    }

    /// Returns the row of the selected cell.
    pub fn selected_row(&self) -> Result<usize> {
        Ok(self.sheet.active_row()?)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Appends a row after the last row with content and returns its id.
    pub fn append_row(&self, input: impl Into<RowInput>) -> Result<usize> {
        let values = input.into().into_row_values(&self.schema);
        let row_id = self.sheet.append_row(&values)?;
        self.reset_cache();
        log::debug!("{}: appended row {}", self.sheet_name, row_id);
        Ok(row_id)
    }

    /// Inserts a row right below the headers and returns its id.
    pub fn insert_row(&self, input: impl Into<RowInput>) -> Result<usize> {
        let row_id = self.first_row();
        self.sheet.insert_row_before(row_id)?;
        self.reset_cache();
        self.update_row(row_id, input)?;
        Ok(row_id)
    }

    /// Updates one row.
    ///
    /// Positional input overwrites as many cells as it has values, starting at
    /// column 1. Field input writes only the named fields; fields missing from
    /// the schema are skipped. Header rows are rejected with
    /// [`Error::HeaderRow`].
    pub fn update_row(&self, row_id: usize, input: impl Into<RowInput>) -> Result<()> {
        self.ensure_data_row(row_id)?;
        let result = match input.into() {
            RowInput::Values(values) => self.write_row_values(row_id, values),
            RowInput::Fields(fields) => self.write_row_fields(row_id, &fields),
        };
        self.reset_cache();
        result
    }

    /// Clears every data row, leaving the headers.
    pub fn clear_sheet(&self) -> Result<()> {
        let first_row = self.first_row();
        let last_row = self.sheet.last_row()?;
        if last_row < first_row || self.schema.is_empty() {
            return Ok(());
        }

        let num_rows = last_row - first_row + 1;
        self.sheet
            .clear_content(RangeRef::new(first_row, 1, num_rows, self.schema.len()))?;
        self.reset_cache();
        log::debug!("{}: cleared {} data rows", self.sheet_name, num_rows);
        Ok(())
    }

    /// Replaces all data rows with `records`, then flushes the host.
    pub fn update_sheet(&self, records: &[RowRecord]) -> Result<()> {
        self.clear_sheet()?;

        let values = mapper::to_row_values_coll(records, &self.schema);
        if !values.is_empty() && !self.schema.is_empty() {
            let range = RangeRef::new(self.first_row(), 1, values.len(), self.schema.len());
            self.sheet.set_values(range, &values)?;
        }
        self.reset_cache();
        self.host.flush()?;

        log::info!("{}: rewrote {} data rows", self.sheet_name, values.len());
        Ok(())
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Hides the rows whose records match `predicate`.
    ///
    /// Issues one host call per contiguous block and returns the blocks.
    pub fn hide<P>(&self, predicate: P) -> Result<Vec<Block>>
    where
        P: FnMut(&RowRecord) -> bool,
    {
        self.host.toast("Start hiding");
        self.apply_to_matching("hiding", predicate, |sheet, start, count| {
            sheet.hide_rows(start, count)
        })
    }

    /// Shows the rows whose records match `predicate`.
    ///
    /// Issues one host call per contiguous block and returns the blocks.
    pub fn show<P>(&self, predicate: P) -> Result<Vec<Block>>
    where
        P: FnMut(&RowRecord) -> bool,
    {
        self.host.toast("Start showing");
        self.apply_to_matching("showing", predicate, |sheet, start, count| {
            sheet.show_rows(start, count)
        })
    }

    /// Shows every row below the headers.
    ///
    /// Returns the block that was shown, or `None` when there are no data rows.
    pub fn show_all(&self) -> Result<Option<Block>> {
        let first_row = self.first_row();
        let last_row = self.sheet.last_row()?;
        if last_row < first_row {
            return Ok(None);
        }

        let block = Block::new(first_row, last_row - first_row + 1);
        self.sheet.show_rows(block.start_row_id, block.count)?;
        Ok(Some(block))
    }

    // =========================================================================
    // Cache
    // =========================================================================

    /// Drops the cached snapshot; the next read goes to the sheet.
    pub fn reset_cache(&self) {
        self.cache.invalidate(&self.cache_key);
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn row_range(&self, row_id: usize) -> RangeRef {
        RangeRef::row(row_id, self.schema.len())
    }

    fn ensure_data_row(&self, row_id: usize) -> Result<()> {
        if row_id < self.first_row() {
            return Err(Error::HeaderRow {
                row_id,
                num_headers: self.schema.num_headers(),
            });
        }
        Ok(())
    }

    fn write_row_values(&self, row_id: usize, values: Vec<Value>) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let range = RangeRef::row(row_id, values.len());
        self.sheet.reset_font_weight(range)?;
        self.sheet.set_values(range, &[values])?;
        Ok(())
    }

    fn write_row_fields(&self, row_id: usize, fields: &FieldMap) -> Result<()> {
        let mut cells = Vec::with_capacity(fields.len());
        for (field, value) in fields {
            match self.find_column_index(field) {
                0 => log::debug!("{}: skipping unknown field '{}'", self.sheet_name, field),
                column => cells.push((column, value)),
            }
        }
        cells.sort_by_key(|(column, _)| *column);

        for (column, value) in cells {
            self.sheet.set_cell_value(row_id, column, value)?;
        }
        Ok(())
    }

    fn apply_to_matching<P, F>(&self, activity: &str, predicate: P, action: F) -> Result<Vec<Block>>
    where
        P: FnMut(&RowRecord) -> bool,
        F: Fn(&H::Sheet, usize, usize) -> Result<(), HostError>,
    {
        let records = self.records()?;
        let blocks = matching_blocks(&records, predicate);
        try_apply_blocks(&blocks, |start, count| action(&self.sheet, start, count))?;

        let rows: usize = blocks.iter().map(|block| block.count).sum();
        log::debug!(
            "{}: {} {} rows in {} calls",
            self.sheet_name,
            activity,
            rows,
            blocks.len()
        );
        Ok(blocks)
    }
}

/// Builds the snapshot cache key of a sheet.
///
/// The spreadsheet id is length-prefixed so ids and sheet names containing
/// `/` cannot collide.
fn cache_key(spreadsheet_id: &str, sheet_name: &str) -> String {
    format!("{}:{}/{}", spreadsheet_id.len(), spreadsheet_id, sheet_name)
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`SheetWrapper`].
///
/// The host is given up front; the sheet config is required before
/// [`build`](SheetWrapperBuilder::build) becomes available.
///
/// # Example
///
/// ```ignore
/// let wrapper = SheetWrapper::builder(host)
///     .config(config)
///     .cache(shared_cache)
///     .cache_config(CacheConfig::no_cache())
///     .build()?;
/// ```
pub struct SheetWrapperBuilder<H, C> {
    host: H,
    config: C,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_config: CacheConfig,
}

impl<H: SpreadsheetHost> SheetWrapperBuilder<H, Missing> {
    /// Creates a new builder with default settings.
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: Missing,
            cache: None,
            cache_config: CacheConfig::default(),
        }
    }

    /// Sets the sheet config.
    pub fn config(self, config: SheetConfig) -> SheetWrapperBuilder<H, Set<SheetConfig>> {
        SheetWrapperBuilder {
            host: self.host,
            config: Set(config),
            cache: self.cache,
            cache_config: self.cache_config,
        }
    }
}

impl<H, C> SheetWrapperBuilder<H, C> {
    /// Sets the snapshot cache.
    ///
    /// Wrappers over the same spreadsheet may share one cache. If not set, the
    /// wrapper gets its own [`InMemoryCache`].
    pub fn cache(mut self, cache: Arc<dyn CacheProvider>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the cache configuration.
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }
}

impl<H: SpreadsheetHost> SheetWrapperBuilder<H, Set<SheetConfig>> {
    /// Resolves the sheet and builds the [`SheetWrapper`].
    ///
    /// Fails with [`Error::SheetNotFound`] when the configured sheet does not
    /// exist.
    pub fn build(self) -> Result<SheetWrapper<H>> {
        let (sheet_name, schema) = self.config.0.into_parts();

        let sheet = match &sheet_name {
            Some(name) => self
                .host
                .sheet_by_name(name)?
                .ok_or_else(|| Error::SheetNotFound(name.clone()))?,
            None => self.host.active_sheet()?,
        };
        let sheet_name = sheet_name.unwrap_or_else(|| sheet.name());
        let cache_key = cache_key(&self.host.id(), &sheet_name);

        log::debug!(
            "wrapping sheet '{}' ({} fields, {} header rows)",
            sheet_name,
            schema.len(),
            schema.num_headers()
        );

        Ok(SheetWrapper {
            host: self.host,
            sheet,
            sheet_name,
            schema,
            cache: self
                .cache
                .unwrap_or_else(|| Arc::new(InMemoryCache::new()) as Arc<dyn CacheProvider>),
            cache_config: self.cache_config,
            cache_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_separates_id_and_name() {
        assert_eq!(cache_key("book", "Orders"), "4:book/Orders");
        assert_ne!(cache_key("a/b", "c"), cache_key("a", "b/c"));
    }
}
