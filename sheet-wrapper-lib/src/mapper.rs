//! Table ↔ record mapping
//!
//! Converts between the grid a host returns (header rows followed by data
//! rows) and field-keyed [`RowRecord`]s. All functions are pure; they work on
//! whatever snapshot they are handed.

use crate::error::Error;
use crate::model::FieldMap;
use crate::model::RowRecord;
use crate::model::Schema;
use crate::model::Table;
use crate::model::Value;

/// Converts a table snapshot into row records.
///
/// The first `schema.num_headers()` rows are skipped. Rows shorter than the
/// schema are padded with [`Value::Null`]; cells beyond the schema are ignored.
/// Records keep table order and their row ids increase by one starting at
/// `num_headers + 1`.
pub fn to_row_records(table: &[Vec<Value>], schema: &Schema) -> Vec<RowRecord> {
    let num_headers = schema.num_headers();
    table
        .iter()
        .skip(num_headers)
        .enumerate()
        .map(|(index, row)| RowRecord::new(row_fields(row, schema), index, num_headers))
        .collect()
}

/// Lays out field values in schema order, one value per field.
///
/// Fields missing from `fields` become [`Value::Null`]; fields unknown to the
/// schema are dropped.
pub fn to_row_values(fields: &FieldMap, schema: &Schema) -> Vec<Value> {
    schema
        .fields()
        .iter()
        .map(|field| fields.get(field).cloned().unwrap_or_default())
        .collect()
}

/// Converts a record collection back into a table of data rows.
pub fn to_row_values_coll<'a, I>(records: I, schema: &Schema) -> Table
where
    I: IntoIterator<Item = &'a RowRecord>,
{
    records
        .into_iter()
        .map(|record| to_row_values(record.fields(), schema))
        .collect()
}

/// Returns the 1-based column of `field`, or `0` when the schema lacks it.
///
/// Callers must check for `0` before using the result as a column.
pub fn find_column_index(schema: &Schema, field: &str) -> usize {
    schema.position(field).map_or(0, |position| position + 1)
}

/// Builds the record for a single row read directly from the host.
///
/// Fails with [`Error::HeaderRow`] when `row_id` addresses a header row.
pub fn record_from_row(row: &[Value], schema: &Schema, row_id: usize) -> Result<RowRecord, Error> {
    let num_headers = schema.num_headers();
    if row_id <= num_headers {
        return Err(Error::HeaderRow {
            row_id,
            num_headers,
        });
    }
    Ok(RowRecord::new(
        row_fields(row, schema),
        row_id - num_headers - 1,
        num_headers,
    ))
}

fn row_fields(row: &[Value], schema: &Schema) -> FieldMap {
    schema
        .fields()
        .iter()
        .enumerate()
        .map(|(column, field)| (field.clone(), row.get(column).cloned().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Value> {
        cells.iter().map(|c| Value::from(*c)).collect()
    }

    fn inventory() -> Table {
        vec![
            row(&["Inventory"]),
            row(&["name", "qty", "bin"]),
            row(&["bolt", "40", "A1"]),
            row(&["nut", "12", "A2"]),
            row(&["washer", "7", "B1"]),
        ]
    }

    #[test]
    fn test_headers_skipped_and_ids_assigned() {
        let schema = Schema::parse("name, qty, bin", 2).unwrap();
        let records = to_row_records(&inventory(), &schema);

        assert_eq!(records.len(), 3);
        let ids: Vec<usize> = records.iter().map(RowRecord::row_id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        let indices: Vec<usize> = records.iter().map(RowRecord::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(records[1].get_string("name").unwrap(), Some("nut"));
    }

    #[test]
    fn test_record_count_for_any_header_count() {
        let table = inventory();
        for num_headers in 0..8 {
            let schema = Schema::parse("name, qty, bin", num_headers).unwrap();
            let records = to_row_records(&table, &schema);
            assert_eq!(records.len(), table.len().saturating_sub(num_headers));
            for (i, record) in records.iter().enumerate() {
                assert_eq!(record.row_id(), num_headers + 1 + i);
                assert_eq!(record.index(), record.row_id() - num_headers - 1);
            }
        }
    }

    #[test]
    fn test_short_rows_padded_with_null() {
        let schema = Schema::parse("name, qty, bin", 0).unwrap();
        let table = vec![row(&["bolt"]), vec![]];
        let records = to_row_records(&table, &schema);

        assert_eq!(records[0].get("qty"), Some(&Value::Null));
        assert_eq!(records[0].get("bin"), Some(&Value::Null));
        assert_eq!(records[1].get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_extra_cells_ignored() {
        let schema = Schema::parse("name", 0).unwrap();
        let records = to_row_records(&[row(&["bolt", "extra"])], &schema);
        assert_eq!(records[0].fields().len(), 1);
    }

    #[test]
    fn test_round_trip_full_width_rows() {
        let table = inventory();
        let schema = Schema::parse("name, qty, bin", 2).unwrap();
        let records = to_row_records(&table, &schema);

        for (i, record) in records.iter().enumerate() {
            assert_eq!(to_row_values(record.fields(), &schema), table[i + 2]);
        }
        assert_eq!(to_row_values_coll(&records, &schema), table[2..].to_vec());
    }

    #[test]
    fn test_row_values_fill_missing_fields() {
        let schema = Schema::parse("name, qty, bin", 0).unwrap();
        let fields = FieldMap::from([
            ("bin".to_string(), Value::from("C3")),
            ("colour".to_string(), Value::from("red")),
        ]);
        assert_eq!(
            to_row_values(&fields, &schema),
            vec![Value::Null, Value::Null, Value::from("C3")]
        );
    }

    #[test]
    fn test_find_column_index() {
        let schema = Schema::parse("name, qty, bin", 1).unwrap();
        assert_eq!(find_column_index(&schema, "name"), 1);
        assert_eq!(find_column_index(&schema, "bin"), 3);
        assert_eq!(find_column_index(&schema, "colour"), 0);
        assert_eq!(find_column_index(&schema, ""), 0);
    }

    #[test]
    fn test_record_from_row() {
        let schema = Schema::parse("name, qty", 1).unwrap();
        let record = record_from_row(&row(&["nut", "12"]), &schema, 3).unwrap();
        assert_eq!(record.index(), 1);
        assert_eq!(record.row_id(), 3);

        let err = record_from_row(&row(&["name", "qty"]), &schema, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::HeaderRow {
                row_id: 1,
                num_headers: 1
            }
        ));
    }
}
