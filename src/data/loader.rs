use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::WideTable;
use crate::error::{DashboardError, Result};

/// Identifier column of the wide indicator table.
pub const INDICATOR_COLUMN: &str = "Indicator";
/// Identifier column of the PISA table.
pub const YEAR_COLUMN: &str = "Year";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the wide indicator-by-year table.
pub fn load_indicator_table(path: &Path) -> Result<WideTable> {
    load_wide_table(path, INDICATOR_COLUMN)
}

/// Load the PISA table (`Year` plus one column per subject).
pub fn load_pisa_table(path: &Path) -> Result<WideTable> {
    load_wide_table(path, YEAR_COLUMN)
}

/// Load a wide table whose identifier column is `id_column`.  Dispatch by
/// extension.
///
/// Supported formats:
/// * `.csv`     – header row, one identifier column, any number of value columns
/// * `.parquet` – same layout as flat columns (as written by `df.to_parquet()`)
///
/// Headers are whitespace-trimmed in both cases.
pub fn load_wide_table(path: &Path, id_column: &str) -> Result<WideTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path, id_column)?,
        "parquet" | "pq" => load_parquet(path, id_column)?,
        other => return Err(DashboardError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} rows x {} value columns from {}",
        table.len(),
        table.value_columns.len(),
        path.display()
    );
    Ok(table)
}

/// Split trimmed headers into the identifier position and the value columns.
fn split_headers(
    path: &Path,
    headers: &[String],
    id_column: &str,
) -> Result<(usize, Vec<String>)> {
    let id_idx = headers
        .iter()
        .position(|h| h == id_column)
        .ok_or_else(|| DashboardError::MissingColumn {
            path: path.to_path_buf(),
            column: id_column.to_string(),
        })?;

    let value_columns = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != id_idx)
        .map(|(_, h)| h.clone())
        .collect();

    Ok((id_idx, value_columns))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, id_column: &str) -> Result<WideTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| DashboardError::data_load(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DashboardError::data_load(path, format!("reading header row: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let (id_idx, value_columns) = split_headers(path, &headers, id_column)?;
    let mut table = WideTable::new(id_column, value_columns);

    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| DashboardError::data_load(path, format!("row {row_no}: {e}")))?;

        let id = record.get(id_idx).unwrap_or("").to_string();
        let cells = (0..headers.len())
            .filter(|i| *i != id_idx)
            .map(|i| record.get(i).unwrap_or("").to_string())
            .collect();

        table.push_row(id, cells);
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat columns.
///
/// String, integer, float and boolean columns are rendered to text; nulls
/// become empty cells. Other column types are a load error.
fn load_parquet(path: &Path, id_column: &str) -> Result<WideTable> {
    let file = std::fs::File::open(path).map_err(|e| DashboardError::data_load(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DashboardError::data_load(path, format!("reading parquet metadata: {e}")))?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    let (id_idx, value_columns) = split_headers(path, &headers, id_column)?;

    let reader = builder
        .build()
        .map_err(|e| DashboardError::data_load(path, format!("building parquet reader: {e}")))?;

    let mut table = WideTable::new(id_column, value_columns);

    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| DashboardError::data_load(path, format!("reading record batch: {e}")))?;

        for row in 0..batch.num_rows() {
            let id = cell_to_text(batch.column(id_idx), row)
                .map_err(|reason| DashboardError::data_load(path, reason))?;

            let mut cells = Vec::with_capacity(headers.len().saturating_sub(1));
            for col_idx in (0..batch.num_columns()).filter(|i| *i != id_idx) {
                let cell = cell_to_text(batch.column(col_idx), row).map_err(|reason| {
                    DashboardError::data_load(path, format!("column '{}': {reason}", headers[col_idx]))
                })?;
                cells.push(cell);
            }

            table.push_row(id, cells);
        }
    }

    Ok(table)
}

/// Render a single Arrow cell as text.
fn cell_to_text(col: &ArrayRef, row: usize) -> std::result::Result<String, String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row).to_string(),
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row).to_string(),
        DataType::Boolean => col.as_boolean().value(row).to_string(),
        other => return Err(format!("unsupported column type {other:?}")),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn csv_headers_are_trimmed() {
        let (_dir, path) = write_temp(
            "wide.csv",
            " Indicator , 2000 ,2001\nNER Primary Education,92.1,93.0\n",
        );
        let table = load_indicator_table(&path).unwrap();
        assert_eq!(table.id_column, "Indicator");
        assert_eq!(table.value_columns, vec!["2000", "2001"]);
        assert_eq!(table.rows[0].id, "NER Primary Education");
        assert_eq!(table.rows[0].cells, vec!["92.1", "93.0"]);
    }

    #[test]
    fn csv_blank_cells_are_kept_empty() {
        let (_dir, path) = write_temp("wide.csv", "Indicator,2000,2001\nA,,4\n");
        let table = load_indicator_table(&path).unwrap();
        assert_eq!(table.rows[0].cells, vec!["", "4"]);
    }

    #[test]
    fn missing_id_column_is_a_load_error() {
        let (_dir, path) = write_temp("pisa.csv", "Reading,Math\n371,367\n");
        let err = load_pisa_table(&path).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { ref column, .. } if column == "Year"));
        assert!(err.is_data_load());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_indicator_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
    }

    #[test]
    fn empty_file_lacks_header_row() {
        let (_dir, path) = write_temp("empty.csv", "");
        let err = load_indicator_table(&path).unwrap_err();
        assert!(err.is_data_load());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_indicator_table(Path::new("table.xlsx")).unwrap_err();
        assert!(matches!(err, DashboardError::UnsupportedFormat(ref e) if e == "xlsx"));
    }

    #[test]
    fn parquet_columns_render_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Indicator ", DataType::Utf8, false),
            Field::new("2000", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(Float64Array::from(vec![Some(5.5), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_indicator_table(&path).unwrap();
        assert_eq!(table.value_columns, vec!["2000"]);
        assert_eq!(table.rows[0].cells, vec!["5.5"]);
        assert_eq!(table.rows[1].cells, vec![""]);
    }
}
