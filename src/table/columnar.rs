// src/table/columnar.rs

use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{fs::File, path::Path, sync::Arc};
use tracing::info;

use super::Table;
use crate::error::{LoadError, Result};

impl Table {
    /// Schema with one nullable `Utf8` field per column name.
    pub fn arrow_schema(&self) -> Arc<Schema> {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();
        Arc::new(Schema::new(fields))
    }

    /// Columnar copy of the table. Short rows become nulls; fields past
    /// the last column are dropped.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let schema = self.arrow_schema();
        let cols: Vec<ArrayRef> = (0..self.column_count())
            .map(|i| Arc::new(StringArray::from(self.column(i))) as ArrayRef)
            .collect();
        let options = RecordBatchOptions::new().with_row_count(Some(self.row_count()));
        Ok(RecordBatch::try_new_with_options(schema, cols, &options)?)
    }

    /// Write the table as a single-batch Snappy Parquet file.
    pub fn write_parquet(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let batch = self.to_record_batch()?;
        let io_err = |source: std::io::Error| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        info!(path = %path.display(), rows = batch.num_rows(), "wrote parquet");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableOptions;
    use anyhow::Result;
    use arrow::array::Array;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::tempdir;

    #[test]
    fn ragged_rows_become_nulls() -> Result<()> {
        let t = Table::parse("a,b\n1,2\n3\n4,5,6", &TableOptions::csv().with_header());
        let batch = t.to_record_batch()?;
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.num_rows(), 3);

        let b = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .expect("Utf8 column");
        assert_eq!(b.value(0), "2");
        assert!(b.is_null(1));
        assert_eq!(b.value(2), "5");
        Ok(())
    }

    #[test]
    fn parquet_round_trip_keeps_row_count() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("t.parquet");
        let t = Table::parse("x\ty\n1\t2\n3\t4", &TableOptions::tsv());
        t.write_parquet(&path)?;

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?.build()?;
        let rows: usize = reader
            .map(|b| b.map(|b| b.num_rows()))
            .collect::<std::result::Result<Vec<_>, _>>()?
            .into_iter()
            .sum();
        assert_eq!(rows, 3);
        Ok(())
    }
}
