// src/table/mod.rs

pub mod columnar;
pub mod record;
pub mod split;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

pub use record::make_object;
pub use split::{parse_row, split_lines};

/// Field separator for delimited tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// How a delimited resource is turned into a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableOptions {
    pub delimiter: Delimiter,
    /// Take column names from the first line.
    pub header: bool,
}

impl TableOptions {
    pub fn csv() -> Self {
        Self::default()
    }

    pub fn tsv() -> Self {
        Self {
            delimiter: Delimiter::Tab,
            ..Self::default()
        }
    }

    pub fn with_header(mut self) -> Self {
        self.header = true;
        self
    }

    /// Build options from the loose words sketches pass around:
    /// `"header"`, `"csv"`, `"tsv"`. Order does not matter and the last
    /// of `csv`/`tsv` wins. Anything else is ignored.
    pub fn from_flags<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();
        for flag in flags {
            match flag.as_ref() {
                "header" => opts.header = true,
                "csv" => opts.delimiter = Delimiter::Comma,
                "tsv" => opts.delimiter = Delimiter::Tab,
                other => warn!(flag = other, "ignoring unrecognized table option"),
            }
        }
        opts
    }
}

/// One parsed line of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub fields: Vec<String>,
    /// Column name to field, when column names were known at construction.
    pub record: Option<BTreeMap<String, String>>,
}

impl TableRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            record: None,
        }
    }

    pub fn parse(line: &str, delimiter: Delimiter) -> Self {
        Self::new(parse_row(line, delimiter.as_char()))
    }

    pub fn with_columns(mut self, columns: &[String]) -> Self {
        self.record = Some(make_object(&self.fields, Some(columns)));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.record.as_ref()?.get(name).map(String::as_str)
    }
}

/// Rows plus column names. Rows are not required to have as many fields
/// as there are columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse delimited text. Without a header the columns are the indices
    /// of the first line's fields and every line becomes a row.
    pub fn parse(text: &str, opts: &TableOptions) -> Self {
        let delimiter = opts.delimiter;
        let mut lines = split_lines(text);
        let mut table = Table::new();

        let Some(first) = lines.next() else {
            return table;
        };

        if opts.header {
            table.columns = parse_row(first, delimiter.as_char());
        } else {
            let row = TableRow::parse(first, delimiter);
            table.columns = record::index_names(row.len());
            let row = row.with_columns(&table.columns);
            table.add_row(row);
        }

        for line in lines {
            let row = TableRow::parse(line, delimiter).with_columns(&table.columns);
            table.add_row(row);
        }
        table
    }

    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.row(row)?.get(column)
    }

    pub fn get_by_name(&self, row: usize, column: &str) -> Option<&str> {
        let column = self.column_index(column)?;
        self.get(row, column)
    }

    /// Every row's value in `column`; `None` where a row is too short.
    pub fn column(&self, column: usize) -> Vec<Option<&str>> {
        self.rows.iter().map(|r| r.get(column)).collect()
    }

    pub fn column_by_name(&self, name: &str) -> Option<Vec<Option<&str>>> {
        self.column_index(name).map(|i| self.column(i))
    }
}
