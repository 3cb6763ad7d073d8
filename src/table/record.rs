// src/table/record.rs

use std::collections::BTreeMap;

/// Column names `"0".."n-1"`.
pub fn index_names(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

/// Zip `headers` with `fields` by position into a keyed record.
///
/// Without headers the keys are the positional indices. Fields past the
/// last header are left out, headers past the last field get no entry,
/// and a repeated header keeps the later field.
pub fn make_object(fields: &[String], headers: Option<&[String]>) -> BTreeMap<String, String> {
    match headers {
        Some(headers) => headers
            .iter()
            .zip(fields)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        None => index_names(fields.len())
            .into_iter()
            .zip(fields.iter().cloned())
            .collect(),
    }
}
