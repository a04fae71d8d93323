// src/sheet/types.rs

use serde::Deserialize;
use serde_json::Value;

/// Fixed column positions in the sanitized sheet. No PII columns exist.
pub mod col {
    pub const TITLE: usize = 0;
    pub const SENIORITY: usize = 1;
    pub const PRIMARY_TECH: usize = 2;
    pub const KEY_SKILLS: usize = 3;
    pub const EDUCATION: usize = 4;
    pub const NOTES: usize = 5;
}

/// Top-level gviz response once the callback envelope is stripped.
#[derive(Debug, Deserialize)]
pub struct SheetPayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub errors: Vec<SheetError>,
    #[serde(default)]
    pub table: Option<SheetTable>,
}

#[derive(Debug, Deserialize)]
pub struct SheetError {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SheetTable {
    #[serde(default)]
    pub cols: Vec<SheetColumn>,
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Deserialize)]
pub struct SheetColumn {
    #[serde(default)]
    pub label: String,
}

/// One gviz row: positional cells, any of which may be `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(default, deserialize_with = "nullable_cells")]
    pub c: Vec<Option<Cell>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub v: Option<Value>,
}

fn nullable_cells<'de, D>(de: D) -> Result<Vec<Option<Cell>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Option<Cell>>>::deserialize(de)?.unwrap_or_default())
}

impl RawRow {
    /// Build a row from plain strings; empty strings become `null` cells.
    #[cfg(test)]
    pub(crate) fn from_strs(cells: &[&str]) -> Self {
        let c = cells
            .iter()
            .map(|s| {
                if s.is_empty() {
                    None
                } else {
                    Some(Cell {
                        v: Some(Value::String((*s).to_string())),
                    })
                }
            })
            .collect();
        Self { c }
    }

    /// Value at `index` coerced to a string, or `""` when the cell or its value is absent.
    pub fn cell(&self, index: usize) -> String {
        match self.c.get(index) {
            Some(Some(Cell { v: Some(v) })) => value_to_string(v),
            _ => String::new(),
        }
    }
}

fn value_to_string(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            // sheet numbers arrive as floats; whole values below 1e21 print
            // as plain digits, larger ones keep exponent form
            (_, _, Some(f)) if f == 0.0 => "0".to_string(),
            (_, _, Some(f)) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
                format!("{}", f)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
