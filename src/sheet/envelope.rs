// src/sheet/envelope.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use super::types::{RawRow, SheetPayload};
use crate::error::UpstreamFailure;

// e.g. `/*O_o*/\ngoogle.visualization.Query.setResponse(`
static PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^[^(]*\(").unwrap());
static SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\);\s*$").unwrap());

/// Strip the callback wrapper and parse the gviz payload it carries.
#[instrument(level = "debug", skip(text), fields(text_len = text.len()))]
pub fn decode_envelope(text: &str) -> Result<SheetPayload, UpstreamFailure> {
    let prefix = PREFIX.find(text).ok_or(UpstreamFailure::Envelope)?;
    let body = &text[prefix.end()..];
    let body = match SUFFIX.find(body) {
        Some(m) => &body[..m.start()],
        None => body,
    };

    let payload: SheetPayload = serde_json::from_str(body)?;
    if payload.status.as_deref() == Some("error") {
        let msg = payload
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.reason, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(UpstreamFailure::Sheet(msg));
    }
    debug!(status = ?payload.status, "decoded sheet payload");
    Ok(payload)
}

/// Decode the envelope and return its rows, header row excluded.
pub fn decode_rows(text: &str) -> Result<Vec<RawRow>, UpstreamFailure> {
    let table = decode_envelope(text)?
        .table
        .ok_or(UpstreamFailure::MissingTable)?;
    debug!(cols = table.cols.len(), rows = table.rows.len(), "sheet table");
    Ok(table.rows)
}
