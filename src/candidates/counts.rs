// src/candidates/counts.rs

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use super::normalize::normalize_tech;
use crate::sheet::{col, RawRow};

/// One axis value of the counts table: a concrete category or "any".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    Any,
    Is(String),
}

impl Facet {
    /// `None` or an empty constraint means "any".
    pub fn from_filter(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Facet::Is(v.to_string()),
            _ => Facet::Any,
        }
    }

    /// Key used on the wire: `""` for any, the category otherwise.
    /// Blank categories have no key since an empty filter already means "any".
    fn wire_key(&self) -> Option<&str> {
        match self {
            Facet::Any => Some(""),
            Facet::Is(v) if v.is_empty() => None,
            Facet::Is(v) => Some(v),
        }
    }
}

/// tech → seniority → number of eligible candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountsTable {
    cells: BTreeMap<Facet, BTreeMap<Facet, u64>>,
}

impl CountsTable {
    pub fn get(&self, tech: &Facet, seniority: &Facet) -> u64 {
        self.cells
            .get(tech)
            .and_then(|by_seniority| by_seniority.get(seniority))
            .copied()
            .unwrap_or(0)
    }

    /// Size of the whole eligible pool.
    pub fn total(&self) -> u64 {
        self.get(&Facet::Any, &Facet::Any)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Facet, &Facet, u64)> {
        self.cells
            .iter()
            .flat_map(|(t, row)| row.iter().map(move |(s, n)| (t, s, *n)))
    }

    fn bump(&mut self, tech: &Facet, seniority: &Facet) {
        *self
            .cells
            .entry(tech.clone())
            .or_default()
            .entry(seniority.clone())
            .or_insert(0) += 1;
    }

    fn record(&mut self, tech: Facet, seniority: Facet) {
        self.bump(&tech, &seniority);
        self.bump(&tech, &Facet::Any);
        self.bump(&Facet::Any, &seniority);
        self.bump(&Facet::Any, &Facet::Any);
    }
}

/// Cross-tabulate every eligible row in a single pass.
pub fn build_counts(rows: &[RawRow]) -> CountsTable {
    let mut table = CountsTable::default();
    for row in rows {
        if row.cell(col::NOTES).is_empty() {
            continue;
        }
        let tech = normalize_tech(&row.cell(col::PRIMARY_TECH));
        let seniority = row.cell(col::SENIORITY);
        table.record(Facet::Is(tech), Facet::Is(seniority));
    }
    table
}

struct SeniorityCounts<'a>(&'a BTreeMap<Facet, u64>);

impl Serialize for SeniorityCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (seniority, n) in self.0 {
            if let Some(key) = seniority.wire_key() {
                map.serialize_entry(key, n)?;
            }
        }
        map.end()
    }
}

impl Serialize for CountsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        // an empty pool still carries the "any" row
        if !self.cells.contains_key(&Facet::Any) {
            map.serialize_entry("", &SeniorityCounts(&BTreeMap::new()))?;
        }
        for (tech, row) in &self.cells {
            if let Some(key) = tech.wire_key() {
                map.serialize_entry(key, &SeniorityCounts(row))?;
            }
        }
        map.end()
    }
}
