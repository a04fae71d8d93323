// src/candidates/select.rs

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::normalize::normalize_tech;
use crate::sheet::{col, RawRow};

/// How many matches are shown per request.
pub const SAMPLE_SIZE: usize = 5;
pub const MAX_KEY_SKILLS: usize = 8;

/// Visitor filters. Absent or empty values leave a dimension unconstrained.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub seniority: Option<String>,
    pub tech: Option<String>,
    pub skill: Option<String>,
}

impl Filters {
    /// Build from decoded query pairs. The first value of a repeated key wins,
    /// unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filters = Filters::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "seniority" => &mut filters.seniority,
                "tech" => &mut filters.tech,
                "skill" => &mut filters.skill,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        filters
    }

    fn seniority(&self) -> Option<&str> {
        constraint(&self.seniority)
    }

    fn tech(&self) -> Option<&str> {
        constraint(&self.tech)
    }

    fn skill(&self) -> Option<&str> {
        constraint(&self.skill)
    }
}

fn constraint(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// One anonymized profile as shown to visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: usize,
    pub title: String,
    pub seniority: String,
    pub primary_tech: String,
    pub key_skills: Vec<String>,
    pub education: String,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub profiles: Vec<CandidateRecord>,
    /// Matches before sampling.
    pub total_matches: usize,
}

pub fn key_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_KEY_SKILLS)
        .map(str::to_string)
        .collect()
}

fn has_skill(skills: &[String], wanted: &str) -> bool {
    let wanted = wanted.to_lowercase();
    skills.iter().any(|s| s.to_lowercase().contains(&wanted))
}

/// Every eligible row that passes all filters, in sheet order.
pub fn filter_candidates(rows: &[RawRow], filters: &Filters) -> Vec<CandidateRecord> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let notes = row.cell(col::NOTES);
            if notes.is_empty() {
                return None;
            }

            let seniority = row.cell(col::SENIORITY);
            let tech = normalize_tech(&row.cell(col::PRIMARY_TECH));
            if filters.seniority().is_some_and(|want| want != seniority) {
                return None;
            }
            if filters.tech().is_some_and(|want| want != tech) {
                return None;
            }

            let skills = key_skills(&row.cell(col::KEY_SKILLS));
            if let Some(want) = filters.skill() {
                if !has_skill(&skills, want) {
                    return None;
                }
            }

            Some(CandidateRecord {
                // 1-based row number plus the header row
                id: index + 2,
                title: row.cell(col::TITLE),
                seniority,
                primary_tech: tech,
                key_skills: skills,
                education: row.cell(col::EDUCATION),
                notes,
            })
        })
        .collect()
}

/// Uniformly shuffle and keep at most `SAMPLE_SIZE`.
pub fn sample<R: Rng + ?Sized>(
    mut records: Vec<CandidateRecord>,
    rng: &mut R,
) -> Vec<CandidateRecord> {
    records.shuffle(rng);
    records.truncate(SAMPLE_SIZE);
    records
}

pub fn select_candidates<R: Rng + ?Sized>(
    rows: &[RawRow],
    filters: &Filters,
    rng: &mut R,
) -> Selection {
    let matches = filter_candidates(rows, filters);
    let total_matches = matches.len();
    Selection {
        profiles: sample(matches, rng),
        total_matches,
    }
}
