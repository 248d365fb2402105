use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::ExtractError;
use crate::io::{parse_json, parse_json_at, read_to_string};
use crate::models::ActivityData;
use crate::translation::{ActivityDataTranslator, StravaApiTranslator};
use crate::types::{RawSummary, StreamsEnvelope};

use super::ExtractRepository;

/// Alle sammendrag i én NDJSON-fil, streams i én fil per aktivitet:
///
/// ```text
/// {root}/activities.jl        én JSON-linje per aktivitet
/// {root}/streams/{id}.json    {"data": [{"type": ..., "data": [...]}, ...]}
/// ```
///
/// `get` skanner `activities.jl` lineært (ingen indeks).
#[derive(Debug, Clone)]
pub struct StravaJsonFileRepository<T = StravaApiTranslator> {
    root: PathBuf,
    translator: T,
}

/// Bare id-feltet; resten av linja parses først ved treff.
/// `id` leses løst: mangler den eller er den ikke et heltall (streng, flyttall,
/// utenfor i64), regnes linja som uten id og matcher ingenting.
#[derive(Debug, Deserialize)]
struct SummaryId {
    #[serde(default)]
    id: Value,
}

impl SummaryId {
    fn id(&self) -> Option<i64> {
        self.id.as_i64()
    }
}

impl StravaJsonFileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_translator(root, StravaApiTranslator::default())
    }
}

impl<T: ActivityDataTranslator> StravaJsonFileRepository<T> {
    pub fn with_translator(root: impl Into<PathBuf>, translator: T) -> Self {
        Self {
            root: root.into(),
            translator,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn summaries_path(&self) -> PathBuf {
        self.root.join("activities.jl")
    }

    /// Går gjennom `activities.jl` og kaller `visit` for hver ikke-tomme linje
    /// med (linjenummer, id, tekst). `visit` returnerer true for å stoppe.
    fn scan_summaries<F>(&self, mut visit: F) -> Result<(), ExtractError>
    where
        F: FnMut(usize, Option<i64>, &str) -> Result<bool, ExtractError>,
    {
        let path = self.summaries_path();
        let io_err = |source| ExtractError::Io {
            path: path.clone(),
            source,
        };
        let reader = BufReader::new(File::open(&path).map_err(io_err)?);

        for (n, line) in reader.lines().enumerate() {
            let line = line.map_err(io_err)?;
            if line.trim().is_empty() {
                continue;
            }
            let lineno = n + 1;
            let head: SummaryId = parse_json_at(&line, &path, Some(lineno))?;
            if visit(lineno, head.id(), &line)? {
                break;
            }
        }
        Ok(())
    }

    fn load_summary_data(&self, activity_id: i64) -> Result<Option<RawSummary>, ExtractError> {
        let path = self.summaries_path();
        let mut found: Option<RawSummary> = None;
        self.scan_summaries(|lineno, id, line| {
            if id == Some(activity_id) {
                found = Some(parse_json_at(line, &path, Some(lineno))?);
                return Ok(true);
            }
            Ok(false)
        })?;
        Ok(found)
    }

    fn load_streams_data(&self, activity_id: i64) -> Result<Option<StreamsEnvelope>, ExtractError> {
        let path = self.root.join("streams").join(format!("{activity_id}.json"));
        read_to_string(&path)?
            .map(|text| parse_json(&text, &path))
            .transpose()
    }
}

impl<T: ActivityDataTranslator> ExtractRepository for StravaJsonFileRepository<T> {
    fn get(&self, activity_id: i64) -> Result<Option<ActivityData>, ExtractError> {
        let Some(summary) = self.load_summary_data(activity_id)? else {
            log::debug!("aktivitet {activity_id}: ikke i activities.jl");
            return Ok(None);
        };
        let Some(streams) = self.load_streams_data(activity_id)? else {
            return Ok(None);
        };
        self.translator
            .to_activity_data(Some(&streams.data), &summary)
            .map(Some)
    }

    fn activity_ids(&self) -> Result<Vec<i64>, ExtractError> {
        let path = self.summaries_path();
        let mut ids = Vec::new();
        self.scan_summaries(|lineno, id, _| {
            match id {
                Some(id) => ids.push(id),
                None => log::warn!(
                    "⚠️ {} linje {lineno}: mangler gyldig id, hopper over",
                    path.display()
                ),
            }
            Ok(false)
        })?;
        Ok(ids)
    }
}
