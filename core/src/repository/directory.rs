use std::path::{Path, PathBuf};

use crate::error::ExtractError;
use crate::io::{parse_json, read_to_string};
use crate::models::ActivityData;
use crate::translation::{ActivityDataTranslator, StravaApiTranslator};
use crate::types::{RawStream, RawSummary};

use super::ExtractRepository;

/// Én katalog per aktivitet:
///
/// ```text
/// {root}/activities/
///     {id_1}/summary.json
///     {id_1}/streams.json
///     {id_2}/...
/// ```
#[derive(Debug, Clone)]
pub struct StravaJsonDirectoryRepository<T = StravaApiTranslator> {
    root: PathBuf,
    translator: T,
}

impl StravaJsonDirectoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_translator(root, StravaApiTranslator::default())
    }
}

impl<T: ActivityDataTranslator> StravaJsonDirectoryRepository<T> {
    pub fn with_translator(root: impl Into<PathBuf>, translator: T) -> Self {
        Self {
            root: root.into(),
            translator,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn activities_dir(&self) -> PathBuf {
        self.root.join("activities")
    }

    fn load_summary_data(&self, activity_id: i64) -> Result<Option<RawSummary>, ExtractError> {
        let path = self
            .activities_dir()
            .join(activity_id.to_string())
            .join("summary.json");
        read_to_string(&path)?
            .map(|text| parse_json(&text, &path))
            .transpose()
    }

    fn load_streams_data(&self, activity_id: i64) -> Result<Option<Vec<RawStream>>, ExtractError> {
        let path = self
            .activities_dir()
            .join(activity_id.to_string())
            .join("streams.json");
        read_to_string(&path)?
            .map(|text| parse_json(&text, &path))
            .transpose()
    }
}

impl<T: ActivityDataTranslator> ExtractRepository for StravaJsonDirectoryRepository<T> {
    fn get(&self, activity_id: i64) -> Result<Option<ActivityData>, ExtractError> {
        let summary_data = self.load_summary_data(activity_id)?;
        let streams_data = self.load_streams_data(activity_id)?;
        match (summary_data, streams_data) {
            (Some(summary), Some(streams)) => self
                .translator
                .to_activity_data(Some(&streams), &summary)
                .map(Some),
            _ => Ok(None),
        }
    }

    fn activity_ids(&self) -> Result<Vec<i64>, ExtractError> {
        let dir = self.activities_dir();
        let io_err = |source| ExtractError::Io {
            path: dir.clone(),
            source,
        };

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(|s| s.parse::<i64>().ok()) {
                Some(id) => ids.push(id),
                None => log::warn!(
                    "⚠️ hopper over katalog {:?} i {} (ikke en aktivitet-id)",
                    name,
                    dir.display()
                ),
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}
