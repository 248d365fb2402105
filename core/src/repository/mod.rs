//! Uthenting av aktiviteter fra lokale Strava-eksporter.
//!
//! To lagringsformer:
//! - [`StravaJsonDirectoryRepository`]: `activities/{id}/summary.json` + `streams.json`
//! - [`StravaJsonFileRepository`]: `activities.jl` + `streams/{id}.json`
//!
//! Manglende filer gir `Ok(None)`. Begge varianter bruker samme bulk-policy:
//! manglende og feilende aktiviteter hoppes over (med logg) og samles i
//! [`FindAllReport`], mens feil på rotnivå avbryter.

mod directory;
mod flat_file;

pub use directory::StravaJsonDirectoryRepository;
pub use flat_file::StravaJsonFileRepository;

use crate::error::ExtractError;
use crate::models::ActivityData;

/// Resultat per aktivitet-id fra en lat gjennomgang.
pub type ActivityResult = (i64, Result<Option<ActivityData>, ExtractError>);

/// Lese-port mot en aktivitetskilde.
pub trait ExtractRepository {
    /// Henter én aktivitet. `Ok(None)` betyr at data mangler (ikke en feil).
    fn get(&self, activity_id: i64) -> Result<Option<ActivityData>, ExtractError>;

    /// Alle id-er kilden kjenner til, i stabil rekkefølge.
    fn activity_ids(&self) -> Result<Vec<i64>, ExtractError>;

    /// Lat gjennomgang: hver aktivitet lastes først når iteratoren når den.
    fn iter_activities(
        &self,
    ) -> Result<Box<dyn Iterator<Item = ActivityResult> + '_>, ExtractError> {
        let ids = self.activity_ids()?;
        Ok(Box::new(ids.into_iter().map(move |id| (id, self.get(id)))))
    }

    /// Som `find_all`, men med oversikt over hva som ble hoppet over.
    fn find_all_report(&self) -> Result<FindAllReport, ExtractError> {
        let mut report = FindAllReport::default();
        for (id, res) in self.iter_activities()? {
            match res {
                Ok(Some(activity)) => report.activities.push(activity),
                Ok(None) => {
                    log::debug!("aktivitet {id}: mangler data, hopper over");
                    report.missing.push(id);
                }
                Err(e) => {
                    log::warn!("⚠️ aktivitet {id}: {e}");
                    report.failed.push((id, e));
                }
            }
        }
        log::info!(
            "lastet {} aktiviteter ({} mangler, {} feilet)",
            report.activities.len(),
            report.missing.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Alle aktiviteter som kunne lastes.
    fn find_all(&self) -> Result<Vec<ActivityData>, ExtractError> {
        Ok(self.find_all_report()?.activities)
    }
}

/// Utfall av en bulk-lasting.
#[derive(Debug, Default)]
pub struct FindAllReport {
    pub activities: Vec<ActivityData>,
    /// Id-er der sammendrag eller streams manglet.
    pub missing: Vec<i64>,
    /// Id-er som feilet (schema, lengdeavvik, ...).
    pub failed: Vec<(i64, ExtractError)>,
}
