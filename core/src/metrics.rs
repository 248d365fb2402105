use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::MetricError;
use crate::pace::PaceModel;
use crate::repository::ExtractRepository;
use crate::smoothing::resample_1hz;
use crate::timeseries::Timeseries;
use crate::types::Variable;

/// NGP-fart som 1 Hz-serie (m/s), før normalisering.
/// 1) fart × stigningsfaktor(grade/100)
/// 2) elapsed sekunder fra første sample
/// 3) lineær resampling til 0..=floor(D)
pub fn ngp_speed_series<M: PaceModel + ?Sized>(
    ts: &Timeseries,
    model: &M,
) -> Result<Vec<f64>, MetricError> {
    let velocity = ts
        .column(Variable::VelocitySmooth)
        .ok_or(MetricError::MissingVariable(Variable::VelocitySmooth))?;
    let grade = ts
        .column(Variable::GradeSmooth)
        .ok_or(MetricError::MissingVariable(Variable::GradeSmooth))?;

    let adjusted: Vec<f64> = velocity
        .iter()
        .zip(grade)
        .map(|(v, g)| v * model.grade_factor(g / 100.0))
        .collect();

    resample_1hz(&ts.elapsed_secs(), &adjusted)
}

/// Normalisert gradert fart (m/s) for én Timeseries.
/// Ikke-endelig resultat (f.eks. bare hull i dataene) gir InsufficientData.
pub fn ngp_speed<M: PaceModel + ?Sized>(ts: &Timeseries, model: &M) -> Result<f64, MetricError> {
    let series = ngp_speed_series(ts, model)?;
    match model.normalize(&series) {
        Some(ngp) if ngp.is_finite() => Ok(ngp),
        Some(ngp) => Err(MetricError::InsufficientData(format!(
            "normalisert fart er ikke et tall ({ngp})"
        ))),
        None => Err(MetricError::InsufficientData(format!(
            "normalisering trenger lengre serie enn {} s",
            series.len()
        ))),
    }
}

/// TSS for én Timeseries mot gitt terskelfart (m/s).
pub fn training_stress_score<M: PaceModel + ?Sized>(
    ts: &Timeseries,
    model: &M,
    threshold_ms: f64,
) -> Result<f64, MetricError> {
    let ngp = ngp_speed(ts, model)?;
    Ok(model.training_stress_score(ngp, threshold_ms, ts.duration_secs()))
}

/// Timeseries for én aktivitet; None hvis aktivitet eller data mangler.
pub fn timeseries_for<R: ExtractRepository + ?Sized>(
    repo: &R,
    activity_id: i64,
) -> Result<Option<Timeseries>, MetricError> {
    Ok(repo.get(activity_id)?.and_then(|a| a.timeseries))
}

/// NGP-fart for én aktivitet; None hvis aktivitet eller data mangler.
pub fn ngp_speed_for<R, M>(repo: &R, activity_id: i64, model: &M) -> Result<Option<f64>, MetricError>
where
    R: ExtractRepository + ?Sized,
    M: PaceModel + ?Sized,
{
    match timeseries_for(repo, activity_id)? {
        Some(ts) => ngp_speed(&ts, model).map(Some),
        None => Ok(None),
    }
}

/// Én rad i PMC-tabellen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmcRecord {
    pub recorded: NaiveDate,
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(rename = "TSS")]
    pub tss: f64,
}

/// PMC-felter (dato, type, TSS) for alle aktiviteter med Timeseries.
/// Aktiviteter uten Timeseries gir ingen rad; aktiviteter der TSS ikke kan
/// beregnes (mangler fart/stigning, for kort) hoppes over med advarsel.
pub fn pmc_fields<R, M>(repo: &R, model: &M, cfg: &Config) -> Result<Vec<PmcRecord>, MetricError>
where
    R: ExtractRepository + ?Sized,
    M: PaceModel + ?Sized,
{
    let mut records = Vec::new();
    for activity in repo.find_all()? {
        let Some(ts) = activity.get_timeseries() else {
            continue;
        };
        match training_stress_score(ts, model, cfg.threshold_speed_ms) {
            Ok(tss) => records.push(PmcRecord {
                recorded: ts.start().with_timezone(&cfg.local_tz).date_naive(),
                activity_type: activity.kind.clone(),
                tss,
            }),
            Err(e) => log::warn!("⚠️ aktivitet {}: ingen TSS ({e})", activity.id),
        }
    }
    Ok(records)
}
