use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};
use serde_json::Value;

use crate::error::ExtractError;
use crate::models::ActivityData;
use crate::timeseries::Timeseries;
use crate::types::{RawStream, RawSummary, Variable, LATLNG};

/// Oversetter rådata (streams + sammendrag) til ActivityData.
pub trait ActivityDataTranslator {
    fn to_activity_data(
        &self,
        stream_data: Option<&[RawStream]>,
        summary_data: &RawSummary,
    ) -> Result<ActivityData, ExtractError>;
}

/// Oversetter for Strava API-eksport.
#[derive(Debug, Clone)]
pub struct StravaApiTranslator {
    variables: Vec<Variable>,
}

impl Default for StravaApiTranslator {
    fn default() -> Self {
        Self::new(Variable::defaults())
    }
}

impl StravaApiTranslator {
    /// `variables` er vokabularet (VARIABLES) og bestemmer kolonnerekkefølgen.
    pub fn new(variables: Vec<Variable>) -> Self {
        Self { variables }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn to_timeseries(
        &self,
        streams: &[RawStream],
        start_time: DateTime<FixedOffset>,
    ) -> Result<Option<Timeseries>, ExtractError> {
        let rows = check_equal_lengths(streams)?;

        // Navn -> data. Siste stream vinner ved duplikat type.
        let mut by_name: HashMap<&str, &[Value]> = HashMap::new();
        for stream in streams {
            match stream.name() {
                Some(name) => {
                    if by_name.insert(name, stream.data.as_slice()).is_some() {
                        log::warn!("stream {name:?} forekommer flere ganger, bruker siste");
                    }
                }
                None => log::debug!("hopper over stream med ikke-streng type {}", stream.kind),
            }
        }

        let time = by_name
            .get(Variable::Time.as_str())
            .ok_or(ExtractError::MissingTimeStream)?;
        let index = time
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let secs = to_f64(v, Variable::Time.as_str(), i)?;
                if !secs.is_finite() {
                    return Err(invalid(Variable::Time.as_str(), i, "tid mangler"));
                }
                Ok(start_time + Duration::nanoseconds((secs * 1e9).round() as i64))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut decoded: HashMap<Variable, Vec<f64>> = HashMap::new();
        for (name, data) in &by_name {
            match Variable::from_name(name) {
                Some(var) => {
                    let values = data
                        .iter()
                        .enumerate()
                        .map(|(i, v)| to_f64(v, name, i))
                        .collect::<Result<Vec<_>, _>>()?;
                    decoded.insert(var, values);
                }
                None if *name == LATLNG => {}
                None => log::debug!("dropper ukjent stream {name:?}"),
            }
        }

        // latlng erstatter eventuelle lat/lon-streams
        if let Some(latlng) = by_name.get(LATLNG) {
            let (lat, lon) = split_latlng(latlng)?;
            decoded.insert(Variable::Lat, lat);
            decoded.insert(Variable::Lon, lon);
        }

        let columns: Vec<(Variable, Vec<f64>)> = self
            .variables
            .iter()
            .filter_map(|var| decoded.remove(var).map(|values| (*var, values)))
            .collect();

        debug_assert!(columns.iter().all(|(_, v)| v.len() == rows));
        Timeseries::new(index, columns)
    }
}

impl ActivityDataTranslator for StravaApiTranslator {
    fn to_activity_data(
        &self,
        stream_data: Option<&[RawStream]>,
        summary_data: &RawSummary,
    ) -> Result<ActivityData, ExtractError> {
        let start_time = parse_start_date(&summary_data.start_date)?;
        let timeseries = match stream_data {
            Some(streams) if !streams.is_empty() => self.to_timeseries(streams, start_time)?,
            _ => None,
        };
        Ok(ActivityData::new(
            summary_data.id,
            summary_data.kind.clone(),
            timeseries,
        ))
    }
}

/// ISO-8601 → tidspunkt. Uten offset tolkes tiden som UTC.
pub fn parse_start_date(value: &str) -> Result<DateTime<FixedOffset>, ExtractError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Ok(t);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(ExtractError::StartDate {
        value: value.to_string(),
    })
}

/// Alle streams må ha like mange verdier. Returnerer antall rader.
fn check_equal_lengths(streams: &[RawStream]) -> Result<usize, ExtractError> {
    let expected = streams[0].data.len();
    for stream in &streams[1..] {
        if stream.data.len() != expected {
            return Err(ExtractError::LengthMismatch {
                stream: stream.kind.to_string().trim_matches('"').to_string(),
                expected,
                found: stream.data.len(),
            });
        }
    }
    Ok(expected)
}

fn to_f64(v: &Value, stream: &str, index: usize) -> Result<f64, ExtractError> {
    match v {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid(stream, index, "tall utenfor f64")),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Null => Ok(f64::NAN),
        other => Err(invalid(stream, index, &format!("forventet tall, fikk {other}"))),
    }
}

fn split_latlng(data: &[Value]) -> Result<(Vec<f64>, Vec<f64>), ExtractError> {
    let mut lat = Vec::with_capacity(data.len());
    let mut lon = Vec::with_capacity(data.len());
    for (i, v) in data.iter().enumerate() {
        match v {
            Value::Array(pair) if pair.len() == 2 => {
                lat.push(to_f64(&pair[0], LATLNG, i)?);
                lon.push(to_f64(&pair[1], LATLNG, i)?);
            }
            Value::Null => {
                lat.push(f64::NAN);
                lon.push(f64::NAN);
            }
            other => {
                return Err(invalid(
                    LATLNG,
                    i,
                    &format!("forventet [lat, lon], fikk {other}"),
                ))
            }
        }
    }
    Ok((lat, lon))
}

fn invalid(stream: &str, index: usize, message: &str) -> ExtractError {
    ExtractError::InvalidValue {
        stream: stream.to_string(),
        index,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(start: &str) -> RawSummary {
        serde_json::from_value(json!({"id": 7, "type": "Run", "start_date": start})).unwrap()
    }

    fn streams(v: Value) -> Vec<RawStream> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn start_date_accepts_offset_and_naive() {
        let a = parse_start_date("2024-01-01T07:00:00Z").unwrap();
        let b = parse_start_date("2024-01-01T00:00:00-07:00").unwrap();
        let c = parse_start_date("2024-01-01T07:00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(parse_start_date("i går").is_err());
    }

    #[test]
    fn fractional_time_offsets_are_kept() {
        let s = streams(json!([{"type": "time", "data": [0, 0.5, 1.25]}]));
        let a = StravaApiTranslator::default()
            .to_activity_data(Some(&s), &summary("2024-01-01T07:00:00Z"))
            .unwrap();
        let ts = a.get_timeseries().unwrap();
        assert_eq!(ts.elapsed_secs(), vec![0.0, 0.5, 1.25]);
    }

    #[test]
    fn duplicate_stream_type_last_wins() {
        let s = streams(json!([
            {"type": "time", "data": [0, 1]},
            {"type": "watts", "data": [100, 110]},
            {"type": "watts", "data": [200, 210]}
        ]));
        let a = StravaApiTranslator::default()
            .to_activity_data(Some(&s), &summary("2024-01-01T07:00:00Z"))
            .unwrap();
        assert_eq!(
            a.get_timeseries().unwrap().column(Variable::Watts),
            Some(&[200.0, 210.0][..])
        );
    }

    #[test]
    fn moving_bools_and_nulls_are_coerced() {
        let s = streams(json!([
            {"type": "time", "data": [0, 1, 2]},
            {"type": "moving", "data": [true, false, true]},
            {"type": "heartrate", "data": [120, null, 122]}
        ]));
        let a = StravaApiTranslator::default()
            .to_activity_data(Some(&s), &summary("2024-01-01T07:00:00Z"))
            .unwrap();
        let ts = a.get_timeseries().unwrap();
        assert_eq!(ts.column(Variable::Moving), Some(&[1.0, 0.0, 1.0][..]));
        assert!(ts.column(Variable::Heartrate).unwrap()[1].is_nan());
    }

    #[test]
    fn malformed_latlng_is_invalid_value() {
        let s = streams(json!([
            {"type": "time", "data": [0, 1]},
            {"type": "latlng", "data": [[33.4, -111.9], [33.4]]}
        ]));
        let err = StravaApiTranslator::default()
            .to_activity_data(Some(&s), &summary("2024-01-01T07:00:00Z"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidValue { index: 1, .. }), "{err}");
    }
}
