// Felles fixture-hjelpere for integrasjonstestene.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

pub fn summary(id: i64, kind: &str, start_date: &str) -> Value {
    json!({"id": id, "type": kind, "start_date": start_date, "name": "Morning Run"})
}

/// Jevn løpetur: `n` sekunder, konstant fart, flatt.
pub fn run_streams(n: usize, speed_ms: f64) -> Value {
    let time: Vec<usize> = (0..n).collect();
    json!([
        {"type": "time", "data": time, "series_type": "time"},
        {"type": "velocity_smooth", "data": vec![speed_ms; n]},
        {"type": "grade_smooth", "data": vec![0.0; n]},
        {"type": "heartrate", "data": vec![150; n]},
        {"type": "latlng", "data": vec![json!([33.45, -112.07]); n]}
    ])
}

/// `{root}/activities/{id}/summary.json` og/eller `streams.json`.
pub fn write_dir_activity(root: &Path, id: i64, summary: Option<&Value>, streams: Option<&Value>) {
    let dir = root.join("activities").join(id.to_string());
    fs::create_dir_all(&dir).unwrap();
    if let Some(s) = summary {
        fs::write(dir.join("summary.json"), s.to_string()).unwrap();
    }
    if let Some(s) = streams {
        fs::write(dir.join("streams.json"), s.to_string()).unwrap();
    }
}

/// `{root}/activities.jl` med én linje per sammendrag.
pub fn write_summaries_jl(root: &Path, summaries: &[Value]) {
    let body: Vec<String> = summaries.iter().map(|s| s.to_string()).collect();
    fs::write(root.join("activities.jl"), body.join("\n") + "\n").unwrap();
}

/// `{root}/streams/{id}.json` som `{"data": streams}`.
pub fn write_stream_file(root: &Path, id: i64, streams: &Value) {
    let dir = root.join("streams");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{id}.json")), json!({"data": streams}).to_string()).unwrap();
}
