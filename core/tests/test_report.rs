use chrono::NaiveDate;
use runload_core::report::{write_pmc_csv, write_timeseries_csv};
use runload_core::{
    ActivityDataTranslator, PmcRecord, RawStream, RawSummary, StravaApiTranslator, Variable,
};
use serde_json::json;

#[test]
fn pmc_csv_uses_recorded_type_tss_header() {
    let records = vec![PmcRecord {
        recorded: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        activity_type: "Run".to_string(),
        tss: 55.5,
    }];
    let mut out = Vec::new();
    write_pmc_csv(&records, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "recorded,type,TSS\n2024-06-01,Run,55.5\n");
}

#[test]
fn timeseries_csv_leaves_nulls_empty() {
    let s: RawSummary =
        serde_json::from_value(json!({"id": 1, "type": "Run", "start_date": "2024-01-01T07:00:00Z"}))
            .unwrap();
    let st: Vec<RawStream> = serde_json::from_value(json!([
        {"type": "time", "data": [0, 1]},
        {"type": "heartrate", "data": [120, null]}
    ]))
    .unwrap();
    let a = StravaApiTranslator::new(vec![Variable::Time, Variable::Heartrate])
        .to_activity_data(Some(&st), &s)
        .unwrap();

    let mut out = Vec::new();
    write_timeseries_csv(a.get_timeseries().unwrap(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "timestamp,time,heartrate");
    assert_eq!(lines[1], "2024-01-01T07:00:00+00:00,0,120");
    assert_eq!(lines[2], "2024-01-01T07:00:01+00:00,1,");
}
