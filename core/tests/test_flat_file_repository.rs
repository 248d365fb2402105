mod common;

use std::fs;

use common::{run_streams, summary, write_stream_file, write_summaries_jl};
use runload_core::{ExtractError, ExtractRepository, StravaJsonFileRepository};
use serde_json::json;

#[test]
fn get_scans_summaries_and_loads_streams() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summaries_jl(
        root,
        &[
            summary(1234567890, "Run", "2024-05-01T13:00:00Z"),
            summary(1234567891, "Walk", "2024-05-02T13:00:00Z"),
        ],
    );
    write_stream_file(root, 1234567891, &run_streams(30, 1.4));

    let repo = StravaJsonFileRepository::new(root);
    let a = repo.get(1234567891).unwrap().expect("aktivitet");
    assert_eq!(a.kind, "Walk");
    assert_eq!(a.get_timeseries().unwrap().len(), 30);

    // finnes i activities.jl, men mangler stream-fil
    assert!(repo.get(1234567890).unwrap().is_none());
    // finnes ikke i activities.jl
    assert!(repo.get(42).unwrap().is_none());
}

#[test]
fn stream_schema_violations_are_fatal_for_the_activity() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summaries_jl(
        root,
        &[
            summary(1, "Run", "2024-05-01T13:00:00Z"),
            summary(2, "Run", "2024-05-02T13:00:00Z"),
            summary(3, "Run", "2024-05-03T13:00:00Z"),
        ],
    );
    // data er ikke en liste
    write_stream_file(root, 1, &json!([{"type": "time", "data": 3}]));
    // mangler type
    write_stream_file(root, 2, &json!([{"data": [0, 1]}]));
    // elementet er ikke et objekt
    write_stream_file(root, 3, &json!(["time"]));

    let repo = StravaJsonFileRepository::new(root);
    for id in [1, 2, 3] {
        let err = repo.get(id).unwrap_err();
        assert!(matches!(err, ExtractError::Schema { .. }), "id {id}: {err}");
    }
}

#[test]
fn extra_stream_keys_and_non_string_type_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summaries_jl(root, &[summary(9, "Run", "2024-05-01T13:00:00Z")]);
    write_stream_file(
        root,
        9,
        &json!([
            {"type": "time", "data": [0, 1], "original_size": 2, "resolution": "high"},
            {"type": null, "data": [5, 6]}
        ]),
    );
    let a = StravaJsonFileRepository::new(root).get(9).unwrap().unwrap();
    assert_eq!(a.get_timeseries().unwrap().len(), 2);
}

#[test]
fn find_all_uses_same_skip_policy_as_directory_store() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summaries_jl(
        root,
        &[
            summary(1, "Run", "2024-05-01T13:00:00Z"),
            summary(2, "Run", "2024-05-02T13:00:00Z"),
            summary(3, "Run", "2024-05-03T13:00:00Z"),
        ],
    );
    write_stream_file(root, 1, &run_streams(40, 3.0));
    write_stream_file(root, 3, &json!([{"type": "time", "data": "x"}]));

    let repo = StravaJsonFileRepository::new(root);
    assert_eq!(repo.activity_ids().unwrap(), vec![1, 2, 3]);

    let report = repo.find_all_report().unwrap();
    assert_eq!(report.activities.len(), 1);
    assert_eq!(report.missing, vec![2]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 3);
}

#[test]
fn lazy_iteration_loads_per_id() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summaries_jl(
        root,
        &[summary(1, "Run", "2024-05-01T13:00:00Z"), summary(2, "Run", "2024-05-02T13:00:00Z")],
    );
    write_stream_file(root, 1, &run_streams(10, 3.0));
    write_stream_file(root, 2, &run_streams(10, 3.0));

    let repo = StravaJsonFileRepository::new(root);
    let mut it = repo.iter_activities().unwrap();
    let (id, first) = it.next().unwrap();
    assert_eq!(id, 1);
    assert!(first.unwrap().is_some());

    // fila for id 2 fjernes før iteratoren når dit
    fs::remove_file(root.join("streams").join("2.json")).unwrap();
    let (id, second) = it.next().unwrap();
    assert_eq!(id, 2);
    assert!(second.unwrap().is_none());
    assert!(it.next().is_none());
}

#[test]
fn broken_summary_line_is_reported_with_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(
        root.join("activities.jl"),
        format!("{}\n{{not json\n", summary(1, "Run", "2024-05-01T13:00:00Z")),
    )
    .unwrap();

    let repo = StravaJsonFileRepository::new(root);
    match repo.activity_ids() {
        Err(ExtractError::Json { line, .. }) => assert_eq!(line, Some(2)),
        other => panic!("forventet Json-feil, fikk {other:?}"),
    }
    // treff før den ødelagte linja stopper skanningen
    assert!(repo.get(1).unwrap().is_none());
}

#[test]
fn non_integer_id_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summaries_jl(
        root,
        &[
            json!({"id": "draft", "type": "Run", "start_date": "2024-05-01T13:00:00Z"}),
            json!({"id": 1.5, "type": "Run", "start_date": "2024-05-01T13:00:00Z"}),
            json!({"id": 18446744073709551615u64, "type": "Run", "start_date": "2024-05-01T13:00:00Z"}),
            summary(2, "Run", "2024-05-02T13:00:00Z"),
        ],
    );
    write_stream_file(root, 2, &run_streams(20, 3.0));

    let repo = StravaJsonFileRepository::new(root);
    assert_eq!(repo.activity_ids().unwrap(), vec![2]);
    assert!(repo.get(2).unwrap().is_some());
    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 2);
}

#[test]
fn get_uses_first_summary_with_matching_id() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summaries_jl(
        root,
        &[
            summary(5, "Run", "2024-05-01T13:00:00Z"),
            summary(5, "Ride", "2024-05-02T13:00:00Z"),
        ],
    );
    write_stream_file(root, 5, &run_streams(20, 3.0));

    let a = StravaJsonFileRepository::new(root).get(5).unwrap().unwrap();
    assert_eq!(a.kind, "Run");
}
