use std::fs::File;
use std::io::Write;

use harmony_config::{load_measurements_csv, read_measurements_csv};
use rstest::rstest;
use tempfile::tempdir;

#[rstest]
fn loads_rows_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("measurements.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "id,name,value,unit,confidence").unwrap();
    writeln!(f, "1,Shoulder Width,45.2,cm,0.92").unwrap();
    writeln!(f, "2,Hip Width,42.8,cm,0.89").unwrap();
    drop(f);

    let rows = load_measurements_csv(&path).expect("load");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "1");
    assert_eq!(rows[0].name, "Shoulder Width");
    assert!((rows[0].value - 45.2).abs() < 1e-9);
    assert_eq!(rows[1].unit, "cm");
}

#[rstest]
fn trims_whitespace_around_fields() {
    let data = "id, name, value, unit, confidence\n 3 , Torso Length , 60.3 , cm , 0.95\n";
    let rows = read_measurements_csv(data.as_bytes()).expect("parse");
    assert_eq!(rows[0].id, "3");
    assert_eq!(rows[0].name, "Torso Length");
}

#[rstest]
fn rejects_wrong_headers() {
    let data = "name,value,unit\nShoulder Width,45.2,cm\n";
    let err = read_measurements_csv(data.as_bytes()).expect_err("bad headers");
    assert!(format!("{err}").contains("must have headers"));
}

#[rstest]
#[case("id,name,value,unit,confidence\n1,A,1.0,cm,1.5\n", "confidence must be in")]
#[case("id,name,value,unit,confidence\n1,A,1.0,,0.5\n", "unit must not be empty")]
#[case(
    "id,name,value,unit,confidence\n1,A,1.0,cm,0.5\n1,B,2.0,cm,0.5\n",
    "duplicate id"
)]
#[case("id,name,value,unit,confidence\n1,A,wide,cm,0.5\n", "invalid CSV row 2")]
fn rejects_bad_rows(#[case] data: &str, #[case] expected: &str) {
    let err = read_measurements_csv(data.as_bytes()).expect_err("bad row");
    let msg = format!("{err}");
    assert!(msg.contains(expected), "unexpected message: {msg}");
}

#[rstest]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = load_measurements_csv(&path).expect_err("missing file");
    assert!(format!("{err}").contains("absent.csv"));
}
