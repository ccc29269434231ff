//! Config-driven construction: validation, seeding and consumed settings.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use harmony_core::{
    HarmonyError, ScanCfg, ScanDriver, ScanSignals, Setup, group_by_date, mock_measurements,
};
use harmony_traits::ManualClock;
use rstest::rstest;

fn config(toml: &str) -> harmony_config::Config {
    harmony_config::load_toml(toml).unwrap()
}

fn config_error(e: &eyre::Report) -> Option<&HarmonyError> {
    e.downcast_ref::<HarmonyError>()
        .filter(|he| matches!(he, HarmonyError::Config(_)))
}

#[test]
fn seeded_machines_produce_identical_displays() {
    let setup = Setup::from_config(&config("[scan]\nseed = 42\n")).unwrap();
    let run = || {
        let mut m = setup.scan_machine(mock_measurements(Utc::now()));
        m.observe(ScanSignals::live(true));
        m.tick();
        let scanning = m.display();
        m.observe(ScanSignals::live(false));
        (scanning, m.display())
    };
    let (a_scan, a_done) = run();
    let (b_scan, b_done) = run();
    let values = |ms: &[harmony_core::Measurement]| ms.iter().map(|m| m.value).collect::<Vec<_>>();
    assert_eq!(values(&a_scan), values(&b_scan));
    assert_eq!(values(&a_done), values(&b_done));
}

#[test]
fn seeded_drivers_from_config_agree() {
    let cfg = config("[scan]\nseed = 7\ntick_ms = 60000\n");
    let ms = mock_measurements(Utc::now());
    let mut a = ScanDriver::from_config(&cfg, ms.clone(), ManualClock::new()).unwrap();
    let mut b = ScanDriver::from_config(&cfg, ms, ManualClock::new()).unwrap();
    for d in [&mut a, &mut b] {
        d.observe(ScanSignals::live(true));
        d.observe(ScanSignals::live(false));
    }
    assert_eq!(a.display(), b.display());
    assert_eq!(a.machine().cfg().tick, Duration::from_secs(60));
}

#[test]
fn invalid_config_is_a_config_error() {
    let err = Setup::from_config(&config("[scan]\nfluctuation_min = 0.99\nfluctuation_max = 0.5\n"))
        .unwrap_err();
    assert!(config_error(&err).is_some(), "{err:?}");
    assert!(
        err.chain()
            .any(|c| c.to_string().contains("scan.fluctuation_min must be <= scan.fluctuation_max"))
    );
}

#[rstest]
#[case(ScanCfg { fluctuation: (f64::NAN, 0.9), ..ScanCfg::default() })]
#[case(ScanCfg { fluctuation: (0.9, 0.5), ..ScanCfg::default() })]
#[case(ScanCfg { fluctuation: (0.7, f64::INFINITY), ..ScanCfg::default() })]
#[case(ScanCfg { accuracy_jitter: f64::NAN, ..ScanCfg::default() })]
#[case(ScanCfg { accuracy_ceiling: 0.5, ..ScanCfg::default() })]
#[case(ScanCfg { confidence_ceiling: 1.5, ..ScanCfg::default() })]
#[case(ScanCfg { tick: Duration::ZERO, ..ScanCfg::default() })]
fn hand_built_scan_cfg_is_rejected(#[case] cfg: ScanCfg) {
    let err = cfg.validate().unwrap_err();
    assert!(config_error(&err).is_some(), "{err:?}");
}

#[test]
fn default_scan_cfg_validates() {
    ScanCfg::default().validate().unwrap();
}

#[test]
fn history_days_drive_demo_history() {
    let setup = Setup::from_config(&config("[scan]\nseed = 3\n[history]\ndays = 3\n")).unwrap();
    let today = Utc.with_ymd_and_hms(2024, 4, 20, 10, 0, 0).single().unwrap();
    let hist = setup.demo_history(&mock_measurements(today), today);
    assert_eq!(hist.len(), 3 * 12);
    assert_eq!(group_by_date(&hist).len(), 3);
    assert_eq!(hist, setup.demo_history(&mock_measurements(today), today));
}

#[test]
fn history_store_follows_dir() {
    let dir = tempfile::tempdir().unwrap();
    let toml = format!("[history]\ndir = {:?}\n", dir.path().to_string_lossy());
    let setup = Setup::from_config(&config(&toml)).unwrap();
    assert!(setup.history_store().is_some());
    assert!(Setup::from_config(&config("")).unwrap().history_store().is_none());
}

#[cfg(feature = "media-errors")]
#[test]
fn camera_uses_configured_frame_size() {
    let setup = Setup::from_config(&config("[capture]\nwidth = 1280\nheight = 720\n")).unwrap();
    assert_eq!(setup.camera().frame_size(), (1280, 720));
}
