//! Capture session lifecycle against the simulated camera.
#![cfg(feature = "media-errors")]

use harmony_core::{CaptureSession, CaptureStatus, HarmonyError, map_capture_error};
use harmony_media::error::MediaError;
use harmony_media::{Availability, SimulatedCamera};
use harmony_traits::CaptureDevice;
use rstest::rstest;

fn harmony_error(e: &eyre::Report) -> &HarmonyError {
    e.downcast_ref::<HarmonyError>().unwrap()
}

#[test]
fn start_goes_live() {
    let mut session = CaptureSession::new(SimulatedCamera::new(640, 480));
    session.start().unwrap();
    assert_eq!(session.status(), &CaptureStatus::Live);
    assert!(session.device().is_active());
    // second start is a no-op, not an AlreadyActive error
    session.start().unwrap();
    assert_eq!(session.device().starts(), 1);
}

#[rstest]
#[case(Availability::Denied)]
#[case(Availability::Absent)]
fn unavailable_camera_is_retryable(#[case] availability: Availability) {
    let cam = SimulatedCamera::new(640, 480);
    cam.control().set(availability);
    let mut session = CaptureSession::new(cam);
    let err = session.start().unwrap_err();
    let he = harmony_error(&err);
    assert!(he.is_retryable(), "{he:?}");
    assert!(matches!(session.status(), CaptureStatus::Unavailable(_)));
    assert!(!session.device().is_active());
}

#[test]
fn stream_failure_is_not_retryable() {
    let cam = SimulatedCamera::new(640, 480);
    cam.control().set(Availability::Failing);
    let mut session = CaptureSession::new(cam);
    let err = session.start().unwrap_err();
    assert_eq!(
        harmony_error(&err),
        &HarmonyError::Capture("camera stream failed: no frames at 640x480".into())
    );
    assert!(!harmony_error(&err).is_retryable());
}

#[test]
fn retry_after_permission_granted() {
    let cam = SimulatedCamera::denied(640, 480);
    let control = cam.control();
    let mut session = CaptureSession::new(cam);
    assert!(session.start().is_err());
    assert!(session.retry().is_err());
    control.set(Availability::Granted);
    session.retry().unwrap();
    assert_eq!(session.status(), &CaptureStatus::Live);
    assert_eq!(session.attempts(), 3);
}

#[test]
fn stop_releases_stream() {
    let mut session = CaptureSession::new(SimulatedCamera::new(320, 240));
    session.start().unwrap();
    session.stop().unwrap();
    assert_eq!(session.status(), &CaptureStatus::Stopped);
    assert!(!session.device().is_active());
    // stopping a stopped session is fine
    session.stop().unwrap();
}

/// Device that records whether it was stopped through a shared flag.
struct Tracked {
    active: bool,
    stopped: std::rc::Rc<std::cell::Cell<bool>>,
}

impl CaptureDevice for Tracked {
    fn start(&mut self) -> Result<(), harmony_traits::BoxError> {
        self.active = true;
        Ok(())
    }
    fn stop(&mut self) -> Result<(), harmony_traits::BoxError> {
        self.active = false;
        self.stopped.set(true);
        Ok(())
    }
    fn is_active(&self) -> bool {
        self.active
    }
}

#[test]
fn drop_stops_the_stream() {
    let stopped = std::rc::Rc::new(std::cell::Cell::new(false));
    {
        let mut session = CaptureSession::new(Tracked {
            active: false,
            stopped: stopped.clone(),
        });
        session.start().unwrap();
    }
    assert!(stopped.get());
}

#[rstest]
#[case(MediaError::PermissionDenied, true)]
#[case(MediaError::NotFound, true)]
#[case(MediaError::AlreadyActive, false)]
#[case(MediaError::Stream("usb reset".into()), false)]
fn typed_media_errors_map_precisely(#[case] e: MediaError, #[case] retryable: bool) {
    let mapped = map_capture_error(&e);
    assert_eq!(mapped.is_retryable(), retryable, "{mapped:?}");
}

#[rstest]
#[case("Permission dismissed by user", true)]
#[case("NotAllowedError: access denied", true)]
#[case("requested device not found", true)]
#[case("pipeline stalled", false)]
fn untyped_errors_use_message_heuristics(#[case] msg: &str, #[case] retryable: bool) {
    let e = std::io::Error::other(msg.to_string());
    let mapped = map_capture_error(&e);
    assert_eq!(mapped.is_retryable(), retryable, "{mapped:?}");
    if !retryable {
        assert_eq!(mapped, HarmonyError::Capture(msg.to_string()));
    }
}
