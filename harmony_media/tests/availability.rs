use harmony_media::error::MediaError;
use harmony_media::{Availability, SimulatedCamera};
use harmony_traits::CaptureDevice;
use rstest::rstest;

#[rstest]
#[case(Availability::Denied, MediaError::PermissionDenied)]
#[case(Availability::Absent, MediaError::NotFound)]
#[case(Availability::Failing, MediaError::Stream("no frames at 640x480".into()))]
fn unavailable_camera_reports_typed_error(
    #[case] availability: Availability,
    #[case] expected: MediaError,
) {
    let mut cam = SimulatedCamera::new(640, 480);
    cam.control().set(availability);
    let err = cam.start().expect_err("camera should be unavailable");
    assert_eq!(err.downcast_ref::<MediaError>(), Some(&expected));
    assert!(!cam.is_active());
}

#[rstest]
fn granting_permission_allows_retry() {
    let mut cam = SimulatedCamera::denied(640, 480);
    let control = cam.control();
    assert!(cam.start().is_err());

    control.set(Availability::Granted);
    cam.start().expect("retry after grant");
    assert!(cam.is_active());
    assert_eq!(control.get(), Availability::Granted);
}

#[rstest]
fn stop_when_inactive_is_noop() {
    let mut cam = SimulatedCamera::new(320, 240);
    cam.stop().expect("noop stop");
    assert_eq!(cam.frame_size(), (320, 240));
    assert_eq!(cam.starts(), 0);
}
