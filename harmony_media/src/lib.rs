//! Simulated capture devices.
//!
//! The real product asks the platform for a user-facing camera stream at an
//! ideal resolution; here the stream is a flag plus a frame counter, and the
//! availability can be flipped at runtime to exercise denial and retry.
pub mod error;

use error::MediaError;
use harmony_traits::{BoxError, CaptureDevice};
use std::cell::Cell;
use std::rc::Rc;

/// Whether the simulated platform grants access to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Granted,
    Denied,
    Absent,
    /// Device present and permitted, but the stream fails to open.
    Failing,
}

/// Handle for changing a camera's availability after it has been handed to a session.
#[derive(Debug, Clone)]
pub struct CameraControl {
    availability: Rc<Cell<Availability>>,
}

impl CameraControl {
    pub fn set(&self, availability: Availability) {
        self.availability.set(availability);
    }

    pub fn get(&self) -> Availability {
        self.availability.get()
    }
}

/// Simulated webcam.
pub struct SimulatedCamera {
    width: u32,
    height: u32,
    availability: Rc<Cell<Availability>>,
    active: bool,
    starts: u32,
}

impl SimulatedCamera {
    pub fn new(width: u32, height: u32) -> Self {
        SimulatedCamera {
            width,
            height,
            availability: Rc::new(Cell::new(Availability::Granted)),
            active: false,
            starts: 0,
        }
    }

    /// A camera whose permission prompt is always refused.
    pub fn denied(width: u32, height: u32) -> Self {
        let cam = Self::new(width, height);
        cam.availability.set(Availability::Denied);
        cam
    }

    pub fn control(&self) -> CameraControl {
        CameraControl {
            availability: self.availability.clone(),
        }
    }

    /// Requested (ideal) frame size.
    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of successful stream acquisitions.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    fn try_start(&mut self) -> error::Result<()> {
        if self.active {
            return Err(MediaError::AlreadyActive);
        }
        match self.availability.get() {
            Availability::Granted => {
                self.active = true;
                self.starts += 1;
                tracing::debug!(
                    width = self.width,
                    height = self.height,
                    "camera stream started (simulated)"
                );
                Ok(())
            }
            Availability::Denied => Err(MediaError::PermissionDenied),
            Availability::Absent => Err(MediaError::NotFound),
            Availability::Failing => Err(MediaError::Stream(format!(
                "no frames at {}x{}",
                self.width, self.height
            ))),
        }
    }
}

impl CaptureDevice for SimulatedCamera {
    fn start(&mut self) -> Result<(), BoxError> {
        self.try_start().map_err(|e| Box::new(e) as BoxError)
    }

    fn stop(&mut self) -> Result<(), BoxError> {
        if self.active {
            self.active = false;
            tracing::debug!("camera stream stopped (simulated)");
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_stop_cycle() {
        let mut cam = SimulatedCamera::new(640, 480);
        cam.start().unwrap();
        assert!(cam.is_active());
        cam.stop().unwrap();
        assert!(!cam.is_active());
        cam.start().unwrap();
        assert_eq!(cam.starts(), 2);
    }

    #[test]
    fn double_start_is_rejected() {
        let mut cam = SimulatedCamera::new(640, 480);
        cam.start().unwrap();
        let err = cam.start().unwrap_err();
        assert_eq!(
            err.downcast_ref::<MediaError>(),
            Some(&MediaError::AlreadyActive)
        );
    }
}
