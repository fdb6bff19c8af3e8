// src/kiosk/adapter/camera.rs
//
// Port over the platform camera. Acquisition is permission-gated and may be
// refused; the acquired stream is a guard whose tracks are stopped on every
// exit path. A leaked stream keeps the device's camera indicator lit and
// blocks other consumers, so release is not best-effort.
use crate::error::KioskError;
use crate::models::verification::CapturedFrame;
use async_trait::async_trait;
use tracing::debug;

/// Handle to one track of an acquired media stream.
///
/// `stop` must be idempotent. `CameraStream` calls it for every track when
/// the stream is released, and again harmlessly if release runs twice.
pub trait MediaTrack: Send {
    fn stop(&mut self);
}

/// Source of raster frames from the live stream. Drawing a frame into an
/// off-screen buffer and encoding it is asynchronous on the platform side.
#[async_trait]
pub trait FrameSource: Send {
    /// Draws the current video frame at the video's native resolution and
    /// returns it encoded, previewable and submittable as-is.
    async fn grab_frame(&mut self) -> Result<CapturedFrame, KioskError>;
}

/// Live camera stream guard. Owns its tracks exclusively; dropping the guard
/// stops whatever an explicit `release` has not already stopped.
pub struct CameraStream {
    tracks: Vec<Box<dyn MediaTrack>>,
    frames: Box<dyn FrameSource>,
    released: bool,
}

impl CameraStream {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>, frames: Box<dyn FrameSource>) -> Self {
        Self {
            tracks,
            frames,
            released: false,
        }
    }

    pub async fn capture(&mut self) -> Result<CapturedFrame, KioskError> {
        if self.released {
            return Err(KioskError::CaptureFailed("camera already released".to_string()));
        }
        self.frames.grab_frame().await
    }

    /// Stops every track. Idempotent.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for track in &mut self.tracks {
            track.stop();
        }
        debug!(tracks = self.tracks.len(), "camera stream released");
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.release();
    }
}

/// Acquires the camera. Implemented by the page layer over the real device;
/// tests supply scripted fakes.
#[async_trait]
pub trait CameraPort: Send + Sync {
    /// May be denied by the user or fail for device reasons; either maps to
    /// `KioskError::CameraDenied` with a human-readable reason.
    async fn acquire(&self) -> Result<CameraStream, KioskError>;
}

/// Scripted camera doubles shared by the state-machine tests.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub(crate) struct CountingTrack {
        stops: Arc<AtomicUsize>,
        stopped: bool,
    }

    impl CountingTrack {
        pub(crate) fn new(stops: Arc<AtomicUsize>) -> Self {
            Self {
                stops,
                stopped: false,
            }
        }
    }

    impl MediaTrack for CountingTrack {
        fn stop(&mut self) {
            if !self.stopped {
                self.stopped = true;
                self.stops.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    pub(crate) struct StaticFrames;

    #[async_trait]
    impl FrameSource for StaticFrames {
        async fn grab_frame(&mut self) -> Result<CapturedFrame, KioskError> {
            Ok(CapturedFrame {
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
                mime_type: "image/png".to_string(),
                width: 640,
                height: 480,
            })
        }
    }

    pub(crate) struct NoFrames;

    #[async_trait]
    impl FrameSource for NoFrames {
        async fn grab_frame(&mut self) -> Result<CapturedFrame, KioskError> {
            Err(KioskError::CaptureFailed("video element not ready".to_string()))
        }
    }

    /// Grants or denies acquisition; counts track stops through `stops`.
    pub(crate) struct ScriptedCamera {
        pub grant: bool,
        pub track_count: usize,
        pub stops: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CameraPort for ScriptedCamera {
        async fn acquire(&self) -> Result<CameraStream, KioskError> {
            if !self.grant {
                return Err(KioskError::CameraDenied(
                    "permission prompt dismissed".to_string(),
                ));
            }
            let tracks: Vec<Box<dyn MediaTrack>> = (0..self.track_count)
                .map(|_| Box::new(CountingTrack::new(self.stops.clone())) as Box<dyn MediaTrack>)
                .collect();
            Ok(CameraStream::new(tracks, Box::new(StaticFrames)))
        }
    }
}
