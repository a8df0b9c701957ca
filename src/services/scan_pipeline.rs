//! Camera-driven QR scan pipeline.
//!
//! The pipeline owns the scan loop end to end: it opens a camera through the
//! [`Camera`] seam, pulls frames until a QR code decodes, stops the camera
//! exactly once, and hands the payload to a [`QrValidator`] for server-side
//! confirmation. Frame acquisition is abstracted behind traits because the
//! concrete capture device is platform code; the loop, decode, and validation
//! logic here is platform-independent and fully testable with stubs.
//!
//! Failure handling is deliberately permissive at the end of the pipeline: a
//! payload that yields an identifier still produces a usable outcome when the
//! validation endpoint is unreachable, because gate staff must be able to keep
//! processing arrivals through a backend outage.

use std::time::Duration;

use image::GrayImage;
use log::{debug, error, info, warn};
use tokio_util::sync::CancellationToken;

use crate::api::access_control::{QrValidator, QrVerdict};
use crate::error::ScanError;
use crate::services::qr_payload::extract_visitor_id;

/// Default pause between frame grabs while no code is in view.
const FRAME_INTERVAL: Duration = Duration::from_millis(250);

/// Luma range below which a frame gets a contrast stretch before detection.
/// Low-range frames come from dim lobbies and washed-out badge laminate.
const CONTRAST_STRETCH_THRESHOLD: u32 = 200;

/// A single captured frame in RGBA8 layout, `width * height * 4` bytes.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Errors raised while opening or reading from a capture device.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("no capture device available")]
    NotAvailable,
    #[error("{0}")]
    Failed(String),
}

impl From<CameraError> for ScanError {
    fn from(err: CameraError) -> Self {
        match err {
            CameraError::PermissionDenied => ScanError::CameraPermissionDenied,
            other => ScanError::Camera(other.to_string()),
        }
    }
}

/// Requested capture parameters. The device may deliver a different
/// resolution; these are preferences, not requirements.
#[derive(Debug, Clone)]
pub struct CameraConstraints {
    pub facing: CameraFacing,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    /// Rear camera, preferred for scanning badges held up to a kiosk.
    Environment,
    User,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Environment,
            ideal_width: 640,
            ideal_height: 480,
        }
    }
}

/// Factory for an open capture stream.
pub trait Camera {
    type Source: FrameSource;

    fn open(&mut self, constraints: &CameraConstraints) -> Result<Self::Source, CameraError>;
}

/// An open capture stream delivering frames on demand.
pub trait FrameSource {
    /// Returns the next frame, or `None` while the stream is warming up and
    /// has nothing to deliver yet.
    fn next_frame(&mut self) -> Result<Option<Frame>, CameraError>;

    /// Releases the device. The pipeline guarantees at most one call.
    fn stop(&mut self);
}

/// Wraps a [`FrameSource`] so the device is released exactly once, whether
/// the loop exits through detection, cancellation, or an error path.
struct StopGuard<S: FrameSource> {
    source: S,
    stopped: bool,
}

impl<S: FrameSource> StopGuard<S> {
    fn new(source: S) -> Self {
        Self {
            source,
            stopped: false,
        }
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        self.source.next_frame()
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.source.stop();
        }
    }
}

impl<S: FrameSource> Drop for StopGuard<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Where a completed scan should send the operator next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The server confirmed the code; proceed straight to check-in.
    Validated { visitor_id: String },
    /// An identifier was extracted locally but not confirmed by the server
    /// (no token available, or the validation call failed). The check-in view
    /// re-verifies before admitting anyone.
    Unvalidated { visitor_id: String },
}

impl ScanOutcome {
    pub fn visitor_id(&self) -> &str {
        match self {
            ScanOutcome::Validated { visitor_id } | ScanOutcome::Unvalidated { visitor_id } => {
                visitor_id
            }
        }
    }
}

/// Lifecycle of one scanner instance. Terminal states require constructing a
/// new pipeline; the scanner never restarts itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Initializing,
    Scanning,
    Detected,
    Processing,
    Closed,
    Failed,
}

type FrameDecoder = Box<dyn Fn(&Frame) -> Option<String> + Send + Sync>;

/// One scan session: open camera, find a code, validate, report.
pub struct ScanPipeline<'a, V> {
    validator: &'a V,
    token: Option<String>,
    cancel: CancellationToken,
    frame_interval: Duration,
    decoder: FrameDecoder,
    state: ScanState,
    attempts: u64,
}

impl<'a, V: QrValidator> ScanPipeline<'a, V> {
    /// Creates a pipeline. `token` is the operator's session token; when
    /// absent, scans complete without server validation.
    pub fn new(validator: &'a V, token: Option<String>) -> Self {
        Self {
            validator,
            token,
            cancel: CancellationToken::new(),
            frame_interval: FRAME_INTERVAL,
            decoder: Box::new(decode_frame),
            state: ScanState::Initializing,
            attempts: 0,
        }
    }

    /// Replaces the cancellation token, usually with a child of a view-level
    /// token so closing the scan screen tears the loop down.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Shortens the frame pacing, for tests that drive scripted sources.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Replaces the per-frame decoder ([`decode_frame`] by default), so the
    /// detection path can be driven without a real code in frame.
    pub fn with_decoder<D>(mut self, decoder: D) -> Self
    where
        D: Fn(&Frame) -> Option<String> + Send + Sync + 'static,
    {
        self.decoder = Box::new(decoder);
        self
    }

    /// A token that cancels this pipeline when triggered.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Frames examined so far. Diagnostic only; nothing branches on it.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Runs the full scan loop: open the camera, decode frames until a code
    /// is found, stop the camera, then validate the payload.
    pub async fn run<C: Camera>(
        &mut self,
        camera: &mut C,
        constraints: &CameraConstraints,
    ) -> Result<ScanOutcome, ScanError> {
        self.state = ScanState::Initializing;
        let source = camera.open(constraints).map_err(|e| {
            self.state = ScanState::Failed;
            error!("Failed to open camera: {e}");
            ScanError::from(e)
        })?;
        let mut source = StopGuard::new(source);

        self.state = ScanState::Scanning;
        debug!("Scan loop started");

        let payload = loop {
            if self.cancel.is_cancelled() {
                info!("Scan cancelled after {} frames", self.attempts);
                source.stop();
                self.state = ScanState::Closed;
                return Err(ScanError::Cancelled);
            }

            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    // Stream not ready yet; wait out one interval.
                    self.pause().await?;
                    continue;
                }
                Err(e) => {
                    self.state = ScanState::Failed;
                    error!("Frame capture failed: {e}");
                    return Err(ScanError::from(e));
                }
            };

            self.attempts += 1;
            if let Some(content) = (self.decoder)(&frame) {
                info!("QR code detected after {} frames", self.attempts);
                break content;
            }

            self.pause().await?;
        };

        self.state = ScanState::Detected;
        source.stop();

        self.process_payload(&payload).await
    }

    /// Validates a raw payload and produces the navigation outcome. Also the
    /// entry point for manual code entry when the camera is unusable.
    pub async fn process_payload(&mut self, payload: &str) -> Result<ScanOutcome, ScanError> {
        self.state = ScanState::Processing;

        let visitor_id = match extract_visitor_id(payload) {
            Some(id) => id,
            None => {
                self.state = ScanState::Failed;
                warn!("No identifier in scanned payload");
                return Err(ScanError::InvalidFormat);
            }
        };

        let outcome = match &self.token {
            None => {
                debug!("No session token; skipping server validation");
                ScanOutcome::Unvalidated { visitor_id }
            }
            Some(token) => match self.validator.validate_qr(payload, token).await {
                Ok(QrVerdict::Granted { visitor_id }) => ScanOutcome::Validated { visitor_id },
                Ok(QrVerdict::Denied) => {
                    self.state = ScanState::Failed;
                    warn!("Server rejected QR code for visitor {visitor_id}");
                    return Err(ScanError::AccessDenied);
                }
                Err(e) => {
                    // Validation being down must not strand a visitor at the
                    // gate; continue with the locally extracted identifier.
                    error!("QR validation call failed, continuing unvalidated: {e}");
                    ScanOutcome::Unvalidated { visitor_id }
                }
            },
        };

        self.state = ScanState::Closed;
        Ok(outcome)
    }

    /// Sleeps one frame interval, waking early on cancellation.
    async fn pause(&self) -> Result<(), ScanError> {
        tokio::select! {
            _ = self.cancel.cancelled() => Ok(()),
            _ = tokio::time::sleep(self.frame_interval) => Ok(()),
        }
    }
}

/// Attempts to decode one QR code from a frame.
///
/// The frame is reduced to 8-bit luma and, when its dynamic range is narrow,
/// contrast-stretched before detection. Only the first detected grid is
/// decoded; multiple codes in frame is not a supported input.
pub fn decode_frame(frame: &Frame) -> Option<String> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.rgba.len() < expected || expected == 0 {
        return None;
    }

    let mut luma: Vec<u8> = frame.rgba[..expected]
        .chunks_exact(4)
        .map(|px| {
            (0.299 * f32::from(px[0]) + 0.587 * f32::from(px[1]) + 0.114 * f32::from(px[2])) as u8
        })
        .collect();

    stretch_contrast(&mut luma);

    let gray = GrayImage::from_raw(frame.width, frame.height, luma)?;
    let mut prepared = rqrr::PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();
    let grid = grids.first()?;

    match grid.decode() {
        Ok((_meta, content)) if !content.is_empty() => Some(content),
        Ok(_) => None,
        Err(e) => {
            debug!("Grid detected but decode failed: {e}");
            None
        }
    }
}

/// Linearly rescales luma to the full 0..=255 range when the observed range
/// is narrower than [`CONTRAST_STRETCH_THRESHOLD`].
fn stretch_contrast(luma: &mut [u8]) {
    let (mut min, mut max) = (u8::MAX, u8::MIN);
    for &v in luma.iter() {
        min = min.min(v);
        max = max.max(v);
    }

    let range = u32::from(max.saturating_sub(min));
    if range == 0 || range >= CONTRAST_STRETCH_THRESHOLD {
        return;
    }

    for v in luma.iter_mut() {
        *v = ((u32::from(*v - min) * 255) / range) as u8;
    }
}
