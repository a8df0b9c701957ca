//! Tests for the scan pipeline driven by stub cameras and validators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gatepass_client::api::access_control::{QrValidator, QrVerdict};
use gatepass_client::error::{ApiError, ScanError};
use gatepass_client::services::{
    Camera, CameraConstraints, CameraError, Frame, FrameSource, ScanOutcome, ScanPipeline,
    decode_frame,
};

/// Validator stub that replays a scripted result and counts invocations.
struct StubValidator {
    result: Mutex<Option<Result<QrVerdict, ApiError>>>,
    calls: AtomicUsize,
}

impl StubValidator {
    fn returning(result: Result<QrVerdict, ApiError>) -> Self {
        Self {
            result: Mutex::new(Some(result)),
            calls: AtomicUsize::new(0),
        }
    }

    fn never_called() -> Self {
        Self {
            result: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QrValidator for StubValidator {
    async fn validate_qr(&self, _raw_payload: &str, _token: &str) -> Result<QrVerdict, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .lock()
            .unwrap()
            .take()
            .expect("validator called more than scripted")
    }
}

/// Frame source that always delivers a blank frame and counts stop calls.
struct BlankSource {
    stops: Arc<AtomicUsize>,
}

impl FrameSource for BlankSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        Ok(Some(Frame {
            width: 4,
            height: 4,
            rgba: vec![0u8; 4 * 4 * 4],
        }))
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Frame source whose nth frame carries a decodable marker in its first
/// pixel, with counters for reads and stop calls.
struct MarkedSource {
    reads: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
    decode_on: usize,
}

impl FrameSource for MarkedSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        let read = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
        let mut rgba = vec![0u8; 4 * 4 * 4];
        if read == self.decode_on {
            rgba[0] = 255;
        }
        Ok(Some(Frame {
            width: 4,
            height: 4,
            rgba,
        }))
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

struct MarkedCamera {
    reads: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
    decode_on: usize,
}

impl Camera for MarkedCamera {
    type Source = MarkedSource;

    fn open(&mut self, _constraints: &CameraConstraints) -> Result<MarkedSource, CameraError> {
        Ok(MarkedSource {
            reads: Arc::clone(&self.reads),
            stops: Arc::clone(&self.stops),
            decode_on: self.decode_on,
        })
    }
}

/// Frame source that fails on the first read.
struct BrokenSource {
    stops: Arc<AtomicUsize>,
}

impl FrameSource for BrokenSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        Err(CameraError::Failed("stream ended".into()))
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

enum StubCamera {
    Denied,
    Blank { stops: Arc<AtomicUsize> },
}

impl Camera for StubCamera {
    type Source = BlankSource;

    fn open(&mut self, _constraints: &CameraConstraints) -> Result<BlankSource, CameraError> {
        match self {
            StubCamera::Denied => Err(CameraError::PermissionDenied),
            StubCamera::Blank { stops } => Ok(BlankSource {
                stops: Arc::clone(stops),
            }),
        }
    }
}

struct BrokenCamera {
    stops: Arc<AtomicUsize>,
}

impl Camera for BrokenCamera {
    type Source = BrokenSource;

    fn open(&mut self, _constraints: &CameraConstraints) -> Result<BrokenSource, CameraError> {
        Ok(BrokenSource {
            stops: Arc::clone(&self.stops),
        })
    }
}

#[tokio::test]
async fn permission_denial_is_terminal_with_fixed_message() {
    let validator = StubValidator::never_called();
    let mut pipeline = ScanPipeline::new(&validator, Some("tok".into()));

    let err = pipeline
        .run(&mut StubCamera::Denied, &CameraConstraints::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::CameraPermissionDenied));
    assert_eq!(
        err.to_string(),
        "Camera permission denied. Please enable camera access."
    );
    assert_eq!(validator.calls(), 0);
}

#[tokio::test]
async fn cancellation_stops_the_camera_exactly_once() {
    let validator = StubValidator::never_called();
    let stops = Arc::new(AtomicUsize::new(0));
    let mut camera = StubCamera::Blank {
        stops: Arc::clone(&stops),
    };

    let mut pipeline = ScanPipeline::new(&validator, Some("tok".into()))
        .with_frame_interval(Duration::from_millis(1));
    let cancel = pipeline.cancellation_token();

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
    });

    let err = pipeline
        .run(&mut camera, &CameraConstraints::default())
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, ScanError::Cancelled));
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    assert!(pipeline.attempts() > 0);
    assert_eq!(validator.calls(), 0);
}

#[tokio::test]
async fn stream_failure_still_releases_the_camera() {
    let validator = StubValidator::never_called();
    let stops = Arc::new(AtomicUsize::new(0));
    let mut camera = BrokenCamera {
        stops: Arc::clone(&stops),
    };

    let mut pipeline = ScanPipeline::new(&validator, Some("tok".into()))
        .with_frame_interval(Duration::from_millis(1));
    let err = pipeline
        .run(&mut camera, &CameraConstraints::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::Camera(_)));
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn detection_stops_the_camera_once_and_reads_no_further_frames() {
    let validator = StubValidator::returning(Ok(QrVerdict::Granted {
        visitor_id: "123456".into(),
    }));
    let reads = Arc::new(AtomicUsize::new(0));
    let stops = Arc::new(AtomicUsize::new(0));
    let mut camera = MarkedCamera {
        reads: Arc::clone(&reads),
        stops: Arc::clone(&stops),
        decode_on: 3,
    };

    let mut pipeline = ScanPipeline::new(&validator, Some("tok".into()))
        .with_frame_interval(Duration::from_millis(1))
        .with_decoder(|frame: &Frame| {
            (frame.rgba[0] == 255).then(|| "visitor-123456".to_string())
        });

    let outcome = pipeline
        .run(&mut camera, &CameraConstraints::default())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ScanOutcome::Validated {
            visitor_id: "123456".into()
        }
    );
    // Camera released exactly once, and the loop asked for no frame beyond
    // the one that decoded.
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    assert_eq!(reads.load(Ordering::SeqCst), 3);
    assert_eq!(pipeline.attempts(), 3);
    assert_eq!(validator.calls(), 1);
}

#[tokio::test]
async fn granted_verdict_yields_validated_outcome() {
    let validator = StubValidator::returning(Ok(QrVerdict::Granted {
        visitor_id: "123456".into(),
    }));
    let mut pipeline = ScanPipeline::new(&validator, Some("tok".into()));

    let outcome = pipeline.process_payload("visitor:123456:999").await.unwrap();

    assert_eq!(
        outcome,
        ScanOutcome::Validated {
            visitor_id: "123456".into()
        }
    );
    assert_eq!(validator.calls(), 1);
}

#[tokio::test]
async fn denied_verdict_is_an_access_denied_error() {
    let validator = StubValidator::returning(Ok(QrVerdict::Denied));
    let mut pipeline = ScanPipeline::new(&validator, Some("tok".into()));

    let err = pipeline.process_payload("123456").await.unwrap_err();

    assert!(matches!(err, ScanError::AccessDenied));
    assert_eq!(err.to_string(), "Invalid QR code. Access denied.");
}

#[tokio::test]
async fn validation_failure_falls_back_to_local_identifier() {
    let validator =
        StubValidator::returning(Err(ApiError::Transport("connection refused".into())));
    let mut pipeline = ScanPipeline::new(&validator, Some("tok".into()));

    let outcome = pipeline.process_payload("visitor-123456").await.unwrap();

    assert_eq!(
        outcome,
        ScanOutcome::Unvalidated {
            visitor_id: "123456".into()
        }
    );
}

#[tokio::test]
async fn missing_token_skips_validation_entirely() {
    let validator = StubValidator::never_called();
    let mut pipeline = ScanPipeline::new(&validator, None);

    let outcome = pipeline.process_payload("123456").await.unwrap();

    assert_eq!(
        outcome,
        ScanOutcome::Unvalidated {
            visitor_id: "123456".into()
        }
    );
    assert_eq!(validator.calls(), 0);
}

#[tokio::test]
async fn unparseable_payload_is_invalid_format() {
    let validator = StubValidator::never_called();
    let mut pipeline = ScanPipeline::new(&validator, Some("tok".into()));

    let err = pipeline.process_payload("garbage").await.unwrap_err();

    assert!(matches!(err, ScanError::InvalidFormat));
    assert_eq!(err.to_string(), "Invalid QR format");
    assert_eq!(validator.calls(), 0);
}

#[test]
fn blank_frame_decodes_to_nothing() {
    let frame = Frame {
        width: 8,
        height: 8,
        rgba: vec![255u8; 8 * 8 * 4],
    };
    assert_eq!(decode_frame(&frame), None);
}

#[test]
fn truncated_frame_buffer_is_rejected() {
    let frame = Frame {
        width: 8,
        height: 8,
        rgba: vec![0u8; 16],
    };
    assert_eq!(decode_frame(&frame), None);
}
