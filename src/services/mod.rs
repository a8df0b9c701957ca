mod media_upload;
mod qr_payload;
mod scan_pipeline;

pub use media_upload::*;
pub use qr_payload::*;
pub use scan_pipeline::*;
