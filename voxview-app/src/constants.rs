//! Constants shared across the viewer.

use std::time::Duration;

/// Route serving container payloads, relative to the server root.
pub const VOX_DOWNLOAD_PATH: &str = "download/vox";

/// Route serving images, relative to the server root.
pub const IMAGE_DOWNLOAD_PATH: &str = "download/image";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Upper bound on a single container fetch.
pub const DEFAULT_SNIFF_TIMEOUT: Duration = Duration::from_secs(10);

/// Wall-clock spacing of headless frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);
