//! Cursor Bitmapper
//!
//! Renders SVG cursor sources to PNG bitmaps by loading each one into a
//! headless browser page and screenshotting the drawable element. Animated
//! cursors produce one bitmap per declared frame, cropped to a fixed clip.
//!
//! # Features
//!
//! - **CDP Backend** (default): Uses Chrome DevTools Protocol via headless Chrome
//! - **Engine seam**: the renderer drives any [`Engine`] implementation, so
//!   the pipeline can be exercised without a browser
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "cdp")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bitmapper::{cdp::CdpEngine, Config};
//!
//! let mut config = Config::default();
//! config.static_cursors = vec!["pointer.svg".into()];
//! config.animated_cursors.insert("spin.svg".into(), bitmapper::AnimatedCursor { frames: 12 });
//!
//! let report = bitmapper::render::run::<CdpEngine>(&config)?;
//! println!("Bitmaps stored at {}", report.output_dir.display());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "cdp"))]
//! # fn main() {}
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub mod frame;
pub mod plan;
pub mod render;
pub mod template;

#[cfg(feature = "cdp")]
pub mod cdp;

pub use config::{AnimatedCursor, Config};
pub use plan::{Job, JobKind, RenderPlan};
pub use render::{RenderReport, Renderer};

/// Launch options for the rendering engine
///
/// Defaults keep the browser sandboxed and headless, and leave element waits
/// to the engine's own ceiling.
///
/// # Examples
///
/// ```
/// let cfg = bitmapper::EngineConfig::default();
/// assert!(cfg.headless);
/// assert!(cfg.sandbox);
/// assert!(cfg.wait_timeout().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Run the browser without a window
    pub headless: bool,
    /// Keep the browser's process sandbox enabled
    pub sandbox: bool,
    /// Explicit browser binary; autodetected when `None`
    pub chrome_path: Option<PathBuf>,
    /// Browser window size
    pub viewport: Viewport,
    /// Override for the container wait ceiling in milliseconds
    pub wait_timeout_ms: Option<u64>,
}

impl EngineConfig {
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            chrome_path: None,
            viewport: Viewport::default(),
            wait_timeout_ms: None,
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Fixed capture region for animated frames, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Clip {
    fn default() -> Self {
        Self {
            x: 4.0,
            y: 4.0,
            width: 200.0,
            height: 200.0,
        }
    }
}

/// Opaque handle to an element located in a page
///
/// Valid only for the page that produced it, until that page is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    /// Backend-specific node identifier
    pub node_id: u32,
    /// Selector the element was located with
    pub selector: String,
}

/// A rendering engine instance (one browser process)
pub trait Engine {
    type Page: RenderPage;

    /// Launch a new engine instance with the given options
    fn launch(config: &EngineConfig) -> Result<Self>
    where
        Self: Sized;

    /// Open a fresh page; pages are never shared between sources
    fn new_page(&self) -> Result<Self::Page>;

    /// Shut the engine down and release its process
    fn close(self) -> Result<()>;
}

/// A single page/tab opened in an [`Engine`]
pub trait RenderPage {
    /// Replace the page document with `html` and wait for navigation to settle
    fn set_content(&mut self, html: &str) -> Result<()>;

    /// Block until `selector` matches, bounded by `timeout` or the engine default.
    /// Fails with [`Error::ElementWait`].
    fn wait_for_element(&mut self, selector: &str, timeout: Option<Duration>) -> Result<()>;

    /// Locate an element that should already be present.
    /// Fails with [`Error::ElementNotFound`].
    fn find_element(&mut self, selector: &str) -> Result<ElementHandle>;

    /// Capture a PNG with a transparent background. With `clip == None` the
    /// element's own bounding box is captured, otherwise the clip region.
    fn screenshot(&mut self, element: &ElementHandle, clip: Option<Clip>) -> Result<Vec<u8>>;

    /// Close the page
    fn close(self) -> Result<()>;
}
