//! Headless Chromium conversion engine.
//!
//! One browser process per service instance, launched lazily on first
//! use and reused across conversions (launching is expensive). The
//! handle lives behind a `tokio::sync::Mutex`, which also serializes
//! page usage — the producer processes tickets sequentially, and
//! concurrent API callers queue on the lock instead of racing the
//! shared process. [`ChromiumEngine::cleanup`] shuts the browser down.

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::engine::{EngineError, HtmlToPdf, PdfPageOptions};

/// Launch flags carried over from the production container setup.
const LAUNCH_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-accelerated-2d-canvas",
    "--no-first-run",
    "--no-zygote",
    "--disable-gpu",
];

/// A running browser process plus its CDP event loop task.
struct BrowserHandle {
    browser: Browser,
    event_loop: JoinHandle<()>,
}

/// Shared headless Chromium engine.
pub struct ChromiumEngine {
    /// Explicit browser binary path; `None` lets chromiumoxide locate one.
    executable: Option<PathBuf>,
    inner: Mutex<Option<BrowserHandle>>,
}

impl ChromiumEngine {
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self {
            executable,
            inner: Mutex::new(None),
        }
    }

    /// Launch the browser process and spawn its CDP event loop.
    async fn launch(&self) -> Result<BrowserHandle, EngineError> {
        let mut builder = BrowserConfig::builder().args(LAUNCH_ARGS.to_vec());
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(EngineError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| EngineError::Launch(e.to_string()))?;

        // Drive the CDP message stream until the browser exits.
        let event_loop = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "Chromium handler event error");
                }
            }
        });

        tracing::info!("Headless Chromium launched");
        Ok(BrowserHandle {
            browser,
            event_loop,
        })
    }

    /// Shut down the browser process, if one was started.
    pub async fn cleanup(&self) {
        let mut guard = self.inner.lock().await;
        if let Some(mut handle) = guard.take() {
            if let Err(e) = handle.browser.close().await {
                tracing::warn!(error = %e, "Error closing Chromium");
            }
            let _ = handle.browser.wait().await;
            handle.event_loop.abort();
            tracing::info!("Headless Chromium shut down");
        }
    }
}

#[async_trait]
impl HtmlToPdf for ChromiumEngine {
    async fn convert(&self, html: &str, options: &PdfPageOptions) -> Result<Vec<u8>, EngineError> {
        let mut guard = self.inner.lock().await;

        if guard.is_none() {
            *guard = Some(self.launch().await?);
        }
        let handle = guard.as_ref().ok_or_else(|| {
            EngineError::Launch("Browser handle unavailable after launch".to_string())
        })?;

        let page = handle
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| EngineError::Conversion(e.to_string()))?;

        let result = print_page(&page, html, options).await;

        // Close the page regardless of the print outcome so a failed
        // conversion does not leak tabs in the shared process.
        if let Err(e) = page.close().await {
            tracing::warn!(error = %e, "Error closing Chromium page");
        }

        result
    }
}

/// Set the document content and print it with the given geometry.
async fn print_page(
    page: &chromiumoxide::Page,
    html: &str,
    options: &PdfPageOptions,
) -> Result<Vec<u8>, EngineError> {
    page.set_content(html)
        .await
        .map_err(|e| EngineError::Conversion(e.to_string()))?;

    let params = PrintToPdfParams {
        landscape: Some(options.landscape),
        print_background: Some(true),
        paper_width: Some(options.paper_width_in()),
        paper_height: Some(options.paper_height_in()),
        margin_top: Some(options.margin_in()),
        margin_bottom: Some(options.margin_in()),
        margin_left: Some(options.margin_in()),
        margin_right: Some(options.margin_in()),
        prefer_css_page_size: Some(false),
        ..Default::default()
    };

    page.pdf(params)
        .await
        .map_err(|e| EngineError::Conversion(e.to_string()))
}
