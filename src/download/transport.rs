//! Download transports.
//!
//! The engine treats byte transfer as a black box: a [`DownloadTransport`]
//! receives a URL and a write destination, streams the payload, and emits
//! progress events. Exactly one terminal outcome per call, no retry.

use std::io::{Read, Write};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use reqwest::blocking::Client;

use crate::error::Result;
use crate::progress::ProgressSink;

/// Black-box "fetch to destination" capability.
pub trait DownloadTransport {
    /// Stream the payload at `url` into `dest`, reporting progress.
    fn download(
        &self,
        url: &str,
        dest: &mut dyn Write,
        progress: &mut dyn ProgressSink,
    ) -> Result<()>;
}

/// HTTP transport backed by a blocking reqwest client.
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("outfitter")
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            timeout,
        }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadTransport for HttpTransport {
    fn download(
        &self,
        url: &str,
        dest: &mut dyn Write,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        let mut response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url).into());
        }

        if let Some(total) = response.content_length() {
            progress.set_total_download_size(total);
        }

        let start = Instant::now();
        let mut received: u64 = 0;
        let mut buf = [0u8; 8192];

        loop {
            let read = response
                .read(&mut buf)
                .with_context(|| format!("Connection interrupted fetching {}", url))?;
            if read == 0 {
                break;
            }
            dest.write_all(&buf[..read])?;
            received += read as u64;
            progress.downloaded(received, start.elapsed());
        }

        Ok(())
    }
}
