//! Installer download support.
//!
//! Download URLs in the manifest are templates with `${version}` and
//! `${revision}` placeholders, resolved against the component's required
//! version identifiers at download time. The byte transfer itself is behind
//! the [`DownloadTransport`] seam.

pub mod transport;

pub use transport::{DownloadTransport, HttpTransport};

/// Resolve a templated download URL.
///
/// Substitutes every `${version}` and `${revision}` occurrence.
///
/// # Example
///
/// ```
/// use outfitter::download::resolve_url;
///
/// let url = resolve_url(
///     "http://host/${version}/file-${version}-${revision}.exe",
///     "5.0.8",
///     "103449",
/// );
/// assert_eq!(url, "http://host/5.0.8/file-5.0.8-103449.exe");
/// ```
pub fn resolve_url(template: &str, version: &str, revision: &str) -> String {
    template
        .replace("${version}", version)
        .replace("${revision}", revision)
}
