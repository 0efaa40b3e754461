//! Installable component lifecycle.
//!
//! An [`InstallableComponent`] is one wizard-managed dependency with its own
//! detect/download/install lifecycle. It owns the set of install options
//! (existing install vs. fresh download), tracks the selected option, and
//! drives the sequence: download, silent extract, then the optional
//! msiexec-style secondary install.
//!
//! All lifecycle failures are returned as values; the caller always receives
//! a definitive outcome, never an unwind.

use std::path::{Path, PathBuf};

use crate::detect::DetectedInstall;
use crate::download::{resolve_url, DownloadTransport};
use crate::error::{OutfitterError, Result};
use crate::exec::CommandRunner;
use crate::progress::ProgressSink;
use crate::session::{DownloadTracker, InstallerDataService};
use crate::version::{compare_versions, VersionRelation};

/// Option key for a pre-existing detected installation.
pub const DETECTED_OPTION: &str = "detected";

/// Option key for a fresh download.
pub const DOWNLOAD_OPTION: &str = "download";

/// Reason a detected option cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionError {
    /// Installation is older than the required baseline.
    OldVersion,
}

impl OptionError {
    /// Stable code for display layers.
    pub fn code(&self) -> &'static str {
        match self {
            OptionError::OldVersion => "oldVersion",
        }
    }
}

/// Non-fatal caveat on an otherwise usable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionWarning {
    /// Installation is newer than the tested baseline.
    NewerVersion,
}

impl OptionWarning {
    /// Stable code for display layers.
    pub fn code(&self) -> &'static str {
        match self {
            OptionWarning::NewerVersion => "newerVersion",
        }
    }
}

/// One concrete way to satisfy a component.
#[derive(Debug, Clone)]
pub struct InstallOption {
    /// Option identifier (`detected`, `download`).
    pub key: String,

    /// Where this option's binaries live (empty until resolved).
    pub location: PathBuf,

    /// Version discovered or targeted (empty until resolved).
    pub version: String,

    /// Whether this option is usable. `false` exactly when `error` is set.
    pub valid: bool,

    /// Blocking reason, if any.
    pub error: Option<OptionError>,

    /// Non-fatal caveat, if any.
    pub warning: Option<OptionWarning>,
}

/// Lifecycle state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Pending,
    Downloading,
    Downloaded,
    InstallingPrimary,
    InstallingSecondary,
    Complete,
    Failed,
}

/// One wizard-managed dependency and its install state machine.
#[derive(Debug)]
pub struct InstallableComponent {
    name: String,
    required_version: String,
    required_revision: String,
    download_url: Option<String>,
    installed_file: Option<PathBuf>,
    use_download: bool,
    downloaded_file: PathBuf,
    msi_template: Option<String>,
    temp_dir: PathBuf,
    install_dir: PathBuf,
    component_dir: PathBuf,
    options: Vec<InstallOption>,
    selected_option: Option<String>,
    status: InstallStatus,
}

impl InstallableComponent {
    /// Create a component for one dependency.
    ///
    /// Fails with [`OutfitterError::NoDownloadSource`] when neither a
    /// download URL nor a pre-supplied installer file is given: a component
    /// with no way to obtain its payload is invalid by definition. An empty
    /// `installed_file` path counts as absent.
    pub fn new(
        name: &str,
        required_version: &str,
        required_revision: &str,
        data: &dyn InstallerDataService,
        download_url: Option<String>,
        installed_file: Option<PathBuf>,
    ) -> Result<Self> {
        let installed_file = installed_file.filter(|p| !p.as_os_str().is_empty());

        if download_url.is_none() && installed_file.is_none() {
            return Err(OutfitterError::NoDownloadSource {
                component: name.to_string(),
            });
        }

        let use_download = installed_file.is_none();

        Ok(Self {
            name: name.to_string(),
            required_version: required_version.to_string(),
            required_revision: required_revision.to_string(),
            download_url,
            installed_file,
            use_download,
            downloaded_file: data.temp_dir().join(format!("{}.exe", name)),
            msi_template: None,
            temp_dir: data.temp_dir().to_path_buf(),
            install_dir: data.install_dir().to_path_buf(),
            component_dir: data.component_dir(name),
            options: Vec::new(),
            selected_option: None,
            status: InstallStatus::Pending,
        })
    }

    /// Declare a secondary package unpacked by the primary extract step.
    ///
    /// The template is a file name with `${version}`/`${revision}`
    /// placeholders, resolved relative to the temp directory.
    pub fn with_msi_template(mut self, template: &str) -> Self {
        self.msi_template = Some(template.to_string());
        self
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required version baseline.
    pub fn required_version(&self) -> &str {
        &self.required_version
    }

    /// Whether this component downloads its installer.
    pub fn use_download(&self) -> bool {
        self.use_download
    }

    /// Resolved target path for the downloaded artifact.
    pub fn downloaded_file(&self) -> &Path {
        &self.downloaded_file
    }

    /// Pre-supplied installer archive, if one was given.
    pub fn installed_file(&self) -> Option<&Path> {
        self.installed_file.as_deref()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> InstallStatus {
        self.status
    }

    /// Options in discovery order.
    pub fn options(&self) -> &[InstallOption] {
        &self.options
    }

    /// Look up an option by key.
    pub fn option(&self, key: &str) -> Option<&InstallOption> {
        self.options.iter().find(|o| o.key == key)
    }

    /// Register an install option. Replaces an existing option with the
    /// same key, keeping its discovery position.
    pub fn add_option(&mut self, key: &str, version: &str, location: &Path, valid: bool) {
        let option = InstallOption {
            key: key.to_string(),
            location: location.to_path_buf(),
            version: version.to_string(),
            valid,
            error: None,
            warning: None,
        };

        if let Some(existing) = self.options.iter_mut().find(|o| o.key == key) {
            *existing = option;
        } else {
            self.options.push(option);
        }
    }

    /// Select an option by key.
    pub fn select(&mut self, key: &str) {
        self.selected_option = Some(key.to_string());
    }

    /// The currently selected option, if resolved.
    pub fn selected(&self) -> Option<&InstallOption> {
        let key = self.selected_option.as_deref()?;
        self.option(key)
    }

    /// Record a detection result: populate and select the `detected` option,
    /// then validate its version against the required baseline.
    pub fn apply_detection(&mut self, found: DetectedInstall) {
        tracing::debug!(
            "{}: detected {} at {}",
            self.name,
            found.version,
            found.location.display()
        );
        self.add_option(DETECTED_OPTION, &found.version, &found.location, true);
        self.select(DETECTED_OPTION);
        self.validate_version();
    }

    /// Validate the selected option's version against the required one.
    ///
    /// Older versions get a blocking `oldVersion` error; newer ones a
    /// non-fatal `newerVersion` warning. Idempotent: repeated calls with
    /// unchanged input produce the same option state.
    pub fn validate_version(&mut self) {
        let required = self.required_version.clone();
        let Some(key) = self.selected_option.clone() else {
            return;
        };
        let Some(option) = self.options.iter_mut().find(|o| o.key == key) else {
            return;
        };

        match compare_versions(&option.version, &required) {
            VersionRelation::Older => {
                option.error = Some(OptionError::OldVersion);
                option.warning = None;
                option.valid = false;
            }
            VersionRelation::Newer => {
                option.error = None;
                option.warning = Some(OptionWarning::NewerVersion);
                option.valid = true;
            }
            VersionRelation::Compatible => {
                option.error = None;
                option.warning = None;
                option.valid = true;
            }
        }
    }

    /// Obtain the installer artifact, downloading it if necessary.
    ///
    /// When downloading is not in effect, or the target file already exists
    /// locally, the transport is never invoked and success is reported in
    /// the same turn. Otherwise the templated URL is resolved and the
    /// payload streamed to [`downloaded_file`](Self::downloaded_file), with
    /// exactly one transport invocation and no automatic retry.
    pub fn download_installer(
        &mut self,
        progress: &mut dyn ProgressSink,
        transport: &dyn DownloadTransport,
        tracker: &DownloadTracker,
    ) -> Result<()> {
        if !self.use_download || self.downloaded_file.exists() {
            tracing::debug!("{}: installer already present, skipping download", self.name);
            self.status = InstallStatus::Downloaded;
            progress.set_complete();
            return Ok(());
        }

        let Some(template) = self.download_url.as_deref() else {
            return Err(OutfitterError::NoDownloadSource {
                component: self.name.clone(),
            });
        };

        let url = resolve_url(template, &self.required_version, &self.required_revision);
        tracing::info!("{}: downloading {}", self.name, url);

        progress.set_status("Downloading");
        self.status = InstallStatus::Downloading;

        let mut dest = match std::fs::File::create(&self.downloaded_file) {
            Ok(file) => file,
            Err(e) => {
                self.status = InstallStatus::Failed;
                return Err(OutfitterError::DownloadFailed {
                    component: self.name.clone(),
                    message: e.to_string(),
                });
            }
        };

        tracker.begin();
        let outcome = transport.download(&url, &mut dest, progress);
        tracker.finish();

        match outcome {
            Ok(()) => {
                self.status = InstallStatus::Downloaded;
                progress.set_complete();
                Ok(())
            }
            Err(e) => {
                self.status = InstallStatus::Failed;
                Err(OutfitterError::DownloadFailed {
                    component: self.name.clone(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Run the primary install step.
    ///
    /// When the selected option is the detected existing installation, no
    /// external process is invoked and the component goes straight to
    /// `Complete`. Otherwise the installer archive is silently extracted
    /// into the temp directory. A process failure is caught and returned as
    /// the operation's error outcome.
    pub fn install(
        &mut self,
        progress: &mut dyn ProgressSink,
        runner: &dyn CommandRunner,
    ) -> Result<()> {
        if self.selected_option.as_deref() == Some(DETECTED_OPTION) {
            tracing::info!("{}: using existing installation", self.name);
            self.status = InstallStatus::Complete;
            progress.set_complete();
            return Ok(());
        }

        progress.set_status("Installing");
        self.status = InstallStatus::InstallingPrimary;

        let installer = self
            .installed_file
            .clone()
            .unwrap_or_else(|| self.downloaded_file.clone());
        let args = vec![
            "--extract".to_string(),
            "-path".to_string(),
            self.temp_dir.display().to_string(),
            "--silent".to_string(),
        ];

        match runner.exec_file(&installer, &args) {
            Ok(_) => {
                if self.msi_template.is_none() {
                    self.status = InstallStatus::Complete;
                    progress.set_complete();
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!("{}: extract failed: {}", self.name, e);
                self.status = InstallStatus::Failed;
                Err(e)
            }
        }
    }

    /// Run the gated secondary install step.
    ///
    /// While sibling components are still downloading, sets the waiting
    /// status and returns without installing; the wizard re-invokes once
    /// downloads settle. Otherwise delegates to [`install_msi`](Self::install_msi)
    /// exactly once.
    pub fn configure(
        &mut self,
        progress: &mut dyn ProgressSink,
        runner: &dyn CommandRunner,
        tracker: &DownloadTracker,
    ) -> Result<()> {
        if tracker.in_flight() {
            tracing::debug!("{}: waiting on sibling downloads", self.name);
            progress.set_status("Waiting for all downloads to finish");
            return Ok(());
        }

        if self.msi_template.is_none() {
            if self.status != InstallStatus::Complete {
                self.status = InstallStatus::Complete;
                progress.set_complete();
            }
            return Ok(());
        }

        self.install_msi(progress, runner)
    }

    /// Run the msiexec-equivalent secondary package install.
    ///
    /// The argument list is fixed and ordered: package, install-directory
    /// override, quiet-basic UI, no restart, verbose log under the install
    /// directory. Failure is reported the same way as the primary step.
    pub fn install_msi(
        &mut self,
        progress: &mut dyn ProgressSink,
        runner: &dyn CommandRunner,
    ) -> Result<()> {
        progress.set_status("Installing");
        self.status = InstallStatus::InstallingSecondary;

        let template = self.msi_template.clone().unwrap_or_default();
        let msi_file = self.temp_dir.join(resolve_url(
            &template,
            &self.required_version,
            &self.required_revision,
        ));
        let log_file = self.install_dir.join(format!("{}.log", self.name));

        let args = vec![
            "/i".to_string(),
            msi_file.display().to_string(),
            format!("INSTALLDIR={}", self.component_dir.display()),
            "/qb!".to_string(),
            "/norestart".to_string(),
            "/Liwe".to_string(),
            log_file.display().to_string(),
        ];

        match runner.exec_file(Path::new("msiexec"), &args) {
            Ok(_) => {
                self.status = InstallStatus::Complete;
                progress.set_complete();
                Ok(())
            }
            Err(e) => {
                tracing::warn!("{}: secondary install failed: {}", self.name, e);
                self.status = InstallStatus::Failed;
                Err(e)
            }
        }
    }
}
