//! Component manifest loading.
//!
//! The wizard reads a YAML manifest listing the components of a setup
//! session: required version identifiers, the download URL template, and
//! optional detection parameters.
//!
//! # Example
//!
//! ```yaml
//! components:
//!   - name: virtualbox
//!     version: 5.0.8
//!     revision: "103449"
//!     download_url: http://download.virtualbox.org/virtualbox/${version}/VirtualBox-${version}-${revision}-Win.exe
//!     msi_file: VirtualBox-${version}-r${revision}-MultiArch_amd64.msi
//!     detection:
//!       strategy: env-var
//!       names: [VBOX_INSTALL_PATH, VBOX_MSI_INSTALL_PATH]
//!       executables: [VBoxManage.exe]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::detect::{DetectionStrategy, Detector};
use crate::error::{OutfitterError, Result};

/// Root manifest structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Components in wizard order.
    pub components: Vec<ComponentConfig>,
}

/// Declaration of one installable component.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfig {
    /// Component identifier (also names the temp artifact and install subfolder).
    pub name: String,

    /// Required version baseline.
    pub version: String,

    /// Required revision identifier.
    #[serde(default)]
    pub revision: String,

    /// Download URL template with `${version}`/`${revision}` placeholders.
    #[serde(default)]
    pub download_url: Option<String>,

    /// Pre-existing installer archive supplied out-of-band.
    #[serde(default)]
    pub installed_file: Option<PathBuf>,

    /// Secondary package file name template, if the primary extract unpacks one.
    #[serde(default)]
    pub msi_file: Option<String>,

    /// How to look for an existing installation.
    #[serde(default)]
    pub detection: Option<DetectionConfig>,
}

/// Detection parameters for one component.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum DetectionConfig {
    /// Resolve the install root from environment variables.
    EnvVar {
        names: Vec<String>,
        executables: Vec<String>,
    },
    /// Resolve the install root from a `key=value` line in a marker file.
    MarkerFile {
        path: PathBuf,
        key: String,
        executables: Vec<String>,
    },
}

impl DetectionConfig {
    /// Build the detector this configuration describes.
    pub fn detector(&self) -> Detector {
        match self {
            DetectionConfig::EnvVar { names, executables } => Detector::new(
                DetectionStrategy::EnvVar {
                    names: names.clone(),
                },
                executables.clone(),
            ),
            DetectionConfig::MarkerFile {
                path,
                key,
                executables,
            } => Detector::new(
                DetectionStrategy::MarkerFile {
                    path: path.clone(),
                    key: key.clone(),
                },
                executables.clone(),
            ),
        }
    }
}

/// Load and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path).map_err(|e| OutfitterError::ManifestError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| OutfitterError::ManifestError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
components:
  - name: virtualbox
    version: 5.0.8
    revision: "103449"
    download_url: http://host/${version}/VirtualBox-${version}-${revision}-Win.exe
    msi_file: VirtualBox-${version}-r${revision}-MultiArch_amd64.msi
    detection:
      strategy: env-var
      names: [VBOX_INSTALL_PATH]
      executables: [VBoxManage.exe]
  - name: cygwin
    version: 2.3.1
    installed_file: bundled/cygwin.exe
"#;

    #[test]
    fn parses_full_manifest() {
        let manifest: Manifest = serde_yaml::from_str(MANIFEST).unwrap();

        assert_eq!(manifest.components.len(), 2);
        let vbox = &manifest.components[0];
        assert_eq!(vbox.name, "virtualbox");
        assert_eq!(vbox.version, "5.0.8");
        assert_eq!(vbox.revision, "103449");
        assert!(vbox.download_url.is_some());
        assert!(vbox.msi_file.is_some());
        assert!(matches!(
            vbox.detection,
            Some(DetectionConfig::EnvVar { .. })
        ));
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let manifest: Manifest = serde_yaml::from_str(MANIFEST).unwrap();
        let cygwin = &manifest.components[1];

        assert_eq!(cygwin.revision, "");
        assert!(cygwin.download_url.is_none());
        assert_eq!(
            cygwin.installed_file,
            Some(PathBuf::from("bundled/cygwin.exe"))
        );
        assert!(cygwin.detection.is_none());
    }

    #[test]
    fn marker_file_detection_parses() {
        let yaml = r#"
components:
  - name: virtualbox
    version: 5.0.8
    download_url: http://host/installer.exe
    detection:
      strategy: marker-file
      path: /etc/vbox/vbox.cfg
      key: INSTALL_DIR
      executables: [VBoxManage]
"#;
        let manifest: Manifest = serde_yaml::from_str(yaml).unwrap();
        match &manifest.components[0].detection {
            Some(DetectionConfig::MarkerFile { path, key, .. }) => {
                assert_eq!(path, &PathBuf::from("/etc/vbox/vbox.cfg"));
                assert_eq!(key, "INSTALL_DIR");
            }
            other => panic!("Expected marker-file detection, got {:?}", other),
        }
    }

    #[test]
    fn load_manifest_reads_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("outfitter.yml");
        std::fs::write(&path, MANIFEST).unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.components.len(), 2);
    }

    #[test]
    fn missing_manifest_is_manifest_error() {
        let result = load_manifest(Path::new("/nonexistent/outfitter.yml"));
        assert!(matches!(
            result,
            Err(OutfitterError::ManifestError { .. })
        ));
    }

    #[test]
    fn invalid_yaml_is_manifest_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("outfitter.yml");
        std::fs::write(&path, "components: [not a mapping").unwrap();

        let result = load_manifest(&path);
        assert!(matches!(
            result,
            Err(OutfitterError::ManifestError { .. })
        ));
    }
}
