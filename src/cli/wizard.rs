//! Wizard command implementations.
//!
//! Drives the per-component lifecycle in wizard order: detect existing
//! installations, let the user pick an option, download all installers,
//! then run the install phases. Operations within one component are
//! sequenced; the shared [`DownloadTracker`] gates secondary installs.

use console::style;
use dialoguer::Select;

use crate::component::{InstallableComponent, DETECTED_OPTION, DOWNLOAD_OPTION};
use crate::download::DownloadTransport;
use crate::error::Result;
use crate::exec::CommandRunner;
use crate::manifest::{ComponentConfig, Manifest};
use crate::progress::{ProgressSink, TerminalProgress};
use crate::session::{DownloadTracker, InstallerDataService};

/// Behavior switches for a wizard run.
#[derive(Debug, Clone, Copy, Default)]
pub struct WizardOptions {
    /// Pick the first valid option instead of prompting.
    pub assume_yes: bool,
    /// Suppress progress rendering.
    pub quiet: bool,
}

/// Report existing installations for every manifest component.
pub fn run_detect(
    manifest: &Manifest,
    data: &dyn InstallerDataService,
    runner: &dyn CommandRunner,
) -> Result<()> {
    for config in &manifest.components {
        let component = build_component(config, data, runner)?;

        match component.option(DETECTED_OPTION) {
            Some(option) => {
                let mut line = format!(
                    "{}: found {} at {}",
                    component.name(),
                    option.version,
                    option.location.display()
                );
                if let Some(error) = option.error {
                    line.push_str(&format!(
                        " ({}, requires {})",
                        error.code(),
                        component.required_version()
                    ));
                    println!("{}", style(line).red());
                } else if let Some(warning) = option.warning {
                    line.push_str(&format!(" ({})", warning.code()));
                    println!("{}", style(line).yellow());
                } else {
                    println!("{}", style(line).green());
                }
            }
            None => println!("{}: no existing installation found", component.name()),
        }
    }

    Ok(())
}

/// Run the full lifecycle for every manifest component.
pub fn run_install(
    manifest: &Manifest,
    data: &dyn InstallerDataService,
    runner: &dyn CommandRunner,
    transport: &dyn DownloadTransport,
    options: WizardOptions,
) -> Result<()> {
    let tracker = DownloadTracker::new();
    let mut components = Vec::new();

    for config in &manifest.components {
        let mut component = build_component(config, data, runner)?;
        choose_option(&mut component, options.assume_yes)?;
        components.push(component);
    }

    // All downloads settle before any install phase begins. Components
    // satisfied by an existing installation never touch the transport.
    for component in &mut components {
        let uses_existing = component
            .selected()
            .is_some_and(|o| o.key == DETECTED_OPTION);
        if uses_existing {
            continue;
        }
        let mut progress = progress_for(component.name(), options.quiet);
        component.download_installer(&mut progress, transport, &tracker)?;
    }

    for component in &mut components {
        let mut progress = progress_for(component.name(), options.quiet);
        component.install(&mut progress, runner)?;
        component.configure(&mut progress, runner, &tracker)?;
        if !options.quiet {
            println!("{}", style(format!("{} ready", component.name())).green());
        }
    }

    Ok(())
}

/// Build a component from its manifest entry and run detection.
fn build_component(
    config: &ComponentConfig,
    data: &dyn InstallerDataService,
    runner: &dyn CommandRunner,
) -> Result<InstallableComponent> {
    let mut component = InstallableComponent::new(
        &config.name,
        &config.version,
        &config.revision,
        data,
        config.download_url.clone(),
        config.installed_file.clone(),
    )?;
    if let Some(template) = &config.msi_file {
        component = component.with_msi_template(template);
    }

    if let Some(detection) = &config.detection {
        if let Some(found) = detection.detector().detect_existing_install(runner) {
            component.apply_detection(found);
        }
    }

    component.add_option(
        DOWNLOAD_OPTION,
        &config.version,
        std::path::Path::new(""),
        true,
    );

    Ok(component)
}

/// Resolve which option satisfies the component.
///
/// Incompatible detected installs stay visible as warned entries; they are
/// just not offered for selection.
fn choose_option(component: &mut InstallableComponent, assume_yes: bool) -> Result<()> {
    if component.selected().is_some_and(|o| !o.valid) {
        let option = component.selected().expect("selection checked above");
        println!(
            "{}",
            style(format!(
                "{}: existing {} is incompatible ({}), a fresh copy will be installed",
                component.name(),
                option.version,
                option.error.map(|e| e.code()).unwrap_or_default()
            ))
            .yellow()
        );
    }

    let valid_keys: Vec<String> = component
        .options()
        .iter()
        .filter(|o| o.valid)
        .map(|o| o.key.clone())
        .collect();

    let chosen = match valid_keys.len() {
        0 | 1 => valid_keys.first().cloned(),
        _ if assume_yes => valid_keys.first().cloned(),
        _ => {
            let labels: Vec<String> = valid_keys
                .iter()
                .map(|key| describe_option(component, key))
                .collect();
            let index = Select::new()
                .with_prompt(format!("How should {} be provided?", component.name()))
                .items(&labels)
                .default(0)
                .interact()
                .map_err(|e| anyhow::anyhow!("Prompt failed: {}", e))?;
            valid_keys.get(index).cloned()
        }
    };

    match chosen {
        Some(key) => {
            component.select(&key);
            component.validate_version();
            Ok(())
        }
        None => Err(crate::error::OutfitterError::VersionIncompatible {
            component: component.name().to_string(),
            detected: component
                .option(DETECTED_OPTION)
                .map(|o| o.version.clone())
                .unwrap_or_default(),
            required: component.required_version().to_string(),
        }),
    }
}

/// Human-readable label for a selectable option.
fn describe_option(component: &InstallableComponent, key: &str) -> String {
    let option = component.option(key).expect("option key from options list");
    match key {
        DETECTED_OPTION => {
            let mut label = format!(
                "Use existing {} at {}",
                option.version,
                option.location.display()
            );
            if let Some(warning) = option.warning {
                label.push_str(&format!(" ({})", warning.code()));
            }
            label
        }
        _ => format!("Download {}", option.version),
    }
}

fn progress_for(name: &str, quiet: bool) -> impl ProgressSink {
    if quiet {
        TerminalProgress::hidden(name)
    } else {
        TerminalProgress::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::StubRunner;
    use crate::session::SessionDirs;

    fn config(name: &str, version: &str) -> ComponentConfig {
        ComponentConfig {
            name: name.to_string(),
            version: version.to_string(),
            revision: "103449".to_string(),
            download_url: Some("http://host/${version}/installer.exe".to_string()),
            installed_file: None,
            msi_file: None,
            detection: None,
        }
    }

    #[test]
    fn build_component_registers_download_option() {
        let data = SessionDirs::new("tempDirectory", "installationFolder");
        let runner = StubRunner::new();

        let component = build_component(&config("virtualbox", "5.0.8"), &data, &runner).unwrap();

        let download = component.option(DOWNLOAD_OPTION).unwrap();
        assert!(download.valid);
        assert_eq!(download.version, "5.0.8");
        assert!(component.option(DETECTED_OPTION).is_none());
    }

    #[test]
    fn choose_option_defaults_to_only_valid_option() {
        let data = SessionDirs::new("tempDirectory", "installationFolder");
        let runner = StubRunner::new();
        let mut component =
            build_component(&config("virtualbox", "5.0.8"), &data, &runner).unwrap();

        choose_option(&mut component, false).unwrap();

        assert_eq!(component.selected().unwrap().key, DOWNLOAD_OPTION);
    }

    /// Component with a detection result applied before the download
    /// option, matching the discovery order `build_component` produces.
    fn detected_component(detected_version: &str) -> InstallableComponent {
        let data = SessionDirs::new("tempDirectory", "installationFolder");
        let mut component = InstallableComponent::new(
            "virtualbox",
            "5.0.8",
            "103449",
            &data,
            Some("http://host/${version}/installer.exe".to_string()),
            None,
        )
        .unwrap();
        component.apply_detection(crate::detect::DetectedInstall {
            location: "folder/vbox".into(),
            version: detected_version.into(),
        });
        component.add_option(DOWNLOAD_OPTION, "5.0.8", std::path::Path::new(""), true);
        component
    }

    #[test]
    fn assume_yes_prefers_detected_option() {
        let mut component = detected_component("5.0.8");

        choose_option(&mut component, true).unwrap();

        assert_eq!(component.selected().unwrap().key, DETECTED_OPTION);
    }

    #[test]
    fn install_skips_download_when_existing_install_is_selected() {
        use crate::manifest::DetectionConfig;
        use crate::progress::ProgressSink;
        use std::cell::RefCell;
        use std::io::Write;

        #[derive(Default)]
        struct CountingTransport {
            calls: RefCell<usize>,
        }

        impl DownloadTransport for CountingTransport {
            fn download(
                &self,
                _url: &str,
                _dest: &mut dyn Write,
                _progress: &mut dyn ProgressSink,
            ) -> Result<()> {
                *self.calls.borrow_mut() += 1;
                Ok(())
            }
        }

        let temp = tempfile::TempDir::new().unwrap();
        let root = temp.path().join("vbox");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("VBoxManage"), b"").unwrap();
        let marker = temp.path().join("vbox.cfg");
        std::fs::write(&marker, format!("INSTALL_DIR={}\n", root.display())).unwrap();

        let mut entry = config("virtualbox", "5.0.8");
        entry.detection = Some(DetectionConfig::MarkerFile {
            path: marker,
            key: "INSTALL_DIR".to_string(),
            executables: vec!["VBoxManage".to_string()],
        });
        let manifest = Manifest {
            components: vec![entry],
        };

        let data = SessionDirs::new(temp.path().join("tmp"), temp.path().join("install"));
        let runner = StubRunner::new();
        runner.push_success("5.0.8r103449"); // version query
        let transport = CountingTransport::default();

        run_install(
            &manifest,
            &data,
            &runner,
            &transport,
            WizardOptions {
                assume_yes: true,
                quiet: true,
            },
        )
        .unwrap();

        assert_eq!(*transport.calls.borrow(), 0);
        // Only the detection version query ran; no installer processes.
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn incompatible_detection_falls_back_to_download() {
        let mut component = detected_component("5.0.1");

        choose_option(&mut component, true).unwrap();

        assert_eq!(component.selected().unwrap().key, DOWNLOAD_OPTION);
        // The incompatible option stays visible for diagnostics.
        assert!(!component.option(DETECTED_OPTION).unwrap().valid);
    }
}
