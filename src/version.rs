//! Semantic version comparison and extraction.
//!
//! Components declare a required version; detected installations are compared
//! against it with a three-tier outcome: too old (hard error), acceptable, or
//! newer than the tested baseline (non-fatal warning).

/// How a detected version relates to the required one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRelation {
    /// Detected version is older than required.
    Older,
    /// Detected version matches the required baseline.
    Compatible,
    /// Detected version is newer than the tested baseline.
    Newer,
}

/// Compare a detected version against the required one.
///
/// Comparison is component-wise over the numeric (major, minor, patch)
/// triple; missing components compare as zero, so `5.0` orders below
/// `5.0.8`. Revision suffixes like `5.0.8r103449` are ignored for ordering.
pub fn compare_versions(current: &str, required: &str) -> VersionRelation {
    let current_parts = parse_triple(current);
    let required_parts = parse_triple(required);

    for i in 0..3 {
        let c = current_parts.get(i).copied().unwrap_or(0);
        let r = required_parts.get(i).copied().unwrap_or(0);
        if c < r {
            return VersionRelation::Older;
        }
        if c > r {
            return VersionRelation::Newer;
        }
    }

    VersionRelation::Compatible
}

/// Parse up to three numeric components, dropping any revision suffix.
fn parse_triple(version: &str) -> Vec<u32> {
    version
        .split('.')
        .take(3)
        .filter_map(|part| {
            let numeric: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
            numeric.parse().ok()
        })
        .collect()
}

/// Extract a version string from raw tool output.
pub fn extract_version(output: &str) -> Option<String> {
    let patterns = [r"(\d+\.\d+\.\d+)", r"version\s+(\d+\.\d+)", r"v(\d+\.\d+)"];

    for pattern in &patterns {
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(caps) = re.captures(output) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_versions_are_compatible() {
        assert_eq!(compare_versions("5.0.8", "5.0.8"), VersionRelation::Compatible);
        assert_eq!(compare_versions("1.0.0", "1.0.0"), VersionRelation::Compatible);
    }

    #[test]
    fn older_patch_is_older() {
        assert_eq!(compare_versions("5.0.1", "5.0.8"), VersionRelation::Older);
    }

    #[test]
    fn newer_patch_is_newer() {
        assert_eq!(compare_versions("5.0.16", "5.0.8"), VersionRelation::Newer);
    }

    #[test]
    fn major_bump_dominates() {
        assert_eq!(compare_versions("6.0.0", "5.9.9"), VersionRelation::Newer);
        assert_eq!(compare_versions("4.9.9", "5.0.0"), VersionRelation::Older);
    }

    #[test]
    fn minor_bump_dominates_patch() {
        assert_eq!(compare_versions("5.1.0", "5.0.99"), VersionRelation::Newer);
        assert_eq!(compare_versions("5.0.99", "5.1.0"), VersionRelation::Older);
    }

    #[test]
    fn missing_components_compare_as_zero() {
        assert_eq!(compare_versions("5.0", "5.0.8"), VersionRelation::Older);
        assert_eq!(compare_versions("5.0.8", "5.0"), VersionRelation::Newer);
        assert_eq!(compare_versions("5.0", "5.0.0"), VersionRelation::Compatible);
        assert_eq!(compare_versions("5.1", "5.0.8"), VersionRelation::Newer);
    }

    #[test]
    fn revision_suffix_is_ignored() {
        assert_eq!(
            compare_versions("5.0.8r103449", "5.0.8"),
            VersionRelation::Compatible
        );
        assert_eq!(
            compare_versions("5.0.8", "5.0.8r999999"),
            VersionRelation::Compatible
        );
    }

    #[test]
    fn fourth_component_is_ignored() {
        assert_eq!(
            compare_versions("5.0.8.1", "5.0.8"),
            VersionRelation::Compatible
        );
    }

    #[test]
    fn extract_version_semver() {
        let output = "5.0.8r103449";
        assert_eq!(extract_version(output), Some("5.0.8".to_string()));
    }

    #[test]
    fn extract_version_from_banner() {
        let output = "Oracle VM VirtualBox Command Line Management Interface Version 5.0.8";
        assert_eq!(extract_version(output), Some("5.0.8".to_string()));
    }

    #[test]
    fn extract_version_with_v_prefix() {
        assert_eq!(extract_version("v18.17"), Some("18.17".to_string()));
    }

    #[test]
    fn extract_version_no_match() {
        assert!(extract_version("no version here").is_none());
    }
}
