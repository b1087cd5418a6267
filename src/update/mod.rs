//! Update checker module
//!
//! Checks for new versions of Huddle on GitHub Releases. The result is
//! cached in config for 24 hours so the TUI start stays quick.

use chrono::{DateTime, Duration, Utc};
use semver::Version;
use std::env;

/// How often to hit the releases endpoint
const CHECK_INTERVAL_HOURS: i64 = 24;

/// Update information
#[derive(Debug, Clone)]
pub struct UpdateInfo {
    /// Current version (from Cargo.toml)
    pub current_version: String,
    /// Latest version from GitHub (None if check failed)
    pub latest_version: Option<String>,
    /// When the check was performed
    pub check_time: Option<DateTime<Utc>>,
}

impl UpdateInfo {
    /// Check if an update is available
    pub fn has_update(&self) -> bool {
        let Some(latest) = &self.latest_version else {
            return false;
        };

        let current = Version::parse(self.current_version.trim_start_matches('v')).ok();
        let latest_ver = Version::parse(latest.trim_start_matches('v')).ok();

        match (current, latest_ver) {
            (Some(c), Some(l)) => l > c,
            _ => false,
        }
    }

    /// Toast line shown when an update is available
    pub fn notice(&self) -> Option<String> {
        if !self.has_update() {
            return None;
        }
        let latest = self.latest_version.as_deref()?;
        Some(format!(
            "Huddle {} available (current {}) - {}",
            latest.trim_start_matches('v'),
            self.current_version,
            update_command()
        ))
    }
}

/// The update command for the way this binary was installed
pub fn update_command() -> &'static str {
    let installed_via_cargo = env::current_exe()
        .map(|p| p.to_string_lossy().contains("/.cargo/bin/"))
        .unwrap_or(false);

    if installed_via_cargo {
        "cargo install huddle-rs"
    } else {
        "https://github.com/huddle-hq/huddle/releases"
    }
}

/// GitHub Release API response (minimal fields)
#[derive(serde::Deserialize)]
struct GitHubRelease {
    tag_name: String,
}

/// Check for the latest version from GitHub
///
/// Returns None if the check fails (network error, timeout, etc.)
pub fn fetch_latest_version() -> Option<String> {
    const GITHUB_API_URL: &str = "https://api.github.com/repos/huddle-hq/huddle/releases/latest";
    const TIMEOUT_SECS: u64 = 3;

    let response = ureq::get(GITHUB_API_URL)
        .set("User-Agent", "huddle-rs")
        .set("Accept", "application/vnd.github.v3+json")
        .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
        .call()
        .ok()?;

    let release: GitHubRelease = response.into_json().ok()?;
    Some(release.tag_name)
}

/// Check if we should perform an update check (based on cache)
pub fn should_check(last_check: Option<&str>) -> bool {
    let Some(last_check_str) = last_check else {
        return true; // Never checked before
    };

    let Ok(last_check_time) = DateTime::parse_from_rfc3339(last_check_str) else {
        return true; // Invalid timestamp, check anyway
    };

    let elapsed = Utc::now().signed_duration_since(last_check_time.with_timezone(&Utc));
    elapsed > Duration::hours(CHECK_INTERVAL_HOURS)
}

/// Perform a full update check, preferring the cached result within the
/// check interval.
pub fn check_for_updates(cached_version: Option<&str>, last_check: Option<&str>) -> UpdateInfo {
    let current_version = env!("CARGO_PKG_VERSION").to_string();

    if !should_check(last_check) {
        return UpdateInfo {
            current_version,
            latest_version: cached_version.map(String::from),
            check_time: last_check
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        };
    }

    UpdateInfo {
        current_version,
        latest_version: fetch_latest_version(),
        check_time: Some(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_comparison() {
        let info = UpdateInfo {
            current_version: "0.3.2".to_string(),
            latest_version: Some("0.3.3".to_string()),
            check_time: None,
        };
        assert!(info.has_update());

        let info = UpdateInfo {
            current_version: "0.3.2".to_string(),
            latest_version: Some("0.3.2".to_string()),
            check_time: None,
        };
        assert!(!info.has_update());

        let info = UpdateInfo {
            current_version: "0.3.2".to_string(),
            latest_version: Some("v0.4.0".to_string()), // with 'v' prefix
            check_time: None,
        };
        assert!(info.has_update());
    }

    #[test]
    fn test_notice_only_when_newer() {
        let info = UpdateInfo {
            current_version: "0.3.2".to_string(),
            latest_version: Some("v0.4.0".to_string()),
            check_time: None,
        };
        assert!(info.notice().unwrap().contains("0.4.0"));

        let info = UpdateInfo {
            current_version: "0.3.2".to_string(),
            latest_version: None,
            check_time: None,
        };
        assert!(info.notice().is_none());
    }

    #[test]
    fn test_should_check_handles_bad_timestamps() {
        assert!(should_check(None));
        assert!(should_check(Some("garbage")));
        assert!(!should_check(Some(&Utc::now().to_rfc3339())));
    }
}
