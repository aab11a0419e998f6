use std::fmt;

use serde::{Deserialize, Serialize};

/// Compile-time build information stamped by `build.rs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub version: String,
    pub package_version: String,
    pub build_profile: String,
    pub build_timestamp: String,
    pub build_target: String,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("REPO_VERSION").to_string(),
        package_version: env!("CARGO_PKG_VERSION").to_string(),
        build_profile: env!("BUILD_PROFILE").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        build_target: env!("BUILD_TARGET").to_string(),
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pudding {} ({}, {} build for {}, built {})",
            self.package_version,
            self.version,
            self.build_profile,
            self.build_target,
            self.build_timestamp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_package_version() {
        let info = build_info();
        let rendered = info.to_string();
        assert!(rendered.starts_with("pudding "));
        assert!(rendered.contains(&info.package_version));
    }
}
