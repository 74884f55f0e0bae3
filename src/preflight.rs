//! Preflight checks for host tool availability.
//!
//! Validates that the signing and packaging tools exist before any stage
//! runs. This prevents a half-signed staging tree when a tool is missing.
//!
//! # Example
//!
//! ```rust
//! use eps_codesign::preflight::command_exists;
//!
//! if !command_exists("tar") {
//!     println!("tar not installed");
//! }
//! ```

use anyhow::{bail, Result};

/// Check if a command exists on the host system.
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Required host tools for signing and packaging.
///
/// Each tuple is (command_name, provenance).
pub const REQUIRED_TOOLS: &[(&str, &str)] = &[
    ("tar", "system tar"),
    ("xcrun", "Xcode command line tools"),
    ("hdiutil", "macOS"),
];

/// Check that specific tools are available.
///
/// Returns an error listing every missing tool and where it comes from.
pub fn check_required_tools(tools: &[(&str, &str)]) -> Result<()> {
    let mut missing = Vec::new();

    for (tool, provenance) in tools {
        if !command_exists(tool) {
            missing.push((*tool, *provenance));
        }
    }

    if !missing.is_empty() {
        let msg = missing
            .iter()
            .map(|(t, p)| format!("  {} (from: {})", t, p))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Missing required host tools:\n{}", msg);
    }

    Ok(())
}

/// Check that all signing and packaging tools are available.
///
/// This checks all tools in [`REQUIRED_TOOLS`].
pub fn check_host_tools() -> Result<()> {
    check_required_tools(REQUIRED_TOOLS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("ls"));
        assert!(!command_exists("definitely_not_a_real_command_12345"));
    }

    #[test]
    fn test_check_required_tools_success() {
        let tools = &[("ls", "coreutils"), ("cat", "coreutils")];
        assert!(check_required_tools(tools).is_ok());
    }

    #[test]
    fn test_check_required_tools_failure() {
        let tools = &[("nonexistent_command_xyz", "fake-package")];
        let err = check_required_tools(tools).unwrap_err();
        assert!(err.to_string().contains("nonexistent_command_xyz"));
    }
}
