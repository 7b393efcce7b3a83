//! Detection of the programs a run shells out to

use crate::variants::Variant;
use anyhow::Result;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: String,
    pub version: Option<String>,
    pub available: bool,
}

/// Run `<program> --version` and report what was found
pub fn detect_program(program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name: program.to_string(),
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: program.to_string(),
            version: None,
            available: false,
        },
    }
}

/// Check that git is available, and the package manager when any variant
/// will install dependencies
pub fn check_runtimes(package_manager: &str, variants: &[Variant]) -> Result<Vec<RuntimeInfo>> {
    check_runtimes_with(package_manager, variants, detect_program)
}

fn check_runtimes_with(
    package_manager: &str,
    variants: &[Variant],
    detect: impl Fn(&str) -> RuntimeInfo,
) -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    let git = detect("git");
    if git.available {
        results.push(git);
    } else {
        missing.push("git (install from https://git-scm.com)".to_string());
    }

    if !variants.is_empty() {
        let pm = detect(package_manager);
        if pm.available {
            results.push(pm);
        } else {
            missing.push(format!(
                "{} (needed to install dependencies for {})",
                package_manager,
                variants
                    .iter()
                    .map(Variant::display_name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required programs:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}
