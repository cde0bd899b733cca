//! Runtime detection for Node.js and npm
//!
//! The generated project is a Node.js microservice, so the install step
//! needs both binaries on PATH. Detection is advisory: the caller decides
//! whether a missing runtime skips package installation or just warns.

use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(binary: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => RuntimeInfo {
            name,
            version: Some(String::from_utf8_lossy(&out.stdout).trim().to_string()),
            available: true,
        },
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", "npm")
}

/// Probe everything the install step relies on
pub fn check_runtimes() -> Vec<RuntimeInfo> {
    vec![check_node(), check_npm()]
}
