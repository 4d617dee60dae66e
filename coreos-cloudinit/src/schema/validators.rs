//! Validators attached to individual descriptors.
//!
//! Each validator sees the normalized scalar and reports warnings (advisory)
//! or errors (fatal). Field names are added by the resolver, so messages
//! here only describe the value.

use crate::schema::Validation;
use crate::value::Scalar;

/// Reboot strategies understood by the update engine.
pub const REBOOT_STRATEGIES: &[&str] = &["reboot", "etcd-lock", "best-effort", "off"];

/// Commands a unit may ask the service manager to run.
pub const UNIT_COMMANDS: &[&str] = &[
    "start",
    "stop",
    "restart",
    "reload",
    "try-restart",
    "reload-or-restart",
    "reload-or-try-restart",
];

/// Encodings accepted for write-file content.
pub const FILE_ENCODINGS: &[&str] = &[
    "b64",
    "base64",
    "gz",
    "gzip",
    "gz+base64",
    "gzip+base64",
    "gz+b64",
    "gzip+b64",
];

fn choices(allowed: &[&str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|a| format!("'{a}'")).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, or {last}", rest.join(", ")),
        _ => quoted.join(""),
    }
}

fn one_of(value: &Scalar, allowed: &[&str], label: &str) -> Validation {
    let text = value.to_string();
    if allowed.contains(&text.as_str()) {
        Validation::ok()
    } else {
        Validation::error(format!("{label} must be one of {}", choices(allowed)))
    }
}

/// Only `localhost` is supported; anything else still renders.
#[must_use]
pub fn etc_hosts(value: &Scalar) -> Validation {
    if value.as_str() == Some("localhost") {
        Validation::ok()
    } else {
        Validation::warning(
            "Manage etc hosts currently only supports values of 'localhost' in CoreOS",
        )
    }
}

/// Reboot strategy must be a known choice.
#[must_use]
pub fn reboot_strategy(value: &Scalar) -> Validation {
    one_of(value, REBOOT_STRATEGIES, "Reboot strategy")
}

/// Unit command must be a known service manager verb.
#[must_use]
pub fn unit_command(value: &Scalar) -> Validation {
    one_of(value, UNIT_COMMANDS, "Unit command")
}

/// Write-file encoding must be a known encoding.
#[must_use]
pub fn file_encoding(value: &Scalar) -> Validation {
    one_of(value, FILE_ENCODINGS, "Encoding")
}

/// Permissions are three or four octal digits, e.g. `0644`.
#[must_use]
pub fn file_permissions(value: &Scalar) -> Validation {
    let text = value.to_string();
    let octal = (3..=4).contains(&text.len()) && text.chars().all(|c| ('0'..='7').contains(&c));
    if octal {
        Validation::ok()
    } else {
        Validation::error(format!(
            "Permissions must be an octal mode such as '0644', got '{text}'"
        ))
    }
}

/// etcd2 initial cluster state is `new` or `existing`.
#[must_use]
pub fn initial_cluster_state(value: &Scalar) -> Validation {
    one_of(value, &["new", "existing"], "Initial cluster state")
}

/// etcd2 proxy mode is `off`, `readonly` or `on`.
#[must_use]
pub fn etcd_proxy(value: &Scalar) -> Validation {
    one_of(value, &["off", "readonly", "on"], "Proxy mode")
}
