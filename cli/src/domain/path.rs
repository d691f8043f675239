//! Foreign-OS path translation.
//!
//! Registry documents are often shared with a Windows host, so script paths
//! arrive as `C:\Users\...`. Before probing, they are mapped onto the local
//! mounted-drive layout (`/mnt/c/Users/...`).

use std::sync::LazyLock;

use regex::Regex;

/// Root under which foreign drives are mounted.
pub const MOUNT_ROOT: &str = "/mnt";

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static DRIVE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]):(?:[\\/]|$)").expect("valid drive regex"));

/// Translate a native path into the local addressing convention.
///
/// `X:` followed by a separator (or nothing) becomes `/mnt/x`; every backslash
/// becomes a forward slash. Paths without a drive prefix only get separator
/// conversion. Idempotent.
#[must_use]
pub fn normalize(native: &str) -> String {
    let (prefix, rest) = match DRIVE_PREFIX.captures(native) {
        Some(caps) => {
            let drive = caps[1].to_ascii_lowercase();
            (format!("{MOUNT_ROOT}/{drive}"), &native[2..])
        }
        None => (String::new(), native),
    };
    let mut out = prefix;
    out.push_str(&rest.replace('\\', "/"));
    out
}
