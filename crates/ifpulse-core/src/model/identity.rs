// ── Interface identity ──
//
// Every cached fact about an interface is keyed by `host.<sanitized descr>`.
// The sanitized form must stay byte-for-byte stable: it is the only thing
// joining one invocation's state to the next.

use std::fmt;

use serde::Serialize;

/// Characters replaced with `-` so descriptors are safe as cache keys.
const REPLACED: [char; 4] = [' ', '(', ')', '.'];

/// Make an interface descriptor safe for use in a cache key.
///
/// Replaces space, `(`, `)` and `.` with `-`, then strips trailing
/// whitespace and control characters.
pub fn sanitize_descr(descr: &str) -> String {
    let replaced: String = descr
        .chars()
        .map(|c| if REPLACED.contains(&c) { '-' } else { c })
        .collect();
    replaced
        .trim_end_matches(|c: char| c.is_whitespace() || c.is_control())
        .to_owned()
}

/// Namespace for all cached state of one interface on one host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(host: &str, interface: &str) -> Self {
        Self(format!("{host}.{}", sanitize_descr(interface)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key for one attribute under this identity, e.g. `host.eth0.hc`.
    pub fn key(&self, suffix: &str) -> String {
        format!("{}.{suffix}", self.0)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(
            sanitize_descr("Port-channel1.100 (uplink)"),
            "Port-channel1-100--uplink-"
        );
    }

    #[test]
    fn sanitize_keeps_slashes_and_case() {
        assert_eq!(sanitize_descr("GigabitEthernet0/1"), "GigabitEthernet0/1");
    }

    #[test]
    fn sanitize_strips_trailing_control_characters() {
        assert_eq!(sanitize_descr("eth0\0"), "eth0");
        assert_eq!(sanitize_descr("eth0\r\n"), "eth0");
        assert_eq!(sanitize_descr("eth0\t"), "eth0");
    }

    #[test]
    fn trailing_space_becomes_dash_before_trimming() {
        assert_eq!(sanitize_descr("eth0 "), "eth0-");
    }

    #[test]
    fn identity_joins_host_and_sanitized_descr() {
        let id = IdentityKey::new("core-sw1", "Gi0/1 (uplink)");
        assert_eq!(id.as_str(), "core-sw1.Gi0/1--uplink-");
        assert_eq!(id.key("hc"), "core-sw1.Gi0/1--uplink-.hc");
    }
}
