// ── SNMPv2c client ──
//
// Thin blocking wrapper over `snmp::SyncSession`. Responses borrow the
// session's receive buffer, so every value is copied into `SnmpValue`
// before the next request is issued.

use std::fmt;
use std::time::Duration;

use snmp::{SnmpError, SyncSession, Value};

use crate::error::Error;
use crate::oid::Oid;

/// Upper bound on rows returned by a single walk. Guards against agents
/// that never report end-of-view.
const MAX_WALK_ROWS: usize = 10_000;

/// SNMP error-status `noSuchName` (v1 semantics, still sent by some v2c agents).
const ERROR_STATUS_NO_SUCH_NAME: u32 = 2;

/// An owned SNMP varbind value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpValue {
    Integer(i64),
    Counter32(u32),
    Counter64(u64),
    Unsigned32(u32),
    Timeticks(u32),
    OctetString(String),
    IpAddress([u8; 4]),
    /// Any other syntax, rendered through its debug form.
    Other(String),
}

impl fmt::Display for SnmpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Counter32(v) | Self::Unsigned32(v) | Self::Timeticks(v) => write!(f, "{v}"),
            Self::Counter64(v) => write!(f, "{v}"),
            Self::OctetString(s) | Self::Other(s) => f.write_str(s),
            Self::IpAddress([a, b, c, d]) => write!(f, "{a}.{b}.{c}.{d}"),
        }
    }
}

/// Blocking SNMPv2c session bound to one agent.
pub struct SnmpClient {
    session: SyncSession,
    target: String,
}

impl fmt::Debug for SnmpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnmpClient")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl SnmpClient {
    /// Open a session to `host:port`. No packet is sent until the first request.
    pub fn connect(
        host: &str,
        port: u16,
        community: &[u8],
        timeout: Duration,
    ) -> Result<Self, Error> {
        let target = socket_target(host, port);
        let session = SyncSession::new(target.as_str(), community, Some(timeout), 0).map_err(
            |source| Error::Socket {
                target: target.clone(),
                source,
            },
        )?;
        tracing::debug!(%target, "opened SNMP session");
        Ok(Self { session, target })
    }

    /// GET a single OID.
    ///
    /// `Ok(None)` means the agent answered but has no value for the
    /// instance (noSuchObject, noSuchInstance, endOfMibView).
    pub fn get(&mut self, oid: &Oid) -> Result<Option<SnmpValue>, Error> {
        tracing::trace!(%oid, target = %self.target, "SNMP get");
        let mut pdu = self
            .session
            .get(oid.as_slice())
            .map_err(|e| snmp_failure(&self.target, &e))?;

        if pdu.error_status == ERROR_STATUS_NO_SUCH_NAME {
            return Ok(None);
        }
        if pdu.error_status != 0 {
            return Err(Error::Agent {
                target: self.target.clone(),
                status: pdu.error_status,
                index: pdu.error_index,
            });
        }

        Ok(pdu.varbinds.next().and_then(|(_, value)| owned_value(value)))
    }

    /// Walk the subtree under `base` with successive GETNEXT requests.
    ///
    /// Stops at the first OID outside the subtree, at end-of-view, or when
    /// the agent returns a non-increasing OID.
    pub fn walk(&mut self, base: &Oid) -> Result<Vec<(Oid, SnmpValue)>, Error> {
        tracing::debug!(%base, target = %self.target, "SNMP walk");
        let mut rows = Vec::new();
        let mut cursor = base.clone();

        while rows.len() < MAX_WALK_ROWS {
            let mut pdu = self
                .session
                .getnext(cursor.as_slice())
                .map_err(|e| snmp_failure(&self.target, &e))?;

            if pdu.error_status == ERROR_STATUS_NO_SUCH_NAME {
                break;
            }
            if pdu.error_status != 0 {
                return Err(Error::Agent {
                    target: self.target.clone(),
                    status: pdu.error_status,
                    index: pdu.error_index,
                });
            }

            let Some((name, value)) = pdu.varbinds.next() else {
                break;
            };
            let mut buf = [0u32; 128];
            let next = name
                .read_name(&mut buf)
                .map(Oid::from)
                .map_err(|e| snmp_failure(&self.target, &e))?;

            if !next.starts_with(base) || next <= cursor {
                break;
            }
            let Some(value) = owned_value(value) else {
                break;
            };

            rows.push((next.clone(), value));
            cursor = next;
        }

        tracing::debug!(rows = rows.len(), %base, "SNMP walk finished");
        Ok(rows)
    }
}

fn owned_value(value: Value<'_>) -> Option<SnmpValue> {
    match value {
        Value::Integer(v) => Some(SnmpValue::Integer(v)),
        Value::Counter32(v) => Some(SnmpValue::Counter32(v)),
        Value::Counter64(v) => Some(SnmpValue::Counter64(v)),
        Value::Unsigned32(v) => Some(SnmpValue::Unsigned32(v)),
        Value::Timeticks(v) => Some(SnmpValue::Timeticks(v)),
        Value::OctetString(bytes) => Some(SnmpValue::OctetString(
            String::from_utf8_lossy(bytes).into_owned(),
        )),
        Value::IpAddress(octets) => Some(SnmpValue::IpAddress(octets)),
        Value::Null => None,
        other => Some(SnmpValue::Other(format!("{other:?}"))),
    }
}

fn snmp_failure(target: &str, err: &SnmpError) -> Error {
    Error::Snmp {
        target: target.into(),
        reason: format!("{err:?}"),
    }
}

/// Build a `host:port` socket string, bracketing bare IPv6 literals.
fn socket_target(host: &str, port: u16) -> String {
    let host: String = host.chars().filter(|c| !c.is_whitespace()).collect();
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn socket_target_for_hostname() {
        assert_eq!(socket_target("core-sw1", 161), "core-sw1:161");
    }

    #[test]
    fn socket_target_strips_whitespace() {
        assert_eq!(socket_target(" 10.0.0.1 ", 1161), "10.0.0.1:1161");
    }

    #[test]
    fn socket_target_brackets_ipv6() {
        assert_eq!(socket_target("2001:db8::1", 161), "[2001:db8::1]:161");
        assert_eq!(socket_target("[2001:db8::1]", 161), "[2001:db8::1]:161");
    }

    #[test]
    fn display_renders_numbers_plainly() {
        assert_eq!(SnmpValue::Counter64(18_446_744_073_709_551_615).to_string(), "18446744073709551615");
        assert_eq!(SnmpValue::Counter32(42).to_string(), "42");
        assert_eq!(SnmpValue::Integer(1).to_string(), "1");
    }

    #[test]
    fn display_renders_strings_and_addresses() {
        assert_eq!(SnmpValue::OctetString("GigabitEthernet0/1".into()).to_string(), "GigabitEthernet0/1");
        assert_eq!(SnmpValue::IpAddress([192, 0, 2, 1]).to_string(), "192.0.2.1");
    }
}
