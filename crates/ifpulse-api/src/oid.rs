// ── Object identifiers ──
//
// Owned, comparable OIDs. The `snmp` crate hands out borrowed
// identifiers tied to its receive buffer; everything above the
// transport works with this owned form instead.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An owned SNMP object identifier, e.g. `1.3.6.1.2.1.2.2.1.10.3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid(Vec<u32>);

impl Oid {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Append one sub-identifier (typically an ifIndex) to a column OID.
    pub fn child(&self, arc: u32) -> Self {
        let mut arcs = Vec::with_capacity(self.0.len() + 1);
        arcs.extend_from_slice(&self.0);
        arcs.push(arc);
        Self(arcs)
    }

    /// `true` if `self` lies inside the subtree rooted at `base`.
    pub fn starts_with(&self, base: &Oid) -> bool {
        self.0.starts_with(&base.0)
    }

    /// Sub-identifiers following `base`, if `self` is inside its subtree.
    pub fn suffix(&self, base: &Oid) -> Option<&[u32]> {
        self.0.strip_prefix(base.0.as_slice())
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(Error::InvalidOid(s.into()));
        }
        trimmed
            .split('.')
            .map(|arc| arc.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| Error::InvalidOid(s.into()))
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self(arcs.to_vec())
    }
}
