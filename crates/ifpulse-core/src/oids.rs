// ── OID catalogue ──
//
// Column OIDs from IF-MIB. Each is suffixed with `.<ifIndex>` to address
// one interface's instance.

use ifpulse_api::Oid;

/// ifTable columns (RFC 2863, `1.3.6.1.2.1.2.2.1`).
const IF_TABLE: [u32; 9] = [1, 3, 6, 1, 2, 1, 2, 2, 1];

/// ifXTable columns (RFC 2863, `1.3.6.1.2.1.31.1.1.1`).
const IF_X_TABLE: [u32; 10] = [1, 3, 6, 1, 2, 1, 31, 1, 1, 1];

fn column(table: &[u32], col: u32) -> Oid {
    Oid::from(table).child(col)
}

pub fn if_descr() -> Oid {
    column(&IF_TABLE, 2)
}

pub fn if_speed() -> Oid {
    column(&IF_TABLE, 5)
}

pub fn if_admin_status() -> Oid {
    column(&IF_TABLE, 7)
}

pub fn if_oper_status() -> Oid {
    column(&IF_TABLE, 8)
}

pub fn if_in_octets() -> Oid {
    column(&IF_TABLE, 10)
}

pub fn if_out_octets() -> Oid {
    column(&IF_TABLE, 16)
}

pub fn if_hc_in_octets() -> Oid {
    column(&IF_X_TABLE, 6)
}

pub fn if_hc_out_octets() -> Oid {
    column(&IF_X_TABLE, 10)
}

/// ifHighSpeed, in units of 1,000,000 bits per second.
pub fn if_high_speed() -> Oid {
    column(&IF_X_TABLE, 15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_render_as_dotted_oids() {
        assert_eq!(if_descr().to_string(), "1.3.6.1.2.1.2.2.1.2");
        assert_eq!(if_in_octets().child(3).to_string(), "1.3.6.1.2.1.2.2.1.10.3");
        assert_eq!(if_out_octets().to_string(), "1.3.6.1.2.1.2.2.1.16");
        assert_eq!(if_hc_in_octets().to_string(), "1.3.6.1.2.1.31.1.1.1.6");
        assert_eq!(if_hc_out_octets().to_string(), "1.3.6.1.2.1.31.1.1.1.10");
        assert_eq!(if_high_speed().to_string(), "1.3.6.1.2.1.31.1.1.1.15");
    }
}
