use serde::Serialize;
use strum::Display;

use crate::error::CoreError;
use crate::oids;
use crate::source::CounterSource;

/// Why an interface failed the admin/oper status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum StatusFinding {
    #[strum(to_string = "Interface is not admin up")]
    AdminDown,
    #[strum(to_string = "Interface is not operational")]
    OperDown,
}

/// Check ifAdminStatus then ifOperStatus; `None` when both are up.
pub fn check_status<S>(source: &mut S, if_index: u32) -> Result<Option<StatusFinding>, CoreError>
where
    S: CounterSource + ?Sized,
{
    let admin = source.fetch(&oids::if_admin_status().child(if_index))?;
    if !is_up(admin.as_deref()) {
        tracing::debug!(value = ?admin, "ifAdminStatus not up");
        return Ok(Some(StatusFinding::AdminDown));
    }

    let oper = source.fetch(&oids::if_oper_status().child(if_index))?;
    if !is_up(oper.as_deref()) {
        tracing::debug!(value = ?oper, "ifOperStatus not up");
        return Ok(Some(StatusFinding::OperDown));
    }
    Ok(None)
}

/// `up(1)` in IF-MIB, whether rendered numerically or by name.
fn is_up(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("up") || v.eq_ignore_ascii_case("up(1)"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_accepts_numeric_and_named_forms() {
        assert!(is_up(Some("1")));
        assert!(is_up(Some("up")));
        assert!(is_up(Some("UP(1)")));
    }

    #[test]
    fn anything_else_is_down() {
        assert!(!is_up(Some("2")));
        assert!(!is_up(Some("down")));
        assert!(!is_up(Some("7")));
        assert!(!is_up(None));
    }

    #[test]
    fn findings_render_as_operator_messages() {
        assert_eq!(StatusFinding::AdminDown.to_string(), "Interface is not admin up");
        assert_eq!(StatusFinding::OperDown.to_string(), "Interface is not operational");
    }
}
