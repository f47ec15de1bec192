use ifpulse_api::Oid;

use crate::error::CoreError;

/// Where counter values come from: a remote agent answering by OID.
///
/// `Ok(None)` means the agent answered without a value for that instance.
/// `Err` is a transport failure.
pub trait CounterSource {
    fn fetch(&mut self, oid: &Oid) -> Result<Option<String>, CoreError>;

    /// Every `(oid, value)` row under `column`, in agent order.
    fn walk(&mut self, column: &Oid) -> Result<Vec<(Oid, String)>, CoreError>;
}

impl<T: CounterSource + ?Sized> CounterSource for &mut T {
    fn fetch(&mut self, oid: &Oid) -> Result<Option<String>, CoreError> {
        (**self).fetch(oid)
    }

    fn walk(&mut self, column: &Oid) -> Result<Vec<(Oid, String)>, CoreError> {
        (**self).walk(column)
    }
}
