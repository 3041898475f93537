use crate::records::order::OrderView;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One order document exactly as the source returned it.
///
/// The source schema is not contractually complete, so the document is kept
/// untyped; all field access goes through [`OrderView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    pub fn new(document: Value) -> Self {
        RawRecord(document)
    }

    pub fn document(&self) -> &Value {
        &self.0
    }

    pub fn view(&self) -> OrderView<'_> {
        OrderView::new(self)
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        RawRecord(value)
    }
}
