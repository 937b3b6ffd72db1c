//! The vendor record.

use serde::{Deserialize, Serialize};

/// A vendor as stored and as sent over the wire.
///
/// Every field is optional on the wire. `id` is assigned by the store on
/// first save. Absent fields serialise as `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Vendor {
    /// A vendor with both names set and no id yet.
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Copies every name present in `changes` onto `self`.
    ///
    /// Returns `true` if at least one field was copied. A present field counts
    /// as a change even when it equals the current value. `changes.id` is
    /// ignored.
    pub fn merge(&mut self, changes: Vendor) -> bool {
        let mut changed = false;

        if let Some(first_name) = changes.first_name {
            self.first_name = Some(first_name);
            changed = true;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = Some(last_name);
            changed = true;
        }

        changed
    }
}
