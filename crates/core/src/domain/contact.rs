use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::ContactPricing;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub Uuid);

/// A business contact and the pricing adjustments it owns.
///
/// Persistence of the record is the host application's concern; this type
/// only ties the adjustment book to an identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub pricing: ContactPricing,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: ContactId(Uuid::new_v4()), name: name.into(), pricing: ContactPricing::default() }
    }
}
