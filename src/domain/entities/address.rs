//! Domain entity representing a user's shipping address.

use chrono::{DateTime, Utc};

/// A postal address belonging to one user.
///
/// At most one address per user has `is_default` set; the flag is only
/// changed through the transactional default swap.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub address_line1: String,
    pub address_line2: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Free-text postal fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressDetails {
    pub address_line1: String,
    pub address_line2: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Input data for creating an address. New addresses are never the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub user_id: i64,
    pub details: AddressDetails,
}

impl Address {
    /// Returns the postal fields of this address.
    pub fn details(&self) -> AddressDetails {
        AddressDetails {
            address_line1: self.address_line1.clone(),
            address_line2: self.address_line2.clone(),
            postal_code: self.postal_code.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
        }
    }
}
