//! DTOs for address endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Address, AddressDetails};

/// Create/update body. Update replaces every postal field.
#[derive(Debug, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(min = 5, max = 250))]
    pub address_line_1: String,

    #[serde(default)]
    #[validate(length(max = 250))]
    pub address_line_2: String,

    #[validate(length(min = 3, max = 100))]
    pub postal_code: String,

    #[validate(length(min = 3, max = 100))]
    pub city: String,

    #[validate(length(min = 3, max = 100))]
    pub state: String,

    #[validate(length(min = 3, max = 100))]
    pub country: String,
}

impl From<AddressRequest> for AddressDetails {
    fn from(r: AddressRequest) -> Self {
        Self {
            address_line1: r.address_line_1,
            address_line2: r.address_line_2,
            postal_code: r.postal_code,
            city: r.city,
            state: r.state,
            country: r.country,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub id: i64,
    pub user_id: i64,
    pub address_line_1: String,
    pub address_line_2: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            address_line_1: a.address_line1,
            address_line_2: a.address_line2,
            postal_code: a.postal_code,
            city: a.city,
            state: a.state,
            country: a.country,
            is_default: a.is_default,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddressListResponse {
    pub count: usize,
    pub addresses: Vec<AddressResponse>,
}

impl From<Vec<Address>> for AddressListResponse {
    fn from(addresses: Vec<Address>) -> Self {
        Self {
            count: addresses.len(),
            addresses: addresses.into_iter().map(AddressResponse::from).collect(),
        }
    }
}
