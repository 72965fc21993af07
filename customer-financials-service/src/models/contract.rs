//! Contract model with embedded friend-rental data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Advertising contract billed to one customer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contract {
    pub contract_id: Uuid,
    pub customer_id: Uuid,
    pub contract_number: String,
    pub total: Decimal,
    /// Raw rental-partner map as stored: partner key -> { "rental_cost": ... }.
    /// Shape is owned by the contract CRUD module and not trusted here.
    pub friend_rental_data: Option<serde_json::Value>,
    pub created_utc: DateTime<Utc>,
}

/// One validated entry from a contract's friend-rental map: a billboard
/// sub-let from a partner company, with its externally-sourced cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendRental {
    pub partner_key: String,
    pub rental_cost: Decimal,
}

impl Contract {
    /// Parse `friend_rental_data` into typed entries.
    ///
    /// Entries whose `rental_cost` is missing or not a JSON number are
    /// dropped. A malformed or absent map yields an empty list.
    pub fn friend_rentals(&self) -> Vec<FriendRental> {
        let Some(serde_json::Value::Object(map)) = &self.friend_rental_data else {
            return Vec::new();
        };

        map.iter()
            .filter_map(|(key, entry)| {
                let cost = decimal_from_json(entry.get("rental_cost")?)?;
                Some(FriendRental {
                    partner_key: key.clone(),
                    rental_cost: cost,
                })
            })
            .collect()
    }
}

fn decimal_from_json(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}
