//! # Outbound Events
//!
//! The narrow payloads forwarded to the Star Notary API, one per event type.
//! Field names are the downstream wire names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::EventType;

/// Body of `POST /create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEvent {
    pub owner: String,
    pub token_id: String,
    pub coordinates: String,
    pub name: String,
    pub date: DateTime<Utc>,
}

/// Body of `PUT /set-name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNameEvent {
    pub owner: String,
    pub token_id: String,
    pub name: String,
    pub date: DateTime<Utc>,
}

/// Body of `PUT /set-price`. `price` is decimal ether.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutForSaleEvent {
    pub owner: String,
    pub token_id: String,
    pub price: String,
    pub date: DateTime<Utc>,
}

/// Body of `PUT /remove-from-sale`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromSaleEvent {
    pub owner: String,
    pub token_id: String,
    pub date: DateTime<Utc>,
}

/// Body of `PUT /purchase`. `owner` is the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseEvent {
    pub owner: String,
    pub token_id: String,
    pub date: DateTime<Utc>,
}

/// A confirmed event projected to its outbound shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundEvent {
    Create(CreateEvent),
    ChangeName(ChangeNameEvent),
    PutForSale(PutForSaleEvent),
    RemoveFromSale(RemoveFromSaleEvent),
    Purchase(PurchaseEvent),
}

impl OutboundEvent {
    /// The event type of the wrapped payload.
    pub fn event_type(&self) -> EventType {
        match self {
            OutboundEvent::Create(_) => EventType::Create,
            OutboundEvent::ChangeName(_) => EventType::ChangeName,
            OutboundEvent::PutForSale(_) => EventType::PutForSale,
            OutboundEvent::RemoveFromSale(_) => EventType::RemoveFromSale,
            OutboundEvent::Purchase(_) => EventType::Purchase,
        }
    }
}
