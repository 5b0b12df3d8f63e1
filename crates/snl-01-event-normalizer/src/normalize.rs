//! # Normalization
//!
//! Flattens a decoded payload and its log envelope into one
//! [`NormalizedEvent`]. Pure: no I/O, no clock.

use shared_types::{
    to_checksum, DecodedEvent, DecodedLog, EtherAmount, NormalizedEvent, RawLog,
};
use tracing::{debug, warn};

use crate::signatures::event_type_for;

/// Normalize one decoded log.
///
/// The event type comes from the signature table keyed by topic 0. Returns
/// `None` when the signature is not tracked, or when the payload shape
/// disagrees with the signature.
///
/// `price` is zero for every type except `PutForSale`. `confirmed_at` is left
/// unset; it is stamped at confirmation.
pub fn normalize(decoded: &DecodedEvent, log: &RawLog) -> Option<NormalizedEvent> {
    let signature = log.signature()?;
    let Some(event_type) = event_type_for(signature) else {
        debug!(signature = ?signature, "[snl-01] Ignoring untracked signature");
        return None;
    };

    if decoded.event_type() != event_type {
        warn!(
            expected = %event_type,
            decoded = %decoded.event_type(),
            tx_hash = ?log.tx_hash,
            "[snl-01] Payload does not match log signature"
        );
        return None;
    }

    let (name, coordinates, price) = match decoded {
        DecodedEvent::Create {
            coordinates, name, ..
        } => (name.clone(), coordinates.clone(), EtherAmount::zero()),
        DecodedEvent::ChangeName { new_name, .. } => {
            (new_name.clone(), String::new(), EtherAmount::zero())
        }
        DecodedEvent::PutForSale { price, .. } => {
            (String::new(), String::new(), EtherAmount::from_wei(*price))
        }
        DecodedEvent::RemoveFromSale { .. } | DecodedEvent::Purchase { .. } => {
            (String::new(), String::new(), EtherAmount::zero())
        }
    };

    Some(NormalizedEvent {
        event_type,
        contract_hash: log.address,
        topics: log.topics.clone(),
        data: log.data.clone(),
        block_number: log.block_number,
        block_hash: log.block_hash,
        tx_hash: log.tx_hash,
        tx_index: log.tx_index,
        log_index: log.log_index,
        removed: log.removed,
        sender: to_checksum(&decoded.sender()),
        token_id: decoded.token_id().to_string(),
        name,
        coordinates,
        price,
        confirmed_at: None,
    })
}

/// Normalize a log delivered by a live subscription.
pub fn normalize_decoded(decoded: &DecodedLog) -> Option<NormalizedEvent> {
    normalize(&decoded.event, &decoded.log)
}
