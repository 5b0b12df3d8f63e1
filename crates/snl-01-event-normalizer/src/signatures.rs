//! # Signature Table
//!
//! Static mapping between Star Notary event signature hashes (topic 0 of
//! every log the contract emits) and the logical event types.

use primitive_types::H256;
use shared_types::EventType;

/// Signature hash of `Create`.
pub const CREATE_SIGNATURE: H256 = H256([
    0x64, 0x5f, 0x01, 0x52, 0x84, 0xb5, 0x4b, 0xc3,
    0x89, 0xe8, 0x6c, 0x58, 0xc9, 0xe6, 0xfa, 0x71,
    0x1d, 0xab, 0xfe, 0x2a, 0x1f, 0xd7, 0xd7, 0xfd,
    0xf9, 0x44, 0x04, 0x58, 0xb0, 0x07, 0x45, 0x87,
]);

/// Signature hash of `ChangeName`.
pub const CHANGE_NAME_SIGNATURE: H256 = H256([
    0xf7, 0x44, 0xb0, 0x2e, 0x29, 0x65, 0x63, 0x16,
    0x79, 0xdb, 0xa1, 0xd6, 0xcc, 0xc0, 0x15, 0x28,
    0x63, 0x48, 0xdc, 0x64, 0x52, 0xab, 0x37, 0x77,
    0x64, 0xb9, 0xbc, 0xe7, 0xc6, 0x5a, 0xec, 0x0c,
]);

/// Signature hash of `PutForSale`.
pub const PUT_FOR_SALE_SIGNATURE: H256 = H256([
    0xee, 0xf8, 0x70, 0x1c, 0x78, 0x4d, 0xcc, 0x5b,
    0x12, 0xeb, 0x5c, 0xe2, 0x68, 0x7a, 0x9e, 0x42,
    0xd1, 0xd9, 0x4b, 0x6e, 0x81, 0xf6, 0x60, 0xdc,
    0xb8, 0x4b, 0x51, 0x55, 0x4c, 0x37, 0xf0, 0x82,
]);

/// Signature hash of `RemoveFromSale`.
pub const REMOVE_FROM_SALE_SIGNATURE: H256 = H256([
    0xbf, 0xbf, 0x7e, 0x76, 0x77, 0xa0, 0xc4, 0x23,
    0x10, 0x61, 0x46, 0xf1, 0xee, 0x86, 0xac, 0x04,
    0x25, 0x26, 0xb5, 0x35, 0x81, 0xde, 0x06, 0xba,
    0x54, 0xc5, 0x1e, 0x8a, 0xcf, 0xea, 0xc7, 0x46,
]);

/// Signature hash of `Purchase`.
pub const PURCHASE_SIGNATURE: H256 = H256([
    0x24, 0x99, 0xa5, 0x33, 0x0a, 0xb0, 0x97, 0x9c,
    0xc6, 0x12, 0x13, 0x5e, 0x78, 0x83, 0xeb, 0xc3,
    0xcd, 0x5c, 0x9f, 0x7a, 0x85, 0x08, 0xf0, 0x42,
    0x54, 0x0c, 0x34, 0x72, 0x33, 0x48, 0xf6, 0x32,
]);

const SIGNATURES: [(H256, EventType); 5] = [
    (CREATE_SIGNATURE, EventType::Create),
    (CHANGE_NAME_SIGNATURE, EventType::ChangeName),
    (PUT_FOR_SALE_SIGNATURE, EventType::PutForSale),
    (REMOVE_FROM_SALE_SIGNATURE, EventType::RemoveFromSale),
    (PURCHASE_SIGNATURE, EventType::Purchase),
];

/// Look up the event type for a signature hash.
///
/// Returns `None` for signatures the listener does not track.
pub fn event_type_for(signature: &H256) -> Option<EventType> {
    SIGNATURES
        .iter()
        .find(|(hash, _)| hash == signature)
        .map(|(_, event_type)| *event_type)
}

/// The signature hash emitted for an event type.
pub fn signature_for(event_type: EventType) -> H256 {
    match event_type {
        EventType::Create => CREATE_SIGNATURE,
        EventType::ChangeName => CHANGE_NAME_SIGNATURE,
        EventType::PutForSale => PUT_FOR_SALE_SIGNATURE,
        EventType::RemoveFromSale => REMOVE_FROM_SALE_SIGNATURE,
        EventType::Purchase => PURCHASE_SIGNATURE,
    }
}
