//! # Star Notary ABI Decoding
//!
//! Decodes the five Star Notary event layouts from a [`RawLog`].
//!
//! | Event | Fields |
//! |-------|--------|
//! | `Create` | owner `address`, tokenId `uint256`, coordinates `bytes19`, name `bytes` |
//! | `ChangeName` | owner `address`, tokenId `uint256`, newName `bytes` |
//! | `PutForSale` | owner `address`, tokenId `uint256`, priceInWei `uint256` |
//! | `RemoveFromSale` | owner `address`, tokenId `uint256` |
//! | `Purchase` | newOwner `address`, tokenId `uint256` |
//!
//! Leading fields may be indexed: topic `i` (from 1) then carries field
//! `i - 1`, and the data section carries the rest. `string` and `bytes`
//! share an encoding, so names decode either way.

use ethers::abi::{self, ParamType, Token};
use primitive_types::{H160, U256};
use shared_types::{DecodedEvent, EventType, RawLog};
use snl_01_event_normalizer::event_type_for;
use snl_03_confirmation_pipeline::LedgerError;

/// Width of the fixed `coordinates` field.
const COORDINATES_LEN: usize = 19;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Owner,
    TokenId,
    Coordinates,
    Name,
    Price,
}

impl Field {
    fn param_type(self) -> ParamType {
        match self {
            Field::Owner => ParamType::Address,
            Field::TokenId | Field::Price => ParamType::Uint(256),
            Field::Coordinates => ParamType::FixedBytes(COORDINATES_LEN),
            Field::Name => ParamType::Bytes,
        }
    }

    fn can_be_indexed(self) -> bool {
        !matches!(self, Field::Name)
    }
}

fn layout(event_type: EventType) -> &'static [Field] {
    match event_type {
        EventType::Create => &[Field::Owner, Field::TokenId, Field::Coordinates, Field::Name],
        EventType::ChangeName => &[Field::Owner, Field::TokenId, Field::Name],
        EventType::PutForSale => &[Field::Owner, Field::TokenId, Field::Price],
        EventType::RemoveFromSale | EventType::Purchase => &[Field::Owner, Field::TokenId],
    }
}

fn event_name(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Create => "Create",
        EventType::ChangeName => "ChangeName",
        EventType::PutForSale => "PutForSale",
        EventType::RemoveFromSale => "RemoveFromSale",
        EventType::Purchase => "Purchase",
    }
}

/// Solidity declaration the topic-0 hash is taken over, e.g.
/// `Purchase(address,uint256)`.
pub fn canonical_signature(event_type: EventType) -> String {
    let params: Vec<String> = layout(event_type)
        .iter()
        .map(|f| f.param_type().to_string())
        .collect();
    format!("{}({})", event_name(event_type), params.join(","))
}

#[derive(Default)]
struct Values {
    owner: Option<H160>,
    token_id: Option<U256>,
    coordinates: Option<String>,
    name: Option<String>,
    price: Option<U256>,
}

impl Values {
    fn set(&mut self, field: Field, token: Token) -> Result<(), LedgerError> {
        match (field, token) {
            (Field::Owner, Token::Address(a)) => self.owner = Some(H160::from(a.0)),
            (Field::TokenId, Token::Uint(v)) => self.token_id = Some(to_u256(v)),
            (Field::Price, Token::Uint(v)) => self.price = Some(to_u256(v)),
            (Field::Coordinates, Token::FixedBytes(bytes)) => {
                self.coordinates = Some(text_from(&bytes))
            }
            (Field::Name, Token::Bytes(bytes)) => self.name = Some(text_from(&bytes)),
            (Field::Name, Token::String(s)) => self.name = Some(s),
            (field, token) => {
                return Err(LedgerError::Decode(format!(
                    "unexpected token {:?} for {:?}",
                    token, field
                )))
            }
        }
        Ok(())
    }
}

/// Convert an ethers `U256` to the workspace `U256`.
pub fn to_u256(value: ethers::types::U256) -> U256 {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    U256::from_big_endian(&buf)
}

/// Bytes to text with trailing NUL padding removed.
fn text_from(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|b| *b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

fn missing(what: &str) -> LedgerError {
    LedgerError::Decode(format!("missing {}", what))
}

/// Decode a Star Notary log into its typed payload.
pub fn decode_log(log: &RawLog) -> Result<DecodedEvent, LedgerError> {
    let signature = log
        .signature()
        .ok_or_else(|| LedgerError::Decode("log has no topics".to_string()))?;
    let event_type = event_type_for(signature)
        .ok_or_else(|| LedgerError::Decode(format!("untracked signature {:?}", signature)))?;

    let fields = layout(event_type);
    let indexed = &log.topics[1..];
    if indexed.len() > fields.len() {
        return Err(LedgerError::Decode(format!(
            "{} has {} indexed topics but only {} fields",
            event_type,
            indexed.len(),
            fields.len()
        )));
    }

    let mut values = Values::default();
    for (field, topic) in fields.iter().zip(indexed) {
        if !field.can_be_indexed() {
            return Err(LedgerError::Decode(format!(
                "{:?} cannot be recovered from an indexed topic",
                field
            )));
        }
        let mut tokens = abi::decode(&[field.param_type()], topic.as_bytes())
            .map_err(|e| LedgerError::Decode(e.to_string()))?;
        let token = tokens.pop().ok_or_else(|| missing("indexed token"))?;
        values.set(*field, token)?;
    }

    let remaining = &fields[indexed.len()..];
    let params: Vec<ParamType> = remaining.iter().map(|f| f.param_type()).collect();
    let tokens =
        abi::decode(&params, &log.data).map_err(|e| LedgerError::Decode(e.to_string()))?;
    for (field, token) in remaining.iter().zip(tokens) {
        values.set(*field, token)?;
    }

    let owner = values.owner.ok_or_else(|| missing("owner"))?;
    let token_id = values.token_id.ok_or_else(|| missing("token id"))?;

    Ok(match event_type {
        EventType::Create => DecodedEvent::Create {
            owner,
            token_id,
            coordinates: values.coordinates.ok_or_else(|| missing("coordinates"))?,
            name: values.name.ok_or_else(|| missing("name"))?,
        },
        EventType::ChangeName => DecodedEvent::ChangeName {
            owner,
            token_id,
            new_name: values.name.ok_or_else(|| missing("name"))?,
        },
        EventType::PutForSale => DecodedEvent::PutForSale {
            owner,
            token_id,
            price: values.price.ok_or_else(|| missing("price"))?,
        },
        EventType::RemoveFromSale => DecodedEvent::RemoveFromSale { owner, token_id },
        EventType::Purchase => DecodedEvent::Purchase {
            new_owner: owner,
            token_id,
        },
    })
}
