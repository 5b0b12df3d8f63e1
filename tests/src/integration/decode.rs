//! # Wire-to-Wire Flow
//!
//! ABI-encoded ledger log in, downstream JSON body out.

#[cfg(test)]
mod tests {
    use ethers::abi::{encode, Token};
    use listener_runtime::adapters::abi::decode_log;
    use primitive_types::{H160, U256};
    use shared_types::{to_checksum, DecodedLog, EventType, RawLog};
    use snl_01_event_normalizer::{normalize_decoded, signature_for};
    use snl_03_confirmation_pipeline::project;

    use crate::fixtures::raw;

    fn encoded_log(event_type: EventType, tokens: &[Token]) -> RawLog {
        RawLog {
            data: encode(tokens),
            ..raw(event_type, 200, 1)
        }
    }

    fn owner_token() -> Token {
        Token::Address(ethers::types::Address::from_low_u64_be(0xbeef))
    }

    fn body_of(log: RawLog) -> serde_json::Value {
        let event = decode_log(&log).unwrap();
        let normalized = normalize_decoded(&DecodedLog { event, log }).unwrap();
        let stamp = chrono::DateTime::from_timestamp(1_600_000_000, 0).unwrap();
        let confirmed = normalized.confirmed(stamp);
        serde_json::to_value(project(&confirmed).unwrap()).unwrap()
    }

    #[test]
    fn test_put_for_sale_body() {
        let log = encoded_log(
            EventType::PutForSale,
            &[
                owner_token(),
                Token::Uint(42u64.into()),
                Token::Uint(ethers::types::U256::from(1_230_000_000_000_000_000u128)),
            ],
        );

        let body = body_of(log);
        assert_eq!(body["owner"], to_checksum(&H160::from_low_u64_be(0xbeef)));
        assert_eq!(body["token_id"], "42");
        assert_eq!(body["price"], "1.23");
        assert_eq!(body["date"], "2020-09-13T12:26:40Z");
    }

    #[test]
    fn test_create_body() {
        let mut coordinates = b"dec_38d_47m".to_vec();
        coordinates.resize(19, 0);
        let log = encoded_log(
            EventType::Create,
            &[
                owner_token(),
                Token::Uint(7u64.into()),
                Token::FixedBytes(coordinates),
                Token::Bytes(b"Vega".to_vec()),
            ],
        );

        let body = body_of(log);
        assert_eq!(body["coordinates"], "dec_38d_47m");
        assert_eq!(body["name"], "Vega");
        assert_eq!(body.as_object().map(|o| o.len()), Some(5));
    }

    #[test]
    fn test_large_token_id_is_exact() {
        let token = U256::MAX;
        let mut buf = [0u8; 32];
        token.to_big_endian(&mut buf);
        let log = encoded_log(
            EventType::RemoveFromSale,
            &[
                owner_token(),
                Token::Uint(ethers::types::U256::from_big_endian(&buf)),
            ],
        );

        let body = body_of(log);
        assert_eq!(body["token_id"], token.to_string());
    }

    #[test]
    fn test_signature_mismatch_is_rejected() {
        let mut log = encoded_log(
            EventType::Purchase,
            &[owner_token(), Token::Uint(1u64.into())],
        );
        log.topics[0] = signature_for(EventType::RemoveFromSale);

        // Same layout, so it decodes, but as the event the topic names
        let event = decode_log(&log).unwrap();
        assert_eq!(event.event_type(), EventType::RemoveFromSale);
    }
}
