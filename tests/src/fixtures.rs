//! Log builders and a wired-up reactor over the mock ledger.

use std::sync::Arc;
use std::time::Duration;

use primitive_types::{H160, H256, U256};
use shared_types::{DecodedEvent, DecodedLog, EventType, RawLog};
use snl_01_event_normalizer::signature_for;
use snl_03_confirmation_pipeline::{
    ListenerReactor, MockLedgerClient, PipelineConfig, RecordingNotificationClient,
};

/// Reactor type used throughout the flows.
pub type TestReactor = ListenerReactor<MockLedgerClient, RecordingNotificationClient>;

/// Address of the watched contract.
pub fn contract() -> H160 {
    H160::repeat_byte(0x5a)
}

/// Address of some other contract on the same chain.
pub fn foreign_contract() -> H160 {
    H160::repeat_byte(0x77)
}

/// Star owner used by the builders.
pub fn owner() -> H160 {
    H160::from_low_u64_be(0xbeef)
}

/// Log envelope at `block`; `tx` seeds the transaction hash.
pub fn raw(event_type: EventType, block: u64, tx: u64) -> RawLog {
    RawLog {
        address: contract(),
        topics: vec![signature_for(event_type)],
        data: tx.to_be_bytes().to_vec(),
        block_number: U256::from(block),
        block_hash: H256::from_low_u64_be(block),
        tx_hash: H256::from_low_u64_be(tx),
        tx_index: 0,
        log_index: 0,
        removed: false,
    }
}

/// A star registration.
pub fn create(block: u64, token: u64) -> DecodedLog {
    DecodedLog {
        event: DecodedEvent::Create {
            owner: owner(),
            token_id: U256::from(token),
            coordinates: format!("ra_{}h", token),
            name: format!("Star {}", token),
        },
        log: raw(EventType::Create, block, token),
    }
}

/// A rename.
pub fn change_name(block: u64, token: u64, name: &str) -> DecodedLog {
    DecodedLog {
        event: DecodedEvent::ChangeName {
            owner: owner(),
            token_id: U256::from(token),
            new_name: name.to_string(),
        },
        log: raw(EventType::ChangeName, block, 1_000 + token),
    }
}

/// A sale listing at `wei`.
pub fn put_for_sale(block: u64, token: u64, wei: U256) -> DecodedLog {
    DecodedLog {
        event: DecodedEvent::PutForSale {
            owner: owner(),
            token_id: U256::from(token),
            price: wei,
        },
        log: raw(EventType::PutForSale, block, 2_000 + token),
    }
}

/// A purchase.
pub fn purchase(block: u64, token: u64, buyer: H160) -> DecodedLog {
    DecodedLog {
        event: DecodedEvent::Purchase {
            new_owner: buyer,
            token_id: U256::from(token),
        },
        log: raw(EventType::Purchase, block, 3_000 + token),
    }
}

/// The same log flagged as removed by a reorg.
pub fn removed(log: &DecodedLog) -> DecodedLog {
    let mut notice = log.clone();
    notice.log.removed = true;
    notice
}

/// Reactor subscribed to all five streams, with its mocks.
pub async fn subscribed_reactor(
    depth: u64,
) -> (
    TestReactor,
    Arc<MockLedgerClient>,
    Arc<RecordingNotificationClient>,
) {
    let ledger = Arc::new(MockLedgerClient::new());
    let client = Arc::new(RecordingNotificationClient::new());
    let config = PipelineConfig {
        confirmation_blocks: depth,
        poll_interval: Duration::from_secs(15),
        ..PipelineConfig::for_contract(contract())
    };
    let mut reactor = ListenerReactor::new(Arc::clone(&ledger), Arc::clone(&client), config);
    if let Err(e) = reactor.subscribe_all().await {
        panic!("mock subscription failed: {}", e);
    }
    (reactor, ledger, client)
}
