//! # Ethers Ledger Client
//!
//! [`LedgerClient`] over an `ethers` websocket provider.
//!
//! Each live subscription runs in its own task: it owns an `eth_subscribe`
//! log stream filtered on the contract and one signature topic, decodes each
//! log and forwards it into the subscription channel. When the provider
//! stream ends the task drops its sender, which closes the subscription.

use std::sync::Arc;

use async_trait::async_trait;
use ethers::providers::{Middleware, Provider, Ws};
use ethers::types::{BlockId, BlockNumber, Filter, Log, U64};
use futures::StreamExt;
use primitive_types::{H160, H256, U256};
use shared_types::{BlockInfo, DecodedEvent, DecodedLog, EventType, RawLog};
use snl_01_event_normalizer::signature_for;
use snl_03_confirmation_pipeline::{EventSubscription, LedgerClient, LedgerError};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use super::abi::{self, to_u256};

/// Ledger client backed by `Provider<Ws>`.
pub struct EthersLedgerClient {
    provider: Arc<Provider<Ws>>,
    contract: H160,
    subscription_buffer: usize,
}

impl EthersLedgerClient {
    /// Connect to a websocket endpoint.
    pub async fn connect(
        url: &str,
        contract: H160,
        subscription_buffer: usize,
    ) -> Result<Self, LedgerError> {
        let provider = Provider::<Ws>::connect(url)
            .await
            .map_err(|e| LedgerError::Connection(e.to_string()))?;
        info!(contract = ?contract, "Connected to ledger websocket");
        Ok(Self {
            provider: Arc::new(provider),
            contract,
            subscription_buffer,
        })
    }

    fn contract_address(&self) -> ethers::types::Address {
        ethers::types::Address::from(self.contract.0)
    }
}

/// Convert an ethers log into the workspace envelope.
pub fn raw_log_from(log: &Log) -> RawLog {
    RawLog {
        address: H160::from(log.address.0),
        topics: log.topics.iter().map(|t| H256::from(t.0)).collect(),
        data: log.data.to_vec(),
        block_number: log
            .block_number
            .map(|n| U256::from(n.as_u64()))
            .unwrap_or_default(),
        block_hash: log.block_hash.map(|h| H256::from(h.0)).unwrap_or_default(),
        tx_hash: log
            .transaction_hash
            .map(|h| H256::from(h.0))
            .unwrap_or_default(),
        tx_index: log.transaction_index.map(|i| i.as_u64()).unwrap_or_default(),
        log_index: log.log_index.map(|i| i.low_u64()).unwrap_or_default(),
        removed: log.removed.unwrap_or(false),
    }
}

fn block_number_from(height: U256) -> Result<BlockNumber, LedgerError> {
    if height > U256::from(u64::MAX) {
        return Err(LedgerError::Query(format!(
            "block {} exceeds the provider range",
            height
        )));
    }
    Ok(BlockNumber::Number(U64::from(height.low_u64())))
}

#[async_trait]
impl LedgerClient for EthersLedgerClient {
    async fn subscribe(&self, event_type: EventType) -> Result<EventSubscription, LedgerError> {
        let topic = ethers::types::H256::from(signature_for(event_type).0);
        debug!(
            event_type = %event_type,
            signature = %abi::canonical_signature(event_type),
            "Opening log subscription"
        );
        let filter = Filter::new()
            .address(self.contract_address())
            .topic0(topic);

        let (sender, subscription) =
            EventSubscription::channel(event_type, self.subscription_buffer);
        let (ready_tx, ready_rx) = oneshot::channel::<Result<(), String>>();
        let provider = Arc::clone(&self.provider);

        tokio::spawn(async move {
            let mut stream = match provider.subscribe_logs(&filter).await {
                Ok(stream) => {
                    let _ = ready_tx.send(Ok(()));
                    stream
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e.to_string()));
                    return;
                }
            };

            while let Some(log) = stream.next().await {
                let raw = raw_log_from(&log);
                match abi::decode_log(&raw) {
                    Ok(event) => {
                        debug!(
                            event_type = %event_type,
                            block = %raw.block_number,
                            "Live log received"
                        );
                        if sender.send(DecodedLog { event, log: raw }).await.is_err() {
                            // Reactor dropped the subscription
                            return;
                        }
                    }
                    Err(e) => warn!(
                        event_type = %event_type,
                        tx_hash = ?raw.tx_hash,
                        error = %e,
                        "Dropping undecodable live log"
                    ),
                }
            }
            error!(event_type = %event_type, "Live log stream ended");
        });

        match ready_rx.await {
            Ok(Ok(())) => Ok(subscription),
            Ok(Err(reason)) => Err(LedgerError::Subscription { event_type, reason }),
            Err(_) => Err(LedgerError::Subscription {
                event_type,
                reason: "subscription task exited".to_string(),
            }),
        }
    }

    async fn filter_logs(
        &self,
        contract: H160,
        from_block: U256,
    ) -> Result<Vec<RawLog>, LedgerError> {
        let filter = Filter::new()
            .address(ethers::types::Address::from(contract.0))
            .from_block(block_number_from(from_block)?)
            .to_block(BlockNumber::Latest);

        let logs = self.provider.get_logs(&filter).await.map_err(|e| {
            error!(from_block = %from_block, error = %e, "get_logs failed");
            LedgerError::Query(e.to_string())
        })?;
        Ok(logs.iter().map(raw_log_from).collect())
    }

    async fn current_height(&self) -> Result<U256, LedgerError> {
        self.provider
            .get_block_number()
            .await
            .map(|n| U256::from(n.as_u64()))
            .map_err(|e| LedgerError::Query(e.to_string()))
    }

    async fn block_by_height(&self, height: U256) -> Result<BlockInfo, LedgerError> {
        let id = BlockId::Number(block_number_from(height)?);
        let block = self
            .provider
            .get_block(id)
            .await
            .map_err(|e| LedgerError::Query(e.to_string()))?
            .ok_or(LedgerError::BlockNotFound(height))?;

        Ok(BlockInfo {
            number: height,
            hash: block.hash.map(|h| H256::from(h.0)).unwrap_or_default(),
            timestamp: to_u256(block.timestamp).low_u64(),
        })
    }

    fn decode_log(&self, log: &RawLog) -> Result<DecodedEvent, LedgerError> {
        abi::decode_log(log)
    }
}
