//! # Confirmation Flows
//!
//! Push, wait for depth, pull, forward once.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use primitive_types::U256;
    use shared_types::{to_checksum, EventType, OutboundEvent};
    use snl_01_event_normalizer::normalize_decoded;
    use snl_02_confirmation_queue::ConfirmationQueue;
    use snl_03_confirmation_pipeline::{
        MockLedgerClient, PipelineConfig, ReactorStep, ReconciliationScanner,
        RecordingNotificationClient, ScanReport,
    };

    use crate::fixtures::*;

    use shared_types::BlockInfo;
    use snl_03_confirmation_pipeline::ports::mock::{MOCK_BLOCK_TIME, MOCK_GENESIS_TIMESTAMP};

    /// Block time the mock chain reports for `block`.
    fn mock_block(block: u64) -> BlockInfo {
        BlockInfo {
            number: U256::from(block),
            hash: Default::default(),
            timestamp: MOCK_GENESIS_TIMESTAMP + block * MOCK_BLOCK_TIME,
        }
    }

    // =========================================================================
    // DEPTH BOUNDARY
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_event_waits_for_depth_then_forwards_once() {
        let (mut reactor, ledger, client) = subscribed_reactor(10).await;
        let log = create(100, 1);

        ledger.set_height(100);
        ledger.add_log(&log);
        assert!(ledger.push(log.clone()));
        assert_eq!(reactor.step().await.unwrap(), ReactorStep::Queued(EventType::Create));

        ledger.set_height(105);
        match reactor.step().await.unwrap() {
            ReactorStep::Scanned {
                report: Some(report),
                evicted: 0,
            } => {
                assert_eq!(report.pending, 1);
                assert_eq!(report.dispatched, 0);
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert!(client.calls().is_empty());
        assert_eq!(reactor.queue().len(), 1);

        ledger.set_height(111);
        match reactor.step().await.unwrap() {
            ReactorStep::Scanned {
                report: Some(report),
                ..
            } => assert_eq!(report.dispatched, 1),
            other => panic!("unexpected step {:?}", other),
        }
        assert!(reactor.queue().is_empty());
        assert_eq!(client.count_for(EventType::Create), 1);

        // A later sighting of the same log finds nothing pending
        let scanner = ReconciliationScanner::new(
            Arc::clone(&ledger),
            Arc::clone(&client),
            PipelineConfig {
                confirmation_blocks: 10,
                ..PipelineConfig::for_contract(contract())
            },
        );
        let queue = reactor.queue();
        let report = scanner.scan_and_confirm(&queue, U256::from(111)).await.unwrap();
        assert_eq!(report.untracked, 1);
        assert_eq!(client.calls().len(), 1);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_exact_depth_is_confirmed() {
        let ledger = Arc::new(MockLedgerClient::new());
        let client = Arc::new(RecordingNotificationClient::new());
        let scanner = ReconciliationScanner::new(
            Arc::clone(&ledger),
            Arc::clone(&client),
            PipelineConfig {
                confirmation_blocks: 6,
                ..PipelineConfig::for_contract(contract())
            },
        );
        let queue = ConfirmationQueue::new();
        let log = create(50, 3);
        ledger.set_height(56);
        ledger.add_log(&log);
        queue.insert(normalize_decoded(&log).unwrap());

        let report = scanner.scan_and_confirm(&queue, U256::from(55)).await.unwrap();
        assert_eq!(report.pending, 1);

        let report = scanner.scan_and_confirm(&queue, U256::from(56)).await.unwrap();
        assert_eq!(report.dispatched, 1);
        assert!(queue.is_empty());
    }

    // =========================================================================
    // PULL WITHOUT PUSH
    // =========================================================================

    #[tokio::test]
    async fn test_pulled_log_without_push_is_never_forwarded() {
        let ledger = Arc::new(MockLedgerClient::new());
        let client = Arc::new(RecordingNotificationClient::new());
        let scanner = ReconciliationScanner::new(
            Arc::clone(&ledger),
            Arc::clone(&client),
            PipelineConfig::for_contract(contract()),
        );
        ledger.set_height(500);
        ledger.add_log(&create(10, 1));

        let report = scanner
            .scan_and_confirm(&ConfirmationQueue::new(), U256::from(500))
            .await
            .unwrap();
        assert_eq!(
            report,
            ScanReport {
                scanned: 1,
                untracked: 1,
                ..Default::default()
            }
        );
        assert!(client.calls().is_empty());
    }

    // =========================================================================
    // PAYLOADS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_all_event_types_forward_their_payloads() {
        let (mut reactor, ledger, client) = subscribed_reactor(2).await;
        let buyer = primitive_types::H160::from_low_u64_be(0xcafe);
        let price = U256::from(2_500_000_000_000_000_000u128);
        let logs = vec![
            create(10, 1),
            change_name(10, 1, "Polaris"),
            put_for_sale(11, 1, price),
            purchase(12, 1, buyer),
        ];

        ledger.set_height(12);
        for log in &logs {
            ledger.add_log(log);
            assert!(ledger.push(log.clone()));
        }
        for _ in &logs {
            assert!(matches!(reactor.step().await.unwrap(), ReactorStep::Queued(_)));
        }

        ledger.set_height(20);
        reactor.step().await.unwrap();
        assert!(reactor.queue().is_empty());

        let calls = client.calls();
        assert_eq!(calls.len(), 4);
        let owner = to_checksum(&owner());

        match &calls[0] {
            OutboundEvent::Create(body) => {
                assert_eq!(body.owner, owner);
                assert_eq!(body.token_id, "1");
                assert_eq!(body.name, "Star 1");
                assert_eq!(body.coordinates, "ra_1h");
                assert_eq!(Some(body.date), mock_block(10).timestamp_utc());
            }
            other => panic!("unexpected {:?}", other),
        }
        match &calls[1] {
            OutboundEvent::ChangeName(body) => assert_eq!(body.name, "Polaris"),
            other => panic!("unexpected {:?}", other),
        }
        match &calls[2] {
            OutboundEvent::PutForSale(body) => assert_eq!(body.price, "2.5"),
            other => panic!("unexpected {:?}", other),
        }
        match &calls[3] {
            OutboundEvent::Purchase(body) => assert_eq!(body.owner, to_checksum(&buyer)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_downstream_failure_still_retires_event() {
        let (mut reactor, ledger, client) = subscribed_reactor(1).await;
        client
            .should_fail
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let log = create(5, 9);

        ledger.set_height(5);
        ledger.add_log(&log);
        ledger.push(log);
        reactor.step().await.unwrap();

        ledger.set_height(6);
        reactor.step().await.unwrap();
        assert_eq!(client.calls().len(), 1);
        assert!(reactor.queue().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_foreign_contract_logs_are_not_scanned() {
        let (mut reactor, ledger, client) = subscribed_reactor(1).await;
        let ours = create(5, 1);
        let mut theirs = create(5, 2);
        theirs.log.address = foreign_contract();

        ledger.set_height(5);
        ledger.add_log(&ours);
        ledger.add_log(&theirs);
        ledger.push(ours);
        reactor.step().await.unwrap();

        ledger.set_height(9);
        match reactor.step().await.unwrap() {
            ReactorStep::Scanned {
                report: Some(report),
                ..
            } => {
                assert_eq!(report.scanned, 1);
                assert_eq!(report.dispatched, 1);
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(client.calls().len(), 1);
    }
}
