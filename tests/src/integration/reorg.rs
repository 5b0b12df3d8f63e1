//! # Reorg, Duplicate and Eviction Flows
//!
//! What happens to pending events that never make it to depth cleanly.

#[cfg(test)]
mod tests {
    use primitive_types::{H256, U256};
    use shared_types::EventType;
    use snl_03_confirmation_pipeline::ReactorStep;

    use crate::fixtures::*;

    // =========================================================================
    // REORGS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_live_removal_notice_purges_pending_event() {
        let (mut reactor, ledger, client) = subscribed_reactor(10).await;
        let log = create(100, 1);

        ledger.set_height(100);
        ledger.push(log.clone());
        reactor.step().await.unwrap();
        assert_eq!(reactor.queue().len(), 1);

        ledger.push(removed(&log));
        assert_eq!(reactor.step().await.unwrap(), ReactorStep::Purged(1));
        assert!(reactor.queue().is_empty());
        assert!(client.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pulled_removal_purges_before_depth() {
        let (mut reactor, ledger, client) = subscribed_reactor(10).await;
        let log = create(100, 1);

        ledger.set_height(103);
        ledger.push(log.clone());
        reactor.step().await.unwrap();

        ledger.add_log(&removed(&log));
        match reactor.step().await.unwrap() {
            ReactorStep::Scanned {
                report: Some(report),
                ..
            } => assert_eq!(report.purged, 1),
            other => panic!("unexpected step {:?}", other),
        }
        assert!(reactor.queue().is_empty());
        assert!(client.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remined_event_is_forwarded_from_new_block() {
        let (mut reactor, ledger, client) = subscribed_reactor(3).await;
        let original = create(100, 1);
        let mut remined = create(101, 1);
        remined.log.block_hash = H256::repeat_byte(0x11);

        ledger.set_height(100);
        ledger.push(original.clone());
        reactor.step().await.unwrap();
        ledger.push(removed(&original));
        reactor.step().await.unwrap();
        ledger.push(remined.clone());
        reactor.step().await.unwrap();

        ledger.add_log(&remined);
        ledger.set_height(104);
        reactor.step().await.unwrap();

        assert_eq!(client.count_for(EventType::Create), 1);
        assert!(reactor.queue().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_removal_of_unknown_log_is_harmless() {
        let (mut reactor, ledger, _client) = subscribed_reactor(10).await;
        ledger.set_height(100);
        ledger.push(create(100, 1));
        reactor.step().await.unwrap();

        ledger.push(removed(&create(100, 2)));
        assert_eq!(reactor.step().await.unwrap(), ReactorStep::Purged(0));
        assert_eq!(reactor.queue().len(), 1);
    }

    // =========================================================================
    // DUPLICATES
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_pushes_forward_once() {
        let (mut reactor, ledger, client) = subscribed_reactor(2).await;
        let log = put_for_sale(40, 4, U256::from(10u64).pow(U256::from(18)));

        ledger.set_height(40);
        ledger.add_log(&log);
        ledger.push(log.clone());
        ledger.push(log.clone());
        reactor.step().await.unwrap();
        reactor.step().await.unwrap();
        assert_eq!(reactor.queue().len(), 2);

        ledger.set_height(45);
        reactor.step().await.unwrap();
        assert_eq!(client.count_for(EventType::PutForSale), 1);
        assert!(reactor.queue().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_pulls_forward_once() {
        let (mut reactor, ledger, client) = subscribed_reactor(2).await;
        let log = create(40, 4);

        ledger.set_height(40);
        ledger.add_log(&log);
        ledger.add_log(&log);
        ledger.push(log);
        reactor.step().await.unwrap();

        ledger.set_height(45);
        match reactor.step().await.unwrap() {
            ReactorStep::Scanned {
                report: Some(report),
                ..
            } => {
                assert_eq!(report.dispatched, 1);
                assert_eq!(report.untracked, 1);
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(client.calls().len(), 1);
    }

    // =========================================================================
    // ORDERING AND EVICTION
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_scan_starts_at_oldest_pending_block() {
        let (mut reactor, ledger, _client) = subscribed_reactor(10).await;
        ledger.set_height(120);
        ledger.push(create(120, 1));
        ledger.push(change_name(100, 2, "Rigel"));
        reactor.step().await.unwrap();
        reactor.step().await.unwrap();

        let snapshot = reactor.queue().snapshot();
        assert_eq!(snapshot[0].block_number, U256::from(100));
        assert_eq!(snapshot[1].block_number, U256::from(120));

        reactor.step().await.unwrap();
        assert_eq!(ledger.filter_calls(), vec![U256::from(100)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreconciled_event_is_evicted_one_block_past_depth() {
        let (mut reactor, ledger, client) = subscribed_reactor(10).await;
        ledger.set_height(100);
        ledger.push(create(100, 1));
        reactor.step().await.unwrap();

        ledger.set_height(110);
        assert_eq!(
            reactor.step().await.unwrap(),
            ReactorStep::Scanned {
                report: Some(Default::default()),
                evicted: 0,
            }
        );
        assert_eq!(reactor.queue().len(), 1);

        ledger.set_height(111);
        match reactor.step().await.unwrap() {
            ReactorStep::Scanned { evicted, .. } => assert_eq!(evicted, 1),
            other => panic!("unexpected step {:?}", other),
        }
        assert!(reactor.queue().is_empty());
        assert!(client.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_stream_stops_the_listener() {
        let (mut reactor, ledger, _client) = subscribed_reactor(10).await;
        ledger.close_subscription(EventType::Purchase);
        assert!(reactor.run().await.is_err());
    }
}
