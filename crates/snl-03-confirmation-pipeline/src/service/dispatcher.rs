//! # Dispatcher
//!
//! Projects a confirmed [`NormalizedEvent`] to its narrow outbound shape and
//! invokes the matching downstream call.

use std::sync::Arc;

use shared_types::{
    ChangeNameEvent, CreateEvent, EventType, NormalizedEvent, OutboundEvent, PurchaseEvent,
    PutForSaleEvent, RemoveFromSaleEvent,
};
use tracing::{error, info, warn};

use crate::metrics;
use crate::ports::NotificationClient;

/// Project a confirmed event to its outbound shape.
///
/// Returns `None` when the event has not been stamped with `confirmed_at`.
pub fn project(event: &NormalizedEvent) -> Option<OutboundEvent> {
    let date = event.confirmed_at?;
    let owner = event.sender.clone();
    let token_id = event.token_id.clone();

    Some(match event.event_type {
        EventType::Create => OutboundEvent::Create(CreateEvent {
            owner,
            token_id,
            coordinates: event.coordinates.clone(),
            name: event.name.clone(),
            date,
        }),
        EventType::ChangeName => OutboundEvent::ChangeName(ChangeNameEvent {
            owner,
            token_id,
            name: event.name.clone(),
            date,
        }),
        EventType::PutForSale => OutboundEvent::PutForSale(PutForSaleEvent {
            owner,
            token_id,
            price: event.price.to_string(),
            date,
        }),
        EventType::RemoveFromSale => OutboundEvent::RemoveFromSale(RemoveFromSaleEvent {
            owner,
            token_id,
            date,
        }),
        EventType::Purchase => OutboundEvent::Purchase(PurchaseEvent {
            owner,
            token_id,
            date,
        }),
    })
}

/// Forwards confirmed events downstream.
pub struct Dispatcher<N: NotificationClient> {
    client: Arc<N>,
}

impl<N: NotificationClient> Dispatcher<N> {
    /// Creates a dispatcher over a downstream client.
    pub fn new(client: Arc<N>) -> Self {
        Self { client }
    }

    /// Project `event` and make the one matching downstream call.
    ///
    /// Downstream failures are logged and swallowed. Returns the projection
    /// that was sent, or `None` for an unstamped event.
    pub async fn dispatch(&self, event: &NormalizedEvent) -> Option<OutboundEvent> {
        let Some(outbound) = project(event) else {
            error!(
                event_type = %event.event_type,
                tx_hash = ?event.tx_hash,
                "[snl-03] Refusing to dispatch an unconfirmed event"
            );
            return None;
        };

        info!(
            event_type = %event.event_type,
            block = %event.block_number,
            token_id = %event.token_id,
            payload = ?outbound,
            "[snl-03] Dispatching confirmed event"
        );

        let result = match &outbound {
            OutboundEvent::Create(e) => self.client.create_star(e).await,
            OutboundEvent::ChangeName(e) => self.client.change_name(e).await,
            OutboundEvent::PutForSale(e) => self.client.put_for_sale(e).await,
            OutboundEvent::RemoveFromSale(e) => self.client.remove_from_sale(e).await,
            OutboundEvent::Purchase(e) => self.client.purchase(e).await,
        };

        metrics::record_event_dispatched(event.event_type.as_str());
        if let Err(e) = result {
            metrics::record_notify_failure(event.event_type.as_str());
            warn!(
                event_type = %event.event_type,
                token_id = %event.token_id,
                error = %e,
                "[snl-03] Downstream rejected event, it will not be retried"
            );
        }

        Some(outbound)
    }
}
