//! Receiving side of the bridge.

use crate::bridge::{
    channel::InboundRequest,
    domain::{Direction, Envelope},
    ports::RequestHandler,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Serves requests arriving on `inbox` until every sender is gone.
///
/// Only envelopes tagged `accepts` are handled; others are ignored. Each
/// accepted request runs on its own task and receives exactly one reply,
/// tagged with the matching response direction.
pub async fn serve<H>(
    mut inbox: mpsc::UnboundedReceiver<InboundRequest>,
    accepts: Direction,
    handler: Arc<H>,
) where
    H: RequestHandler + ?Sized + 'static,
{
    while let Some(request) = inbox.recv().await {
        let direction = request.envelope.direction();
        if direction != accepts {
            debug!(%direction, %accepts, "ignoring envelope");
            continue;
        }
        let task_handler = Arc::clone(&handler);
        tokio::spawn(async move { respond(task_handler.as_ref(), request).await });
    }
    debug!(%accepts, "inbox closed; listener stopped");
}

async fn respond<H>(handler: &H, request: InboundRequest)
where
    H: RequestHandler + ?Sized,
{
    let InboundRequest { envelope, reply } = request;
    let direction = envelope.direction().response();
    let outcome = match envelope.into_result() {
        Ok(payload) => handler.handle(payload).await,
        Err(error) => Err(error),
    };
    if !reply.post(Envelope::response(direction, outcome)) {
        debug!(channel_id = %reply.channel_id(), "caller stopped waiting before reply");
    }
}
