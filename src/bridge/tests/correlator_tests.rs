//! Unit tests for call correlation, timeouts, and endpoints.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::bridge::{
    adapters::InProcessContext,
    channel::InboundRequest,
    domain::{BridgeError, Direction, Envelope, ErrorPayload},
    ports::{BridgeTarget, RequestHandler},
    services::{ContextRole, Correlator, FrameEndpoint, ParentEndpoint},
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::time::Instant;

struct EchoHandler;

#[async_trait]
impl RequestHandler for EchoHandler {
    async fn handle(&self, payload: Value) -> Result<Value, ErrorPayload> {
        Ok(json!({ "echo": payload }))
    }
}

struct FailingHandler;

#[async_trait]
impl RequestHandler for FailingHandler {
    async fn handle(&self, _payload: Value) -> Result<Value, ErrorPayload> {
        Err(ErrorPayload::new("host", "compose window vanished"))
    }
}

struct SilentHandler;

#[async_trait]
impl RequestHandler for SilentHandler {
    async fn handle(&self, _payload: Value) -> Result<Value, ErrorPayload> {
        std::future::pending::<()>().await;
        Ok(Value::Null)
    }
}

/// Keeps posted requests so tests can answer them by hand.
#[derive(Default)]
struct CapturingTarget {
    reachable: bool,
    captured: Mutex<Vec<InboundRequest>>,
}

impl CapturingTarget {
    fn reachable() -> Self {
        Self {
            reachable: true,
            captured: Mutex::new(Vec::new()),
        }
    }

    fn take(&self) -> Vec<InboundRequest> {
        std::mem::take(&mut *self.captured.lock().expect("capture lock"))
    }
}

impl BridgeTarget for CapturingTarget {
    fn name(&self) -> &str {
        "capture"
    }

    fn is_reachable(&self) -> bool {
        self.reachable
    }

    fn post(&self, request: InboundRequest) {
        self.captured.lock().expect("capture lock").push(request);
    }
}

fn parent_correlator() -> Correlator {
    Correlator::new(Direction::FromParent)
}

#[tokio::test]
async fn call_resolves_with_reply_payload() {
    let frame = InProcessContext::spawn("regifyFrame", ContextRole::Frame, Arc::new(EchoHandler));
    let correlator = parent_correlator();

    let reply = correlator
        .call(&frame.target(), json!({"op": "ping"}), Duration::from_secs(1))
        .await
        .expect("call should resolve");

    assert_eq!(reply, json!({"echo": {"op": "ping"}}));
    assert_eq!(correlator.listeners().active_listeners(), 0);
}

#[tokio::test]
async fn remote_error_rejects_call() {
    let frame = InProcessContext::spawn("regifyFrame", ContextRole::Frame, Arc::new(FailingHandler));
    let correlator = parent_correlator();

    let result = correlator
        .call(&frame.target(), json!({}), Duration::from_secs(1))
        .await;

    assert_eq!(
        result,
        Err(BridgeError::Remote(ErrorPayload::new(
            "host",
            "compose window vanished"
        )))
    );
    assert_eq!(correlator.listeners().active_listeners(), 0);
}

#[tokio::test]
async fn unreachable_target_fails_immediately() {
    let target = CapturingTarget::default();
    let correlator = parent_correlator();

    let result = correlator
        .call(&target, json!({}), Duration::from_secs(5))
        .await;

    assert!(matches!(result, Err(BridgeError::TargetNotFound { .. })));
    assert!(target.take().is_empty());
}

#[tokio::test(start_paused = true)]
async fn timeout_rejects_no_earlier_than_bound() {
    let frame = InProcessContext::spawn("regifyFrame", ContextRole::Frame, Arc::new(SilentHandler));
    let correlator = parent_correlator();
    let bound = Duration::from_millis(5000);
    let started = Instant::now();

    let result = correlator.call(&frame.target(), json!({}), bound).await;

    assert!(matches!(
        result,
        Err(BridgeError::Timeout { timeout_ms: 5000, .. })
    ));
    assert!(started.elapsed() >= bound);
    assert_eq!(correlator.listeners().active_listeners(), 0);
}

#[tokio::test(start_paused = true)]
async fn late_reply_after_timeout_is_dropped() {
    let target = CapturingTarget::reachable();
    let correlator = parent_correlator();

    let result = correlator
        .call(&target, json!({}), Duration::from_millis(50))
        .await;
    assert!(matches!(result, Err(BridgeError::Timeout { .. })));

    let requests = target.take();
    let request = requests.first().expect("request captured");
    let delivered = request.reply.post(Envelope::response(
        Direction::IframeResponse,
        Ok(json!("late")),
    ));

    assert!(!delivered);
    assert_eq!(correlator.listeners().active_listeners(), 0);
}

#[tokio::test]
async fn duplicate_reply_has_no_effect() {
    let target = Arc::new(CapturingTarget::reachable());
    let correlator = parent_correlator();
    let call_target = Arc::clone(&target);
    let call_correlator = correlator.clone();
    let call = tokio::spawn(async move {
        call_correlator
            .call(call_target.as_ref(), json!({}), Duration::from_secs(5))
            .await
    });

    let request = loop {
        if let Some(request) = target.take().pop() {
            break request;
        }
        tokio::task::yield_now().await;
    };
    let first = request.reply.post(Envelope::response(
        Direction::IframeResponse,
        Ok(json!("first")),
    ));
    let second = request.reply.clone().post(Envelope::response(
        Direction::IframeResponse,
        Ok(json!("second")),
    ));

    let outcome = call.await.expect("call task joins");
    assert!(first);
    assert!(!second);
    assert_eq!(outcome, Ok(json!("first")));
}

#[tokio::test]
async fn reply_with_wrong_tag_is_rejected() {
    let target = Arc::new(CapturingTarget::reachable());
    let correlator = parent_correlator();
    let call_target = Arc::clone(&target);
    let call_correlator = correlator.clone();
    let call = tokio::spawn(async move {
        call_correlator
            .call(call_target.as_ref(), json!({}), Duration::from_secs(5))
            .await
    });

    let request = loop {
        if let Some(request) = target.take().pop() {
            break request;
        }
        tokio::task::yield_now().await;
    };
    request.reply.post(Envelope::response(
        Direction::ParentResponse,
        Ok(json!("misrouted")),
    ));

    let outcome = call.await.expect("call task joins");
    assert_eq!(
        outcome,
        Err(BridgeError::UnexpectedDirection {
            expected: Direction::IframeResponse,
            actual: Direction::ParentResponse,
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_calls_receive_their_own_replies() {
    let frame = InProcessContext::spawn("regifyFrame", ContextRole::Frame, Arc::new(EchoHandler));
    let correlator = parent_correlator();
    let target = frame.target();

    let calls = (0..16).map(|index| {
        let call_correlator = correlator.clone();
        let call_target = target.clone();
        tokio::spawn(async move {
            call_correlator
                .call(&call_target, json!(index), Duration::from_secs(5))
                .await
        })
    });
    let handles: Vec<_> = calls.collect();

    for (index, handle) in handles.into_iter().enumerate() {
        let reply = handle
            .await
            .expect("task joins")
            .expect("call resolves");
        assert_eq!(reply, json!({ "echo": index }));
    }
    assert_eq!(correlator.listeners().active_listeners(), 0);
}

#[tokio::test]
async fn parent_endpoint_rejects_unknown_frame() {
    let parent = ParentEndpoint::new(Duration::from_secs(1));

    let result = parent.ask_frame("regifyFrame", json!({}), None).await;

    assert_eq!(
        result,
        Err(BridgeError::TargetNotFound {
            target: "regifyFrame".to_owned()
        })
    );
}

#[tokio::test]
async fn endpoints_talk_both_ways() {
    let host = InProcessContext::spawn("parent", ContextRole::Parent, Arc::new(EchoHandler));
    let frame = InProcessContext::spawn("regifyFrame", ContextRole::Frame, Arc::new(EchoHandler));
    let parent = ParentEndpoint::new(Duration::from_secs(1));
    parent.attach_frame("regifyFrame", Arc::new(frame.target()));
    let child = FrameEndpoint::new(Arc::new(host.target()), Duration::from_secs(1));

    let down = parent
        .ask_frame("regifyFrame", json!("down"), None)
        .await
        .expect("frame answers");
    let up = child.ask_parent(json!("up"), None).await.expect("parent answers");

    assert_eq!(down, json!({"echo": "down"}));
    assert_eq!(up, json!({"echo": "up"}));
}

#[tokio::test]
async fn listener_ignores_envelopes_for_the_other_side() {
    let frame = InProcessContext::spawn("regifyFrame", ContextRole::Frame, Arc::new(EchoHandler));
    // A frame only serves `from_parent`; requests tagged `from_iframe` go unanswered.
    let correlator = Correlator::new(Direction::FromIframe);

    let result = correlator
        .call(&frame.target(), json!({}), Duration::from_millis(100))
        .await;

    assert!(matches!(result, Err(BridgeError::Timeout { .. })));
}
