//! Integration tests for application requests served across the bridge.
//!
//! A frame endpoint plays the sandboxed application and asks the parent
//! context, which answers with a [`CommandDispatcher`] over in-memory host
//! adapters.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use regimail::bridge::{
    adapters::InProcessContext,
    domain::{BridgeError, ErrorPayload},
    services::{ContextRole, FrameEndpoint},
};
use regimail::dispatch::{
    adapters::{
        InMemoryComposeHost, InMemoryMailbox, InMemorySettingsStore, InMemoryWindowHost,
        RecordingNotifier, StaticRuntimeInfo, TagStrippingConverter,
    },
    domain::{ComposeDetails, MessageHeader, MessageId},
    services::{CommandDispatcher, HostServices, SessionState},
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Link {
    _parent: InProcessContext,
    frame: FrameEndpoint,
    session: Arc<SessionState>,
    mailbox: InMemoryMailbox,
    compose: InMemoryComposeHost,
}

impl Link {
    async fn ask(&self, request: Value) -> Result<Value, BridgeError> {
        self.frame.ask_parent(request, None).await
    }
}

#[fixture]
fn link() -> Link {
    let session = Arc::new(SessionState::new());
    let mailbox = InMemoryMailbox::new();
    let compose = InMemoryComposeHost::new();
    let host = HostServices {
        settings: Arc::new(InMemorySettingsStore::new()),
        messages: Arc::new(mailbox.clone()),
        compose: Arc::new(compose.clone()),
        windows: Arc::new(InMemoryWindowHost::new()),
        notifier: Arc::new(RecordingNotifier::new(DefaultClock)),
        runtime: Arc::new(StaticRuntimeInfo::new("mac", "2.4.0")),
        text: Arc::new(TagStrippingConverter),
    };
    let dispatcher = CommandDispatcher::new(host, Arc::clone(&session));
    let parent = InProcessContext::spawn("parent", ContextRole::Parent, Arc::new(dispatcher));
    let frame = FrameEndpoint::new(Arc::new(parent.target()), Duration::from_secs(5));
    Link {
        _parent: parent,
        frame,
        session,
        mailbox,
        compose,
    }
}

#[rstest]
#[tokio::test]
async fn application_reads_the_selected_message(link: Link) {
    let message = MessageId::new(11);
    link.mailbox.insert_message(
        message,
        MessageHeader {
            subject: "Contract".to_owned(),
            recipients: vec!["Bob <bob@example.com>".to_owned()],
            cc_list: vec!["carol@example.com".to_owned()],
            author: "Ana Lima <ana@example.com>".to_owned(),
        },
    );
    link.mailbox
        .add_attachment(message, "contract.rgf", Some(vec![1, 2, 3]));
    link.session.set_selected_message(Some(message));

    let subject = link.ask(json!({"op": "getSubject"})).await.expect("answers");
    let recipients = link
        .ask(json!({"op": "getRecipients", "mode": "read"}))
        .await
        .expect("answers");
    let sender = link.ask(json!({"op": "getSender"})).await.expect("answers");
    let name = link
        .ask(json!({"op": "getAttachmentFilename", "id": 1}))
        .await
        .expect("answers");
    let bytes = link
        .ask(json!({"op": "getAttachmentBinary", "id": 1}))
        .await
        .expect("answers");

    assert_eq!(subject, json!("Contract"));
    assert_eq!(recipients, json!(["bob@example.com", "carol@example.com"]));
    assert_eq!(sender, json!("ana@example.com"));
    assert_eq!(name, json!("contract.rgf"));
    assert_eq!(bytes, json!([1, 2, 3]));
}

#[rstest]
#[tokio::test]
async fn application_replaces_compose_attachments(link: Link) {
    let tab = link.compose.open_session(ComposeDetails {
        subject: "Figures".to_owned(),
        to: vec!["bob@example.com".to_owned()],
        body: "<p>See attached</p>".to_owned(),
        ..ComposeDetails::default()
    });
    link.session.set_compose_tab(Some(tab));

    let stored = link
        .ask(json!({
            "op": "setAttachment",
            "mode": "compose",
            "filename": "/tmp/regify-1/figures.rgf",
            "attachment": [82, 71, 70],
        }))
        .await
        .expect("answers");
    let body = link
        .ask(json!({"op": "getBodyHTML", "mode": "compose"}))
        .await
        .expect("answers");

    assert_eq!(stored, json!(true));
    assert_eq!(body, json!("<p>See attached</p>"));
    let contents = link.compose.attachment_contents(tab);
    let names: Vec<_> = contents.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(names, vec!["figures.rgf"]);
}

#[rstest]
#[tokio::test]
async fn missing_compose_session_is_a_remote_error(link: Link) {
    let result = link
        .ask(json!({"op": "getBodyPlain", "mode": "compose"}))
        .await;

    assert_eq!(
        result,
        Err(BridgeError::Remote(ErrorPayload::new(
            "no_active_context",
            "no active compose context"
        )))
    );
}

#[rstest]
#[tokio::test]
async fn unknown_operation_answers_null(link: Link) {
    let reply = link.ask(json!({"op": "launchRocket"})).await.expect("answers");

    assert_eq!(reply, Value::Null);
}

#[rstest]
#[tokio::test]
async fn host_info_crosses_the_bridge(link: Link) {
    let info = link.ask(json!({"op": "getHostInfo"})).await.expect("answers");

    assert_eq!(info.get("os"), Some(&json!("mac")));
    assert_eq!(info.get("version"), Some(&json!("2.4.0")));
}
