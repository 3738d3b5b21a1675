//! Toolbar actions and selection tracking.

use super::Host;
use crate::addon::{adapters::StaticProbe, domain::Notice, services::AddonWorkflow};
use crate::config::AddonConfig;
use crate::dispatch::domain::{ComposeDetails, MessageHeader, MessageId, WindowGeometry};
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn host() -> Host {
    Host::new()
}

fn ready_to_send() -> ComposeDetails {
    ComposeDetails {
        subject: "Quarterly figures".to_owned(),
        to: vec!["bob@example.com".to_owned()],
        from: "ana@example.com".to_owned(),
        ..ComposeDetails::default()
    }
}

fn seed_message(host: &Host, id: u64, attachment: Option<&str>) -> MessageId {
    let message = MessageId::new(id);
    host.mailbox
        .insert_message(message, MessageHeader::default());
    if let Some(name) = attachment {
        host.mailbox.add_attachment(message, name, Some(b"rgf".to_vec()));
    }
    message
}

// ── Send flow ──

#[rstest]
#[tokio::test]
async fn valid_session_opens_send_window(host: Host) {
    let tab = host.compose.open_session(ready_to_send());
    let workflow = host.workflow(&StaticProbe::new());

    let opened = workflow.create_regimail(tab).await.expect("runs");

    assert!(opened);
    assert_eq!(host.session.compose_tab(), Some(tab));
    let windows = host.windows.open_windows();
    let (_, spec) = windows.first().expect("window open");
    assert_eq!(spec.url, "regifySendWindow.html");
    assert!(host.messages().is_empty());
}

#[rstest]
#[case::bcc_checked_first(
    ComposeDetails { bcc: vec!["eve@example.com".to_owned()], subject: String::new(), ..ready_to_send() },
    Notice::NoBcc
)]
#[case::empty_subject(
    ComposeDetails { subject: String::new(), to: Vec::new(), ..ready_to_send() },
    Notice::NoEmptySubject
)]
#[case::no_recipients(
    ComposeDetails { to: Vec::new(), ..ready_to_send() },
    Notice::OneRecipient
)]
#[tokio::test]
async fn invalid_session_is_refused(
    host: Host,
    #[case] details: ComposeDetails,
    #[case] notice: Notice,
) {
    let tab = host.compose.open_session(details);
    let workflow = host.workflow(&StaticProbe::new());

    let opened = workflow.create_regimail(tab).await.expect("runs");

    assert!(!opened);
    assert!(host.windows.open_windows().is_empty());
    let shown = host.notifier.shown();
    let notification = shown.first().expect("notification");
    assert_eq!(notification.message, notice.text());
    assert!(notification.is_error);
}

#[rstest]
#[tokio::test]
async fn carbon_copy_alone_is_enough(host: Host) {
    let tab = host.compose.open_session(ComposeDetails {
        to: Vec::new(),
        cc: vec!["carol@example.com".to_owned()],
        ..ready_to_send()
    });
    let workflow = host.workflow(&StaticProbe::new());

    assert!(workflow.create_regimail(tab).await.expect("runs"));
}

// ── Read flow ──

#[rstest]
#[tokio::test]
async fn selecting_a_regimail_enables_reading(host: Host) {
    let message = seed_message(&host, 7, Some("secure.rgf"));
    let workflow = host.workflow(&StaticProbe::new());

    assert!(workflow.selection_changed(Some(message)).await);
    assert_eq!(host.session.selected_message(), Some(message));

    assert!(workflow.read_regimail().await.expect("runs"));
    let windows = host.windows.open_windows();
    let (_, spec) = windows.first().expect("window open");
    assert_eq!(spec.url, "regifyReadWindow.html");
}

#[rstest]
#[tokio::test]
async fn selecting_other_mail_clears_selection(host: Host) {
    let carrier = seed_message(&host, 7, Some("secure.rgf"));
    let plain = seed_message(&host, 8, Some("notes.txt"));
    let workflow = host.workflow(&StaticProbe::new());

    assert!(workflow.selection_changed(Some(carrier)).await);
    assert!(!workflow.selection_changed(Some(plain)).await);
    assert_eq!(host.session.selected_message(), None);

    assert!(workflow.selection_changed(Some(carrier)).await);
    assert!(!workflow.selection_changed(None).await);
    assert_eq!(host.session.selected_message(), None);
}

#[rstest]
#[tokio::test]
async fn unknown_message_is_not_selectable(host: Host) {
    let workflow = host.workflow(&StaticProbe::new());

    assert!(!workflow.selection_changed(Some(MessageId::new(99))).await);
    assert_eq!(host.session.selected_message(), None);
}

#[rstest]
#[tokio::test]
async fn reading_without_selection_does_nothing(host: Host) {
    let workflow = host.workflow(&StaticProbe::new());

    assert!(!workflow.read_regimail().await.expect("runs"));
    assert!(host.windows.open_windows().is_empty());
    assert!(host.messages().is_empty());
}

#[rstest]
#[tokio::test]
async fn reading_a_plain_message_shows_information(host: Host) {
    let message = seed_message(&host, 3, None);
    host.session.set_selected_message(Some(message));
    let workflow = host.workflow(&StaticProbe::new());

    assert!(!workflow.read_regimail().await.expect("runs"));
    let shown = host.notifier.shown();
    let notification = shown.first().expect("notification");
    assert_eq!(notification.message, Notice::NoRegimail.text());
    assert!(!notification.is_error);
}

#[rstest]
#[tokio::test]
async fn finds_first_regimail_attachment(host: Host) {
    let message = seed_message(&host, 4, Some("readme.txt"));
    host.mailbox.add_attachment(message, "first.rgp", None);
    host.mailbox.add_attachment(message, "second.rgf", None);
    let workflow = host.workflow(&StaticProbe::new());

    let found = workflow
        .find_regimail_attachment(message)
        .await
        .expect("lists")
        .expect("regimail present");

    assert_eq!(found.name, "first.rgp");
}

// ── Window ──

#[rstest]
#[tokio::test]
async fn close_window_reports_closed_window(host: Host) {
    let tab = host.compose.open_session(ready_to_send());
    let workflow = host.workflow(&StaticProbe::new());
    workflow.create_regimail(tab).await.expect("runs");
    let open = host.session.open_window();

    assert_eq!(workflow.close_window().await.expect("closes"), open);
    assert_eq!(workflow.close_window().await.expect("closes"), None);
    assert!(host.windows.open_windows().is_empty());
}

#[rstest]
#[tokio::test]
async fn configuration_sizes_window_and_selects_servers(host: Host) {
    let config = AddonConfig {
        default_window_width: 800,
        default_window_height: 640,
        server_domain: "regify.test".to_owned(),
        server_count: 1,
        ..AddonConfig::default()
    };
    let probe = StaticProbe::new();
    let workflow = AddonWorkflow::from_config(
        host.services.clone(),
        Arc::clone(&host.session),
        Arc::new(probe.clone()),
        &config,
    );
    let tab = host.compose.open_session(ready_to_send());

    workflow.create_regimail(tab).await.expect("runs");
    workflow.locator().locate().await.expect("locates");

    let windows = host.windows.open_windows();
    let (_, spec) = windows.first().expect("window open");
    assert_eq!(
        spec.geometry,
        WindowGeometry {
            width: 800,
            height: 640,
            top: None,
            left: None,
        }
    );
    assert_eq!(
        probe.probed(),
        vec!["https://apps1.regify.test/client/check.html"]
    );
}
