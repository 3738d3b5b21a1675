//! In-memory host adapters.

use crate::dispatch::{adapters::RecordingNotifier, domain::Notification, ports::Notifier};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn cloned_notifiers_share_their_history() {
    let notifier = RecordingNotifier::new(DefaultClock);
    let shared = notifier.clone();

    shared
        .notify(&Notification::error("Executable [regify client] not found!"))
        .await
        .expect("notification is recorded");

    assert_eq!(
        notifier.shown(),
        vec![Notification::error("Executable [regify client] not found!")]
    );
    assert_eq!(notifier.history().len(), 1);
}
