//! Then steps for regimail send scenarios.

use super::world::SendWorld;
use rstest_bdd_macros::then;

#[then("the send window is open")]
fn send_window_open(world: &SendWorld) -> Result<(), eyre::Report> {
    if world.last_opened != Some(true) {
        return Err(eyre::eyre!("send flow did not open a window"));
    }
    let windows = world.windows.open_windows();
    let (_, spec) = windows
        .first()
        .ok_or_else(|| eyre::eyre!("no window open"))?;
    if spec.url != "regifySendWindow.html" {
        return Err(eyre::eyre!("unexpected window page {}", spec.url));
    }
    Ok(())
}

#[then("no window is open")]
fn no_window_open(world: &SendWorld) -> Result<(), eyre::Report> {
    let windows = world.windows.open_windows();
    if !windows.is_empty() {
        return Err(eyre::eyre!("expected no window, found {}", windows.len()));
    }
    Ok(())
}

#[then("no notification was shown")]
fn no_notification(world: &SendWorld) -> Result<(), eyre::Report> {
    let shown = world.notifier.shown();
    if !shown.is_empty() {
        return Err(eyre::eyre!("unexpected notifications: {shown:?}"));
    }
    Ok(())
}

#[then(r#"the notification "{message}" was shown"#)]
fn notification_shown(world: &SendWorld, message: String) -> Result<(), eyre::Report> {
    let shown = world.notifier.shown();
    if !shown.iter().any(|notification| notification.message == message) {
        return Err(eyre::eyre!("notification {message:?} missing from {shown:?}"));
    }
    Ok(())
}

#[then(r#"the session carries only the attachment "{name}""#)]
fn only_attachment(world: &SendWorld, name: String) -> Result<(), eyre::Report> {
    let tab = world
        .tab
        .ok_or_else(|| eyre::eyre!("missing compose session in scenario world"))?;
    let contents = world.compose.attachment_contents(tab);
    let names: Vec<_> = contents.iter().map(|(stored, _, _)| stored.clone()).collect();
    if names != vec![name] {
        return Err(eyre::eyre!("unexpected attachments {names:?}"));
    }
    Ok(())
}
