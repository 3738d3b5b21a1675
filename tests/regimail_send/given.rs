//! Given steps for regimail send scenarios.

use super::world::{SendWorld, run_async};
use eyre::WrapErr;
use regimail::dispatch::{
    domain::{ComposeDetails, NewAttachment},
    ports::ComposeAccessor,
};
use rstest_bdd_macros::given;

fn open_session(world: &mut SendWorld, subject: String, recipient: String) {
    world.tab = Some(world.compose.open_session(ComposeDetails {
        subject,
        to: vec![recipient],
        from: "ana@example.com".to_owned(),
        body: "<p>Figures attached.</p>".to_owned(),
        ..ComposeDetails::default()
    }));
}

#[given(r#"a compose session with subject "{subject}" to "{recipient}""#)]
fn compose_session(world: &mut SendWorld, subject: String, recipient: String) {
    open_session(world, subject, recipient);
}

#[given(r#"a compose session without subject to "{recipient}""#)]
fn compose_session_without_subject(world: &mut SendWorld, recipient: String) {
    open_session(world, String::new(), recipient);
}

#[given(r#"the session blind copies "{recipient}""#)]
fn blind_copy(world: &mut SendWorld, recipient: String) -> Result<(), eyre::Report> {
    let tab = world
        .tab
        .ok_or_else(|| eyre::eyre!("missing compose session in scenario world"))?;
    let mut details = world
        .compose
        .details(tab)
        .ok_or_else(|| eyre::eyre!("compose session {tab} vanished"))?;
    details.bcc.push(recipient);
    world.tab = Some(world.compose.open_session(details));
    Ok(())
}

#[given(r#"the session has the attachment "{name}""#)]
fn existing_attachment(world: &mut SendWorld, name: String) -> Result<(), eyre::Report> {
    let tab = world
        .tab
        .ok_or_else(|| eyre::eyre!("missing compose session in scenario world"))?;
    let attachment = NewAttachment {
        name,
        content_type: "application/pdf".to_owned(),
        bytes: b"%PDF".to_vec(),
    };
    run_async(world.compose.add_attachment(tab, &attachment)).wrap_err("seed attachment")?;
    Ok(())
}
