//! When steps for regimail send scenarios.

use std::sync::Arc;
use std::time::Duration;

use super::world::{SendWorld, run_async};
use eyre::WrapErr;
use regimail::bridge::{
    adapters::InProcessContext,
    services::{ContextRole, FrameEndpoint},
};
use rstest_bdd_macros::when;
use serde_json::json;

#[when("the user starts the regimail send flow")]
fn start_send_flow(world: &mut SendWorld) -> Result<(), eyre::Report> {
    let tab = world
        .tab
        .ok_or_else(|| eyre::eyre!("missing compose session in scenario world"))?;
    let opened = run_async(world.workflow.create_regimail(tab)).wrap_err("run send flow")?;
    world.last_opened = Some(opened);
    Ok(())
}

#[when(r#"the application attaches the file "{path}""#)]
fn application_attaches(world: &mut SendWorld, path: String) -> Result<(), eyre::Report> {
    let dispatcher = Arc::clone(&world.dispatcher);
    let reply = run_async(async move {
        let parent = InProcessContext::spawn("parent", ContextRole::Parent, dispatcher);
        let frame = FrameEndpoint::new(Arc::new(parent.target()), Duration::from_secs(5));
        let answer = frame
            .ask_parent(
                json!({
                    "op": "setAttachment",
                    "mode": "compose",
                    "filename": path,
                    "attachment": [82, 71, 70],
                }),
                None,
            )
            .await;
        parent.close();
        answer
    })
    .wrap_err("send setAttachment across the bridge")?;
    if reply != json!(true) {
        return Err(eyre::eyre!("unexpected setAttachment reply {reply}"));
    }
    Ok(())
}
