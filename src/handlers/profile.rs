use crate::cli::ProfileCommand;
use crate::client::resources::{Colleges, Locations};
use crate::client::ResourceClient;
use crate::session::{SessionGate, SessionState};
use crate::utils::error::ClientError;
use crate::views::list::ListView;
use crate::views::render::render_detail;

use super::fill;

pub(super) async fn handle(
    command: ProfileCommand,
    gate: &SessionGate,
    state: &SessionState,
) -> Result<String, ClientError> {
    match (command, state) {
        (ProfileCommand::Show, SessionState::Ready { profile, .. }) => Ok(render_detail(profile)),
        (ProfileCommand::Show, _) => choices(gate).await,
        (ProfileCommand::Create(_), SessionState::Ready { profile, .. }) => Ok(format!(
            "Profile already exists:\n{}",
            render_detail(profile)
        )),
        (ProfileCommand::Create(draft), _) => {
            let mut form = gate.profile_form();
            fill(&mut form, &draft.fields)?;
            let profile = form.submit().await?;
            Ok(format!("Profile created:\n{}", render_detail(&profile)))
        }
    }
}

/// What the profile-creation page offers: the reference lists to pick a
/// location and college from.
async fn choices(gate: &SessionGate) -> Result<String, ClientError> {
    let http = gate.http().clone();
    let locations = ListView::mount(ResourceClient::<Locations>::new(http.clone())).await;
    let colleges = ListView::mount(ResourceClient::<Colleges>::new(http)).await;
    Ok(format!(
        "No profile yet. Create one with `nuboard profile create -f username=.. -f program=.. -f locationId=.. -f collegeId=..`\n\nLocations:\n{}\n\nColleges:\n{}",
        locations.render(),
        colleges.render()
    ))
}
