use crate::cli::{DraftArgs, EventCommand, UserCommand};
use crate::client::resources::{Colleges, Events, Locations, Users};
use crate::client::{HttpClient, Resource, ResourceClient};
use crate::models::{Id, User};
use crate::utils::error::ClientError;
use crate::views::form::{Editable, FormController};
use crate::views::list::{show, ListView};
use crate::views::render::{render_detail, render_table, Tabular};

use super::fill;

pub(super) async fn users(command: UserCommand, http: HttpClient) -> Result<String, ClientError> {
    let client = ResourceClient::<Users>::new(http.clone());
    match command {
        UserCommand::List => Ok(list(client).await),
        UserCommand::Get { id } => show(&client, &Id::new(&id)).await,
        UserCommand::Search { username, email } => {
            let params = match (non_blank(username), non_blank(email)) {
                (Some(username), _) => [("username", username)],
                (None, Some(email)) => [("email", email)],
                (None, None) => {
                    return Err(ClientError::MissingField("username or email".to_string()))
                }
            };
            let found = client.search(&params).await?;
            Ok(render_table(&found))
        }
        UserCommand::Create(draft) => create(client, &draft).await,
        UserCommand::Update { id, draft } => {
            let id = Id::new(&id);
            let existing = listed(&client, &id).await?;
            let mut form = update_draft(&client, &existing, &id, &draft)?;
            resolve_references(&http, &existing, &mut form).await?;
            submit_update(client, form, &id).await
        }
        UserCommand::Delete { id } => delete(client, &Id::new(&id)).await,
    }
}

pub(super) async fn events(command: EventCommand, http: HttpClient) -> Result<String, ClientError> {
    let client = ResourceClient::<Events>::new(http);
    match command {
        EventCommand::List => Ok(list(client).await),
        // Events have no single-record read; pick it out of the list.
        EventCommand::Get { id } => Ok(render_detail(&listed(&client, &Id::new(&id)).await?)),
        EventCommand::Search { keyword } => {
            let keyword = non_blank(Some(keyword))
                .ok_or_else(|| ClientError::MissingField("keyword".to_string()))?;
            let found = client.search(&[("keyword", keyword)]).await?;
            Ok(render_table(&found))
        }
        EventCommand::ByCreator { creator_id } => {
            let found = client.list_by("by-creator", &Id::new(&creator_id)).await?;
            Ok(render_table(&found))
        }
        EventCommand::Create(draft) => create(client, &draft).await,
        EventCommand::Update { id, draft } => update(client, &Id::new(&id), &draft).await,
        EventCommand::Delete { id } => delete(client, &Id::new(&id)).await,
    }
}

pub(super) async fn colleges(http: HttpClient) -> String {
    list(ResourceClient::<Colleges>::new(http)).await
}

pub(super) async fn locations(http: HttpClient) -> String {
    list(ResourceClient::<Locations>::new(http)).await
}

async fn list<R: Resource>(client: ResourceClient<R>) -> String
where
    R::Record: Tabular,
{
    ListView::mount(client).await.render()
}

async fn create<R: Editable>(client: ResourceClient<R>, draft: &DraftArgs) -> Result<String, ClientError>
where
    R::Record: Tabular,
{
    let mut form = FormController::new(client.clone());
    fill(&mut form, &draft.fields)?;
    form.payload()?;

    let mut view = ListView::mount(client).await;
    let record = view.submit(&mut form).await?;
    Ok(format!(
        "Created {}:\n{}\n\n{}",
        R::NAME,
        render_detail(&record),
        view.render()
    ))
}

async fn update<R: Editable>(
    client: ResourceClient<R>,
    id: &Id,
    draft: &DraftArgs,
) -> Result<String, ClientError>
where
    R::Record: Tabular,
{
    let existing = listed(&client, id).await?;
    let form = update_draft(&client, &existing, id, draft)?;
    submit_update(client, form, id).await
}

/// Record `id` as the list shows it.
async fn listed<R: Editable>(client: &ResourceClient<R>, id: &Id) -> Result<R::Record, ClientError> {
    client
        .list()
        .await?
        .into_iter()
        .find(|record| R::record_id(record).as_ref() == Some(id))
        .ok_or_else(|| ClientError::NotFound(format!("{} {id} does not exist", R::NAME)))
}

/// Loads the listed record into the draft, then applies the given fields on
/// top, the way the update dialog pre-fills its inputs.
fn update_draft<R: Editable>(
    client: &ResourceClient<R>,
    existing: &R::Record,
    id: &Id,
    draft: &DraftArgs,
) -> Result<FormController<R>, ClientError> {
    let mut form = FormController::new(client.clone());
    form.load(existing);
    form.set_target(Some(id.clone()));
    fill(&mut form, &draft.fields)?;
    Ok(form)
}

/// Users are read with location and college names but written with ids.
/// Fills whichever id the draft still lacks by looking the name up.
async fn resolve_references(
    http: &HttpClient,
    existing: &User,
    form: &mut FormController<Users>,
) -> Result<(), ClientError> {
    if is_blank(form.field("locationId")) {
        if let Some(name) = existing.location.as_deref() {
            let locations = ResourceClient::<Locations>::new(http.clone()).list().await?;
            if let Some(location) = locations.iter().find(|l| l.name == name) {
                form.set_field("locationId", location.id.to_string())?;
            }
        }
    }
    if is_blank(form.field("collegeId")) {
        if let Some(name) = existing.college.as_deref() {
            let colleges = ResourceClient::<Colleges>::new(http.clone()).list().await?;
            if let Some(college) = colleges.iter().find(|c| c.name == name) {
                form.set_field("collegeId", college.id.to_string())?;
            }
        }
    }
    Ok(())
}

async fn submit_update<R: Editable>(
    client: ResourceClient<R>,
    mut form: FormController<R>,
    id: &Id,
) -> Result<String, ClientError>
where
    R::Record: Tabular,
{
    form.payload()?;

    let mut view = ListView::mount(client).await;
    let record = view.submit(&mut form).await?;
    Ok(format!(
        "Updated {} {id}:\n{}\n\n{}",
        R::NAME,
        render_detail(&record),
        view.render()
    ))
}

async fn delete<R: Resource>(client: ResourceClient<R>, id: &Id) -> Result<String, ClientError>
where
    R::Record: Tabular,
{
    let mut view = ListView::mount(client).await;
    view.remove(id).await?;
    Ok(format!("Deleted {} {id}\n\n{}", R::NAME, view.render()))
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
