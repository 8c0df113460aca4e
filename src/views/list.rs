use tracing::warn;

use super::epoch::{MountEpoch, Ticket};
use super::form::{Editable, FormController};
use super::render::{render_detail, render_table, Tabular};
use crate::client::resource::{Resource, ResourceClient};
use crate::models::Id;
use crate::utils::error::ClientError;

/// Fetched snapshot of one collection, owned by the view that shows it.
///
/// The snapshot is replaced wholesale on every refresh. A failed refresh
/// leaves an empty list and an error indicator instead of failing the view.
pub struct ListView<R: Resource> {
    client: ResourceClient<R>,
    records: Vec<R::Record>,
    error: Option<String>,
    epoch: MountEpoch,
}

impl<R: Resource> ListView<R>
where
    R::Record: Tabular,
{
    /// Mounts the view and performs the initial fetch.
    pub async fn mount(client: ResourceClient<R>) -> Self {
        let mut view = Self {
            client,
            records: Vec::new(),
            error: None,
            epoch: MountEpoch::new(),
        };
        view.refresh().await;
        view
    }

    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Handle for whoever navigates away from this view.
    pub fn epoch(&self) -> MountEpoch {
        self.epoch.clone()
    }

    pub fn unmount(&self) {
        self.epoch.advance();
    }

    pub async fn refresh(&mut self) {
        let ticket = self.epoch.ticket();
        let result = self.client.list().await;
        self.apply(ticket, result);
    }

    /// Applies a fetch result if the view is still mounted under `ticket`.
    /// Returns whether the result was applied.
    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<R::Record>, ClientError>) -> bool {
        if !self.epoch.is_current(ticket) {
            warn!(resource = R::NAME, "Discarding response for unmounted view");
            return false;
        }
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                e.log();
                self.records.clear();
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Deletes a record and re-fetches the collection.
    pub async fn remove(&mut self, id: &Id) -> Result<(), ClientError> {
        self.client.remove(id).await?;
        self.refresh().await;
        Ok(())
    }

    pub fn render(&self) -> String {
        let table = render_table(&self.records);
        match &self.error {
            Some(error) => format!("[error] {error}\n{table}"),
            None => table,
        }
    }
}

impl<R: Editable> ListView<R>
where
    R::Record: Tabular,
{
    /// Submits a draft and, on success, re-fetches the collection.
    pub async fn submit(&mut self, form: &mut FormController<R>) -> Result<R::Record, ClientError> {
        let record = form.submit().await?;
        self.refresh().await;
        Ok(record)
    }
}

/// Single-record view.
pub async fn show<R: Resource>(client: &ResourceClient<R>, id: &Id) -> Result<String, ClientError>
where
    R::Record: Tabular,
{
    let record = client.get(id).await?;
    Ok(render_detail(&record))
}
