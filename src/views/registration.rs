use reqwest::Method;
use tracing::{info, warn};

use super::epoch::MountEpoch;
use super::render::render_table;
use crate::client::resource::ResourceClient;
use crate::client::resources::Registrations;
use crate::models::{Id, Registration};
use crate::utils::error::ClientError;

/// Registrations of one event, re-fetched after every change.
pub struct RegistrationPanel {
    client: ResourceClient<Registrations>,
    event_id: Id,
    records: Vec<Registration>,
    error: Option<String>,
    epoch: MountEpoch,
}

impl RegistrationPanel {
    pub async fn open(client: ResourceClient<Registrations>, event_id: Id) -> Self {
        let mut panel = Self {
            client,
            event_id,
            records: Vec::new(),
            error: None,
            epoch: MountEpoch::new(),
        };
        panel.refresh().await;
        panel
    }

    pub fn event_id(&self) -> &Id {
        &self.event_id
    }

    pub fn records(&self) -> &[Registration] {
        &self.records
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn close(&self) {
        self.epoch.advance();
    }

    pub fn is_registered(&self, user_id: &Id) -> bool {
        self.records.iter().any(|r| &r.user_id == user_id)
    }

    pub async fn refresh(&mut self) {
        let ticket = self.epoch.ticket();
        let result = event_registrations(&self.client, &self.event_id).await;
        if !self.epoch.is_current(ticket) {
            warn!(event_id = %self.event_id, "Discarding registrations for closed panel");
            return;
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
    }

    pub async fn register(&mut self, user_id: &Id) -> Result<Option<Registration>, ClientError> {
        let created = self
            .client
            .invoke(Method::POST, "register", &self.query(user_id))
            .await?;
        info!(event_id = %self.event_id, %user_id, "User registered for event");
        self.refresh().await;
        Ok(created)
    }

    pub async fn unregister(&mut self, user_id: &Id) -> Result<(), ClientError> {
        self.client
            .invoke(Method::DELETE, "unregister", &self.query(user_id))
            .await?;
        info!(event_id = %self.event_id, %user_id, "User unregistered from event");
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

    fn query(&self, user_id: &Id) -> [(&'static str, String); 2] {
        [
            ("userId", user_id.to_string()),
            ("eventId", self.event_id.to_string()),
        ]
    }
}

/// Registrations of one event. Records for other events are dropped.
pub async fn event_registrations(
    client: &ResourceClient<Registrations>,
    event_id: &Id,
) -> Result<Vec<Registration>, ClientError> {
    let mut records = client.list_by("event", event_id).await?;
    records.retain(|r| &r.event_id == event_id);
    Ok(records)
}

pub async fn user_registrations(
    client: &ResourceClient<Registrations>,
    user_id: &Id,
) -> Result<Vec<Registration>, ClientError> {
    let mut records = client.list_by("user", user_id).await?;
    records.retain(|r| &r.user_id == user_id);
    Ok(records)
}
