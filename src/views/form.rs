//! Draft state for create/update forms.
//!
//! A `FormController` owns exactly one in-progress draft: a map from field
//! name to the raw string the user typed. Submitting validates locally,
//! converts typed fields, and only then talks to the backend. The draft is
//! cleared on success and left untouched on failure.

use chrono::NaiveDateTime;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::client::resource::{Resource, ResourceClient};
use crate::models::event::EVENT_TIME_FORMAT;
use crate::models::Id;
use crate::utils::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Identifier or count sent as a JSON number.
    Number,
    /// Event time in `yyyy-MM-ddTHH:mm:ss`, sent as a string.
    Timestamp,
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: "",
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: "",
        }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self { default, ..self }
    }

    fn convert(&self, raw: &str) -> Result<Value, ClientError> {
        let invalid = |reason: String| ClientError::InvalidField {
            field: self.name.to_string(),
            reason,
        };
        match self.kind {
            FieldKind::Text => Ok(Value::String(raw.to_string())),
            FieldKind::Number => raw
                .parse::<i64>()
                .map(|n| Value::Number(Number::from(n)))
                .map_err(|_| invalid(format!("'{raw}' is not a number"))),
            FieldKind::Timestamp => NaiveDateTime::parse_from_str(raw, EVENT_TIME_FORMAT)
                .map(|_| Value::String(raw.to_string()))
                .map_err(|_| invalid(format!("'{raw}' is not of the form 2025-05-10T19:00:00"))),
            FieldKind::Choice(options) => {
                if options.contains(&raw) {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err(invalid(format!("expected one of {}", options.join(", "))))
                }
            }
        }
    }
}

/// A resource that can be created or updated through a form.
pub trait Editable: Resource {
    const FIELDS: &'static [FieldSpec];

    /// Field values used to pre-fill an update draft.
    fn draft_values(record: &Self::Record) -> Vec<(&'static str, String)>;

    fn record_id(record: &Self::Record) -> Option<Id>;
}

pub struct FormController<R: Editable> {
    values: BTreeMap<&'static str, String>,
    target: Option<Id>,
    client: ResourceClient<R>,
}

impl<R: Editable> FormController<R> {
    pub fn new(client: ResourceClient<R>) -> Self {
        Self {
            values: initial_values(R::FIELDS),
            target: None,
            client,
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), ClientError> {
        let spec = spec_for(R::FIELDS, name)?;
        self.values.insert(spec.name, value.into());
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Record the next `submit` updates; `None` means create.
    pub fn target(&self) -> Option<&Id> {
        self.target.as_ref()
    }

    pub fn set_target(&mut self, id: Option<Id>) {
        self.target = id;
    }

    /// Pre-fills the draft from an existing record and targets it for update.
    pub fn load(&mut self, record: &R::Record) {
        self.values = initial_values(R::FIELDS);
        for (name, value) in R::draft_values(record) {
            if let Some(spec) = R::FIELDS.iter().find(|spec| spec.name == name) {
                self.values.insert(spec.name, value);
            }
        }
        self.target = R::record_id(record);
    }

    pub fn clear(&mut self) {
        self.values = initial_values(R::FIELDS);
        self.target = None;
    }

    pub fn is_pristine(&self) -> bool {
        self.target.is_none() && self.values == initial_values(R::FIELDS)
    }

    /// Validates the draft and builds the request body. Empty optional fields
    /// are left out.
    pub fn payload(&self) -> Result<Value, ClientError> {
        let mut body = Map::new();
        for spec in R::FIELDS {
            let raw = self
                .values
                .get(spec.name)
                .map(|v| v.trim())
                .unwrap_or_default();
            if raw.is_empty() {
                if spec.required {
                    return Err(ClientError::MissingField(spec.name.to_string()));
                }
                continue;
            }
            body.insert(spec.name.to_string(), spec.convert(raw)?);
        }
        Ok(Value::Object(body))
    }

    pub async fn submit(&mut self) -> Result<R::Record, ClientError> {
        let payload = self.payload()?;
        let record = match &self.target {
            Some(id) => {
                debug!(resource = R::NAME, %id, "Submitting update draft");
                self.client.update(id, &payload).await?
            }
            None => {
                debug!(resource = R::NAME, "Submitting create draft");
                self.client.create(&payload).await?
            }
        };
        self.clear();
        info!(resource = R::NAME, "Draft submitted and cleared");
        Ok(record)
    }
}

fn initial_values(fields: &[FieldSpec]) -> BTreeMap<&'static str, String> {
    fields
        .iter()
        .map(|spec| (spec.name, spec.default.to_string()))
        .collect()
}

fn spec_for<'a>(fields: &'a [FieldSpec], name: &str) -> Result<&'a FieldSpec, ClientError> {
    fields
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| ClientError::UnknownField(name.to_string()))
}

/// Parses `name=value` pairs as given on the command line.
pub fn parse_assignment(raw: &str) -> Result<(String, String), ClientError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| ClientError::InvalidField {
            field: raw.to_string(),
            reason: "expected name=value".to_string(),
        })?;
    Ok((name.trim().to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::resources::{Events, Users};
    use crate::client::HttpClient;
    use crate::config::Config;
    use serde_json::json;

    fn users_form() -> FormController<Users> {
        let http = HttpClient::new(&Config::default()).unwrap();
        FormController::new(ResourceClient::new(http))
    }

    fn events_form() -> FormController<Events> {
        let http = HttpClient::new(&Config::default()).unwrap();
        FormController::new(ResourceClient::new(http))
    }

    fn fill_user(form: &mut FormController<Users>) {
        form.set_field("username", "ana").unwrap();
        form.set_field("email", "a@x.com").unwrap();
        form.set_field("program", "CS").unwrap();
        form.set_field("locationId", "1").unwrap();
        form.set_field("collegeId", "2").unwrap();
    }

    #[test]
    fn test_payload_converts_numeric_fields() {
        let mut form = users_form();
        fill_user(&mut form);
        assert_eq!(
            form.payload().unwrap(),
            json!({
                "username": "ana",
                "email": "a@x.com",
                "program": "CS",
                "locationId": 1,
                "collegeId": 2,
            })
        );
    }

    #[test]
    fn test_missing_required_field_is_reported() {
        let mut form = users_form();
        fill_user(&mut form);
        form.set_field("email", "   ").unwrap();
        match form.payload() {
            Err(ClientError::MissingField(name)) => assert_eq!(name, "email"),
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_identifier_is_invalid() {
        let mut form = users_form();
        fill_user(&mut form);
        form.set_field("collegeId", "two").unwrap();
        assert!(matches!(
            form.payload(),
            Err(ClientError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut form = users_form();
        assert!(matches!(
            form.set_field("password", "x"),
            Err(ClientError::UnknownField(_))
        ));
    }

    #[test]
    fn test_event_defaults_and_optional_fields() {
        let mut form = events_form();
        assert_eq!(form.field("organizerType"), Some("SCHOOL"));
        assert!(form.is_pristine());

        form.set_field("title", "Career Fair").unwrap();
        form.set_field("startTime", "2025-05-10T19:00:00").unwrap();
        form.set_field("endTime", "2025-05-10T21:00:00").unwrap();
        form.set_field("creatorId", "7").unwrap();
        let payload = form.payload().unwrap();
        assert_eq!(payload["organizerType"], "SCHOOL");
        assert_eq!(payload["creatorId"], 7);
        assert!(payload.get("address").is_none());
    }

    #[test]
    fn test_bad_timestamp_and_choice_are_invalid() {
        let mut form = events_form();
        form.set_field("title", "Career Fair").unwrap();
        form.set_field("startTime", "May 10th").unwrap();
        form.set_field("endTime", "2025-05-10T21:00:00").unwrap();
        form.set_field("creatorId", "7").unwrap();
        assert!(matches!(
            form.payload(),
            Err(ClientError::InvalidField { field, .. }) if field == "startTime"
        ));

        form.set_field("startTime", "2025-05-10T19:00:00").unwrap();
        form.set_field("organizerType", "CLUB").unwrap();
        assert!(matches!(
            form.payload(),
            Err(ClientError::InvalidField { field, .. }) if field == "organizerType"
        ));
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut form = events_form();
        form.set_field("title", "Career Fair").unwrap();
        form.set_target(Some(Id::from(3)));
        form.clear();
        assert!(form.is_pristine());
        assert_eq!(form.field("title"), Some(""));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("address=360 Huntington Ave").unwrap(),
            ("address".to_string(), "360 Huntington Ave".to_string())
        );
        assert!(parse_assignment("address").is_err());
    }
}
