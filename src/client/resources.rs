use crate::client::http::ApiPath;
use crate::client::resource::Resource;
use crate::models::event::format_event_time;
use crate::models::{College, Event, Id, Location, OrganizerType, Profile, Registration, User};
use crate::views::form::{Editable, FieldKind, FieldSpec};

pub struct Users;

impl Resource for Users {
    const NAME: &'static str = "users";
    const PATH: &'static str = "/api/users";
    type Record = User;
}

impl Editable for Users {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("username", FieldKind::Text),
        FieldSpec::required("email", FieldKind::Text),
        FieldSpec::required("program", FieldKind::Text),
        FieldSpec::required("locationId", FieldKind::Number),
        FieldSpec::required("collegeId", FieldKind::Number),
    ];

    fn draft_values(record: &User) -> Vec<(&'static str, String)> {
        let mut values = vec![("username", record.username.clone())];
        if let Some(email) = &record.email {
            values.push(("email", email.clone()));
        }
        if let Some(program) = &record.program {
            values.push(("program", program.clone()));
        }
        if let Some(id) = &record.location_id {
            values.push(("locationId", id.to_string()));
        }
        if let Some(id) = &record.college_id {
            values.push(("collegeId", id.to_string()));
        }
        values
    }

    fn record_id(record: &User) -> Option<Id> {
        Some(record.id.clone())
    }
}

pub struct Events;

impl Resource for Events {
    const NAME: &'static str = "events";
    const PATH: &'static str = "/api/events";
    type Record = Event;
}

impl Editable for Events {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::optional("description", FieldKind::Text),
        FieldSpec::required("startTime", FieldKind::Timestamp),
        FieldSpec::required("endTime", FieldKind::Timestamp),
        FieldSpec::optional("locationId", FieldKind::Number),
        FieldSpec::optional("address", FieldKind::Text),
        FieldSpec::required("creatorId", FieldKind::Number),
        FieldSpec::required("organizerType", FieldKind::Choice(&OrganizerType::ALL))
            .with_default("SCHOOL"),
    ];

    fn draft_values(record: &Event) -> Vec<(&'static str, String)> {
        let mut values = vec![
            ("title", record.title.clone()),
            ("startTime", format_event_time(&record.start_time)),
            ("endTime", format_event_time(&record.end_time)),
        ];
        if let Some(description) = &record.description {
            values.push(("description", description.clone()));
        }
        if let Some(id) = &record.location_id {
            values.push(("locationId", id.to_string()));
        }
        if let Some(address) = &record.address {
            values.push(("address", address.clone()));
        }
        if let Some(id) = &record.creator_id {
            values.push(("creatorId", id.to_string()));
        }
        if let Some(kind) = record.organizer_type {
            values.push(("organizerType", kind.as_str().to_string()));
        }
        values
    }

    fn record_id(record: &Event) -> Option<Id> {
        Some(record.id.clone())
    }
}

pub struct Colleges;

impl Resource for Colleges {
    const NAME: &'static str = "colleges";
    const PATH: &'static str = "/api/colleges";
    type Record = College;
}

pub struct Locations;

impl Resource for Locations {
    const NAME: &'static str = "locations";
    const PATH: &'static str = "/api/locations";
    type Record = Location;
}

pub struct Registrations;

impl Resource for Registrations {
    const NAME: &'static str = "registrations";
    const PATH: &'static str = "/api/registrations";
    type Record = Registration;
}

/// The signed-in principal's own profile. Read with `GET /api/profile`,
/// created with `POST /api/profile/create`.
pub struct Profiles;

impl Resource for Profiles {
    const NAME: &'static str = "profile";
    const PATH: &'static str = "/api/profile";
    type Record = Profile;

    fn create_path() -> ApiPath {
        Self::collection_path().join("create")
    }
}

impl Editable for Profiles {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("username", FieldKind::Text),
        FieldSpec::required("program", FieldKind::Text),
        FieldSpec::required("locationId", FieldKind::Number),
        FieldSpec::required("collegeId", FieldKind::Number),
    ];

    fn draft_values(record: &Profile) -> Vec<(&'static str, String)> {
        let mut values = Vec::new();
        if let Some(username) = &record.username {
            values.push(("username", username.clone()));
        }
        if let Some(program) = &record.program {
            values.push(("program", program.clone()));
        }
        if let Some(location) = &record.location {
            values.push(("locationId", location.id.to_string()));
        }
        if let Some(college) = &record.college {
            values.push(("collegeId", college.id.to_string()));
        }
        values
    }

    // A profile is only ever created through the form.
    fn record_id(_record: &Profile) -> Option<Id> {
        None
    }
}
