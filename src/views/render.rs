use crate::models::event::format_event_time;
use crate::models::{College, Event, Location, Profile, Registration, User};

const EMPTY_PLACEHOLDER: &str = "No records for now";
const UNSET: &str = "Not set";

/// Read-only text rendering of a record: one row in a table, or a
/// label/value block on its own.
pub trait Tabular {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

pub fn render_table<T: Tabular>(records: &[T]) -> String {
    if records.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    let rows: Vec<Vec<String>> = records.iter().map(T::cells).collect();
    let mut widths: Vec<usize> = T::COLUMNS.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(T::COLUMNS.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

pub fn render_detail<T: Tabular>(record: &T) -> String {
    let label_width = T::COLUMNS
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);
    T::COLUMNS
        .iter()
        .zip(record.cells())
        .map(|(label, value)| format!("{label:<label_width$} : {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn or_unset<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| UNSET.to_string(), ToString::to_string)
}

impl Tabular for User {
    const COLUMNS: &'static [&'static str] = &[
        "id", "username", "email", "program", "location", "college",
    ];

    fn cells(&self) -> Vec<String> {
        let location = self
            .location
            .clone()
            .or_else(|| self.location_id.as_ref().map(ToString::to_string));
        let college = self
            .college
            .clone()
            .or_else(|| self.college_id.as_ref().map(ToString::to_string));
        vec![
            self.id.to_string(),
            self.username.clone(),
            or_unset(self.email.as_ref()),
            or_unset(self.program.as_ref()),
            or_unset(location.as_ref()),
            or_unset(college.as_ref()),
        ]
    }
}

impl Tabular for College {
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl Tabular for Location {
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl Tabular for Event {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "start time",
        "end time",
        "location",
        "address",
        "creator",
        "organizer",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.description.clone().unwrap_or_default(),
            format_event_time(&self.start_time),
            format_event_time(&self.end_time),
            self.location_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            self.address.clone().unwrap_or_default(),
            self.creator_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            self.organizer_type
                .map(|kind| kind.to_string())
                .unwrap_or_default(),
        ]
    }
}

impl Tabular for Registration {
    const COLUMNS: &'static [&'static str] = &["event", "user"];

    fn cells(&self) -> Vec<String> {
        vec![self.event_id.to_string(), self.user_id.to_string()]
    }
}

impl Tabular for Profile {
    const COLUMNS: &'static [&'static str] =
        &["email", "username", "program", "location", "college"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.email.clone(),
            or_unset(self.username.as_ref()),
            or_unset(self.program.as_ref()),
            or_unset(self.location.as_ref().map(|l| &l.name)),
            or_unset(self.college.as_ref().map(|c| &c.name)),
        ]
    }
}
