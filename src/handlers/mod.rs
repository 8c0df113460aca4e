use crate::cli::Command;
use crate::client::HttpClient;
use crate::config::Config;
use crate::routes::{Page, Route};
use crate::session::{SessionGate, SessionState};
use crate::utils::error::ClientError;
use crate::views::form::{parse_assignment, Editable, FormController};

mod profile;
mod records;
mod registrations;

/// Result of one console invocation.
#[derive(Debug)]
pub enum Outcome {
    Rendered(String),
    Redirect(Route),
}

pub async fn run(command: Command, config: &Config) -> Result<Outcome, ClientError> {
    let http = HttpClient::new(config)?;
    let gate = SessionGate::new(http.clone());

    // Starting sign-in must work without a session.
    if let Command::SignInUrl = command {
        return Ok(Outcome::Rendered(gate.sign_in_url()?));
    }

    let (route, state) = gate.route().await?;
    if let Some(page) = page_for(&command) {
        if !route.admits(page) {
            tracing::info!(?page, %route, "Page not admitted, redirecting");
            return Ok(Outcome::Redirect(route));
        }
    }

    let rendered = match command {
        Command::SignInUrl => gate.sign_in_url()?,
        Command::Session => describe_session(&route, &state),
        Command::Profile(command) => profile::handle(command, &gate, &state).await?,
        Command::Users(command) => records::users(command, http).await?,
        Command::Events(command) => records::events(command, http).await?,
        Command::Colleges => records::colleges(http).await,
        Command::Locations => records::locations(http).await,
        Command::Registrations(command) => registrations::handle(command, http).await?,
    };
    Ok(Outcome::Rendered(rendered))
}

fn page_for(command: &Command) -> Option<Page> {
    match command {
        Command::Session | Command::SignInUrl => None,
        Command::Profile(_) => Some(Page::Profile),
        Command::Users(_) => Some(Page::Users),
        Command::Events(_) => Some(Page::Events),
        Command::Colleges => Some(Page::Colleges),
        Command::Locations => Some(Page::Locations),
        Command::Registrations(_) => Some(Page::Registrations),
    }
}

fn describe_session(route: &Route, state: &SessionState) -> String {
    match state {
        SessionState::Ready { principal, profile } => format!(
            "{route} as {}",
            principal.email.as_deref().unwrap_or(profile.email.as_str())
        ),
        _ => route.to_string(),
    }
}

/// Applies `name=value` pairs from the command line to a draft.
fn fill<R: Editable>(form: &mut FormController<R>, fields: &[String]) -> Result<(), ClientError> {
    for raw in fields {
        let (name, value) = parse_assignment(raw)?;
        form.set_field(&name, value)?;
    }
    Ok(())
}
