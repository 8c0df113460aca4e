use clap::{Args, Parser, Subcommand};

use crate::config::Config;

/// Administrative console for the NUboard campus-event platform.
#[derive(Debug, Parser)]
#[command(name = "nuboard", version, about)]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, env = "NUBOARD_API_URL")]
    pub api_url: Option<String>,

    /// Session cookie sent with every request, e.g. `JSESSIONID=...`.
    #[arg(long, global = true, env = "NUBOARD_SESSION_COOKIE")]
    pub session_cookie: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.clone());
        }
        if let Some(cookie) = &self.session_cookie {
            config = config.with_session_cookie(cookie.clone());
        }
        config
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show where the session check routes this console.
    Session,
    /// Print the URL that starts the sign-in flow.
    SignInUrl,
    #[command(subcommand)]
    Profile(ProfileCommand),
    #[command(subcommand)]
    Users(UserCommand),
    #[command(subcommand)]
    Events(EventCommand),
    /// List colleges.
    Colleges,
    /// List locations.
    Locations,
    #[command(subcommand)]
    Registrations(RegistrationCommand),
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    /// Draft field as `name=value`; repeat for each field.
    #[arg(long = "field", short = 'f', value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    Create(DraftArgs),
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List,
    Get {
        id: String,
    },
    Search {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Create(DraftArgs),
    Update {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    List,
    Get {
        id: String,
    },
    Search {
        keyword: String,
    },
    ByCreator {
        creator_id: String,
    },
    Create(DraftArgs),
    Update {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum RegistrationCommand {
    /// Registrations for one event.
    Event { event_id: String },
    /// Registrations held by one user.
    User { user_id: String },
    Register {
        #[arg(long)]
        event: String,
        #[arg(long)]
        user: String,
    },
    Unregister {
        #[arg(long)]
        event: String,
        #[arg(long)]
        user: String,
    },
}
