use std::fmt;

/// Where the console goes after the session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// No principal: send the visitor to the identity provider.
    SignIn { url: String },
    /// Signed in but no profile yet.
    CreateProfile,
    /// Signed in with a profile: the admin pages are available.
    Main,
}

/// Pages of the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Users,
    Events,
    Colleges,
    Locations,
    Registrations,
    Profile,
}

impl Page {
    /// Whether the page needs a completed profile. The profile page itself is
    /// reachable while the profile is still being created.
    pub fn requires_profile(&self) -> bool {
        !matches!(self, Page::Profile)
    }
}

impl Route {
    /// Whether `page` may be shown under this route.
    pub fn admits(&self, page: Page) -> bool {
        match self {
            Route::Main => true,
            Route::CreateProfile => !page.requires_profile(),
            Route::SignIn { .. } => false,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::SignIn { url } => write!(f, "Sign in required: open {url}"),
            Route::CreateProfile => {
                f.write_str("Profile required: run `nuboard profile create` first")
            }
            Route::Main => f.write_str("Signed in"),
        }
    }
}
