//! Session gate.
//!
//! One "who am I" round trip decides where the console goes. The backend
//! session cookie and the OAuth redirect are external; the gate only reads
//! the outcome.

use reqwest::Method;
use tracing::{debug, info};

use crate::client::resource::ResourceClient;
use crate::client::resources::Profiles;
use crate::client::{ApiPath, HttpClient};
use crate::config::SIGN_IN_PATH;
use crate::models::{Principal, Profile};
use crate::routes::Route;
use crate::utils::error::ClientError;
use crate::utils::response::decode_optional;
use crate::views::form::FormController;

const WHO_AM_I_PATH: &str = "/api/user";

#[derive(Debug, Clone)]
pub enum SessionState {
    Unauthenticated,
    NeedsProfile(Principal),
    Ready { principal: Principal, profile: Profile },
}

impl SessionState {
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready { .. })
    }
}

pub struct SessionGate {
    http: HttpClient,
}

impl SessionGate {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn sign_in_url(&self) -> Result<String, ClientError> {
        self.http.url(&ApiPath::new(SIGN_IN_PATH)).map(String::from)
    }

    pub async fn check(&self) -> Result<SessionState, ClientError> {
        let principal = match self.principal().await? {
            Some(principal) => principal,
            None => {
                info!("No principal, sign-in required");
                return Ok(SessionState::Unauthenticated);
            }
        };

        match self.profiles().fetch_one().await {
            Ok(Some(profile)) => {
                info!(email = ?principal.email, "Session ready");
                Ok(SessionState::Ready { principal, profile })
            }
            Ok(None) | Err(ClientError::NotFound(_)) => {
                info!(email = ?principal.email, "Principal has no profile yet");
                Ok(SessionState::NeedsProfile(principal))
            }
            Err(ClientError::Unauthenticated) => Ok(SessionState::Unauthenticated),
            Err(e) => Err(e),
        }
    }

    pub fn profiles(&self) -> ResourceClient<Profiles> {
        ResourceClient::new(self.http.clone())
    }

    /// Empty profile-creation draft for a principal without a profile.
    pub fn profile_form(&self) -> FormController<Profiles> {
        FormController::new(self.profiles())
    }

    /// Runs the check and resolves the route to take.
    pub async fn route(&self) -> Result<(Route, SessionState), ClientError> {
        let state = self.check().await?;
        let route = match &state {
            SessionState::Unauthenticated => Route::SignIn {
                url: self.sign_in_url()?,
            },
            SessionState::NeedsProfile(_) => Route::CreateProfile,
            SessionState::Ready { .. } => Route::Main,
        };
        Ok((route, state))
    }

    async fn principal(&self) -> Result<Option<Principal>, ClientError> {
        let path = ApiPath::new(WHO_AM_I_PATH);
        let body = match self.http.request(Method::GET, &path, &[], None).await {
            Ok(body) => body,
            Err(ClientError::Unauthenticated) => return Ok(None),
            Err(e) => return Err(e),
        };
        let principal = decode_optional::<Principal>(&body)?.filter(Principal::is_present);
        debug!(present = principal.is_some(), "Principal check complete");
        Ok(principal)
    }
}
