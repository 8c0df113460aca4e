use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::info;

use super::http::{ApiPath, HttpClient};
use crate::models::Id;
use crate::utils::error::ClientError;
use crate::utils::response::{decode, decode_optional};

/// A named backend collection.
pub trait Resource {
    /// Name used in logs and messages, e.g. `users`.
    const NAME: &'static str;
    /// Collection path, e.g. `/api/users`.
    const PATH: &'static str;

    type Record: DeserializeOwned + Clone + Debug;

    fn collection_path() -> ApiPath {
        ApiPath::new(Self::PATH)
    }

    fn record_path(id: &Id) -> ApiPath {
        Self::collection_path().id(id)
    }

    fn create_path() -> ApiPath {
        Self::collection_path()
    }
}

/// Generic CRUD over one collection. Every call is a single round trip with
/// no retry.
pub struct ResourceClient<R: Resource> {
    http: HttpClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.http.clone())
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<R::Record>, ClientError> {
        let body = self.http.request(Method::GET, &R::collection_path(), &[], None).await?;
        Ok(decode_optional(&body)?.unwrap_or_default())
    }

    /// `GET {PATH}` for singleton resources such as the caller's profile.
    pub async fn fetch_one(&self) -> Result<Option<R::Record>, ClientError> {
        let body = self.http.request(Method::GET, &R::collection_path(), &[], None).await?;
        decode_optional(&body)
    }

    pub async fn get(&self, id: &Id) -> Result<R::Record, ClientError> {
        let body = self
            .http
            .request(Method::GET, &R::record_path(id), &[], None)
            .await?;
        decode_optional(&body)?
            .ok_or_else(|| ClientError::NotFound(format!("{} {} does not exist", R::NAME, id)))
    }

    pub async fn create<P>(&self, payload: &P) -> Result<R::Record, ClientError>
    where
        P: Serialize + ?Sized,
    {
        let body = encode(payload)?;
        let response = self
            .http
            .request(Method::POST, &R::create_path(), &[], Some(&body))
            .await?;
        let record = decode(&response)?;
        info!(resource = R::NAME, "Record created");
        Ok(record)
    }

    pub async fn update<P>(&self, id: &Id, payload: &P) -> Result<R::Record, ClientError>
    where
        P: Serialize + ?Sized,
    {
        let body = encode(payload)?;
        let response = self
            .http
            .request(Method::PUT, &R::record_path(id), &[], Some(&body))
            .await?;
        let record = decode(&response)?;
        info!(resource = R::NAME, %id, "Record updated");
        Ok(record)
    }

    pub async fn remove(&self, id: &Id) -> Result<(), ClientError> {
        let body = self
            .http
            .request(Method::DELETE, &R::record_path(id), &[], None)
            .await?;
        // Delete answers with 204, a bare 200 or an envelope; only a
        // rejection envelope counts as failure.
        decode_optional::<Value>(&body)?;
        info!(resource = R::NAME, %id, "Record deleted");
        Ok(())
    }

    /// `GET {PATH}/search?{params}`.
    pub async fn search(&self, params: &[(&str, String)]) -> Result<Vec<R::Record>, ClientError> {
        let path = R::collection_path().join("search");
        let body = self.http.request(Method::GET, &path, params, None).await?;
        Ok(decode_optional(&body)?.unwrap_or_default())
    }

    /// `GET {PATH}/{scope}/{id}` for backend sub-collections such as
    /// `by-creator/{id}`.
    pub async fn list_by(&self, scope: &str, id: &Id) -> Result<Vec<R::Record>, ClientError> {
        let path = R::collection_path().join(scope).id(id);
        let body = self.http.request(Method::GET, &path, &[], None).await?;
        Ok(decode_optional(&body)?.unwrap_or_default())
    }

    /// Action endpoints that take query parameters and no body, such as
    /// `POST /api/registrations/register?userId=..&eventId=..`.
    pub async fn invoke(
        &self,
        method: Method,
        action: &str,
        query: &[(&str, String)],
    ) -> Result<Option<R::Record>, ClientError> {
        let path = R::collection_path().join(action);
        let body = self.http.request(method, &path, query, None).await?;
        decode_optional(&body)
    }
}

fn encode<P>(payload: &P) -> Result<Value, ClientError>
where
    P: Serialize + ?Sized,
{
    serde_json::to_value(payload).map_err(|e| ClientError::Encoding(e.to_string()))
}
