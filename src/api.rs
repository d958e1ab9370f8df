//! REST client for the logistics backend. One method per endpoint; the
//! session's bearer token is attached to every request whenever a session
//! exists.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    AuthRequest, AuthResponse, Feedback, FeedbackRequest, Notification, Parcel, ParcelRequest,
    RegisterRequest, User, UserUpdate,
};
use crate::query::{ListQuery, Page, PageFetcher};
use crate::session::SessionStore;

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<Mutex<SessionStore>>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<Mutex<SessionStore>>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session_store(&self) -> MutexGuard<'_, SessionStore> {
        self.session.lock().expect("session store lock poisoned")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session_store().token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!("backend rejected request: {status} {body}");
        Err(ApiError::from_status(status, body))
    }

    async fn decode<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await?;
        Ok(())
    }

    // --- auth ---

    /// Authenticates and, on success, feeds the payload straight into the
    /// session store.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = AuthRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self
            .decode(self.http.post(self.url("/auth/login")).json(&body))
            .await?;
        self.session_store().login(&auth);
        Ok(auth)
    }

    /// Validates client-side, then registers. The backend answers with a
    /// plain success/failure message.
    pub async fn register(
        &self,
        request: &RegisterRequest,
        confirm_password: &str,
    ) -> Result<String, ApiError> {
        request.validate(confirm_password)?;
        let response = self
            .send(self.http.post(self.url("/auth/register")).json(request))
            .await?;
        Ok(response.text().await?)
    }

    pub fn logout(&self) {
        self.session_store().logout();
    }

    // --- users ---

    pub async fn list_users(&self, query: &ListQuery) -> Result<Page<User>, ApiError> {
        self.decode(self.http.get(self.url("/users")).query(&query.wire_params()))
            .await
    }

    pub async fn list_non_admin_users(&self) -> Result<Vec<User>, ApiError> {
        self.decode(self.http.get(self.url("/users/all-non-admin")))
            .await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.decode(self.http.get(self.url(&format!("/users/{id}"))))
            .await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        self.decode(self.http.put(self.url(&format!("/users/{id}"))).json(update))
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.execute(self.http.delete(self.url(&format!("/users/{id}"))))
            .await
    }

    pub async fn admin_create_user(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.decode(self.http.post(self.url("/users/admin/create")).json(request))
            .await
    }

    // --- parcels ---

    pub async fn list_parcels(&self, query: &ListQuery) -> Result<Page<Parcel>, ApiError> {
        self.decode(
            self.http
                .get(self.url("/parcels/all"))
                .query(&query.wire_params()),
        )
        .await
    }

    pub async fn create_parcel(&self, request: &ParcelRequest) -> Result<Parcel, ApiError> {
        self.decode(self.http.post(self.url("/parcels")).json(request))
            .await
    }

    pub async fn update_parcel(
        &self,
        id: i64,
        request: &ParcelRequest,
    ) -> Result<Parcel, ApiError> {
        self.decode(
            self.http
                .put(self.url(&format!("/parcels/{id}")))
                .json(request),
        )
        .await
    }

    pub async fn delete_parcel(&self, id: i64) -> Result<(), ApiError> {
        self.execute(self.http.delete(self.url(&format!("/parcels/{id}"))))
            .await
    }

    pub async fn track_parcel(&self, tracking_id: &str) -> Result<Parcel, ApiError> {
        self.decode(
            self.http
                .get(self.url(&format!("/parcels/track/{tracking_id}"))),
        )
        .await
    }

    /// Parcels belonging to the authenticated user.
    pub async fn my_parcels(&self) -> Result<Vec<Parcel>, ApiError> {
        self.decode(self.http.get(self.url("/parcels/my-parcels")))
            .await
    }

    // --- feedback ---

    pub async fn feedback_exists(&self, parcel_id: i64) -> Result<bool, ApiError> {
        self.decode(
            self.http
                .get(self.url(&format!("/feedback/exists/{parcel_id}"))),
        )
        .await
    }

    pub async fn submit_feedback(&self, request: &FeedbackRequest) -> Result<Feedback, ApiError> {
        request.validate()?;
        self.decode(self.http.post(self.url("/feedback")).json(request))
            .await
    }

    pub async fn list_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        self.decode(self.http.get(self.url("/feedback"))).await
    }

    pub async fn delete_feedback(&self, id: i64) -> Result<(), ApiError> {
        self.execute(self.http.delete(self.url(&format!("/feedback/{id}"))))
            .await
    }

    // --- notifications ---

    pub async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.decode(self.http.get(self.url("/notifications"))).await
    }

    pub async fn unread_count(&self) -> Result<u64, ApiError> {
        self.decode(self.http.get(self.url("/notifications/unread/count")))
            .await
    }

    pub async fn mark_read(&self, id: i64) -> Result<(), ApiError> {
        self.execute(self.http.put(self.url(&format!("/notifications/read/{id}"))))
            .await
    }

    pub async fn delete_notification(&self, id: i64) -> Result<(), ApiError> {
        self.execute(self.http.delete(self.url(&format!("/notifications/{id}"))))
            .await
    }
}

/// Fetcher binding a [`crate::query::ListController`] to GET /users.
pub struct UserPages {
    api: Arc<ApiClient>,
}

impl UserPages {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl PageFetcher for UserPages {
    type Item = User;

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<User>, ApiError> {
        self.api.list_users(query).await
    }
}

/// Fetcher binding a [`crate::query::ListController`] to GET /parcels/all.
pub struct ParcelPages {
    api: Arc<ApiClient>,
}

impl ParcelPages {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl PageFetcher for ParcelPages {
    type Item = Parcel;

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Parcel>, ApiError> {
        self.api.list_parcels(query).await
    }
}
