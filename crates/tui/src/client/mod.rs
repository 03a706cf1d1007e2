use std::sync::Arc;

use api_types::{
    auth::{LoginRequest, RefreshRequest, RefreshedToken, RegisterRequest, TokenPair},
    category::{Category, CategoryWrite, DistributionType},
    household::{Household, HouseholdName},
    member::{DetailedBalance, Member},
    movement::{Movement, MovementWrite},
    salary::{Period, PeriodLabel, PeriodNew, Salary, SalaryWrite},
    user::User,
};
use reqwest::{Method, Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, Result},
    session::SessionStore,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error ({status}): {message}")]
    Server { status: StatusCode, message: String },
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
}

const UNKNOWN_ERROR: &str = "unknown error";

impl ClientError {
    /// Message supplied by the server, when the response carried one.
    pub fn server_message(&self) -> Option<&str> {
        let message = match self {
            Self::Conflict(message) | Self::Validation(message) => message,
            Self::Server { message, .. } => message,
            _ => return None,
        };
        (message != UNKNOWN_ERROR).then_some(message.as_str())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

/// Thin REST client. Attaches the stored access token to every
/// authenticated call and clears the session on a 401.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
    session: SessionStore,
    refresh_on_unauthorized: bool,
    /// Held while a 401 is resolved, so concurrent failures share one renewal.
    renewal: Arc<Mutex<()>>,
}

impl Client {
    pub fn new(base_url: &str, session: SessionStore, refresh_on_unauthorized: bool) -> Result<Self> {
        Url::parse(base_url).map_err(|err| AppError::Setting {
            key: "base_url",
            message: err.to_string(),
        })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            session,
            refresh_on_unauthorized,
            renewal: Arc::new(Mutex::new(())),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send_once<B: Serialize + ?Sized>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> ClientResult<Response> {
        tracing::debug!(%method, path, "api request");
        let mut req = self.http.request(method.clone(), self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await.map_err(ClientError::Transport)
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> ClientResult<Response> {
        let token = match auth {
            Auth::Bearer => self.session.access_token().await,
            Auth::Anonymous => None,
        };
        let res = self.send_once(&method, path, body, token.as_deref()).await?;
        if res.status() != StatusCode::UNAUTHORIZED || auth == Auth::Anonymous {
            return check(res).await;
        }

        if let Some(renewed) = self.renew_after_rejection(token.as_deref()).await {
            let retry = self
                .send_once(&method, path, body, Some(&renewed))
                .await?;
            if retry.status() != StatusCode::UNAUTHORIZED {
                return check(retry).await;
            }
            self.invalidate().await;
        }
        Err(ClientError::Unauthorized)
    }

    /// Token to replay a request with after `rejected` got a 401, or `None`
    /// once the session has been cleared.
    ///
    /// Only one caller renews at a time. A caller that waited finds the token
    /// already replaced and replays with it instead of renewing again.
    async fn renew_after_rejection(&self, rejected: Option<&str>) -> Option<String> {
        let _renewal = self.renewal.lock().await;

        let current = self.session.access_token().await;
        if current.is_some() && current.as_deref() != rejected {
            tracing::debug!("token already renewed, replaying");
            return current;
        }

        if self.refresh_on_unauthorized && current.is_some() {
            if let Some(renewed) = self.try_refresh().await {
                return Some(renewed);
            }
        }

        self.invalidate().await;
        None
    }

    /// Exchanges the stored refresh token for a new access token.
    async fn try_refresh(&self) -> Option<String> {
        let refresh = self.session.refresh_token().await?;
        let token = match self.refresh(&refresh).await {
            Ok(token) => token,
            Err(err) => {
                tracing::info!("token refresh rejected: {err}");
                return None;
            }
        };
        match self
            .session
            .set(&token.access, token.refresh.as_deref())
            .await
        {
            Ok(()) => {
                tracing::info!("access token renewed");
                Some(token.access)
            }
            Err(err) => {
                tracing::warn!("could not store renewed token: {err}");
                None
            }
        }
    }

    /// Drops the session. The in-memory tokens are gone even when the file
    /// cannot be rewritten, so the caller still reports `Unauthorized`.
    async fn invalidate(&self) {
        tracing::info!("authorization failed, clearing session");
        if let Err(err) = self.session.clear().await {
            tracing::error!("could not persist cleared session: {err}");
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let res = self
            .request::<()>(Method::GET, path, None, Auth::Bearer)
            .await?;
        decode(res).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let res = self.request(method, path, Some(body), Auth::Bearer).await?;
        decode(res).await
    }

    async fn send_unit<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<()> {
        self.request(method, path, body, Auth::Bearer).await?;
        Ok(())
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<TokenPair> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let res = self
            .request(Method::POST, "/token/", Some(&payload), Auth::Anonymous)
            .await?;
        decode(res).await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> ClientResult<()> {
        let payload = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.request(Method::POST, "/register/", Some(&payload), Auth::Anonymous)
            .await?;
        Ok(())
    }

    pub async fn refresh(&self, refresh: &str) -> ClientResult<RefreshedToken> {
        let payload = RefreshRequest {
            refresh: refresh.to_string(),
        };
        // Must not go through `request`, which calls back here on a 401.
        let res = self
            .send_once(&Method::POST, "/token/refresh/", Some(&payload), None)
            .await?;
        decode(check(res).await?).await
    }

    pub async fn movements_list(&self) -> ClientResult<Vec<Movement>> {
        self.get_json("/movements/").await
    }

    pub async fn movement_create(&self, payload: &MovementWrite) -> ClientResult<Value> {
        self.send_json(Method::POST, "/movements/", payload).await
    }

    pub async fn movement_update(&self, id: i64, payload: &MovementWrite) -> ClientResult<Value> {
        self.send_json(Method::PUT, &format!("/movements/{id}/"), payload)
            .await
    }

    pub async fn movement_delete(&self, id: i64) -> ClientResult<()> {
        self.send_unit::<()>(Method::DELETE, &format!("/movements/{id}/"), None)
            .await
    }

    pub async fn categories_list(&self) -> ClientResult<Vec<Category>> {
        self.get_json("/categories/").await
    }

    pub async fn category_create(&self, payload: &CategoryWrite) -> ClientResult<Value> {
        self.send_json(Method::POST, "/categories/", payload).await
    }

    pub async fn category_update(&self, id: i64, payload: &CategoryWrite) -> ClientResult<Value> {
        self.send_json(Method::PUT, &format!("/categories/{id}/"), payload)
            .await
    }

    pub async fn category_delete(&self, id: i64) -> ClientResult<()> {
        self.send_unit::<()>(Method::DELETE, &format!("/categories/{id}/"), None)
            .await
    }

    pub async fn distribution_types_list(&self) -> ClientResult<Vec<DistributionType>> {
        self.get_json("/distribution-types/").await
    }

    pub async fn members_list(&self) -> ClientResult<Vec<Member>> {
        self.get_json("/members/").await
    }

    pub async fn member_me(&self) -> ClientResult<Member> {
        self.get_json("/members/me/").await
    }

    pub async fn members_detailed_balances(&self) -> ClientResult<Vec<DetailedBalance>> {
        self.get_json("/members/detailed_balances/").await
    }

    pub async fn user_me(&self) -> ClientResult<User> {
        self.get_json("/users/me/").await
    }

    pub async fn salaries_list(&self) -> ClientResult<Vec<Salary>> {
        self.get_json("/salaries/").await
    }

    pub async fn salary_create(&self, payload: &SalaryWrite) -> ClientResult<Value> {
        self.send_json(Method::POST, "/salaries/", payload).await
    }

    pub async fn salary_update(&self, id: i64, payload: &SalaryWrite) -> ClientResult<Value> {
        self.send_json(Method::PUT, &format!("/salaries/{id}/"), payload)
            .await
    }

    pub async fn periods_list(&self) -> ClientResult<Vec<Period>> {
        self.get_json("/periods/").await
    }

    pub async fn period_create(&self, period: &PeriodLabel) -> ClientResult<Period> {
        let payload = PeriodNew {
            period: period.clone(),
        };
        self.send_json(Method::POST, "/periods/", &payload).await
    }

    pub async fn household_create(&self, name: &str) -> ClientResult<Household> {
        let payload = HouseholdName {
            name: name.to_string(),
        };
        self.send_json(Method::POST, "/households/", &payload).await
    }

    pub async fn household_join(&self, name: &str) -> ClientResult<()> {
        let payload = HouseholdName {
            name: name.to_string(),
        };
        self.send_unit(Method::POST, "/households/join/", Some(&payload))
            .await
    }
}

async fn check(res: Response) -> ClientResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let message = server_message(&body);
    let err = match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(message),
        400 | 422 => ClientError::Validation(message),
        _ => ClientError::Server { status, message },
    };
    Err(err)
}

async fn decode<T: DeserializeOwned>(res: Response) -> ClientResult<T> {
    let body = res.bytes().await.map_err(ClientError::Transport)?;
    // Bodyless 2xx responses decode as JSON null.
    let body: &[u8] = if body.is_empty() { b"null" } else { &body };
    serde_json::from_slice(body).map_err(|err| ClientError::Decode(err.to_string()))
}

/// Extracts a human readable message from an error body.
///
/// Understands `{"detail": ".."}` and field error maps such as
/// `{"name": ["This field is required."]}`.
fn server_message(body: &str) -> String {
    const FALLBACK: &str = UNKNOWN_ERROR;

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return FALLBACK.to_string();
    };

    match value {
        Value::String(message) => message,
        Value::Array(items) => first_string(&items).unwrap_or_else(|| FALLBACK.to_string()),
        Value::Object(map) => {
            if let Some(Value::String(detail)) = map.get("detail") {
                return detail.clone();
            }
            for (field, errors) in &map {
                let message = match errors {
                    Value::String(message) => Some(message.clone()),
                    Value::Array(items) => first_string(items),
                    _ => None,
                };
                if let Some(message) = message {
                    if field == "non_field_errors" {
                        return message;
                    }
                    return format!("{field}: {message}");
                }
            }
            FALLBACK.to_string()
        }
        _ => FALLBACK.to_string(),
    }
}

fn first_string(items: &[Value]) -> Option<String> {
    items.iter().find_map(|item| item.as_str().map(str::to_string))
}
