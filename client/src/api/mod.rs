//! The HTTP gateway: one trait per endpoint, one `call` for all of them.
//!
//! Every resource call funnels through [`call`], which attaches the bearer
//! token from the session store, classifies non-success responses into
//! [`Error`] variants, and on a 401 clears the session and emits the
//! session-expired notice. That 401 handling is the gateway's single global
//! side effect; everything else is the calling view-model's concern.

pub mod auth;
pub mod claims;
pub mod items;
pub mod users;

use serde::de::DeserializeOwned;

use crate::notify::Notice;
use crate::{Context, Error};

#[async_trait::async_trait]
pub trait ApiRequest: Send {
    type Output;

    const METHOD: reqwest::Method = reqwest::Method::GET;

    /// Path below the base URL, including any ids baked into it.
    fn path(&self) -> String;

    /// Attaches body/query to the prepared builder. Defaults to a bare
    /// request.
    fn make_req(&self, req: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        Ok(req)
    }

    async fn parse_res(&mut self, response: reqwest::Response) -> Result<Self::Output, Error>;
}

/// Calls an [`ApiRequest`] and returns its output.
pub async fn call<R: ApiRequest>(cx: &Context, mut req: R) -> Result<R::Output, Error> {
    let url = format!("{}{}", cx.base_url(), req.path());
    let mut builder = cx.http().request(R::METHOD, &url);
    // Token is read from the store per call, never cached, so another view's
    // logout/login takes effect on the next operation.
    if let Some(session) = cx.session().get() {
        builder = builder.bearer_auth(&session.token);
    }

    let response = req.make_req(builder)?.send().await?;
    let status = response.status();
    if !status.is_success() {
        let message = error_message(response).await;
        let err = Error::from_status(status, message);
        if err.is_auth_expired() {
            cx.session().clear();
            cx.notifier()
                .notify(Notice::error("Session expired. Please login again."));
        }
        return Err(err);
    }

    req.parse_res(response).await
}

/// Extracts a human-readable message from an error response. Spring answers
/// sometimes with plain text and sometimes with a JSON object carrying a
/// `message` or `error` field.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned();
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_owned();
            }
        }
    }
    body
}

pub(crate) async fn json_body<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, Error> {
    Ok(response.json::<T>().await?)
}
