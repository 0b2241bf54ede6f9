// Authenticated request executor: owns the HTTP client and the token holder.
// Every call here issues exactly one request and waits for it; nothing is
// retried and no state other than the token (login/logout) is touched.

use crate::config::{CLIENT_ID, CONTENT_TYPE_JSON, GRANT_TYPE_PASSWORD, SCOPE_OPENID};
use crate::error::{Result, TonieError};
use crate::token::{JwtToken, TokenHolder};
use reqwest::blocking::{multipart, Client as HttpClient, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

const OK_ONLY: &[StatusCode] = &[StatusCode::OK];
const OK_OR_NO_CONTENT: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

pub(crate) struct RequestHandler {
    http: HttpClient,
    tokens: TokenHolder,
}

impl RequestHandler {
    pub(crate) fn new(http: HttpClient) -> Self {
        RequestHandler {
            http,
            tokens: TokenHolder::default(),
        }
    }

    pub(crate) fn tokens(&self) -> &TokenHolder {
        &self.tokens
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut TokenHolder {
        &mut self.tokens
    }

    /// OAuth password grant. The token is stored only when the response
    /// decodes; on failure the holder keeps whatever it had before.
    pub(crate) fn login(&mut self, token_url: &str, email: &str, password: &str) -> Result<JwtToken> {
        let form = [
            ("grant_type", GRANT_TYPE_PASSWORD),
            ("client_id", CLIENT_ID),
            ("scope", SCOPE_OPENID),
            ("username", email),
            ("password", password),
        ];

        debug!(url = token_url, "requesting access token");
        let response = self.http.post(token_url).form(&form).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "login rejected");
            return Err(TonieError::Login {
                status: status.as_u16(),
                body,
            });
        }

        let token: JwtToken = decode_body(response)?;
        self.tokens.set(token.clone());
        info!("logged in");
        Ok(token)
    }

    /// Authenticated GET; only 200 is success.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.authorize(self.http.get(url));
        let response = self.execute("GET", url, request, OK_ONLY)?;
        decode_body(response)
    }

    /// Authenticated PATCH with a JSON body; 200 and 204 are success and the
    /// response body is ignored.
    pub(crate) fn patch_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<()> {
        let payload = serde_json::to_vec(body).map_err(TonieError::Encode)?;
        let request = self
            .authorize(self.http.patch(url))
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(payload);
        self.execute("PATCH", url, request, OK_OR_NO_CONTENT)?;
        Ok(())
    }

    /// Authenticated POST with a JSON body, decoding a 200 response.
    pub(crate) fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(TonieError::Encode)?;
        let request = self
            .authorize(self.http.post(url))
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(payload);
        let response = self.execute("POST", url, request, OK_ONLY)?;
        decode_body(response)
    }

    /// Authenticated DELETE; the token is attached only if one is held and
    /// its absence does not stop the attempt.
    pub(crate) fn delete(&self, url: &str) -> Result<()> {
        let request = self.authorize(self.http.delete(url));
        self.execute("DELETE", url, request, OK_OR_NO_CONTENT)?;
        Ok(())
    }

    /// Unauthenticated multipart POST; the form itself carries the signed
    /// policy for object storage.
    pub(crate) fn post_multipart(&self, url: &str, form: multipart::Form) -> Result<()> {
        let request = self.http.post(url).multipart(form);
        self.execute("POST", url, request, OK_OR_NO_CONTENT)?;
        Ok(())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => request.header(AUTHORIZATION, token.bearer()),
            None => request,
        }
    }

    fn execute(
        &self,
        method: &str,
        url: &str,
        request: RequestBuilder,
        accepted: &[StatusCode],
    ) -> Result<Response> {
        debug!(method, url, "sending request");
        let response = request.send()?;
        let status = response.status();
        if !accepted.contains(&status) {
            let body = response.text().unwrap_or_default();
            warn!(method, url, status = status.as_u16(), "unexpected response status");
            return Err(TonieError::Status {
                status: status.as_u16(),
                body,
            });
        }
        debug!(method, url, status = status.as_u16(), "request succeeded");
        Ok(response)
    }
}

fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text()?;
    serde_json::from_str(&body).map_err(|source| TonieError::Decode { source, body })
}
