//! Login, session check and logout.

use reqwest::Method;
use tracing::info;

use super::client::ApiClient;
use crate::error::Result;
use crate::models::{LoginRequest, Session, User};

impl ApiClient {
    /// Exchange credentials for a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let body = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let session: Session = self
            .send_json(self.request(Method::POST, "/auth/login").json(&body))
            .await?;
        info!("Logged in as {} ({:?})", session.user.username, session.user.role);
        Ok(session)
    }

    /// Current user for the token this client carries.
    pub async fn me(&self) -> Result<User> {
        self.send_json(self.request(Method::GET, "/auth/me")).await
    }

    /// Invalidate the token server-side.
    pub async fn logout(&self) -> Result<()> {
        self.send(self.request(Method::POST, "/auth/logout")).await?;
        Ok(())
    }
}
