// file: src/client/builder.rs
// description: configuration of a CouchClient before it is created

use crate::client::couch::CouchClient;
use crate::client::http::{Credentials, HttpTransport};
use crate::config::ServerConfig;
use crate::error::{CouchError, Result};
use crate::util::Validator;
use percent_encoding::percent_decode_str;
use std::time::Duration;
use url::Url;

pub struct ClientBuilder {
    url: Url,
    username: Option<String>,
    password: Option<String>,
    connect_timeout: Duration,
    read_timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Starts from an account URL. Credentials in the user-info part are moved
    /// out of the URL and used for basic authentication.
    pub fn url(url: &str) -> Result<Self> {
        let mut parsed = Validator::validate_url(url)?;

        let username = decode_userinfo(parsed.username());
        let password = parsed.password().map(decode_userinfo).unwrap_or_default();

        parsed.set_username("").ok();
        parsed.set_password(None).ok();

        Ok(Self {
            url: parsed,
            username,
            password,
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(300),
            user_agent: None,
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let mut builder = Self::url(&config.url)?
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs));

        if let Some(username) = &config.username {
            builder = builder.username(username);
        }
        if let Some(password) = &config.password {
            builder = builder.password(password);
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent);
        }

        Ok(builder)
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: &str) -> Self {
        self.user_agent = Some(agent.to_string());
        self
    }

    pub fn build(self) -> Result<CouchClient> {
        let credentials = match (self.username, self.password) {
            (Some(username), password) => Some(Credentials { username, password }),
            (None, Some(_)) => {
                return Err(CouchError::Validation(
                    "A password was supplied without a username.".to_string(),
                ));
            }
            (None, None) => None,
        };

        let agent = self.user_agent.unwrap_or_else(default_user_agent);

        let client = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_timeout)
            .user_agent(agent)
            .build()?;

        let base_uri = self.url.as_str().trim_end_matches('/').to_string();

        Ok(CouchClient::new(
            base_uri,
            HttpTransport::new(client, credentials),
        ))
    }
}

fn decode_userinfo(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    Some(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

fn default_user_agent() -> String {
    format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}
