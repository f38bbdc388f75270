//! Connection and security context types.

use serde::{Deserialize, Serialize};

/// Identifier reserved for the locally managed deployment.
pub const LOCAL_CONNECTION_ID: &str = "local";

/// Prefix of the environment variable that supplies a connection's token.
pub const TOKEN_ENV_PREFIX: &str = "CWCTL_TOKEN_";

/// How requests to a connection are authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SecurityContext {
    /// Requests are sent without credentials.
    #[default]
    Anonymous,
    /// Requests carry `Authorization: Bearer <token>`.
    Bearer { token: String },
}

impl SecurityContext {
    /// Header to attach to outgoing requests, if any.
    pub fn auth_header(&self) -> Option<(&'static str, String)> {
        match self {
            Self::Anonymous => None,
            Self::Bearer { token } => Some(("Authorization", format!("Bearer {}", token))),
        }
    }
}

/// A deployment the tool can talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique identifier.
    pub id: String,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Base URL of the deployment's gatekeeper or service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Authentication scheme recorded in the connections file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,

    /// Identity realm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,

    /// Identity client id.
    #[serde(default, rename = "clientid", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// User name the connection was registered with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Credentials used when dispatching requests. Never persisted.
    #[serde(skip)]
    pub security: SecurityContext,
}

impl Connection {
    /// Create a connection with an id and optional URL.
    pub fn new(id: impl Into<String>, url: Option<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            url,
            auth: None,
            realm: None,
            client_id: None,
            username: None,
            security: SecurityContext::Anonymous,
        }
    }

    /// The locally managed deployment.
    pub fn local() -> Self {
        let mut conn = Self::new(LOCAL_CONNECTION_ID, None);
        conn.label = "Codewind local connection".to_string();
        conn
    }

    /// Builder-style security context setter.
    pub fn with_security(mut self, security: SecurityContext) -> Self {
        self.security = security;
        self
    }

    /// Whether this is the locally managed deployment.
    pub fn is_local(&self) -> bool {
        self.id == LOCAL_CONNECTION_ID
    }

    /// Registered base URL, ignoring empty strings.
    pub fn base_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Name of the environment variable holding this connection's token.
    pub fn token_env_var(&self) -> String {
        let suffix: String = self
            .id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}", TOKEN_ENV_PREFIX, suffix)
    }
}
