use secrecy::{ExposeSecret, SecretString};

/// HTTP Basic credentials for the Prime REST API.
///
/// The password stays wrapped in a [`SecretString`] so it never shows up
/// in `Debug` output or tracing fields.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Apply Basic auth to a request builder.
    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(&self.username, Some(self.password.expose_secret()))
    }
}
