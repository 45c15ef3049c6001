use crate::{
    data::user::{NewUser, User},
    error::Error,
};
use reqwest::{Client, StatusCode};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Builder used to build a UserApiClient instance
#[derive(Debug, Clone, Default)]
pub struct UserApiClientBuilder {
    base_url: Option<String>,
    http_client: Option<Client>,
}

impl UserApiClientBuilder {
    /// Create a new UserApiClientBuilder instance.
    pub fn new() -> Self {
        Self {
            base_url: None,
            http_client: None,
        }
    }

    /// Use the given base url when building a UserApiClient instance.
    ///
    /// # Arguments
    /// `base_url` - scheme, host and port of the user service, e.g. a mock server url.
    ///
    /// # Returns
    /// This builder.
    pub fn with_base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use the given reqwest client when building a UserApiClient instance.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Consume the builder and create a UserApiClient instance using all of the previously configured values or
    /// their defaults.
    pub fn build(mut self) -> UserApiClient {
        UserApiClient {
            http: self.http_client.take().unwrap_or_default(),
            base_url: self
                .base_url
                .take()
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| String::from(DEFAULT_BASE_URL)),
        }
    }
}

/// Client of the user service, the consumer side of the example pacts.
#[derive(Debug, Clone)]
pub struct UserApiClient {
    http: Client,
    base_url: String,
}

impl UserApiClient {
    /// Fetches a single user.
    ///
    /// # Returns
    /// The user, or `Error::UserNotFound` when the service answers with 404.
    pub async fn get_user(&self, id: u64) -> Result<User, Error> {
        let response = self
            .http
            .get(&format!("{}/user/{}", self.base_url, id))
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(Error::UserNotFound(id)),
            status => Err(Error::UnexpectedStatus(status.as_u16())),
        }
    }

    /// Lists the users whose name matches `name`.
    pub async fn search_users(&self, name: &str) -> Result<Vec<User>, Error> {
        let response = self
            .http
            .get(&format!("{}/users", self.base_url))
            .query(&[("name", name)])
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(Error::UnexpectedStatus(status.as_u16())),
        }
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, Error> {
        let response = self
            .http
            .post(&format!("{}/users", self.base_url))
            .json(user)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => Ok(response.json().await?),
            status => Err(Error::UnexpectedStatus(status.as_u16())),
        }
    }
}
