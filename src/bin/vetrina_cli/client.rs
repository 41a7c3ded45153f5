use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use vetrina::application::posts::CreatePostCommand;
use vetrina::infra::http::api::models::{
    DetailPageDoc, IncrementRequest, ListPageDoc, PostPayload, ViewsResponse,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site URL is required (use --site or VETRINA_SITE_URL)")]
    MissingSite,
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Server(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug)]
pub struct Ctx {
    client: Client,
    base: Url,
}

impl Ctx {
    pub fn new(site: &str) -> Result<Self, CliError> {
        let base = Url::parse(site)?.join("/")?;
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("vetrina-cli/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, path: &str) -> Result<Url, CliError> {
        self.base.join(path).map_err(CliError::Url)
    }

    pub async fn create_post(
        &self,
        command: &CreatePostCommand,
    ) -> Result<PostPayload, CliError> {
        let response = self
            .client
            .post(self.url("/api/v1/posts")?)
            .json(command)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(Self::server_error(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn list_page(&self) -> Result<ListPageDoc, CliError> {
        let response = self.client.get(self.url("/blog")?).send().await?;
        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// `None` when the site resolves the id to its not-found page.
    pub async fn detail_page(&self, id: i64) -> Result<Option<DetailPageDoc>, CliError> {
        let response = self
            .client
            .get(self.url(&format!("/blog/{id}"))?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        Ok(Some(response.json().await?))
    }

    pub async fn increment_views(&self, id: i64) -> Result<i64, CliError> {
        let response = self
            .client
            .post(self.url("/api/v1/views")?)
            .json(&IncrementRequest { id })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        let views: ViewsResponse = response.json().await?;
        Ok(views.views)
    }

    async fn server_error(response: reqwest::Response) -> CliError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        CliError::Server(format!("{status}: {body}"))
    }
}
