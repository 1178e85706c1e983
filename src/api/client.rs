use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{info, instrument};
use url::Url;

use crate::api::{ApiError, SessionSource, SubmitReceipt};
use crate::config::Config;
use crate::draft::{ImageAttachment, TaxonomyTerm};
use crate::submission::{PostRecord, SubmissionPayload};

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
}

impl ApiClient {
    pub fn new(mut base_url: Url) -> Self {
        // Relative joins drop the last path segment unless it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url().clone())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        send_json(HTTP_CLIENT.get(url)).await
    }

    /// Create the post (no id yet) or update it in place. With an attachment
    /// the payload goes as a multipart form next to the image bytes.
    #[instrument(skip_all, fields(post_id = ?post_id, slug = %payload.slug))]
    pub async fn submit(
        &self,
        post_id: Option<i64>,
        payload: &SubmissionPayload,
        attachment: Option<&ImageAttachment>,
    ) -> Result<SubmitReceipt, ApiError> {
        let request = match post_id {
            Some(id) => HTTP_CLIENT.put(self.endpoint(&format!("posts/{id}"))?),
            None => HTTP_CLIENT.post(self.endpoint("posts")?),
        };

        let request = match attachment {
            Some(image) => request.multipart(multipart_form(payload, image)?),
            None => request.json(payload),
        };

        let receipt: SubmitReceipt = send_json(request).await?;
        info!(id = receipt.id, slug = %receipt.slug, "Post submitted");
        Ok(receipt)
    }
}

fn multipart_form(payload: &SubmissionPayload, image: &ImageAttachment) -> Result<Form, ApiError> {
    let json = serde_json::to_string(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
    let image_part = Part::bytes(image.data.to_vec())
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)
        .map_err(|e| ApiError::Encode(e.to_string()))?;

    let payload_part = Part::text(json)
        .mime_str("application/json")
        .map_err(|e| ApiError::Encode(e.to_string()))?;

    Ok(Form::new()
        .part("payload", payload_part)
        .part("image", image_part))
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request
        .send()
        .await
        .map_err(ApiError::from_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::from_status(status));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl SessionSource for ApiClient {
    #[instrument(skip_all)]
    async fn fetch_categories(&self) -> Result<Vec<TaxonomyTerm>, ApiError> {
        self.get_json("categories").await
    }

    #[instrument(skip_all)]
    async fn fetch_tags(&self) -> Result<Vec<TaxonomyTerm>, ApiError> {
        self.get_json("tags").await
    }

    #[instrument(skip(self))]
    async fn fetch_post(&self, id: i64) -> Result<PostRecord, ApiError> {
        self.get_json(&format!("posts/{id}")).await
    }
}
