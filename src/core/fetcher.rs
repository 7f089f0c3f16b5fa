use crate::config::toml_config::EndpointConfig;
use crate::domain::ports::{ApiEndpoint, ConfigProvider};
use crate::utils::error::{RosterError, Result};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const CLIENT_ID_HEADER: &str = "x-client-id";
pub const CLIENT_SECRET_HEADER: &str = "x-client-secret";
pub const NEXT_PAGE_HEADER: &str = "x-next-page";

#[derive(Debug, Deserialize)]
struct PageEnvelope<T> {
    #[serde(rename = "pageItems")]
    page_items: Vec<T>,
}

/// Sequential page walker over the two upstream endpoints.
///
/// Every request carries the endpoint's static credential headers. Pagination
/// continues while the response advertises `X-Next-Page: true`; the first
/// failing page aborts the whole fetch and drops everything gathered so far.
pub struct PaginatedFetcher {
    client: Client,
    periods: EndpointConfig,
    sections: EndpointConfig,
    page_size: usize,
}

impl PaginatedFetcher {
    pub fn new<C: ConfigProvider>(config: &C) -> Self {
        Self {
            client: Client::new(),
            periods: config.endpoint(ApiEndpoint::AcademicPeriods).clone(),
            sections: config.endpoint(ApiEndpoint::CourseSectionDetails).clone(),
            page_size: config.page_size(),
        }
    }

    fn settings(&self, endpoint: ApiEndpoint) -> &EndpointConfig {
        match endpoint {
            ApiEndpoint::AcademicPeriods => &self.periods,
            ApiEndpoint::CourseSectionDetails => &self.sections,
        }
    }

    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: ApiEndpoint,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let settings = self.settings(endpoint);
        let url = settings.url_for(endpoint);

        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let (page_items, has_next_page) =
                self.fetch_page::<T>(endpoint, settings, &url, page, params).await?;
            tracing::debug!(
                "📡 {} page {}: {} items (more pages: {})",
                endpoint.path(),
                page,
                page_items.len(),
                has_next_page
            );
            items.extend(page_items);

            if !has_next_page {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: ApiEndpoint,
        settings: &EndpointConfig,
        url: &str,
        page: usize,
        params: &[(&str, String)],
    ) -> Result<(Vec<T>, bool)> {
        let mut query = vec![
            ("pageSize", self.page_size.to_string()),
            ("page", page.to_string()),
        ];
        query.extend(params.iter().cloned());

        let response = self
            .client
            .get(url)
            .header(CLIENT_ID_HEADER, &settings.client_id)
            .header(CLIENT_SECRET_HEADER, &settings.client_secret)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RosterError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let has_next_page = next_page_flag(response.headers(), endpoint)?;
        let body = response.bytes().await?;
        let envelope: PageEnvelope<T> = serde_json::from_slice(&body)
            .map_err(|e| RosterError::decode(endpoint.path(), e.to_string()))?;

        Ok((envelope.page_items, has_next_page))
    }
}

/// 沒有 X-Next-Page 標頭視為最後一頁
fn next_page_flag(headers: &HeaderMap, endpoint: ApiEndpoint) -> Result<bool> {
    let Some(value) = headers.get(NEXT_PAGE_HEADER) else {
        return Ok(false);
    };

    let text = value
        .to_str()
        .map_err(|e| RosterError::decode(endpoint.path(), format!("bad X-Next-Page header: {}", e)))?
        .trim();

    match text.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(RosterError::decode(
            endpoint.path(),
            format!("X-Next-Page is not a boolean: '{}'", text),
        )),
    }
}
