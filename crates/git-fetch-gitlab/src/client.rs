use git_fetch::FetchError;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

const PER_PAGE: u32 = 100;
const NEXT_PAGE: &str = "x-next-page";

/// Authenticated transport for the GitLab REST v4 API.
#[derive(Clone)]
pub(crate) struct GitLabClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl GitLabClient {
    pub(crate) fn new(token: String, api_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_owned(),
            token,
        }
    }

    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .header("User-Agent", "git-fetch")
            .header("PRIVATE-TOKEN", &self.token)
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self
            .build_request(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Http {
                status: response.status().as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response)
    }

    /// Fetch a single resource.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.api_base);
        self.send(&url)
            .await?
            .json()
            .await
            .map_err(|e| FetchError::Parse(format!("{url}: {e}")))
    }

    /// Walk a paginated list endpoint to the end and return every item.
    pub(crate) async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, FetchError> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = String::from("1");

        loop {
            let url = format!(
                "{}{path}{separator}per_page={PER_PAGE}&page={page}",
                self.api_base
            );
            let response = self.send(&url).await?;
            let next = next_page(response.headers());

            let batch: Vec<T> = response
                .json()
                .await
                .map_err(|e| FetchError::Parse(format!("{url}: {e}")))?;
            items.extend(batch);

            match next {
                Some(n) => page = n,
                None => return Ok(items),
            }
        }
    }
}

/// GitLab reports the following page number in `x-next-page`; the header is
/// empty on the last page.
fn next_page(headers: &HeaderMap) -> Option<String> {
    headers
        .get(NEXT_PAGE)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn next_page_read_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(NEXT_PAGE, HeaderValue::from_static("3"));
        assert_eq!(next_page(&headers).as_deref(), Some("3"));
    }

    #[test]
    fn empty_or_missing_header_ends_paging() {
        let mut headers = HeaderMap::new();
        assert_eq!(next_page(&headers), None);
        headers.insert(NEXT_PAGE, HeaderValue::from_static(""));
        assert_eq!(next_page(&headers), None);
    }
}
