use git_fetch::FetchError;
use reqwest::header::{HeaderMap, LINK};
use serde::de::DeserializeOwned;

const PER_PAGE: u32 = 100;

/// Authenticated transport for the GitHub REST API.
#[derive(Clone)]
pub(crate) struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl GitHubClient {
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
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token))
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
        let response = self.send(&url).await?;
        parse(response, &url).await
    }

    /// Fetch every page of a list endpoint. `path` may already carry a
    /// query string.
    pub(crate) async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, FetchError> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!(
                "{}{path}{separator}per_page={PER_PAGE}&page={page}",
                self.api_base
            );
            let response = self.send(&url).await?;
            let more = has_next_page(response.headers());

            let batch: Vec<T> = parse(response, &url).await?;
            items.extend(batch);

            if !more {
                return Ok(items);
            }
            page += 1;
        }
    }
}

async fn parse<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
) -> Result<T, FetchError> {
    response
        .json()
        .await
        .map_err(|e| FetchError::Parse(format!("{url}: {e}")))
}

/// GitHub advertises further pages through a `Link` header entry with
/// `rel="next"`.
fn has_next_page(headers: &HeaderMap) -> bool {
    headers
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|link| link.split(',').any(|part| part.contains("rel=\"next\"")))
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn next_page_detected_from_link_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(concat!(
                "<https://api.github.com/user/repos?page=2>; rel=\"next\", ",
                "<https://api.github.com/user/repos?page=5>; rel=\"last\"",
            )),
        );
        assert!(has_next_page(&headers));
    }

    #[test]
    fn last_page_has_no_next() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(concat!(
                "<https://api.github.com/user/repos?page=1>; rel=\"first\", ",
                "<https://api.github.com/user/repos?page=4>; rel=\"prev\"",
            )),
        );
        assert!(!has_next_page(&headers));
        assert!(!has_next_page(&HeaderMap::new()));
    }

    #[test]
    fn trailing_slash_trimmed_from_api_base() {
        let client = GitHubClient::new("T".into(), "http://localhost:1234/".into());
        assert_eq!(client.api_base, "http://localhost:1234");
    }
}
