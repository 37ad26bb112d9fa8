use serde::{Deserialize, Serialize};

/// One pull/merge request in normalized form.
///
/// Values are passed through from the provider unchanged: `state` keeps
/// the provider's own vocabulary and empty fields stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub author: String,
    pub state: String,
    pub title: String,
    pub url: String,
}

impl PullRequest {
    pub fn new(
        author: impl Into<String>,
        state: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            state: state.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_four_keys_in_order() {
        let pr = PullRequest::new("octocat", "merged", "", "https://example.com/pr/1");
        let json = serde_json::to_string(&pr).unwrap();
        assert_eq!(
            json,
            r#"{"author":"octocat","state":"merged","title":"","url":"https://example.com/pr/1"}"#
        );
    }
}
