use serde::Deserialize;

/// Repository entry from `GET /user/repos`.
#[derive(Debug, Deserialize)]
pub struct RepoResponse {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub private: bool,
    pub owner: Account,
}

/// Minimal account projection embedded in repositories and pull requests.
#[derive(Debug, Deserialize)]
pub struct Account {
    pub login: String,
}

/// Pull request entry from `GET /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Deserialize)]
pub struct PullResponse {
    /// `null` when the author's account has been deleted.
    pub user: Option<Account>,
    pub state: String,
    #[serde(default)]
    pub title: String,
    pub html_url: String,
}
