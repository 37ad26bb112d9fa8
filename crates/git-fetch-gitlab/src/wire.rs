use serde::Deserialize;

/// User entry from `GET /users?username=...`.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub username: String,
}

/// Partial project projection returned by the listing endpoint. Only the
/// id is used; the full record is re-fetched.
#[derive(Debug, Deserialize)]
pub struct ProjectSummary {
    pub id: u64,
}

/// Project detail from `GET /projects/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProjectResponse {
    pub id: u64,
    pub name: String,
    pub web_url: String,
    pub visibility: String,
    /// Absent for group-owned projects.
    #[serde(default)]
    pub owner: Option<UserRef>,
    pub namespace: Namespace,
}

#[derive(Debug, Deserialize)]
pub struct UserRef {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct Namespace {
    pub full_path: String,
}

/// Merge request entry from `GET /projects/{id}/merge_requests`.
#[derive(Debug, Deserialize)]
pub struct MergeRequestResponse {
    pub author: UserRef,
    pub state: String,
    #[serde(default)]
    pub title: String,
    pub web_url: String,
}
