use serde::Serialize;

use crate::error::FetchError;
use crate::repository::NormalizedRepository;

const INDENT: &[u8] = b"    ";

/// Serialize normalized repositories as a pretty-printed JSON array with
/// four-space indentation.
pub fn to_json(repositories: &[NormalizedRepository]) -> Result<String, FetchError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    repositories
        .serialize(&mut serializer)
        .map_err(|e| FetchError::Parse(format!("failed to serialize output: {e}")))?;

    String::from_utf8(buf).map_err(|e| FetchError::Parse(format!("invalid UTF-8 in output: {e}")))
}
