//! File-backed profile provider: reads a profile from JSON and clamps its
//! values at the boundary before it reaches the scoring engine.

use std::path::Path;

use crate::core::Profile;

/// Parse a profile from a JSON document.
///
/// ```json
/// { "id": "alice", "dimensions": { "humor": 0.8, "meme": null } }
/// ```
pub fn parse_profile(json: &str) -> Result<Profile, ProviderError> {
    let profile: Profile = serde_json::from_str(json).map_err(ProviderError::Parse)?;
    Ok(profile.sanitized())
}

pub fn load_profile(path: impl AsRef<Path>) -> Result<Profile, ProviderError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(ProviderError::Io)?;
    let profile = parse_profile(&contents)?;
    tracing::debug!(
        "Loaded profile {} from {} ({} known dimensions)",
        profile.id,
        path.display(),
        profile.known_count(),
    );
    Ok(profile)
}

#[derive(Debug)]
pub enum ProviderError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Io(e) => write!(f, "I/O error: {e}"),
            ProviderError::Parse(e) => write!(f, "Invalid profile JSON: {e}"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Io(e) => Some(e),
            ProviderError::Parse(e) => Some(e),
        }
    }
}
