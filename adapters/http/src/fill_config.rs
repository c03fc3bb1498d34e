use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ApiError, MAX_FILL, MIN_FILL};

const PERCENT_SIGN: char = '%';

/// Persists the most recently accepted fill as `<n>%` in a small text file.
#[derive(Clone, Debug)]
pub struct FillConfig {
    path: PathBuf,
}

impl FillConfig {
    /// Creates a handle for the fill file at `path`. The file is not touched.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the fill file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `fill`, creating or truncating the file.
    pub async fn store(&self, fill: i32) -> Result<(), ApiError> {
        tokio::fs::write(&self.path, format!("{fill}{PERCENT_SIGN}"))
            .await
            .map_err(|source| ApiError::FillConfig {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), fill, "stored fill");
        Ok(())
    }

    /// Reads the stored fill. Returns `None` when the file does not exist yet.
    ///
    /// A stored value outside the accepted range is an error, so a hand-edited
    /// file can never reach the seeding pass.
    pub async fn load(&self) -> Result<Option<i32>, ApiError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ApiError::FillConfig {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let fill = parse_fill(&contents, &self.path)?;
        if !(MIN_FILL..=MAX_FILL).contains(&fill) {
            return Err(ApiError::StoredFillOutOfRange {
                path: self.path.clone(),
                fill,
            });
        }
        Ok(Some(fill))
    }
}

/// Parses fill file contents such as `"40%"` or `" 7 "`.
pub fn parse_fill(contents: &str, path: &Path) -> Result<i32, ApiError> {
    contents
        .replace(PERCENT_SIGN, "")
        .trim()
        .parse()
        .map_err(|source| ApiError::FillParse {
            path: path.to_path_buf(),
            contents: contents.to_owned(),
            source,
        })
}
