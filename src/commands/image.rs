use anyhow::{Context, Result};
use base64::Engine;
use log::debug;
use std::path::{Path, PathBuf};

/// Where an image comes from on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSource {
    pub url: Option<String>,
    pub file: Option<PathBuf>,
    pub base64: Option<String>,
}

impl ImageSource {
    /// Resolves to `(image_url, image_base64)`. A file is read and encoded.
    pub fn resolve(&self) -> Result<(Option<String>, Option<String>)> {
        let inline = match (&self.file, &self.base64) {
            (Some(path), _) => Some(encode_file(path)?),
            (None, Some(data)) => Some(data.clone()),
            (None, None) => None,
        };
        Ok((self.url.clone(), inline))
    }
}

fn encode_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file {}", path.display()))?;
    debug!("Encoding {} ({} bytes) as base64", path.display(), bytes.len());
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}
