use crate::errors::UploadError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the relay reads the upload content from.
#[derive(Debug, Clone)]
pub enum UploadSource {
    Path(PathBuf),
    Buffer(Vec<u8>),
}

pub type DynUploadRelay = Arc<dyn UploadRelayTrait + Send + Sync>;

/// Moves one file's bytes to external object storage and returns a
/// publicly resolvable URL. The relay never deletes local files; temp
/// cleanup belongs to the caller that buffered the upload.
#[async_trait]
pub trait UploadRelayTrait {
    async fn upload(
        &self,
        source: UploadSource,
        nome: &str,
        mime: &str,
    ) -> Result<String, UploadError>;
}
