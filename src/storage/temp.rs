use crate::utils::generate_random_string;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, info, warn};

const NAME_SUFFIX_LEN: usize = 11;

/// Disk buffer for incoming multipart uploads. Generated names are
/// collision-resistant (millisecond timestamp in base36 plus a random
/// suffix), so concurrent requests never contend for the same path and
/// no locking is needed.
#[derive(Debug, Clone)]
pub struct TempStore {
    dir: PathBuf,
}

impl TempStore {
    pub async fn new(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir).await?;
        info!("📁 Upload directory ready: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn generate_name() -> io::Result<String> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(io::Error::other)?
            .as_millis();
        let suffix = generate_random_string(NAME_SUFFIX_LEN).map_err(io::Error::other)?;
        Ok(format!("{}-{suffix}", to_base36(millis)))
    }

    /// Buffers one upload to disk and returns its path.
    pub async fn save(&self, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.join(Self::generate_name()?);
        fs::write(&path, bytes).await?;
        debug!("💾 Buffered upload to {}", path.display());
        Ok(path)
    }

    /// Best-effort removal. Failures are logged and swallowed; cleanup
    /// must never change the outcome of the request that triggered it.
    pub async fn remove(&self, path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => debug!("🧹 Removed temp file {}", path.display()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!("⚠️ Failed to remove temp file {}: {err}", path.display()),
        }
    }
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}
