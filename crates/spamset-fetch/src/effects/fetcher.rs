use std::io::Write;
use std::path::{Path, PathBuf};

use futures_util::TryStreamExt;
use tracing::{debug, info};

use crate::data::{FetchOptions, FetchPhase, Progress};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result};

/// Downloads a URL to a file, staging the body next to the destination.
///
/// The destination only appears once the whole body has been written; a
/// failed download leaves nothing behind.
pub struct Fetcher<C: HttpClient> {
    client: C,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch `url` into `destination`, creating its parent directory if needed.
    pub async fn fetch(&self, url: &str, destination: &Path) -> Result<PathBuf> {
        validate_url(url)?;
        if destination.is_dir() {
            return Err(FetchError::DestinationIsDirectory(destination.to_path_buf()));
        }

        let dest_dir = spamset_fs::parent_dir(destination);
        spamset_fs::ensure_dir(dest_dir)?;

        self.notify(FetchPhase::Connecting, 0, None);

        // Size is only used for progress display.
        let total_bytes = match self.client.head(url).await {
            Ok(len) => len,
            Err(e) => {
                debug!(%url, error = %e, "HEAD request failed, size unknown");
                None
            }
        };
        debug!(%url, ?total_bytes, "starting download");

        let mut staging = tempfile::Builder::new()
            .prefix(".")
            .suffix(".part")
            .tempfile_in(dest_dir)
            .map_err(FetchError::TempFileError)?;

        let bytes_downloaded = self
            .stream_to_staging(url, staging.as_file_mut(), total_bytes)
            .await?;

        self.notify(FetchPhase::Committing, bytes_downloaded, total_bytes);
        staging
            .persist(destination)
            .map_err(|e| FetchError::Io(e.error))?;

        info!(
            %url,
            destination = %destination.display(),
            bytes = bytes_downloaded,
            "download complete"
        );
        self.notify(FetchPhase::Completed, bytes_downloaded, total_bytes);

        Ok(destination.to_path_buf())
    }

    async fn stream_to_staging(
        &self,
        url: &str,
        file: &mut std::fs::File,
        total_bytes: Option<u64>,
    ) -> Result<u64> {
        let mut stream = self
            .client
            .stream(url)
            .await
            .map_err(Into::<FetchError>::into)?;

        let mut bytes_downloaded = 0u64;
        self.notify(FetchPhase::Downloading, bytes_downloaded, total_bytes);

        while let Some(chunk) = stream.try_next().await.map_err(Into::<FetchError>::into)? {
            file.write_all(&chunk)?;
            bytes_downloaded += chunk.len() as u64;
            self.notify(FetchPhase::Downloading, bytes_downloaded, total_bytes);
        }

        file.sync_all()?;
        Ok(bytes_downloaded)
    }

    fn notify(&self, phase: FetchPhase, bytes_downloaded: u64, total_bytes: Option<u64>) {
        if let Some(ref callback) = self.options.on_progress {
            callback(&Progress {
                phase,
                bytes_downloaded,
                total_bytes,
            });
        }
    }
}

fn validate_url(url: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(FetchError::InvalidUrl(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::http::BoxStream;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const URL: &str = "https://example.test/archive.zip";

    #[derive(Default)]
    struct MockClient {
        chunks: Vec<&'static [u8]>,
        status: Option<u16>,
        fail_midway: bool,
        requests: AtomicUsize,
    }

    impl HttpClient for MockClient {
        type Error = FetchError;

        async fn stream(
            &self,
            url: &str,
        ) -> std::result::Result<BoxStream<'static, std::result::Result<Bytes, FetchError>>, FetchError>
        {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if let Some(status) = self.status {
                return Err(FetchError::HttpStatus {
                    status,
                    url: url.to_string(),
                });
            }
            let mut items: Vec<std::result::Result<Bytes, FetchError>> = self
                .chunks
                .iter()
                .map(|c| Ok(Bytes::from_static(c)))
                .collect();
            if self.fail_midway {
                items.push(Err(FetchError::Network("connection reset".to_string())));
            }
            Ok(Box::pin(futures_util::stream::iter(items)))
        }

        async fn head(&self, _url: &str) -> std::result::Result<Option<u64>, FetchError> {
            Ok(Some(self.chunks.iter().map(|c| c.len() as u64).sum()))
        }
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn fetch_writes_all_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("archive.zip");
        let client = MockClient {
            chunks: vec![b"PK", b"\x03\x04", b"rest"],
            ..Default::default()
        };

        let fetcher = Fetcher::new(client);
        let path = fetcher.fetch(URL, &dest).await.unwrap();

        assert_eq!(path, dest);
        assert_eq!(std::fs::read(&dest).unwrap(), b"PK\x03\x04rest");
        assert_eq!(dir_entries(dir.path()), vec!["archive.zip"]);
        assert_eq!(fetcher.client().requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested/data/archive.zip");
        let client = MockClient {
            chunks: vec![b"zip"],
            ..Default::default()
        };

        Fetcher::new(client).fetch(URL, &dest).await.unwrap();
        assert!(dest.is_file());
    }

    #[tokio::test]
    async fn http_error_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("archive.zip");
        let client = MockClient {
            status: Some(404),
            ..Default::default()
        };

        let err = Fetcher::new(client).fetch(URL, &dest).await.unwrap_err();

        assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }));
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn interrupted_body_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("archive.zip");
        let client = MockClient {
            chunks: vec![b"partial"],
            fail_midway: true,
            ..Default::default()
        };

        let err = Fetcher::new(client).fetch(URL, &dest).await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
        assert!(!dest.exists());
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn progress_reports_phases_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("archive.zip");
        let client = MockClient {
            chunks: vec![b"abc", b"de"],
            ..Default::default()
        };

        let seen: Arc<Mutex<Vec<Progress>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let options = FetchOptions::default().on_progress(Arc::new(move |p: &Progress| {
            sink.lock().unwrap().push(p.clone());
        }));

        Fetcher::new(client)
            .with_options(options)
            .fetch(URL, &dest)
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        let mut phases: Vec<FetchPhase> = seen.iter().map(|p| p.phase).collect();
        phases.dedup();
        assert_eq!(
            phases,
            vec![
                FetchPhase::Connecting,
                FetchPhase::Downloading,
                FetchPhase::Committing,
                FetchPhase::Completed
            ]
        );

        let last = seen.last().unwrap();
        assert_eq!(last.bytes_downloaded, 5);
        assert_eq!(last.total_bytes, Some(5));
    }

    #[tokio::test]
    async fn rejects_non_http_url() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockClient::default();

        let err = Fetcher::new(client)
            .fetch("ftp://example.test/a.zip", &dir.path().join("a.zip"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn rejects_directory_destination() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockClient::default();

        let err = Fetcher::new(client).fetch(URL, dir.path()).await.unwrap_err();

        assert!(matches!(err, FetchError::DestinationIsDirectory(_)));
    }
}
