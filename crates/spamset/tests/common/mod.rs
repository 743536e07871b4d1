//! Shared fixtures for the pipeline tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use spamset_fetch::{BoxStream, FetchError, HttpClient};
use zip::write::SimpleFileOptions;

pub const URL: &str = "https://example.test/smsspamcollection.zip";

pub const RAW: &[u8] = b"ham\tGo until jurong point, crazy..\nspam\tFree entry in 2 a wkly comp\nham\tOk lar... Joking wif u oni\n";

pub const EXPECTED_CSV: &str =
    "label,text\n0,\"Go until jurong point, crazy..\"\n1,Free entry in 2 a wkly comp\n0,Ok lar... Joking wif u oni\n";

/// Serves a fixed body and counts GET requests.
#[derive(Clone, Default)]
pub struct MockClient {
    body: Vec<u8>,
    status: Option<u16>,
    requests: Arc<AtomicUsize>,
}

impl MockClient {
    pub fn serving(body: Vec<u8>) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl HttpClient for MockClient {
    type Error = FetchError;

    async fn stream(
        &self,
        url: &str,
    ) -> Result<BoxStream<'static, Result<Bytes, FetchError>>, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.status {
            return Err(FetchError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }
        let body = Bytes::from(self.body.clone());
        Ok(Box::pin(futures_util::stream::iter(vec![Ok(body)])))
    }

    async fn head(&self, _url: &str) -> Result<Option<u64>, FetchError> {
        Ok(Some(self.body.len() as u64))
    }
}

pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn collection_zip() -> Vec<u8> {
    build_zip(&[("SMSSpamCollection", RAW), ("readme", b"SMS Spam Collection v.1")])
}
