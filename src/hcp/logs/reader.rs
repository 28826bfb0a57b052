//! Incremental reader for archived run logs
//!
//! Log endpoints return the bytes written so far; the stream is framed by an
//! STX (0x02) byte at the start and an ETX (0x03) byte once the log is
//! complete. Logs from older backends may lack the framing, in which case
//! the owning plan/apply/policy check is asked whether it has finished.

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::Stream;
use log::debug;
use std::future::Future;
use std::time::Duration;

use crate::config::logs;
use crate::error::{Result, TfeError};
use crate::hcp::TfeClient;

const STX: u8 = 0x02;
const ETX: u8 = 0x03;

type DoneCheck<'a> = Box<dyn FnMut() -> BoxFuture<'a, Result<bool>> + Send + 'a>;

/// Polls a `log-read-url` until the log is complete
pub struct LogReader<'a> {
    client: &'a TfeClient,
    log_url: url::Url,
    done: DoneCheck<'a>,
    offset: u64,
    reads: u32,
    polls: u64,
    start_of_text: bool,
    end_of_text: bool,
    finished: bool,
    backoff_min: Duration,
    backoff_max: Duration,
}

impl<'a> LogReader<'a> {
    /// Create a reader for `log_url`
    ///
    /// `done` reports whether the owner of the log has reached a final status.
    pub fn new<F, Fut>(client: &'a TfeClient, log_url: &str, mut done: F) -> Result<Self>
    where
        F: FnMut() -> Fut + Send + 'a,
        Fut: Future<Output = Result<bool>> + Send + 'a,
    {
        let log_url = url::Url::parse(log_url)
            .map_err(|e| TfeError::Config(format!("invalid log URL '{}': {}", log_url, e)))?;

        Ok(Self {
            client,
            log_url,
            done: Box::new(move || -> BoxFuture<'a, Result<bool>> { Box::pin(done()) }),
            offset: 0,
            reads: 0,
            polls: 0,
            start_of_text: false,
            end_of_text: false,
            finished: false,
            backoff_min: Duration::from_millis(logs::BACKOFF_MIN_MS as u64),
            backoff_max: Duration::from_millis(logs::BACKOFF_MAX_MS as u64),
        })
    }

    /// Override the polling backoff bounds
    pub fn with_backoff(mut self, min: Duration, max: Duration) -> Self {
        self.backoff_min = min;
        self.backoff_max = max;
        self
    }

    /// Bytes consumed so far, markers included
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn backoff(&self) -> Duration {
        let min = self.backoff_min.as_millis() as f64;
        let max = self.backoff_max.as_millis() as f64;
        let ms = (min * 2f64.powf(self.reads as f64 / 5.0)).min(max);
        Duration::from_millis(ms as u64)
    }

    /// Next non-empty chunk of log text, or `None` once the log is complete
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        if self.finished {
            return Ok(None);
        }

        self.reads = 0;
        loop {
            if self.polls > 0 {
                tokio::time::sleep(self.backoff()).await;
            }
            self.polls += 1;
            self.reads += 1;

            let chunk = self.poll().await?;

            if !chunk.is_empty() {
                if self.end_of_text {
                    self.finished = true;
                }
                return Ok(Some(chunk));
            }

            if self.end_of_text {
                self.finished = true;
                return Ok(None);
            }

            // Without framing we cannot tell a quiet log from a finished one,
            // and a framed log may have been cut off before its ETX.
            let ask_owner = (self.start_of_text && self.reads % logs::TRUNCATED_READ_LIMIT == 0)
                || (!self.start_of_text && self.reads > 1);

            if ask_owner && (self.done)().await? {
                debug!("Log owner finished, stopping at offset {}", self.offset);
                self.finished = true;
                return Ok(None);
            }
        }
    }

    async fn poll(&mut self) -> Result<Bytes> {
        let mut url = self.log_url.clone();
        url.set_query(Some(&format!(
            "limit={}&offset={}",
            logs::CHUNK_SIZE,
            self.offset
        )));

        let response = self.client.fetch_url(url.as_str()).await?;
        let body = response.bytes().await?;

        let mut start = 0;
        let mut end = body.len();

        if !self.start_of_text && body.first() == Some(&STX) {
            self.start_of_text = true;
            start = 1;
            self.offset += 1;
        }

        if self.start_of_text && end > start && body[end - 1] == ETX {
            self.end_of_text = true;
            end -= 1;
            self.offset += 1;
        }

        self.offset += (end - start) as u64;
        Ok(body.slice(start..end))
    }

    /// Read until the log completes
    pub async fn read_to_string(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        while let Some(chunk) = self.next_chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Consume the reader as a stream of chunks
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes>> + 'a {
        futures::stream::unfold(self, |mut reader| async move {
            match reader.next_chunk().await {
                Ok(Some(chunk)) => Some((Ok(chunk), reader)),
                Ok(None) => None,
                Err(e) => {
                    reader.finished = true;
                    Some((Err(e), reader))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast(reader: LogReader<'_>) -> LogReader<'_> {
        reader.with_backoff(Duration::from_millis(1), Duration::from_millis(2))
    }

    async fn mount_chunk(server: &MockServer, offset: &str, body: &[u8]) {
        Mock::given(method("GET"))
            .and(path("/log/abc"))
            .and(query_param("offset", offset))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_reads_framed_log() {
        let mock_server = MockServer::start().await;
        mount_chunk(&mock_server, "0", b"\x02hello ").await;
        mount_chunk(&mock_server, "7", b"world\x03").await;

        let client = TfeClient::test_client(&mock_server.uri());
        let url = format!("{}/log/abc", mock_server.uri());
        let mut reader = fast(LogReader::new(&client, &url, || async { Ok(false) }).unwrap());

        assert_eq!(reader.read_to_string().await.unwrap(), "hello world");
        assert_eq!(reader.offset(), 13);
        assert!(reader.is_finished());
        assert!(reader.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unframed_log_stops_when_owner_done() {
        let mock_server = MockServer::start().await;
        mount_chunk(&mock_server, "0", b"plain log").await;
        mount_chunk(&mock_server, "9", b"").await;

        let checks = Arc::new(AtomicU32::new(0));
        let counter = checks.clone();

        let client = TfeClient::test_client(&mock_server.uri());
        let url = format!("{}/log/abc", mock_server.uri());
        let mut reader = fast(
            LogReader::new(&client, &url, move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(true)
                }
            })
            .unwrap(),
        );

        assert_eq!(reader.read_to_string().await.unwrap(), "plain log");
        assert_eq!(checks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_truncated_log_checks_owner_every_ten_reads() {
        let mock_server = MockServer::start().await;
        mount_chunk(&mock_server, "0", b"\x02partial").await;
        mount_chunk(&mock_server, "8", b"").await;

        let client = TfeClient::test_client(&mock_server.uri());
        let url = format!("{}/log/abc", mock_server.uri());
        let mut reader = fast(LogReader::new(&client, &url, || async { Ok(true) }).unwrap());

        assert_eq!(reader.next_chunk().await.unwrap().unwrap(), "partial");
        assert!(reader.next_chunk().await.unwrap().is_none());

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1 + 10);
    }

    #[tokio::test]
    async fn test_stream_yields_chunks() {
        let mock_server = MockServer::start().await;
        mount_chunk(&mock_server, "0", b"\x02a").await;
        mount_chunk(&mock_server, "2", b"b\x03").await;

        let client = TfeClient::test_client(&mock_server.uri());
        let url = format!("{}/log/abc", mock_server.uri());
        let reader = fast(LogReader::new(&client, &url, || async { Ok(false) }).unwrap());

        let chunks: Vec<Bytes> = reader
            .into_stream()
            .map(|c| c.unwrap())
            .collect()
            .await;
        assert_eq!(chunks, vec![Bytes::from_static(b"a"), Bytes::from_static(b"b")]);
    }

    #[tokio::test]
    async fn test_error_ends_stream() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/log/abc"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let url = format!("{}/log/abc", mock_server.uri());
        let reader = fast(LogReader::new(&client, &url, || async { Ok(false) }).unwrap());

        let items: Vec<Result<Bytes>> = reader.into_stream().collect().await;
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn test_invalid_log_url() {
        let client = TfeClient::test_client("http://localhost");
        assert!(LogReader::new(&client, "not a url", || async { Ok(true) }).is_err());
    }
}
