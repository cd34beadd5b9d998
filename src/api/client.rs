//! Blocking HTTP implementation of [`Backend`]

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{ack_from, Backend, UploadFile};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    Ack, CollegeRef, CompanyRef, NewRecord, PlacementRecord, RecordTuple, SearchQuery,
    UpdateRequest, ViewRequest,
};

/// reqwest-backed client for the REST backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("college-connect/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, method: &str, path: &str, request: RequestBuilder) -> Result<Response> {
        tracing::debug!("{} {}", method, self.url(path));
        let response = request.send()?;
        let status = response.status();
        tracing::debug!("{} {} -> {}", method, path, status);

        if status.is_success() {
            return Ok(response);
        }

        // Error bodies are usually {"error": ...} or {"message": ...}
        let message = response
            .json::<Value>()
            .ok()
            .map(ack_from)
            .and_then(|ack| ack.text().map(str::to_string));
        Err(Error::status(status.as_u16(), message))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.get(self.url(path));
        Ok(self.send("GET", path, request)?.json()?)
    }

    fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.post(self.url(path)).json(body);
        Ok(self.send("POST", path, request)?.json()?)
    }

    fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Ack> {
        let value: Value = self.post_json(path, body)?;
        Ok(ack_from(value))
    }
}

impl Backend for HttpBackend {
    fn colleges(&self) -> Result<Vec<CollegeRef>> {
        self.get_json("/colleges")
    }

    fn companies(&self) -> Result<Vec<CompanyRef>> {
        self.get_json("/companies")
    }

    fn add(&self, record: &NewRecord) -> Result<Ack> {
        self.post_ack("/add", record)
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<PlacementRecord>> {
        self.post_json("/search", query)
    }

    fn view(&self, request: &ViewRequest) -> Result<Vec<PlacementRecord>> {
        self.post_json("/view", request)
    }

    fn update(&self, request: &UpdateRequest) -> Result<Ack> {
        self.post_ack("/edit-college-company", request)
    }

    fn delete(&self, tuple: &RecordTuple) -> Result<Ack> {
        self.post_ack("/delete-college-company", tuple)
    }

    fn upload_csv(&self, file: &UploadFile) -> Result<()> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = multipart::Form::new().part("file", part);

        let request = self.client.post(self.url("/upload-csv")).multipart(form);
        self.send("POST", "/upload-csv", request)?;
        Ok(())
    }

    fn analytics(&self, top_n: u32) -> Result<Value> {
        let request = self
            .client
            .get(self.url("/analytics"))
            .query(&[("n", top_n)]);
        Ok(self.send("GET", "/analytics", request)?.json()?)
    }

    fn download_url(&self) -> String {
        self.url("/download")
    }

    fn download(&self) -> Result<Vec<u8>> {
        let request = self.client.get(self.download_url());
        let bytes = self.send("GET", "/download", request)?.bytes()?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned response on a loopback port. The receiver yields the
    /// raw request the client sent.
    fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (HttpBackend, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            // Error tests never read the request
            let _ = tx.send(request);
        });

        let mut config = Config::default();
        config.api.base_url = format!("http://{addr}");
        config.api.timeout_secs = 5;
        (HttpBackend::new(&config).unwrap(), rx)
    }

    /// Read the head plus a Content-Length or chunked body.
    fn read_request(stream: &mut TcpStream) -> String {
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);

            let Some(end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&raw[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            let complete = match length {
                Some(length) => raw.len() >= end + 4 + length,
                None if head.contains("transfer-encoding: chunked") => {
                    raw.ends_with(b"0\r\n\r\n")
                }
                None => true,
            };
            if complete {
                break;
            }
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    #[test]
    fn test_new_uses_trimmed_base_url() {
        let mut config = Config::default();
        config.api.base_url = "http://localhost:5000/".to_string();
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.download_url(), "http://localhost:5000/download");
    }

    #[test]
    fn test_unreachable_backend_is_transport_error() {
        let mut config = Config::default();
        // Port 9 (discard) on loopback is almost never listening
        config.api.base_url = "http://127.0.0.1:9".to_string();
        config.api.timeout_secs = 2;
        let backend = HttpBackend::new(&config).unwrap();

        match backend.colleges() {
            Err(Error::Transport(_)) => {}
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_body_message_is_surfaced() {
        let (backend, _) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
        match backend.colleges() {
            Err(Error::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_without_body_falls_back() {
        let (backend, _) = serve_once("503 Service Unavailable", "");
        match backend.analytics(5) {
            Err(Error::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Network response was not ok (status: 503)");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_analytics_sends_top_n_query() {
        let (backend, rx) = serve_once("200 OK", "{}");
        let value = backend.analytics(3).unwrap();
        assert!(value.is_object());

        let request = rx.recv().unwrap();
        assert!(
            request.starts_with("GET /analytics?n=3 HTTP/1.1\r\n"),
            "request was {request:?}"
        );
    }

    #[test]
    fn test_upload_is_multipart_file_field() {
        let (backend, rx) = serve_once("200 OK", r#"{"message":"ok"}"#);
        let file = UploadFile {
            name: "placements.csv".to_string(),
            mime: "text/csv".to_string(),
            bytes: b"college_name,company_name\nMIT,Google\n".to_vec(),
        };
        backend.upload_csv(&file).unwrap();

        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /upload-csv HTTP/1.1\r\n"));
        let lower = request.to_ascii_lowercase();
        assert!(lower.contains("content-type: multipart/form-data; boundary="));
        assert!(request.contains(r#"name="file""#));
        assert!(request.contains(r#"filename="placements.csv""#));
        assert!(lower.contains("content-type: text/csv"));
        assert!(request.contains("MIT,Google"));
    }
}
