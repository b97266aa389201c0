// crates/regform-core/src/store/http.rs
#![cfg(feature = "http")]

use super::{RecordStore, StoreError};
use crate::record::RegistrationRecord;
use reqwest::blocking::{Client, Response};
use std::time::Duration;
use tracing::debug;

const TIMEOUT: Duration = Duration::from_secs(30);

/// A REST collection endpoint: `POST base`, `PUT base/{id}`,
/// `DELETE base/{id}`, `GET base`.
///
/// Any non-2xx answer is a [`StoreError::Status`]. There are no retries.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base: String,
}

impl HttpStore {
    pub fn new(base: &str) -> Result<Self, StoreError> {
        Self::with_client(base, client_builder().build()?)
    }

    fn with_client(base: &str, client: Client) -> Result<Self, StoreError> {
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base, id)
    }
}

fn client_builder() -> reqwest::blocking::ClientBuilder {
    Client::builder()
        .timeout(TIMEOUT)
        .user_agent(concat!("regform/", env!("CARGO_PKG_VERSION")))
}

fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status(status.as_u16()))
    }
}

impl RecordStore for HttpStore {
    fn create(&self, record: &RegistrationRecord) -> Result<String, StoreError> {
        debug!(url = %self.base, "POST record");
        let body = RegistrationRecord {
            id: None,
            ..record.clone()
        };
        let created: RegistrationRecord = check(self.client.post(&self.base).json(&body).send()?)?
            .json()?;
        created
            .id
            .ok_or_else(|| StoreError::Unavailable("server response carried no id".into()))
    }

    fn update(&self, id: &str, record: &RegistrationRecord) -> Result<(), StoreError> {
        let url = self.item_url(id);
        debug!(%url, "PUT record");
        let body = RegistrationRecord {
            id: Some(id.to_owned()),
            ..record.clone()
        };
        check(self.client.put(&url).json(&body).send()?)
            .map_err(|e| match e {
                StoreError::Status(404) => StoreError::UnknownId(id.to_owned()),
                other => other,
            })
            .map(|_| ())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.item_url(id);
        debug!(%url, "DELETE record");
        check(self.client.delete(&url).send()?)
            .map_err(|e| match e {
                StoreError::Status(404) => StoreError::UnknownId(id.to_owned()),
                other => other,
            })
            .map(|_| ())
    }

    fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        debug!(url = %self.base, "GET records");
        Ok(check(self.client.get(&self.base).send()?)?.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers one request with `status` and `body`, and hands back the
    /// request line it saw.
    fn serve_once(status: &'static str, body: &'static str) -> (HttpStore, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/users", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0usize;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header.trim().is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            request_line.trim().to_owned()
        });

        let client = client_builder().no_proxy().build().unwrap();
        (HttpStore::with_client(&base, client).unwrap(), handle)
    }

    fn record() -> RegistrationRecord {
        RegistrationRecord {
            full_name: "Asha Rao".into(),
            ..RegistrationRecord::default()
        }
    }

    #[test]
    fn item_urls_join_on_one_slash() {
        let store = HttpStore::new("http://localhost:3000/users/").unwrap();
        assert_eq!(store.base_url(), "http://localhost:3000/users");
        assert_eq!(store.item_url("7"), "http://localhost:3000/users/7");
    }

    #[test]
    fn create_returns_the_server_id() {
        let (store, server) = serve_once("201 Created", r#"{"id":"42","fullName":"Asha Rao"}"#);
        assert_eq!(store.create(&record()).unwrap(), "42");
        assert_eq!(server.join().unwrap(), "POST /users HTTP/1.1");
    }

    #[test]
    fn server_errors_surface_as_status() {
        let (store, server) = serve_once("500 Internal Server Error", "{}");
        assert!(matches!(store.create(&record()), Err(StoreError::Status(500))));
        server.join().unwrap();

        let (store, server) = serve_once("503 Service Unavailable", "[]");
        assert!(matches!(store.list_all(), Err(StoreError::Status(503))));
        assert_eq!(server.join().unwrap(), "GET /users HTTP/1.1");
    }

    #[test]
    fn missing_items_are_unknown_ids() {
        let (store, server) = serve_once("404 Not Found", "{}");
        assert!(matches!(store.update("7", &record()), Err(StoreError::UnknownId(id)) if id == "7"));
        assert_eq!(server.join().unwrap(), "PUT /users/7 HTTP/1.1");

        let (store, server) = serve_once("404 Not Found", "{}");
        assert!(matches!(store.delete("7"), Err(StoreError::UnknownId(id)) if id == "7"));
        assert_eq!(server.join().unwrap(), "DELETE /users/7 HTTP/1.1");
    }

    #[test]
    fn create_without_an_id_in_the_answer_is_unavailable() {
        let (store, server) = serve_once("200 OK", r#"{"fullName":"Asha Rao"}"#);
        assert!(matches!(store.create(&record()), Err(StoreError::Unavailable(_))));
        server.join().unwrap();
    }

    #[test]
    fn list_reads_the_collection() {
        let (store, server) = serve_once("200 OK", r#"[{"id":"1","fullName":"Asha Rao","pincode":"600001"}]"#);
        let users = store.list_all().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id.as_deref(), Some("1"));
        assert_eq!(users[0].postal_code, "600001");
        server.join().unwrap();
    }
}
