//! A local HTTP server standing in for the Coda API in tests.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::config::{CodaSettings, ColumnIds, RetrySettings};

/// Maps a request target (path and query string) to a status and a JSON body.
pub type Respond = fn(&str) -> (u16, String);

pub struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub async fn start(respond: Respond) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                handle(stream, respond, &recorded).await;
            }
        });
        Self { base_url, requests }
    }

    /// Request targets in the order they were received.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn settings(&self) -> CodaSettings {
        CodaSettings {
            api_key: "secret".to_string(),
            doc_id: "doc".to_string(),
            accounts_table_id: "grid-accounts".to_string(),
            transactions_table_id: "grid-transactions".to_string(),
            columns: ColumnIds {
                account_name: "c-name".to_string(),
                account_type: "c-type".to_string(),
                date: "c-date".to_string(),
                debit: "c-debit".to_string(),
                credit: "c-credit".to_string(),
                amount: "c-amount".to_string(),
            },
            base_url: self.base_url.clone(),
            query_offsets: vec!["-07:00".to_string(), "-08:00".to_string()],
            retry: RetrySettings {
                attempts: 1,
                initial_delay_ms: 0,
            },
        }
    }
}

async fn handle(mut stream: TcpStream, respond: Respond, recorded: &Mutex<Vec<String>>) {
    let mut request = Vec::new();
    let mut buffer = [0; 1024];
    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut buffer).await.unwrap();
        if read == 0 {
            return;
        }
        request.extend_from_slice(&buffer[..read]);
    }
    let request = String::from_utf8_lossy(&request);
    let target = request
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string();
    recorded.lock().unwrap().push(target.clone());

    let (status, body) = respond(&target);
    let response = format!(
        "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.ok();
}
