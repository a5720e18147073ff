//! The real HTTP backend against a local listener that answers exactly one
//! request and records what it received.

use quickthink::backend::http::{HttpBackend, IDEMPOTENCY_HEADER};
use quickthink::backend::Backend;
use quickthink::error::QuickThinkError;
use quickthink::model::{DeckDraft, FileUpload, FlashcardDraft};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

struct Recorded {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Serve one request with `status` and `response`, returning the base URL.
fn serve_once(status: u16, response: &'static str) -> (String, JoinHandle<Recorded>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.push((k.trim().to_ascii_lowercase(), v.trim().to_string()));
            }
        }

        let find = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };
        let body = if let Some(len) = find("content-length") {
            let mut buf = vec![0; len.parse().unwrap()];
            reader.read_exact(&mut buf).unwrap();
            buf
        } else if find("transfer-encoding").is_some_and(|v| v.contains("chunked")) {
            read_chunked(&mut reader)
        } else {
            Vec::new()
        };

        write!(
            stream,
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            response.len(),
            response
        )
        .unwrap();
        stream.flush().unwrap();

        Recorded {
            method,
            path,
            headers,
            body,
        }
    });

    (base, handle)
}

fn read_chunked<R: BufRead>(reader: &mut R) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).unwrap();
        let size_hex = size_line.trim().split(';').next().unwrap_or("0");
        let size = usize::from_str_radix(size_hex, 16).unwrap();
        let mut chunk = vec![0; size + 2];
        reader.read_exact(&mut chunk).unwrap();
        if size == 0 {
            return body;
        }
        body.extend_from_slice(&chunk[..size]);
    }
}

fn backend(base: &str) -> HttpBackend {
    HttpBackend::new(base, Duration::from_secs(5)).unwrap()
}

#[test]
fn delete_hits_deck_path_with_idempotency_key() {
    let (base, server) = serve_once(200, "{}");

    backend(&base).delete_deck("d1").unwrap();

    let req = server.join().unwrap();
    assert_eq!(req.method, "DELETE");
    assert_eq!(req.path, "/api/decks/d1");
    let key = req.header(IDEMPOTENCY_HEADER).expect("idempotency key");
    assert!(uuid::Uuid::parse_str(key).is_ok());
}

#[test]
fn list_decks_parses_service_payload() {
    let (base, server) = serve_once(
        200,
        r#"[{"id":"d1","name":"Bio 101","category":"Science","description":null,
             "created_at":"2024-03-01T10:00:00.123456","user_id":"u1"}]"#,
    );

    let decks = backend(&base).list_decks().unwrap();

    let req = server.join().unwrap();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/api/decks");
    assert!(req.header(IDEMPOTENCY_HEADER).is_none());

    assert_eq!(decks.len(), 1);
    assert_eq!(decks[0].name, "Bio 101");
    assert_eq!(decks[0].description, "");
    assert!(decks[0].created_at.is_some());
}

#[test]
fn error_status_carries_detail() {
    let (base, server) = serve_once(404, r#"{"detail":"Deck not found or not owned by user."}"#);

    let err = backend(&base).delete_deck("d9").unwrap_err();
    server.join().unwrap();

    match err {
        QuickThinkError::Status { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Deck not found or not owned by user.");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn update_sends_all_fields_to_encoded_path() {
    let (base, server) = serve_once(200, "{}");

    backend(&base)
        .update_deck("a/b", &DeckDraft::new("Bio", "Science", "Cells"))
        .unwrap();

    let req = server.join().unwrap();
    assert_eq!(req.method, "PATCH");
    assert_eq!(req.path, "/api/decks/a%2Fb");
    let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"name": "Bio", "category": "Science", "description": "Cells"})
    );
}

#[test]
fn create_flashcards_posts_an_array() {
    let (base, server) = serve_once(201, "[]");

    backend(&base)
        .create_flashcards("d1", &[FlashcardDraft::new("What is ATP?", "Energy")])
        .unwrap();

    let req = server.join().unwrap();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/decks/d1/flashcards");
    let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!([{"question": "What is ATP?", "answer": "Energy"}])
    );
}

#[test]
fn upload_sends_single_file_field() {
    let (base, server) = serve_once(200, r#"{"status":"ok"}"#);
    let upload = FileUpload {
        file_name: "lecture.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: b"%PDF-1.4 cells".to_vec(),
    };

    backend(&base).generate_flashcards("d1", &upload).unwrap();

    let req = server.join().unwrap();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/decks/d1/flashcards/file");
    assert!(req
        .header("content-type")
        .is_some_and(|v| v.starts_with("multipart/form-data")));
    let body = req.body_text();
    assert!(body.contains(r#"name="file""#));
    assert!(body.contains(r#"filename="lecture.pdf""#));
    assert!(body.contains("%PDF-1.4 cells"));
}
