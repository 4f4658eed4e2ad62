//! Loopback HTTP stand-in for the spreadsheet API.
//!
//! Each test scripts the responses with a closure; every request is recorded
//! so the test can inspect paths and bodies afterwards.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Percent-decoded path, without the query.
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }

    pub fn is(&self, method: &str, path_suffix: &str) -> bool {
        self.method == method && self.path.ends_with(path_suffix)
    }
}

type Handler = dyn Fn(&Recorded) -> (u16, Value) + Send + Sync;

pub struct FakeApi {
    pub base: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeApi {
    pub fn start(handler: impl Fn(&Recorded) -> (u16, Value) + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                serve(stream, &*handler, &log);
            }
        });

        Self {
            base: format!("http://{addr}/v4/"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("request log").clone()
    }

    pub fn find(&self, method: &str, path_suffix: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.is(method, path_suffix))
            .collect()
    }

    /// `sheetsync` pointed at this server with a static token and an empty home.
    pub fn command(&self, home: &Path) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sheetsync"));
        cmd.env("HOME", home)
            .env("USERPROFILE", home)
            .env("SHEETSYNC_API_BASE", &self.base)
            .env("SHEETSYNC_ACCESS_TOKEN", "test-token")
            .env_remove("SHEETSYNC_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn serve(stream: TcpStream, handler: &Handler, log: &Mutex<Vec<Recorded>>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut line = String::new();
    if reader.read_line(&mut line).unwrap_or(0) == 0 {
        return;
    }
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();
    let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));

    let mut content_length = 0;
    let mut authorization = None;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap_or(0) == 0 || header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            let value = value.trim().to_string();
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "authorization" => authorization = Some(value),
                _ => {}
            }
        }
    }
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).expect("read body");

    let request = Recorded {
        method,
        path: percent_decode(path),
        query: query.to_string(),
        authorization,
        body: String::from_utf8(body).expect("utf-8 body"),
    };
    let (status, reply) = handler(&request);
    log.lock().expect("request log").push(request);

    let reply = reply.to_string();
    let mut stream = stream;
    let _ = write!(
        stream,
        "HTTP/1.1 {status} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
        reply.len()
    );
    let _ = stream.flush();
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some(Ok(byte)) = raw.get(i + 1..i + 3).map(|h| u8::from_str_radix(h, 16)) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).expect("utf-8 path")
}

/// `GET …/spreadsheets/<id>` body listing `titles` in tab order.
pub fn sheet_list(titles: &[&str]) -> Value {
    let sheets: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "properties": {
                    "sheetId": 100 + i,
                    "title": title,
                    "index": i,
                    "gridProperties": {"rowCount": 1000, "columnCount": 26}
                }
            })
        })
        .collect();
    json!({ "sheets": sheets })
}

pub fn values(rows: Value) -> Value {
    json!({ "range": "ignored", "majorDimension": "ROWS", "values": rows })
}

pub fn ok() -> (u16, Value) {
    (200, json!({}))
}
