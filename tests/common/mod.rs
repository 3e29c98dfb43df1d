//! Common test utilities

use arqual::error::NetworkError;
use arqual::network::Transport;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// Read a response document from `tests/fixtures`
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing fixture {}: {}", path.display(), e))
}

/// A request seen by the fake transport
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

impl SentRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport answering from a queue of canned responses and recording
/// every request it receives
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<Result<String, NetworkError>>>,
    sent: RefCell<Vec<SentRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        FakeTransport::default()
    }

    pub fn with_fixtures(names: &[&str]) -> Self {
        let transport = FakeTransport::new();
        for name in names {
            transport.push_body(fixture(name));
        }
        transport
    }

    pub fn push_body(&self, body: String) {
        self.responses.borrow_mut().push_back(Ok(body));
    }

    pub fn push_error(&self, error: NetworkError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.borrow().clone()
    }
}

impl Transport for &FakeTransport {
    fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<String, NetworkError> {
        self.sent.borrow_mut().push(SentRequest {
            url: url.to_string(),
            params: params.to_vec(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {}", url))
    }
}
