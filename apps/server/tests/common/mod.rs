//! Common test utilities for integration tests.
//!
//! Builds the real router over an in-memory vocabulary and a fixed synonym
//! table, so no network access is needed.

#![allow(dead_code)]

pub mod fixtures;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderValue;
use axum::Router;
use axum_test::TestServer;

use wordquiz_core::{LookupError, Oracle, OracleSettings, QuizEngine, SynonymLookup, Vocabulary};
use wordquiz_server::services::access::AccessGate;
use wordquiz_server::AppState;

pub const PASSWORD: &str = "12345";

/// Synonym source backed by a fixed table.
pub struct FixedSynonyms(pub HashMap<String, Vec<String>>);

#[async_trait]
impl SynonymLookup for FixedSynonyms {
    async fn lookup(&self, word: &str) -> Result<Vec<String>, LookupError> {
        Ok(self.0.get(word).cloned().unwrap_or_default())
    }
}

/// Test context holding the application state.
pub struct TestContext {
    pub state: AppState,
}

impl TestContext {
    /// Context over the default two-word vocabulary.
    pub fn new() -> Self {
        Self::with_vocabulary(fixtures::animals())
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        let oracle = Oracle::new(
            Box::new(FixedSynonyms(fixtures::synonyms())) as Box<dyn SynonymLookup>,
            OracleSettings::default(),
        );
        let state = AppState::new(
            QuizEngine::new(Arc::new(vocabulary), oracle),
            AccessGate::new(PASSWORD),
        );
        Self { state }
    }

    pub fn router(&self) -> Router {
        wordquiz_server::router(self.state.clone())
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Log in and return a bearer token.
    pub async fn login(server: &TestServer, user_id: &str) -> String {
        let response = server
            .post("/api/login")
            .json(&fixtures::login_request(user_id, PASSWORD))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["token"].as_str().unwrap().to_string()
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }
}
