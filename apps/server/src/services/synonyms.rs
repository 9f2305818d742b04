//! Synonym lookup against the how-to-all.com dictionary pages.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use scraper::{Html, Selector};
use wordquiz_core::{LookupError, SynonymLookup};

const USER_AGENT: &str = "Mozilla/5.0";
const QUERY_MARKER: &str = "синонимы:";
const ROW_SELECTOR: &str = "#table1 tbody tr";
/// Leading rows that hold the table header and the word itself.
const SKIPPED_ROWS: usize = 2;

/// HTTP-backed synonym source.
pub struct HttpSynonyms {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSynonyms {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url_for(&self, word: &str) -> String {
        let query = format!("{}{}", QUERY_MARKER, word);
        format!("{}/{}", self.base_url, urlencoding::encode(&query))
    }
}

#[async_trait]
impl SynonymLookup for HttpSynonyms {
    async fn lookup(&self, word: &str) -> Result<Vec<String>, LookupError> {
        let url = self.url_for(word);
        tracing::debug!(%url, "Fetching synonyms");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        extract_synonyms(&body)
    }
}

/// Pull synonyms out of a dictionary page.
///
/// Each row's text pieces are trimmed and concatenated, cut at the first
/// `" ("` annotation and lowercased. Empty rows are dropped.
pub fn extract_synonyms(html: &str) -> Result<Vec<String>, LookupError> {
    let selector =
        Selector::parse(ROW_SELECTOR).map_err(|e| LookupError::Parse(e.to_string()))?;
    let document = Html::parse_document(html);

    let synonyms = document
        .select(&selector)
        .skip(SKIPPED_ROWS)
        .filter_map(|row| {
            let text: String = row.text().map(str::trim).collect();
            if text.is_empty() {
                return None;
            }
            let word = text.split(" (").next().unwrap_or_default();
            Some(word.to_lowercase())
        })
        .collect();

    Ok(synonyms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"
        <html><body>
        <table id="table1"><tbody>
            <tr><th>Синоним</th></tr>
            <tr><td>большой</td></tr>
            <tr><td>Огромный</td></tr>
            <tr><td>крупный (разг. вариант)</td></tr>
            <tr><td>   </td></tr>
            <tr><td>Великий</td></tr>
        </tbody></table>
        <table id="other"><tbody><tr><td>ignored</td></tr></tbody></table>
        </body></html>
    "#;

    #[test]
    fn extract_skips_header_rows() {
        let synonyms = extract_synonyms(PAGE).unwrap();
        assert_eq!(synonyms, vec!["огромный", "крупный", "великий"]);
    }

    #[test]
    fn extract_without_table() {
        let synonyms = extract_synonyms("<html><body><p>nothing</p></body></html>").unwrap();
        assert!(synonyms.is_empty());
    }

    #[test]
    fn url_encodes_query() {
        let lookup = HttpSynonyms::new("https://example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            lookup.url_for("кот"),
            "https://example.com/%D1%81%D0%B8%D0%BD%D0%BE%D0%BD%D0%B8%D0%BC%D1%8B%3A%D0%BA%D0%BE%D1%82"
        );
    }

    #[tokio::test]
    async fn lookup_parses_successful_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let lookup = HttpSynonyms::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let synonyms = lookup.lookup("большой").await.unwrap();
        assert_eq!(synonyms, vec!["огромный", "крупный", "великий"]);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.path().starts_with("/%D1%81"));
    }

    #[tokio::test]
    async fn lookup_non_200_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(PAGE))
            .mount(&server)
            .await;

        let lookup = HttpSynonyms::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let err = lookup.lookup("большой").await.unwrap_err();
        assert!(matches!(err, LookupError::Status(404)));
    }

    #[tokio::test]
    async fn lookup_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(PAGE)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let lookup = HttpSynonyms::new(&server.uri(), Duration::from_millis(200)).unwrap();
        let err = lookup.lookup("большой").await.unwrap_err();
        assert!(matches!(err, LookupError::Network(_)));
    }
}
