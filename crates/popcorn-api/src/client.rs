use reqwest::Client;

use popcorn_core::config::CatalogConfig;
use popcorn_core::controller::SearchToken;
use popcorn_core::models::{MovieDetail, MovieSummary};

use crate::error::CatalogError;
use crate::types::{DetailPayload, SearchPage};

/// OMDb-style movie catalog client.
///
/// Base URL and API key are injected so tests can point the client at a
/// local stub.
pub struct OmdbClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OmdbClient {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http: Client::new(),
        }
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            tracing::warn!(status, "Catalog API error");
            Err(CatalogError::Api { status })
        }
    }

    /// Search the catalog by title.
    ///
    /// The token is consulted before the request goes out and again before
    /// the parsed result is returned: a cancelled token always yields
    /// [`CatalogError::Cancelled`], even though the transfer itself may
    /// have completed (the transport is not assumed to abort mid-flight).
    pub async fn search_by_title(
        &self,
        query: &str,
        token: &SearchToken,
    ) -> Result<Vec<MovieSummary>, CatalogError> {
        if token.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }

        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("s", query)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let page: SearchPage = resp
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        if token.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }
        if page.is_no_match() {
            tracing::debug!(query, "No catalog match");
            return Err(CatalogError::NoMatch);
        }

        Ok(page
            .search
            .into_iter()
            .map(|item| item.into_summary())
            .collect())
    }

    /// Fetch the full record for one title by its catalog id.
    ///
    /// No cancellation: a single detail view is open at a time and a newer
    /// selection supersedes the response at the controller.
    pub async fn fetch_by_id(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("i", imdb_id)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let payload: DetailPayload = resp
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        if payload.is_no_match() {
            return Err(CatalogError::NoMatch);
        }
        Ok(payload.into_detail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::time::Duration;

    /// Serve one canned HTTP response on an ephemeral port, then exit.
    fn spawn_server(status: u16, body: &'static str) -> String {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind stub server");
        let addr = listener.local_addr().expect("local addr");

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let _ = consume_request(&mut stream);
                let reason = if status == 200 { "OK" } else { "Error" };
                let _ = write!(
                    stream,
                    "HTTP/1.1 {status} {reason}\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.flush();
            }
        });

        format!("http://{addr}")
    }

    fn consume_request(stream: &mut TcpStream) -> std::io::Result<()> {
        stream.set_read_timeout(Some(Duration::from_millis(500)))?;
        let mut buf = [0_u8; 1024];
        let mut data = Vec::new();
        loop {
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(read) => {
                    data.extend_from_slice(&buf[..read]);
                    if data.windows(4).any(|window| window == b"\r\n\r\n") {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        Ok(())
    }

    fn client_for(base_url: String) -> OmdbClient {
        OmdbClient::new(&CatalogConfig {
            base_url,
            api_key: "test-key".into(),
        })
    }

    #[tokio::test]
    async fn test_search_parses_matches() {
        let base = spawn_server(
            200,
            r#"{"Search":[{"Title":"Inception","Year":"2010","imdbID":"tt1375666","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#,
        );

        let results = client_for(base)
            .search_by_title("inception", &SearchToken::new())
            .await
            .expect("search should succeed");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].imdb_id, "tt1375666");
        assert_eq!(results[0].title, "Inception");
    }

    #[tokio::test]
    async fn test_search_maps_no_match_marker() {
        let base = spawn_server(200, r#"{"Response":"False","Error":"Movie not found!"}"#);

        let err = client_for(base)
            .search_by_title("zzzzzz", &SearchToken::new())
            .await
            .expect_err("no-match marker should be an error");

        assert!(matches!(err, CatalogError::NoMatch));
    }

    #[tokio::test]
    async fn test_search_surfaces_http_status() {
        let base = spawn_server(503, "down");

        let err = client_for(base)
            .search_by_title("inception", &SearchToken::new())
            .await
            .expect_err("non-2xx should be an error");

        assert!(matches!(err, CatalogError::Api { status: 503 }));
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        // No server: the token is checked before any request is issued.
        let client = client_for("http://127.0.0.1:9".into());
        let token = SearchToken::new();
        token.cancel();

        let err = client
            .search_by_title("inception", &token)
            .await
            .expect_err("cancelled token must not search");

        assert!(matches!(err, CatalogError::Cancelled));
    }

    #[tokio::test]
    async fn test_fetch_by_id_parses_detail() {
        let base = spawn_server(
            200,
            r#"{"Title":"Inception","Year":"2010","Runtime":"148 min","imdbRating":"8.8","imdbID":"tt1375666","Response":"True"}"#,
        );

        let detail = client_for(base)
            .fetch_by_id("tt1375666")
            .await
            .expect("detail fetch should succeed");

        assert_eq!(detail.title, "Inception");
        assert_eq!(detail.runtime_minutes(), Some(148));
    }

    #[tokio::test]
    async fn test_fetch_by_id_unknown_id_is_no_match() {
        let base = spawn_server(200, r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#);

        let err = client_for(base)
            .fetch_by_id("tt0000000")
            .await
            .expect_err("unknown id should be an error");

        assert!(matches!(err, CatalogError::NoMatch));
    }
}
