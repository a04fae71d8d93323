// src/sheet/source.rs

use std::future::Future;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::envelope::decode_rows;
use super::types::RawRow;
use crate::config::SheetConfig;
use crate::error::UpstreamFailure;

/// Anything that can hand back the current raw rows of the pool.
pub trait RowSource: Send + Sync + 'static {
    fn fetch_rows(&self) -> impl Future<Output = Result<Vec<RawRow>, UpstreamFailure>> + Send;
}

/// Reads the pool from a Google Sheet through the gviz JSON endpoint.
pub struct GvizSource {
    client: Client,
    url: Url,
}

impl GvizSource {
    pub fn new(client: Client, sheet: &SheetConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            url: gviz_url(sheet)?,
        })
    }
}

/// `{base}/{id}/gviz/tq?tqx=out:json&sheet={name}&headers=1`
pub fn gviz_url(sheet: &SheetConfig) -> anyhow::Result<Url> {
    let base = format!(
        "{}/{}/gviz/tq",
        sheet.base_url.trim_end_matches('/'),
        sheet.sheet_id
    );
    let url = Url::parse_with_params(
        &base,
        &[
            ("tqx", "out:json"),
            ("sheet", sheet.sheet_name.as_str()),
            ("headers", "1"),
        ],
    )?;
    Ok(url)
}

impl RowSource for GvizSource {
    #[instrument(level = "info", skip(self))]
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, UpstreamFailure> {
        debug!("fetching sheet");
        let text = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let rows = decode_rows(&text)?;
        debug!(rows = rows.len(), "fetched sheet rows");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamFailure;
    use std::{
        net::SocketAddr,
        sync::{Arc, Mutex},
    };
    use warp::{http::StatusCode, Filter};

    const WRAPPED: &str = concat!(
        "/*O_o*/\ngoogle.visualization.Query.setResponse(",
        r#"{"status":"ok","table":{"cols":[{"label":"Title"}],"rows":["#,
        r#"{"c":[{"v":"Engineer"},{"v":"Senior"},{"v":"Backend"},null,null,{"v":"A"}]},"#,
        r#"{"c":[{"v":"PM"},null,null,null,null,null]}"#,
        "]}});",
    );

    /// Serve `body` with `status` under `/d/<id>/gviz/tq`, recording each request's query.
    fn spawn_sheet(
        status: StatusCode,
        body: &'static str,
    ) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let route = warp::path!("d" / String / "gviz" / "tq")
            .and(warp::query::raw())
            .map(move |id: String, query: String| {
                log.lock().unwrap().push(format!("{id}?{query}"));
                warp::reply::with_status(body, status)
            });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        (addr, seen)
    }

    fn sheet_at(base_url: String) -> SheetConfig {
        SheetConfig {
            sheet_id: "abc123".to_string(),
            sheet_name: "Warm Pool".to_string(),
            base_url,
        }
    }

    #[tokio::test]
    async fn test_fetch_rows_decodes_sheet() {
        let (addr, seen) = spawn_sheet(StatusCode::OK, WRAPPED);
        let sheet = sheet_at(format!("http://{addr}/d"));
        let source = GvizSource::new(Client::new(), &sheet).unwrap();

        let rows = source.fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell(0), "Engineer");
        assert_eq!(rows[0].cell(5), "A");
        assert_eq!(rows[1].cell(5), "");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], "abc123?tqx=out%3Ajson&sheet=Warm+Pool&headers=1");
    }

    #[tokio::test]
    async fn test_fetch_rows_error_status() {
        let (addr, seen) = spawn_sheet(StatusCode::INTERNAL_SERVER_ERROR, WRAPPED);
        let sheet = sheet_at(format!("http://{addr}/d"));
        let source = GvizSource::new(Client::new(), &sheet).unwrap();

        let err = source.fetch_rows().await.unwrap_err();
        assert!(matches!(err, UpstreamFailure::Request(_)), "{err:?}");
        // single attempt, no retry
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_rows_bad_body() {
        let (addr, _) = spawn_sheet(StatusCode::OK, "<html>Sign in (Google)</html>");
        let sheet = sheet_at(format!("http://{addr}/d"));
        let source = GvizSource::new(Client::new(), &sheet).unwrap();

        let err = source.fetch_rows().await.unwrap_err();
        assert!(matches!(err, UpstreamFailure::Json(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_fetch_rows_unreachable() {
        // bind and drop to get a port with nothing listening
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let sheet = sheet_at(format!("http://127.0.0.1:{port}/d"));
        let source = GvizSource::new(Client::new(), &sheet).unwrap();

        let err = source.fetch_rows().await.unwrap_err();
        assert!(matches!(err, UpstreamFailure::Request(_)), "{err:?}");
    }

    #[test]
    fn test_gviz_url_encodes_sheet_name() {
        let sheet = SheetConfig {
            sheet_id: "abc123".to_string(),
            sheet_name: "Warm Pool".to_string(),
            base_url: "https://docs.google.com/spreadsheets/d/".to_string(),
        };
        let url = gviz_url(&sheet).unwrap();
        assert_eq!(url.path(), "/spreadsheets/d/abc123/gviz/tq");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("tqx".to_string(), "out:json".to_string()),
                ("sheet".to_string(), "Warm Pool".to_string()),
                ("headers".to_string(), "1".to_string()),
            ]
        );
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn test_gviz_url_rejects_bad_base() {
        let sheet = SheetConfig {
            sheet_id: "abc".to_string(),
            sheet_name: "Warm Pool".to_string(),
            base_url: "not a url".to_string(),
        };
        assert!(gviz_url(&sheet).is_err());
    }
}
