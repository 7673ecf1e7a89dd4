use reqwest::Url;
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::FetchError;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::range::RangeQuery;
use crate::response;

const QUERY_RANGE_PATH: [&str; 3] = ["api", "v1", "query_range"];

/// A client for the range query endpoint of a Prometheus server.
pub struct PrometheusClient {
    client: Client,
    query_range_url: Url,
}

impl PrometheusClient {
    /// Creates a client for the server at `server`, e.g. `http://localhost:9090`.
    ///
    /// A path in the server URL is kept as a prefix of the API path,
    /// which allows reaching servers behind a reverse proxy.
    pub fn new(server: &str) -> Result<Self> {
        let query_range_url = query_range_url(server)?;
        let client = Client::new();

        Ok(Self {
            client,
            query_range_url,
        })
    }

    /// Evaluates the query over its range and returns the resulting matrix.
    pub fn query_range(&self, query: &RangeQuery) -> Result<Matrix> {
        debug!(
            url = %self.query_range_url,
            query = %query.query,
            step = %query.step(),
            "sending range query"
        );

        let response = self
            .client
            .get(self.query_range_url.clone())
            .query(&query.params())
            .send()?;

        let status_code = response.status();
        let body = response.text()?;
        let matrix = response::decode(status_code, &body)?;

        debug!(series = matrix.len(), "received range query result");

        Ok(matrix)
    }
}

fn query_range_url(server: &str) -> Result<Url> {
    let invalid_url = || FetchError::InvalidUrl(server.to_owned());

    let mut url = Url::parse(server).map_err(|_| invalid_url())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_url());
    }

    url.path_segments_mut()
        .map_err(|_| invalid_url())?
        .pop_if_empty()
        .extend(QUERY_RANGE_PATH);

    Ok(url)
}
