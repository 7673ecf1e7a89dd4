use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::FetchError;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::matrix::Metric;
use crate::matrix::Sample;
use crate::matrix::Series;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    status: Status,
    data: Option<QueryData>,
    error_type: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Success,
    Error,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
enum QueryData {
    Matrix(Vec<RawSeries>),
    Vector(serde_json::Value),
    Scalar(serde_json::Value),
    String(serde_json::Value),
}

impl QueryData {
    fn kind(&self) -> &'static str {
        match self {
            QueryData::Matrix(_) => "matrix",
            QueryData::Vector(_) => "vector",
            QueryData::Scalar(_) => "scalar",
            QueryData::String(_) => "string",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    #[serde(default)]
    metric: BTreeMap<String, String>,
    #[serde(default)]
    values: Vec<RawSample>,
}

#[derive(Debug, Deserialize)]
struct RawSample(f64, String);

impl TryFrom<RawSample> for Sample {
    type Error = FetchError;

    fn try_from(RawSample(timestamp, value): RawSample) -> Result<Self> {
        let millis = (timestamp * 1000.0).round();
        let timestamp = if millis.is_finite() {
            DateTime::<Utc>::from_timestamp_millis(millis as i64)
        } else {
            None
        }
        .ok_or(FetchError::InvalidTimestamp(timestamp))?;

        Ok(Sample::new(timestamp, value))
    }
}

impl TryFrom<RawSeries> for Series {
    type Error = FetchError;

    fn try_from(raw: RawSeries) -> Result<Self> {
        let samples = raw
            .values
            .into_iter()
            .map(Sample::try_from)
            .collect::<Result<Vec<Sample>>>()?;

        Ok(Series::new(Metric::new(raw.metric), samples))
    }
}

/// Decodes the body of a range query response.
///
/// Prometheus answers failed queries with a JSON error document and a
/// 4xx/5xx status, so the body is decoded first and the status code is
/// only reported when the body is not an API response.
pub(crate) fn decode(status_code: StatusCode, body: &str) -> Result<Matrix> {
    let response: ApiResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !status_code.is_success() => {
            return Err(FetchError::Response {
                status_code,
                message: body.to_owned(),
            });
        }
        Err(error) => return Err(FetchError::Json(error)),
    };

    match response.status {
        Status::Error => Err(FetchError::Api {
            error_type: response.error_type.unwrap_or_default(),
            message: response.error.unwrap_or_default(),
        }),
        Status::Success => match response.data {
            Some(QueryData::Matrix(series)) => series.into_iter().map(Series::try_from).collect(),
            Some(data) => Err(FetchError::UnsupportedResult(data.kind().to_owned())),
            None => Err(FetchError::UnsupportedResult(String::from("none"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn decode_matrix() -> Result<()> {
        let body = r#"{
            "status": "success",
            "data": {
                "resultType": "matrix",
                "result": [
                    {
                        "metric": {"__name__": "up", "job": "prometheus"},
                        "values": [[1486202885, "1"], [1486202885.5, "0.5"]]
                    },
                    {
                        "metric": {"__name__": "up", "job": "node"},
                        "values": [[1486202885, "NaN"]]
                    }
                ]
            }
        }"#;

        let matrix = decode(StatusCode::OK, body)?;

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0].metric.to_string(), r#"up{job="prometheus"}"#);
        assert_eq!(matrix[1].metric.to_string(), r#"up{job="node"}"#);
        assert_eq!(
            matrix[0].samples,
            vec![
                Sample::new(Utc.with_ymd_and_hms(2017, 2, 4, 10, 8, 5).unwrap(), "1"),
                Sample::new(
                    Utc.timestamp_millis_opt(1486202885500).unwrap(),
                    "0.5"
                ),
            ]
        );
        assert_eq!(matrix[1].samples[0].value, "NaN");

        Ok(())
    }

    #[test]
    fn decode_empty_matrix() -> Result<()> {
        let body = r#"{"status":"success","data":{"resultType":"matrix","result":[]}}"#;

        let matrix = decode(StatusCode::OK, body)?;

        assert!(matrix.is_empty());

        Ok(())
    }

    #[test]
    fn decode_api_error() {
        let body = r#"{"status":"error","errorType":"bad_data","error":"parse error at char 3"}"#;

        let error = decode(StatusCode::BAD_REQUEST, body).unwrap_err();

        assert!(matches!(
            error,
            FetchError::Api { ref error_type, ref message }
                if error_type == "bad_data" && message == "parse error at char 3"
        ));
    }

    #[test]
    fn decode_vector_result_is_unsupported() {
        let body = r#"{"status":"success","data":{"resultType":"vector","result":[]}}"#;

        let error = decode(StatusCode::OK, body).unwrap_err();

        assert_eq!(
            error.to_string(),
            "fetch error: unsupported result format: vector"
        );
    }

    #[test]
    fn decode_non_json_error_response() {
        let error = decode(StatusCode::BAD_GATEWAY, "upstream unavailable").unwrap_err();

        assert!(matches!(
            error,
            FetchError::Response { status_code, ref message }
                if status_code == StatusCode::BAD_GATEWAY && message == "upstream unavailable"
        ));
    }

    #[test]
    fn decode_non_json_success_response() {
        let error = decode(StatusCode::OK, "<html></html>").unwrap_err();

        assert!(matches!(error, FetchError::Json(_)));
    }
}
