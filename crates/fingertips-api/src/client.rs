//! Fingertips API accessors.

use crate::{
    FingertipsError, Result,
    config::TransportConfig,
    params::QueryParams,
    transport::{HttpTransport, JsonSource},
};
use fingertips_types::{Table, table_from_keyed_records, table_from_records};
use tracing::{debug, warn};

/// Name of the index column holding indicator IDs.
pub const INDICATOR_ID: &str = "IndicatorID";

/// Path of the profile listing.
pub const PROFILES_PATH: &str = "/profiles";

/// Path of the indicator metadata lookup.
pub const INDICATOR_METADATA_PATH: &str = "/indicator_metadata/by_profile_id";

/// Path of the area type listing.
pub const AREA_TYPES_PATH: &str = "/area_types";

/// Path of the indicator data lookup.
pub const INDICATOR_DATA_PATH: &str = "/all_data/for_indicator_at_area_type";

/// Path of the area listing for one area type.
#[must_use]
pub fn areas_path(area_type_id: i64) -> String {
    format!("/area_types/{area_type_id}/areas")
}

/// Client for the Fingertips public-health indicators API.
///
/// Every accessor comes in two forms. The `try_` form returns a
/// [`Result`] so callers can tell a failed request from an empty answer.
/// The plain form never fails: any error is logged and turned into
/// [`Table::empty`], so callers check for emptiness instead.
#[derive(Debug, Clone)]
pub struct FingertipsClient<S = HttpTransport> {
    source: S,
}

impl FingertipsClient<HttpTransport> {
    /// Create a client from the given transport settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be built.
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// Create a client with default settings, honouring `FINGERTIPS_BASE_URL`.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment is unreadable or the base URL is
    /// invalid.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(HttpTransport::from_env()?))
    }
}

impl<S: JsonSource> FingertipsClient<S> {
    /// Create a client over any JSON source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    async fn records(&self, path: &str, params: &QueryParams) -> Result<Table> {
        let payload = self.source.fetch(path, params).await?;
        Ok(table_from_records(&payload)?)
    }

    /// Get all profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a list of
    /// records.
    pub async fn try_profiles(&self) -> Result<Table> {
        self.records(PROFILES_PATH, &QueryParams::new()).await
    }

    /// Get indicator metadata for a profile, indexed by `IndicatorID`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not an object
    /// of records.
    pub async fn try_profile_indicators(&self, profile_id: i64) -> Result<Table> {
        let params = QueryParams::new().with("profile_id", profile_id);
        let payload = self.source.fetch(INDICATOR_METADATA_PATH, &params).await?;
        Ok(table_from_keyed_records(&payload, INDICATOR_ID)?)
    }

    /// Get all area types.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a list of
    /// records.
    pub async fn try_area_types(&self) -> Result<Table> {
        self.records(AREA_TYPES_PATH, &QueryParams::new()).await
    }

    /// Get the areas of one area type.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a list of
    /// records.
    pub async fn try_areas_for_type(&self, area_type_id: i64) -> Result<Table> {
        self.records(&areas_path(area_type_id), &QueryParams::new())
            .await
    }

    /// Get time-series data for an indicator at an area type.
    ///
    /// # Arguments
    ///
    /// * `indicator_id` - Indicator to fetch
    /// * `area_type_id` - Area type the values are reported at
    /// * `parent_area_code` - Restrict to children of this area (e.g. a region)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a list of
    /// records.
    pub async fn try_data_for_indicator(
        &self,
        indicator_id: i64,
        area_type_id: i64,
        parent_area_code: Option<&str>,
    ) -> Result<Table> {
        let params = QueryParams::new()
            .with("indicator_id", indicator_id)
            .with("area_type_id", area_type_id)
            .with_opt("parent_area_code", parent_area_code.filter(|c| !c.is_empty()));
        self.records(INDICATOR_DATA_PATH, &params).await
    }

    /// Get all profiles, or an empty table on failure.
    pub async fn profiles(&self) -> Table {
        or_empty("profiles", self.try_profiles().await)
    }

    /// Get indicator metadata for a profile, or an empty table on failure.
    pub async fn profile_indicators(&self, profile_id: i64) -> Table {
        or_empty(
            "profile_indicators",
            self.try_profile_indicators(profile_id).await,
        )
    }

    /// Get all area types, or an empty table on failure.
    pub async fn area_types(&self) -> Table {
        or_empty("area_types", self.try_area_types().await)
    }

    /// Get the areas of one area type, or an empty table on failure.
    pub async fn areas_for_type(&self, area_type_id: i64) -> Table {
        or_empty(
            "areas_for_type",
            self.try_areas_for_type(area_type_id).await,
        )
    }

    /// Get indicator data, or an empty table on failure.
    pub async fn data_for_indicator(
        &self,
        indicator_id: i64,
        area_type_id: i64,
        parent_area_code: Option<&str>,
    ) -> Table {
        or_empty(
            "data_for_indicator",
            self.try_data_for_indicator(indicator_id, area_type_id, parent_area_code)
                .await,
        )
    }
}

/// Fetch failures were already logged by the transport.
fn or_empty(accessor: &str, result: Result<Table>) -> Table {
    result.unwrap_or_else(|e| {
        match &e {
            FingertipsError::Fetch(_) => debug!(accessor, error = %e, "Returning empty table"),
            _ => warn!(accessor, error = %e, "Returning empty table"),
        }
        Table::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, FingertipsError, ParamValue};
    use reqwest::{StatusCode, header::HeaderMap};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Answers every fetch with the same payload and records the requests.
    #[derive(Debug)]
    struct RecordingSource {
        payload: Option<Value>,
        calls: Mutex<Vec<(String, QueryParams)>>,
    }

    impl RecordingSource {
        fn answering(payload: Value) -> Self {
            Self {
                payload: Some(payload),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                payload: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, QueryParams)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl JsonSource for RecordingSource {
        async fn fetch(
            &self,
            path: &str,
            params: &QueryParams,
        ) -> std::result::Result<Value, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), params.clone()));
            self.payload.clone().ok_or_else(|| FetchError::Status {
                url: path.to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
                headers: HeaderMap::new(),
                body: String::new(),
            })
        }
    }

    fn assert_empty(table: &Table) {
        assert_eq!(table.len(), 0);
        assert_eq!(table.width(), 0);
    }

    #[test]
    fn test_areas_path() {
        assert_eq!(areas_path(9), "/area_types/9/areas");
    }

    #[tokio::test]
    async fn test_failed_fetch_gives_empty_tables() {
        let client = FingertipsClient::new(RecordingSource::failing());

        assert_empty(&client.profiles().await);
        assert_empty(&client.profile_indicators(19).await);
        assert_empty(&client.area_types().await);
        assert_empty(&client.areas_for_type(9).await);
        assert_empty(&client.data_for_indicator(90630, 152, None).await);
        assert_eq!(client.source().calls().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_payloads_give_empty_tables() {
        for payload in [json!([]), json!({}), json!(null)] {
            let client = FingertipsClient::new(RecordingSource::answering(payload));

            assert_empty(&client.profiles().await);
            assert_empty(&client.profile_indicators(19).await);
            assert_empty(&client.area_types().await);
            assert_empty(&client.areas_for_type(9).await);
            assert_empty(&client.data_for_indicator(90630, 152, None).await);
        }
    }

    #[tokio::test]
    async fn test_strict_accessor_reports_failure() {
        let client = FingertipsClient::new(RecordingSource::failing());
        let err = client.try_profiles().await.unwrap_err();
        assert!(matches!(err, FingertipsError::Fetch(FetchError::Status { .. })));

        // An empty answer is not an error.
        let client = FingertipsClient::new(RecordingSource::answering(json!([])));
        assert!(client.try_profiles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_gives_empty_table() {
        let client = FingertipsClient::new(RecordingSource::answering(json!({"1": {"a": 1}})));
        assert!(matches!(
            client.try_profiles().await,
            Err(FingertipsError::Table(_))
        ));
        assert_empty(&client.profiles().await);
    }

    #[tokio::test]
    async fn test_profiles_request() {
        let source = RecordingSource::answering(json!([
            {"Id": 19, "Name": "Public Health Outcomes Framework", "Key": "phof"},
            {"Id": 20, "Name": "Cancer Services", "Key": "cancerservices"},
        ]));
        let client = FingertipsClient::new(&source);

        let table = client.profiles().await;
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), vec!["Id", "Name", "Key"]);
        assert!(table.index_name().is_none());
        assert_eq!(source.calls(), vec![("/profiles".to_string(), QueryParams::new())]);
    }

    #[tokio::test]
    async fn test_profile_indicators_are_indexed_by_indicator_id() {
        let source = RecordingSource::answering(json!({
            "101": {"field": "x"},
            "102": {"field": "y"},
        }));
        let client = FingertipsClient::new(&source);

        let table = client.profile_indicators(19).await;
        assert_eq!(table.len(), 2);
        assert_eq!(table.index_name(), Some("IndicatorID"));

        let ids = table.index().unwrap().as_materialized_series().i64().unwrap().clone();
        assert_eq!((ids.get(0), ids.get(1)), (Some(101), Some(102)));

        let field = table.column("field").unwrap().as_materialized_series().str().unwrap().clone();
        assert_eq!((field.get(0), field.get(1)), (Some("x"), Some("y")));

        let calls = source.calls();
        assert_eq!(calls[0].0, "/indicator_metadata/by_profile_id");
        assert_eq!(calls[0].1.get("profile_id"), Some(&ParamValue::Int(19)));
        assert_eq!(calls[0].1.len(), 1);
    }

    #[tokio::test]
    async fn test_area_types_request() {
        let source = RecordingSource::answering(json!([{"Id": 6, "Name": "Government Office Region"}]));
        let client = FingertipsClient::new(&source);

        assert_eq!(client.area_types().await.len(), 1);
        assert_eq!(source.calls(), vec![("/area_types".to_string(), QueryParams::new())]);
    }

    #[tokio::test]
    async fn test_areas_for_type_embeds_id_in_path() {
        let source = RecordingSource::answering(json!([
            {"Code": "E12000001", "Name": "North East region"},
        ]));
        let client = FingertipsClient::new(&source);

        let table = client.areas_for_type(9).await;
        assert_eq!(table.len(), 1);

        let calls = source.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/area_types/9/areas");
        assert!(calls[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_data_for_indicator_with_parent_area() {
        let source = RecordingSource::answering(json!([
            {"Indicator ID": 90630, "Area Code": "E06000001", "Value": 17.2},
        ]));
        let client = FingertipsClient::new(&source);

        let table = client
            .data_for_indicator(90630, 152, Some("E54000008"))
            .await;
        assert_eq!(table.len(), 1);

        let calls = source.calls();
        let (path, params) = &calls[0];
        assert_eq!(path, "/all_data/for_indicator_at_area_type");
        let pairs: Vec<(&str, String)> = params.iter().map(|(k, v)| (k, v.to_string())).collect();
        assert_eq!(
            pairs,
            vec![
                ("indicator_id", "90630".to_string()),
                ("area_type_id", "152".to_string()),
                ("parent_area_code", "E54000008".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_data_for_indicator_omits_missing_parent_area() {
        let source = RecordingSource::answering(json!([]));
        let client = FingertipsClient::new(&source);

        client.data_for_indicator(90630, 152, None).await;
        client.data_for_indicator(90630, 152, Some("")).await;

        for (_, params) in source.calls() {
            assert_eq!(params.len(), 2);
            assert!(!params.contains("parent_area_code"));
        }
    }
}
