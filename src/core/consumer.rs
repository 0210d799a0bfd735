use crate::core::{ConfigProvider, ServiceConsumer};
use crate::domain::model::{
    OrchestrationFlags, OrchestrationResponse, ProviderSystem, RequestedService, RequesterSystem,
    SenmlReadout, ServiceRequestForm,
};
use crate::utils::error::{ConsumerError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

pub struct HttpConsumer<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpConsumer<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

/// Derive the fully qualified provider URL from the orchestrator's answer.
/// A non-positive port means the provider listens on the default HTTP port
/// and is left out of the URL. The address is not validated here; a
/// malformed address surfaces as a connection error on the follow-up call.
fn provider_url(provider: &ProviderSystem, service_uri: Option<&str>) -> String {
    let base = if provider.port > 0 {
        format!("http://{}:{}", provider.address, provider.port)
    } else {
        format!("http://{}", provider.address)
    };

    match service_uri {
        None => base,
        Some(uri) if uri.starts_with('/') => format!("{}{}", base, uri),
        Some(uri) => format!("{}/{}", base, uri),
    }
}

fn remote_error(status: StatusCode) -> ConsumerError {
    ConsumerError::RemoteError {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
    }
}

#[async_trait]
impl<C: ConfigProvider> ServiceConsumer for HttpConsumer<C> {
    fn compile_request(&self) -> ServiceRequestForm {
        ServiceRequestForm {
            requester_system: RequesterSystem {
                system_name: self.config.system_name().to_string(),
                address: self.config.system_address().to_string(),
            },
            requested_service: RequestedService {
                service_definition: self.config.service_definition().to_string(),
                interfaces: self.config.interfaces().to_vec(),
            },
            orchestration_flags: OrchestrationFlags {
                override_store: self.config.override_store(),
                matchmaking: self.config.matchmaking(),
            },
        }
    }

    async fn resolve_provider(&self, form: &ServiceRequestForm) -> Result<String> {
        let payload = serde_json::to_string(form)?;

        tracing::debug!("Posting orchestration request to: {}", self.config.orch_uri());
        let response = self
            .client
            .post(self.config.orch_uri())
            .header(header::CONTENT_TYPE, "application/json; charset=UTF-8")
            .header(header::ACCEPT, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Orchestrator response status: {}", status);
        if status != StatusCode::OK {
            return Err(remote_error(status));
        }

        let body = response.text().await?;
        tracing::debug!("Orchestrator response: {}", body);
        let parsed: OrchestrationResponse = serde_json::from_str(&body)?;

        let entry = parsed
            .response
            .first()
            .ok_or_else(|| ConsumerError::MissingDataError {
                message: "Orchestrator did not return any provider".to_string(),
            })?;

        Ok(provider_url(&entry.provider, entry.service_uri.as_deref()))
    }

    async fn fetch_reading(&self, provider_url: &str) -> Result<f64> {
        tracing::debug!("Requesting reading from: {}", provider_url);
        let response = self
            .client
            .get(provider_url)
            .header("charset", "utf-8")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Provider response status: {}", status);
        if status != StatusCode::OK {
            return Err(remote_error(status));
        }

        let readout: SenmlReadout = response.json().await?;
        let entry = readout
            .e
            .first()
            .ok_or_else(|| ConsumerError::MissingDataError {
                message: "Provider did not send any measurement entry".to_string(),
            })?;

        Ok(entry.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        orch_uri: String,
        interfaces: Vec<String>,
    }

    impl MockConfig {
        fn new(orch_uri: String) -> Self {
            Self {
                orch_uri,
                interfaces: vec!["json".to_string()],
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn orch_uri(&self) -> &str {
            &self.orch_uri
        }

        fn system_name(&self) -> &str {
            "client1"
        }

        fn system_address(&self) -> &str {
            "localhost"
        }

        fn service_definition(&self) -> &str {
            "IndoorTemperature"
        }

        fn interfaces(&self) -> &[String] {
            &self.interfaces
        }

        fn override_store(&self) -> bool {
            true
        }

        fn matchmaking(&self) -> bool {
            true
        }
    }

    fn consumer_for(server: &MockServer) -> HttpConsumer<MockConfig> {
        HttpConsumer::new(MockConfig::new(server.url("/orchestrator/orchestration")))
    }

    #[test]
    fn test_provider_url_with_port_and_absolute_uri() {
        let provider = ProviderSystem {
            address: "10.0.0.5".to_string(),
            port: 8080,
        };
        assert_eq!(
            provider_url(&provider, Some("/temp")),
            "http://10.0.0.5:8080/temp"
        );
    }

    #[test]
    fn test_provider_url_with_port_and_relative_uri() {
        let provider = ProviderSystem {
            address: "10.0.0.5".to_string(),
            port: 8080,
        };
        assert_eq!(
            provider_url(&provider, Some("temp")),
            "http://10.0.0.5:8080/temp"
        );
    }

    #[test]
    fn test_provider_url_with_port_without_uri() {
        let provider = ProviderSystem {
            address: "10.0.0.5".to_string(),
            port: 8080,
        };
        assert_eq!(provider_url(&provider, None), "http://10.0.0.5:8080");
    }

    #[test]
    fn test_provider_url_without_port() {
        let provider = ProviderSystem {
            address: "sensor.local".to_string(),
            port: 0,
        };
        assert_eq!(provider_url(&provider, None), "http://sensor.local");
        assert_eq!(
            provider_url(&provider, Some("/temp")),
            "http://sensor.local/temp"
        );
        assert_eq!(
            provider_url(&provider, Some("temp")),
            "http://sensor.local/temp"
        );
    }

    #[test]
    fn test_provider_url_negative_port_treated_as_absent() {
        let provider = ProviderSystem {
            address: "sensor.local".to_string(),
            port: -1,
        };
        assert_eq!(provider_url(&provider, None), "http://sensor.local");
    }

    #[test]
    fn test_provider_url_no_double_slash_at_junction() {
        for port in [0, 8080] {
            let provider = ProviderSystem {
                address: "10.0.0.5".to_string(),
                port,
            };
            let url = provider_url(&provider, Some("/temp"));
            let junction = url.trim_start_matches("http://");
            assert!(!junction.contains("//"), "double slash in {}", url);
        }
    }

    #[tokio::test]
    async fn test_resolve_provider_success() {
        let server = MockServer::start();
        let orch_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/orchestrator/orchestration")
                .header("content-type", "application/json; charset=UTF-8")
                .header("accept", "application/json");
            then.status(200).json_body(serde_json::json!({
                "response": [
                    {
                        "provider": {"address": "10.0.0.5", "port": 8080},
                        "serviceURI": "/temp"
                    }
                ]
            }));
        });

        let consumer = consumer_for(&server);
        let form = consumer.compile_request();
        let url = consumer.resolve_provider(&form).await.unwrap();

        orch_mock.assert();
        assert_eq!(url, "http://10.0.0.5:8080/temp");
    }

    #[tokio::test]
    async fn test_resolve_provider_sends_wire_shape_payload() {
        let server = MockServer::start();
        let orch_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/orchestrator/orchestration")
                .json_body(serde_json::json!({
                    "requesterSystem": {
                        "systemName": "client1",
                        "address": "localhost"
                    },
                    "requestedService": {
                        "serviceDefinition": "IndoorTemperature",
                        "interfaces": ["json"]
                    },
                    "orchestrationFlags": {
                        "overrideStore": true,
                        "matchmaking": true
                    }
                }));
            then.status(200).json_body(serde_json::json!({
                "response": [
                    {"provider": {"address": "10.0.0.5", "port": 8080}, "serviceURI": "/temp"}
                ]
            }));
        });

        let consumer = consumer_for(&server);
        let form = consumer.compile_request();
        consumer.resolve_provider(&form).await.unwrap();

        orch_mock.assert();
    }

    #[tokio::test]
    async fn test_resolve_provider_empty_response_list() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/orchestrator/orchestration");
            then.status(200)
                .json_body(serde_json::json!({"response": []}));
        });

        let consumer = consumer_for(&server);
        let form = consumer.compile_request();
        let err = consumer.resolve_provider(&form).await.unwrap_err();

        assert!(matches!(err, ConsumerError::MissingDataError { .. }));
    }

    #[tokio::test]
    async fn test_resolve_provider_non_200_carries_status_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/orchestrator/orchestration");
            then.status(500);
        });

        let consumer = consumer_for(&server);
        let form = consumer.compile_request();
        let err = consumer.resolve_provider(&form).await.unwrap_err();

        match err {
            ConsumerError::RemoteError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected RemoteError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_reading_success() {
        let server = MockServer::start();
        let provider_mock = server.mock(|when, then| {
            when.method(GET).path("/temp").header("charset", "utf-8");
            then.status(200).json_body(serde_json::json!({
                "bn": "indoor-sensor",
                "bu": "celsius",
                "ver": 1,
                "e": [{"n": "temperature", "v": 21.5}]
            }));
        });

        let consumer = consumer_for(&server);
        let reading = consumer.fetch_reading(&server.url("/temp")).await.unwrap();

        provider_mock.assert();
        assert_eq!(reading, 21.5);
    }

    #[tokio::test]
    async fn test_fetch_reading_reads_first_entry_only() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/temp");
            then.status(200).json_body(serde_json::json!({
                "e": [{"v": 21.5}, {"v": 99.0}]
            }));
        });

        let consumer = consumer_for(&server);
        let reading = consumer.fetch_reading(&server.url("/temp")).await.unwrap();

        assert_eq!(reading, 21.5);
    }

    #[tokio::test]
    async fn test_fetch_reading_empty_entry_list() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/temp");
            then.status(200).json_body(serde_json::json!({"e": []}));
        });

        let consumer = consumer_for(&server);
        let err = consumer.fetch_reading(&server.url("/temp")).await.unwrap_err();

        assert!(matches!(err, ConsumerError::MissingDataError { .. }));
    }

    #[tokio::test]
    async fn test_fetch_reading_non_200_carries_status_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/temp");
            then.status(404);
        });

        let consumer = consumer_for(&server);
        let err = consumer.fetch_reading(&server.url("/temp")).await.unwrap_err();

        match err {
            ConsumerError::RemoteError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected RemoteError, got {:?}", other),
        }
    }
}
