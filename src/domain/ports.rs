use crate::domain::model::ServiceRequestForm;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn orch_uri(&self) -> &str;
    fn system_name(&self) -> &str;
    fn system_address(&self) -> &str;
    fn service_definition(&self) -> &str;
    fn interfaces(&self) -> &[String];
    fn override_store(&self) -> bool;
    fn matchmaking(&self) -> bool;
}

/// The three steps of a consumer run: compile the request form, resolve a
/// provider for it, fetch one reading from that provider.
#[async_trait]
pub trait ServiceConsumer: Send + Sync {
    fn compile_request(&self) -> ServiceRequestForm;
    async fn resolve_provider(&self, form: &ServiceRequestForm) -> Result<String>;
    async fn fetch_reading(&self, provider_url: &str) -> Result<f64>;
}
