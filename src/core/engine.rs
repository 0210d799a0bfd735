use crate::core::ServiceConsumer;
use crate::utils::error::Result;

pub struct ConsumerEngine<C: ServiceConsumer> {
    consumer: C,
}

impl<C: ServiceConsumer> ConsumerEngine<C> {
    pub fn new(consumer: C) -> Self {
        Self { consumer }
    }

    /// Run the full consumer flow: compile the request form, resolve a
    /// provider, fetch one reading. Each step completes before the next
    /// starts; any failure aborts the run.
    pub async fn run(&self) -> Result<f64> {
        let form = self.consumer.compile_request();
        let payload = serde_json::to_string_pretty(&form)?;
        println!("Sending this request form to the orchestrator: {}", payload);

        let provider_url = self.consumer.resolve_provider(&form).await?;
        println!("Received provider system URL: {}", provider_url);

        let reading = self.consumer.fetch_reading(&provider_url).await?;

        Ok(reading)
    }
}
