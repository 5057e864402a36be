use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_sdk_kinesis::config::{Credentials, Region};
use aws_sdk_kinesis::operation::get_records::GetRecordsOutput;
use aws_sdk_kinesis::primitives::Blob;
use aws_sdk_kinesis::types::{Record, ShardIteratorType};
use aws_sdk_kinesis::Client;
use testcontainers::ContainerAsync;

use crate::{
    constants::{ACCESS_KEY_ID, KINESIS_PORT, NUM_SHARDS, REGION, SECRET_ACCESS_KEY, STREAM_NAME},
    containers::start_localstack,
    endpoint::{resolve_host, unbracket_host, EndpointConfiguration},
    error::HarnessError,
    images::LocalStack,
    tls::localstack_http_client,
    waiter::{wait_until_stream_exists, PollingStrategy},
};

/// A running LocalStack container emulating Kinesis, plus a client for it once the
/// stream has been created.
///
/// The container is stopped and removed when the harness is dropped.
pub struct KinesisLocalStack {
    container: ContainerAsync<LocalStack>,
    scheme: &'static str,
    client: Option<Client>,
}

impl KinesisLocalStack {
    /// Start `image` on `network`, returning once LocalStack reports that it is ready.
    pub async fn start(network: &str, image: LocalStack) -> Result<Self, HarnessError> {
        let scheme = image.scheme();
        let container = start_localstack(network, image).await?;

        Ok(Self {
            container,
            scheme,
            client: None,
        })
    }

    pub fn stream_name(&self) -> &'static str {
        STREAM_NAME
    }

    /// The client used to create the stream, `None` until `create_and_wait` has succeeded.
    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn provisioned_client(&self) -> Result<&Client, HarnessError> {
        self.client.as_ref().ok_or(HarnessError::NotProvisioned)
    }

    /// Endpoint for clients on the host.
    ///
    /// The container host is resolved to an IP address where possible. Port mappings are
    /// read from the running container every time so this must only be called after start.
    pub async fn endpoint_configuration(&self) -> Result<EndpointConfiguration, HarnessError> {
        let container_host = self.container.get_host().await?.to_string();
        let host = resolve_host(unbracket_host(&container_host)).await;
        let mapped_port = self.mapped_port().await?;

        let endpoint = EndpointConfiguration::new(self.scheme, host, mapped_port, REGION);

        tracing::info!("Building kinesis client with endpoint {}", endpoint.url);

        Ok(endpoint)
    }

    /// Plain HTTP URL of the Kinesis port, the only one exposed, using the container host as is.
    pub async fn endpoint(&self) -> Result<String, HarnessError> {
        let host = self.container.get_host().await?;
        let mapped_port = self.mapped_port().await?;

        Ok(format!("http://{host}:{mapped_port}"))
    }

    /// The host port currently mapped to the Kinesis port inside the container.
    pub async fn mapped_port(&self) -> Result<u16, HarnessError> {
        Ok(self.container.get_host_port_ipv4(KINESIS_PORT).await?)
    }

    /// Address of the container on the docker network, for use by other containers.
    pub async fn bridge_ip_address(&self) -> Result<IpAddr, HarnessError> {
        Ok(self.container.get_bridge_ip_address().await?)
    }

    pub fn default_credentials() -> Credentials {
        Credentials::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY, None, None, "localstack")
    }

    async fn build_client(&self) -> Result<Client, HarnessError> {
        let endpoint = self.endpoint_configuration().await?;

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(60))
            .build();

        let mut config = aws_sdk_kinesis::Config::builder()
            .behavior_version_latest()
            .endpoint_url(endpoint.url)
            .region(Region::new(endpoint.region))
            .credentials_provider(Self::default_credentials())
            .timeout_config(timeout_config);

        // LocalStack's certificate is self-signed
        if self.scheme == "https" {
            config = config.http_client(localstack_http_client());
        }

        Ok(Client::from_conf(config.build()))
    }

    /// Create the stream and wait up to 25 attempts, 5 seconds apart, for it to become active.
    pub async fn create_and_wait(&mut self) -> Result<(), HarnessError> {
        self.create_and_wait_with(PollingStrategy::default()).await
    }

    pub async fn create_and_wait_with(
        &mut self,
        strategy: PollingStrategy,
    ) -> Result<(), HarnessError> {
        let client = self.build_client().await?;

        tracing::info!("Creating stream {} with {} shard(s)", STREAM_NAME, NUM_SHARDS);

        client
            .create_stream()
            .stream_name(STREAM_NAME)
            .shard_count(NUM_SHARDS)
            .send()
            .await
            .map_err(aws_sdk_kinesis::Error::from)?;

        wait_until_stream_exists(&client, STREAM_NAME, strategy).await?;

        self.client = Some(client);

        Ok(())
    }

    pub async fn put_record(
        &self,
        partition_key: &str,
        data: impl Into<Vec<u8>>,
    ) -> Result<String, HarnessError> {
        let output = self
            .provisioned_client()?
            .put_record()
            .stream_name(STREAM_NAME)
            .partition_key(partition_key)
            .data(Blob::new(data))
            .send()
            .await
            .map_err(aws_sdk_kinesis::Error::from)?;

        Ok(output.sequence_number().to_owned())
    }

    async fn trim_horizon_iterator(&self, client: &Client) -> Result<String, HarnessError> {
        let stream = client
            .describe_stream()
            .stream_name(STREAM_NAME)
            .send()
            .await
            .map_err(aws_sdk_kinesis::Error::from)?;

        // Streams are created with a single shard
        let shard_id = stream
            .stream_description()
            .and_then(|description| description.shards().first())
            .map(|shard| shard.shard_id().to_owned())
            .ok_or_else(|| HarnessError::NoShardsFound(STREAM_NAME.into()))?;

        tracing::debug!("Getting trim horizon shard iterator for {}", shard_id);

        let iterator = client
            .get_shard_iterator()
            .stream_name(STREAM_NAME)
            .shard_id(&shard_id)
            .shard_iterator_type(ShardIteratorType::TrimHorizon)
            .send()
            .await
            .map_err(aws_sdk_kinesis::Error::from)?;

        iterator
            .shard_iterator()
            .map(str::to_owned)
            .ok_or(HarnessError::MissingShardIterator(shard_id))
    }

    /// Read one batch of records from the start of the stream's first shard.
    ///
    /// Only a single `GetRecords` call is made so large volumes of records may not all be
    /// returned, use `drain_all_records` for those.
    pub async fn get_all_records(&self) -> Result<GetRecordsOutput, HarnessError> {
        let client = self.provisioned_client()?;
        let shard_iterator = self.trim_horizon_iterator(client).await?;

        let output = client
            .get_records()
            .shard_iterator(shard_iterator)
            .send()
            .await
            .map_err(aws_sdk_kinesis::Error::from)?;

        tracing::debug!("Got {} records from {}", output.records().len(), STREAM_NAME);

        Ok(output)
    }

    /// Read from the start of the first shard until an empty batch is returned, the shard is
    /// closed or `max_batches` batches have been read.
    ///
    /// `batch_size` limits the records returned by each `GetRecords` call, `None` leaves it to
    /// the service.
    pub async fn drain_all_records(
        &self,
        max_batches: usize,
        batch_size: Option<i32>,
    ) -> Result<Vec<Record>, HarnessError> {
        let client = self.provisioned_client()?;
        let shard_iterator = self.trim_horizon_iterator(client).await?;

        let records = drain_batches(shard_iterator, max_batches, |iterator| async move {
            let output = client
                .get_records()
                .shard_iterator(iterator)
                .set_limit(batch_size)
                .send()
                .await
                .map_err(aws_sdk_kinesis::Error::from)?;

            let next_shard_iterator = output.next_shard_iterator().map(str::to_owned);
            Ok::<_, HarnessError>((output.records, next_shard_iterator))
        })
        .await?;

        tracing::debug!("Drained {} records from {}", records.len(), STREAM_NAME);

        Ok(records)
    }

    /// Combined stdout and stderr of the container.
    pub async fn logs(&self) -> Result<String, HarnessError> {
        let stdout = self.container.stdout_to_vec().await?;
        let stderr = self.container.stderr_to_vec().await?;

        let mut logs = String::from_utf8_lossy(&stdout).into_owned();
        logs.push_str(&String::from_utf8_lossy(&stderr));

        Ok(logs)
    }
}

/// Follow shard iterators from `shard_iterator`, collecting records until a batch is empty,
/// there is no next iterator or `max_batches` batches have been fetched.
async fn drain_batches<F, Fut>(
    shard_iterator: String,
    max_batches: usize,
    mut fetch: F,
) -> Result<Vec<Record>, HarnessError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(Vec<Record>, Option<String>), HarnessError>>,
{
    let mut shard_iterator = Some(shard_iterator);
    let mut records = vec![];

    for _ in 0..max_batches {
        let Some(iterator) = shard_iterator.take() else {
            break;
        };

        let (batch, next_shard_iterator) = fetch(iterator).await?;

        if batch.is_empty() {
            break;
        }

        records.extend(batch);
        shard_iterator = next_shard_iterator;
    }

    Ok(records)
}
