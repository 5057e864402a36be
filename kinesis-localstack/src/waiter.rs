use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_kinesis::{types::StreamStatus, Client};
use tokio::time::sleep;

use crate::{
    constants::{STREAM_EXISTS_DELAY_SECONDS, STREAM_EXISTS_MAX_ATTEMPTS},
    error::HarnessError,
};

/// How long to keep checking for a stream before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingStrategy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl PollingStrategy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl Default for PollingStrategy {
    fn default() -> Self {
        Self::new(
            STREAM_EXISTS_MAX_ATTEMPTS,
            Duration::from_secs(STREAM_EXISTS_DELAY_SECONDS),
        )
    }
}

/// Reports the status of a stream, `None` if it does not exist (yet).
#[async_trait]
pub trait StreamStatusProbe {
    async fn stream_status(&self, stream_name: &str) -> Result<Option<StreamStatus>, HarnessError>;
}

#[async_trait]
impl StreamStatusProbe for Client {
    async fn stream_status(&self, stream_name: &str) -> Result<Option<StreamStatus>, HarnessError> {
        let result = self.describe_stream().stream_name(stream_name).send().await;

        match result {
            Ok(output) => Ok(output
                .stream_description()
                .map(|description| description.stream_status().clone())),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) =>
            {
                Ok(None)
            }
            Err(e) => Err(aws_sdk_kinesis::Error::from(e).into()),
        }
    }
}

/// Poll `probe` until `stream_name` is active.
///
/// Streams which are missing, being created or being updated are checked again after
/// `strategy.delay`, any error from the probe is returned immediately.
pub async fn wait_until_stream_exists<P>(
    probe: &P,
    stream_name: &str,
    strategy: PollingStrategy,
) -> Result<(), HarnessError>
where
    P: StreamStatusProbe + Sync + ?Sized,
{
    for attempt in 1..=strategy.max_attempts {
        tracing::debug!(
            "Checking status of stream {} (attempt {}/{})",
            stream_name,
            attempt,
            strategy.max_attempts
        );

        match probe.stream_status(stream_name).await? {
            Some(StreamStatus::Active) => {
                tracing::debug!("Stream {} is active", stream_name);
                return Ok(());
            }
            status => {
                tracing::warn!("Stream {} not active yet: {:?}", stream_name, status);
            }
        }

        if attempt < strategy.max_attempts {
            sleep(strategy.delay).await;
        }
    }

    Err(HarnessError::StreamNotReady {
        stream_name: stream_name.to_owned(),
        attempts: strategy.max_attempts,
    })
}
