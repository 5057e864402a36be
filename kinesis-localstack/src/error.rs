use thiserror::Error;

/// Error variants for the LocalStack Kinesis harness
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),
    #[error("kinesis error: {0}")]
    Kinesis(Box<aws_sdk_kinesis::Error>),
    #[error("stream {stream_name} did not become active after {attempts} attempts")]
    StreamNotReady { stream_name: String, attempts: u32 },
    #[error("Could not find any shards in stream {0}")]
    NoShardsFound(String),
    #[error("Could not find shard iterator in shard {0}")]
    MissingShardIterator(String),
    #[error("kinesis client used before the stream was created, call create_and_wait first")]
    NotProvisioned,
}

impl From<aws_sdk_kinesis::Error> for HarnessError {
    fn from(e: aws_sdk_kinesis::Error) -> Self {
        HarnessError::Kinesis(Box::new(e))
    }
}
