//! Disposable LocalStack Kinesis for integration tests.
//!
//! ```no_run
//! # async fn example() -> Result<(), kinesis_localstack::HarnessError> {
//! use kinesis_localstack::{images::LocalStack, KinesisLocalStack};
//!
//! let mut kinesis = KinesisLocalStack::start("test-network", LocalStack::default()).await?;
//! kinesis.create_and_wait().await?;
//!
//! let records = kinesis.get_all_records().await?;
//! assert!(records.records().is_empty());
//! # Ok(())
//! # }
//! ```
pub mod constants;
pub mod containers;
pub mod docker_utils;
pub mod endpoint;
pub mod error;
pub mod harness;
pub mod images;
pub mod tls;
pub mod tracing;
pub mod waiter;

pub use endpoint::EndpointConfiguration;
pub use error::HarnessError;
pub use harness::KinesisLocalStack;
pub use waiter::{PollingStrategy, StreamStatusProbe};
