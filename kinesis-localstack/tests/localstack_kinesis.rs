//! These tests start real LocalStack containers so they need a docker daemon.
//! Run them with `cargo test -p kinesis-localstack -- --ignored`.
use kinesis_localstack::{
    constants::{KINESIS_PORT, STREAM_NAME},
    images::LocalStack,
    tracing::init_test_tracing,
    HarnessError, KinesisLocalStack,
};

async fn start_kinesis(test_name: &str) -> anyhow::Result<KinesisLocalStack> {
    init_test_tracing("info,kinesis_localstack=debug");

    let network = format!("kinesis-localstack-{}-{}", test_name, std::process::id());
    let kinesis = KinesisLocalStack::start(&network, LocalStack::default()).await?;

    Ok(kinesis)
}

#[tokio::test]
#[ignore = "requires docker"]
async fn provisioned_stream_can_be_described() -> anyhow::Result<()> {
    let mut kinesis = start_kinesis("describe").await?;
    kinesis.create_and_wait().await?;

    let client = kinesis.client().expect("Client is set after create_and_wait");
    let stream = client.describe_stream().stream_name(STREAM_NAME).send().await?;

    let description = stream
        .stream_description()
        .expect("Stream has a description");
    assert_eq!(description.stream_name(), STREAM_NAME);
    assert_eq!(description.shards().len(), 1);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn empty_stream_returns_no_records_and_next_iterator() -> anyhow::Result<()> {
    let mut kinesis = start_kinesis("empty").await?;
    kinesis.create_and_wait().await?;

    let output = kinesis.get_all_records().await?;

    assert!(output.records().is_empty());
    assert!(output.next_shard_iterator().is_some());

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn written_record_is_read_from_trim_horizon() -> anyhow::Result<()> {
    let mut kinesis = start_kinesis("one-record").await?;
    kinesis.create_and_wait().await?;

    let sequence_number = kinesis.put_record("partition", "hello").await?;

    let output = kinesis.get_all_records().await?;

    assert_eq!(output.records().len(), 1);
    let record = &output.records()[0];
    assert_eq!(record.sequence_number(), sequence_number);
    assert_eq!(record.data().as_ref(), b"hello");

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn drain_follows_iterators_across_batches() -> anyhow::Result<()> {
    let mut kinesis = start_kinesis("drain").await?;
    kinesis.create_and_wait().await?;

    for data in ["one", "two", "three"] {
        kinesis.put_record("partition", data).await?;
    }

    // A single read returns everything, draining one record per batch must follow iterators
    assert_eq!(kinesis.get_all_records().await?.records().len(), 3);

    let first_two = kinesis.drain_all_records(2, Some(1)).await?;
    let data: Vec<&[u8]> = first_two.iter().map(|r| r.data().as_ref()).collect();
    assert_eq!(data, vec![b"one".as_slice(), b"two".as_slice()]);

    let all = kinesis.drain_all_records(10, Some(1)).await?;
    assert_eq!(all.len(), 3);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn secure_endpoint_uses_mapped_kinesis_port() -> anyhow::Result<()> {
    let kinesis = start_kinesis("endpoint").await?;

    let mapped_port = kinesis.mapped_port().await?;
    let endpoint = kinesis.endpoint_configuration().await?;

    assert_ne!(mapped_port, KINESIS_PORT);
    assert_eq!(endpoint.port, mapped_port);
    assert!(!endpoint.host.is_empty());
    assert_eq!(
        endpoint.url,
        format!("https://{}:{}", endpoint.host, mapped_port)
    );
    assert_eq!(endpoint.region, "us-east-1");

    let plain = kinesis.endpoint().await?;
    assert!(plain.starts_with("http://"));
    assert!(plain.ends_with(&format!(":{mapped_port}")));

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn plain_http_localstack_can_be_provisioned() -> anyhow::Result<()> {
    init_test_tracing("info,kinesis_localstack=debug");

    let network = format!("kinesis-localstack-plain-{}", std::process::id());
    let image = LocalStack::default().with_ssl(false);
    let mut kinesis = KinesisLocalStack::start(&network, image).await?;

    let endpoint = kinesis.endpoint_configuration().await?;
    assert!(endpoint.url.starts_with("http://"));

    kinesis.create_and_wait().await?;
    kinesis.put_record("partition", "plain").await?;

    assert_eq!(kinesis.get_all_records().await?.records().len(), 1);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn records_cannot_be_read_before_provisioning() -> anyhow::Result<()> {
    let kinesis = start_kinesis("unprovisioned").await?;

    assert!(kinesis.client().is_none());
    assert!(matches!(
        kinesis.get_all_records().await,
        Err(HarnessError::NotProvisioned)
    ));
    assert!(matches!(
        kinesis.put_record("partition", "data").await,
        Err(HarnessError::NotProvisioned)
    ));

    Ok(())
}
