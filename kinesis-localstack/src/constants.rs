/// The port LocalStack serves Kinesis on within the Docker network.
/// On the host the port will be randomized and can be retrieved using
/// `container.get_host_port_ipv4(KINESIS_PORT)`
pub const KINESIS_PORT: u16 = 4568;

/// Value of the LocalStack `SERVICES` variable, only Kinesis is started
pub const KINESIS_SERVICE_NAME: &str = "kinesis";

/// The stream created by `KinesisLocalStack::create_and_wait`
pub const STREAM_NAME: &str = "postgres_cdc";

/// Record reads only look at the first shard so this must stay at 1
pub const NUM_SHARDS: i32 = 1;

/// LocalStack accepts any region, this is the one the client is configured with
pub const REGION: &str = "us-east-1";

// LocalStack needs some credentials but never checks them
pub const ACCESS_KEY_ID: &str = "test";
pub const SECRET_ACCESS_KEY: &str = "test";

/// Line printed by LocalStack once all requested services are up
pub const READY_MESSAGE: &str = "Ready.";

/// The docker socket is shared with LocalStack so it can start its own containers
pub const DOCKER_SOCKET_PATH: &str = "/var/run/docker.sock";

// Default poll budget while waiting for the stream to become active
pub const STREAM_EXISTS_MAX_ATTEMPTS: u32 = 25;
pub const STREAM_EXISTS_DELAY_SECONDS: u64 = 5;
