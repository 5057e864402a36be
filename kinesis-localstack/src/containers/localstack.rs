use std::env;

use testcontainers::{runners::AsyncRunner, ContainerAsync, RunnableImage};

use crate::{docker_utils::docker_socket_mount, error::HarnessError, images::LocalStack};

/// Start LocalStack on `network` and wait until it reports that it is ready.
pub async fn start_localstack(
    network: &str,
    image: LocalStack,
) -> Result<ContainerAsync<LocalStack>, HarnessError> {
    let container_name = image.container_name().map(str::to_owned);

    let mut localstack_image = RunnableImage::from(image)
        .with_mount(docker_socket_mount())
        .with_network(network);

    if let Some(container_name) = container_name {
        localstack_image = localstack_image.with_container_name(container_name);
    }

    let localstack = localstack_image.start().await?;

    if env::var("PRINT_LOCALSTACK_CONTAINER_LOGS").is_ok() {
        tracing::info!(
            "LocalStack started as container {} on network {}",
            localstack.id(),
            network
        );
    }

    Ok(localstack)
}
