use std::path::Path;

use testcontainers::core::Mount;

use crate::constants::DOCKER_SOCKET_PATH;

/// The `testcontainers` library requires a string tuple of `(bind_mount, volume_path)` to bind a path
/// into the Docker container. This function converts a well typed `Path` and a path within the container to that
/// mount, lossily converting any non UTF-8 characters.
pub fn path_to_mount(host_path: impl AsRef<Path>, container_path: &str) -> Mount {
    let bind_mount = host_path.as_ref().to_string_lossy().into_owned();

    Mount::bind_mount(bind_mount, container_path.to_owned())
}

/// Read-write mount of the host's docker socket at the same path inside the container.
pub fn docker_socket_mount() -> Mount {
    path_to_mount(DOCKER_SOCKET_PATH, DOCKER_SOCKET_PATH)
}
