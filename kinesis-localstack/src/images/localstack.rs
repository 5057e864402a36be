use std::{collections::HashMap, env};

use testcontainers::{core::WaitFor, Image};

use crate::constants::{KINESIS_PORT, KINESIS_SERVICE_NAME, READY_MESSAGE};

const NAME: &str = "localstack/localstack";
// Last line of releases which still serve Kinesis on its own port rather than the edge port
const TAG: &str = "0.8.10";

/// LocalStack configured to emulate Kinesis only.
///
/// Building the image does no I/O, it is started with
/// [`crate::containers::start_localstack`] or [`crate::KinesisLocalStack::start`].
#[derive(Debug, Clone)]
pub struct LocalStack {
    name: String,
    tag: String,
    use_ssl: bool,
    container_name: Option<String>,
    env_vars: HashMap<String, String>,
}

impl Default for LocalStack {
    fn default() -> Self {
        let mut env_vars = HashMap::new();
        env_vars.insert("USE_SSL".to_owned(), true.to_string());
        env_vars.insert("SERVICES".to_owned(), KINESIS_SERVICE_NAME.to_owned());

        Self {
            name: env::var("LOCALSTACK_IMAGE_NAME").unwrap_or(NAME.into()),
            tag: env::var("LOCALSTACK_IMAGE_TAG").unwrap_or(TAG.into()),
            use_ssl: true,
            container_name: None,
            env_vars,
        }
    }
}

impl LocalStack {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Serve Kinesis over HTTPS with LocalStack's self-signed certificate (the default)
    /// or over plain HTTP.
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self.env_vars.insert("USE_SSL".to_owned(), use_ssl.to_string());
        self
    }

    /// Name the container, which also makes it resolvable by that name from other containers
    /// on the same user-defined network. Names are global to the docker daemon so tests
    /// running in parallel need distinct names.
    pub fn with_container_name(mut self, container_name: impl Into<String>) -> Self {
        self.container_name = Some(container_name.into());
        self
    }

    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    pub fn container_name(&self) -> Option<&str> {
        self.container_name.as_deref()
    }

    pub fn use_ssl(&self) -> bool {
        self.use_ssl
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }
}

impl Image for LocalStack {
    type Args = ();

    fn name(&self) -> String {
        self.name.clone()
    }

    fn tag(&self) -> String {
        self.tag.clone()
    }

    fn ready_conditions(&self) -> Vec<WaitFor> {
        vec![WaitFor::message_on_stdout(READY_MESSAGE)]
    }

    fn env_vars(&self) -> Box<dyn Iterator<Item = (&String, &String)> + '_> {
        Box::new(self.env_vars.iter())
    }

    fn expose_ports(&self) -> Vec<u16> {
        vec![KINESIS_PORT]
    }
}
