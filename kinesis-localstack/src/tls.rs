use std::{sync::Arc, time::SystemTime};

use aws_sdk_kinesis::config::SharedHttpClient;
use aws_smithy_runtime::client::http::hyper_014::HyperClientBuilder;
use rustls::{
    client::{ServerCertVerified, ServerCertVerifier},
    Certificate, ClientConfig, ServerName,
};

/// Certificate verifier that treats any certificate as valid.
/// LocalStack serves HTTPS with a self-signed certificate generated at startup, so there is
/// nothing to pin it against. Never use outside of tests.
struct AcceptAnyServerCertificate;

impl ServerCertVerifier for AcceptAnyServerCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }
}

fn accept_any_certificate_config() -> ClientConfig {
    ClientConfig::builder()
        .with_safe_defaults()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCertificate))
        .with_no_client_auth()
}

/// HTTP client for the Kinesis SDK which talks HTTPS to LocalStack without verifying its
/// certificate. Plain `http` endpoints also work through it.
pub fn localstack_http_client() -> SharedHttpClient {
    let https_connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_tls_config(accept_any_certificate_config())
        .https_or_http()
        .enable_http1()
        .build();

    HyperClientBuilder::new().build(https_connector)
}
