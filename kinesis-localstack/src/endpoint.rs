use std::net::IpAddr;

use tokio::net::lookup_host;

/// Where a Kinesis client should send its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfiguration {
    pub url: String,
    pub host: String,
    pub port: u16,
    pub region: String,
}

impl EndpointConfiguration {
    pub fn new(scheme: &str, host: impl Into<String>, port: u16, region: &str) -> Self {
        let host = host.into();

        // IPv6 literals need brackets to be used as a URL authority
        let url = match host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("{scheme}://[{ip}]:{port}"),
            _ => format!("{scheme}://{host}:{port}"),
        };

        Self {
            url,
            host,
            port,
            region: region.to_owned(),
        }
    }
}

/// Strip the brackets `url::Host` puts around IPv6 addresses when displayed.
pub fn unbracket_host(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

/// Resolve `host` to an IP address, returning `host` unchanged if the lookup fails.
///
/// IPv4 addresses are preferred since container ports are looked up with
/// `get_host_port_ipv4`.
pub async fn resolve_host(host: &str) -> String {
    // The port is required by the lookup but otherwise ignored
    match lookup_host((host, 0)).await {
        Ok(addrs) => {
            let ips: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
            match ips.iter().find(|ip| ip.is_ipv4()).or(ips.first()) {
                Some(ip) => ip.to_string(),
                None => {
                    tracing::info!("No addresses found for {host} - reverting to container host");
                    host.to_owned()
                }
            }
        }
        Err(e) => {
            tracing::info!(
                "Cannot resolve container host address {} - reverting to container host: {}",
                host,
                e
            );
            host.to_owned()
        }
    }
}
