use std::time::Duration;

use ureq::Agent;

use crate::error::Error;

// Client identification string, configured once on the HTTP agent.
const USER_AGENT: &str = "pandora-core/0.1";

pub const NET_CONNECT_TIMEOUT: Duration = Duration::from_millis(8 * 1000);

pub const NET_IO_TIMEOUT: Duration = Duration::from_millis(16 * 1000);

/// Blocking HTTP transport for the RPC channel.  One POST per operation, the
/// full response body read before returning; no retries, no pooling beyond
/// what the agent keeps internally.
pub struct Transport {
    agent: Agent,
}

impl Transport {
    pub fn new(proxy_url: Option<&str>) -> Self {
        let mut config = Agent::config_builder()
            .user_agent(USER_AGENT)
            .timeout_connect(Some(NET_CONNECT_TIMEOUT))
            .timeout_recv_response(Some(NET_IO_TIMEOUT))
            .timeout_send_request(Some(NET_IO_TIMEOUT));

        if let Some(proxy_url) = proxy_url {
            let proxy = ureq::Proxy::new(proxy_url).ok();
            config = config.proxy(proxy);
        }

        let agent: Agent = config.build().into();
        Self { agent }
    }

    /// POST an opaque body and return the raw response text.
    pub fn post(&self, url: &str, body: &[u8]) -> Result<String, Error> {
        log::trace!("POST {}", url);
        let mut response = self
            .agent
            .post(url)
            .header("Content-Type", "text/xml")
            .send(body)?;
        let text = response.body_mut().read_to_string()?;
        Ok(text)
    }
}
