use async_trait::async_trait;
use log::debug;

use super::sms_traits::SmsChannelTrait;
use crate::errors::{Error, Result};

const DEFAULT_GATEWAY_URL: &str = "https://www.dreams.sa/index.php/api/sendsms";

/// Client for the dreams.sa SMS gateway.
///
/// The gateway takes everything as query parameters on a GET request and
/// answers 200 on acceptance.
pub struct DreamsSmsChannel {
    client: reqwest::Client,
    base_url: String,
    user: String,
    secret_key: String,
    sender: String,
}

impl DreamsSmsChannel {
    pub fn new(
        user: impl Into<String>,
        secret_key: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            user: user.into(),
            secret_key: secret_key.into(),
            sender: sender.into(),
        }
    }

    /// Overrides the gateway endpoint, e.g. for a staging gateway.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SmsChannelTrait for DreamsSmsChannel {
    async fn send(&self, phone_number: &str, message: &str) -> Result<()> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("user", self.user.as_str()),
                ("secret_key", self.secret_key.as_str()),
                ("sender", self.sender.as_str()),
                ("to", phone_number),
                ("message", message),
            ])
            .send()
            .await
            .map_err(|err| Error::Sms(err.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Sms(format!(
                "gateway returned {}",
                response.status()
            )));
        }
        debug!("sms accepted for {phone_number}");
        Ok(())
    }
}
