//! Network transports: geolocation HTTP GET and the Twilio SMS gateway.

use std::time::Duration;

use cane_traits::{HttpTransport, SmsTransport};

use crate::error::{HwError, Result};

/// Blocking HTTP client with a per-call timeout.
pub struct BlockingHttp {
    client: reqwest::blocking::Client,
}

impl BlockingHttp {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| HwError::Http(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for BlockingHttp {
    fn get(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| HwError::Http(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HwError::Status(status.as_u16()).into());
        }
        Ok(resp.text().map_err(|e| HwError::Http(e.to_string()))?)
    }
}

/// Twilio-style SMS gateway: urlencoded POST with basic auth.
pub struct TwilioSms {
    client: reqwest::blocking::Client,
    api_url: String,
    account_sid: String,
    auth_token: String,
    from: String,
    to: String,
}

impl TwilioSms {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<Self> {
        let account_sid = account_sid.into();
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| HwError::Http(e.to_string()))?;
        Ok(Self {
            api_url: format!(
                "https://api.twilio.com/2010-04-01/Accounts/{account_sid}/Messages.json"
            ),
            client,
            account_sid,
            auth_token: auth_token.into(),
            from: from.into(),
            to: to.into(),
        })
    }
}

impl SmsTransport for TwilioSms {
    fn send(
        &mut self,
        body: &str,
        timeout: Duration,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("From", &self.from)
            .append_pair("To", &self.to)
            .append_pair("Body", body)
            .finish();
        let resp = self
            .client
            .post(&self.api_url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .timeout(timeout)
            .body(form)
            .send()
            .map_err(|e| HwError::Http(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HwError::Status(status.as_u16()).into());
        }
        tracing::debug!(status = status.as_u16(), "sms accepted by gateway");
        Ok(())
    }
}
