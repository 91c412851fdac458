//! HTTP client for the sensor gateway.
//!
//! Fetches one JSON reading per request from the configured gateway URL.
//! Connections are opened and torn down per fetch; at one poll a minute
//! the handshake cost is irrelevant and the idle connection would only
//! rot between polls.

use anyhow::{anyhow, bail, Result};
use esp_idf_hal::io::Read;
use esp_idf_svc::http::client::{Configuration as HttpConfiguration, EspHttpConnection};
use esp_idf_svc::http::Method;
use log::debug;

use crate::config::{LongString, SensorConfig};
use crate::messages::{parse_sensor_json, SensorReading};
use crate::traits::SensorSource;

/// The gateway payload is a single small JSON object; anything past this
/// is not a reading.
const MAX_BODY_BYTES: usize = 512;

/// HTTP sensor gateway client.
///
/// Implements [`SensorSource`] over a plain GET of the configured URL.
/// The retry policy lives in the scheduler; a failed request here reports
/// exactly one error.
pub struct HttpSensor {
    url: LongString,
}

impl HttpSensor {
    /// Creates a client for the configured gateway URL.
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            url: config.url.clone(),
        }
    }

    fn get_reading(&mut self) -> Result<SensorReading> {
        let mut conn = EspHttpConnection::new(&HttpConfiguration::default())?;

        conn.initiate_request(Method::Get, self.url.as_str(), &[])?;
        conn.initiate_response()?;

        let status = conn.status();
        if !(200..300).contains(&status) {
            bail!("sensor gateway returned HTTP {}", status);
        }

        let mut body = [0u8; MAX_BODY_BYTES];
        let mut len = 0;
        loop {
            let read = conn.read(&mut body[len..])?;
            if read == 0 {
                break;
            }
            len += read;
            if len == body.len() {
                break;
            }
        }
        debug!("sensor gateway payload: {} bytes", len);

        parse_sensor_json(&body[..len]).ok_or_else(|| anyhow!("unparseable sensor payload"))
    }
}

impl SensorSource for HttpSensor {
    type Error = anyhow::Error;

    fn fetch(&mut self) -> Result<SensorReading, Self::Error> {
        self.get_reading()
    }
}
