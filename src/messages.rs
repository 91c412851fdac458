//! Sensor gateway message types.
//!
//! The environment readout comes from a small HTTP gateway in front of a
//! BME280. Its JSON payload spells two keys without the trailing `e`; the
//! serde renames here match that wire format exactly.
//!
//! ```json
//! {"temperatur": 21.5, "humidity": 45.2, "pressur": 1013.2}
//! ```
//!
//! The types are `no_std` compatible and can be deserialized using either
//! `serde_json` (desktop) or `serde-json-core` (embedded).

/// One environment reading from the sensor gateway.
///
/// Readings replace each other wholesale; the scheduler keeps only the
/// latest one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReading {
    /// Temperature in degrees Celsius.
    #[cfg_attr(feature = "serde", serde(rename = "temperatur"))]
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
    /// Barometric pressure in hectopascals.
    #[cfg_attr(feature = "serde", serde(rename = "pressur"))]
    pub pressure: f32,
}

// ============================================================================
// Parsing Functions (using serde-json-core for no_std compatibility)
// ============================================================================

/// Parse a sensor reading from JSON bytes.
///
/// Works in both `std` and `no_std` environments using `serde-json-core`.
///
/// # Example
///
/// ```
/// use rs_matrixclock::messages::parse_sensor_json;
///
/// let json = br#"{"temperatur": 21.5, "humidity": 45.2, "pressur": 1013.2}"#;
/// let reading = parse_sensor_json(json).unwrap();
/// assert_eq!(reading.temperature, 21.5);
/// assert_eq!(reading.humidity, 45.2);
/// assert_eq!(reading.pressure, 1013.2);
/// ```
#[cfg(feature = "serde-json-core")]
pub fn parse_sensor_json(json: &[u8]) -> Option<SensorReading> {
    serde_json_core::from_slice(json)
        .ok()
        .map(|(reading, _)| reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_is_copy() {
        let reading = SensorReading {
            temperature: 21.5,
            humidity: 45.2,
            pressure: 1013.2,
        };
        let copied = reading;
        assert_eq!(reading, copied);
    }

    #[cfg(all(feature = "std", feature = "serde"))]
    #[test]
    fn deserialize_gateway_key_spelling() {
        let json = r#"{"temperatur": 21.5, "humidity": 45.2, "pressur": 1013.2}"#;
        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.temperature, 21.5);
        assert_eq!(reading.humidity, 45.2);
        assert_eq!(reading.pressure, 1013.2);
    }

    #[cfg(all(feature = "std", feature = "serde"))]
    #[test]
    fn deserialize_rejects_standard_spelling() {
        // The gateway never sends "temperature"; the renames are strict.
        let json = r#"{"temperature": 21.5, "humidity": 45.2, "pressure": 1013.2}"#;
        let result: Result<SensorReading, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[cfg(all(feature = "std", feature = "serde"))]
    #[test]
    fn serialize_uses_gateway_key_spelling() {
        let reading = SensorReading {
            temperature: 20.0,
            humidity: 50.0,
            pressure: 1000.0,
        };
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"temperatur\":"));
        assert!(json.contains("\"pressur\":"));
        assert!(json.contains("\"humidity\":"));
    }

    #[cfg(feature = "serde-json-core")]
    #[test]
    fn parse_sensor_json_roundtrip() {
        let json = br#"{"temperatur": -3.5, "humidity": 80.0, "pressur": 998.7}"#;
        let reading = parse_sensor_json(json).unwrap();
        assert_eq!(reading.temperature, -3.5);
    }

    #[cfg(feature = "serde-json-core")]
    #[test]
    fn parse_sensor_json_garbage_is_none() {
        assert!(parse_sensor_json(b"not json").is_none());
        assert!(parse_sensor_json(br#"{"temperatur": 1.0}"#).is_none());
    }
}
