//! Sensor source trait for the periodic environment readout.
//!
//! The scheduler asks a [`SensorSource`] for a fresh
//! [`SensorReading`](crate::messages::SensorReading) once per poll interval
//! and walks the temperature / humidity / pressure readout on success.
//! Transport and parsing live behind this trait; the scheduler only sees a
//! typed reading or an error.

use crate::messages::SensorReading;

/// Sensor source trait - fetches one environment reading.
///
/// Implementations block for the duration of the fetch. The scheduler
/// retries a failed fetch a bounded number of times and then gives up until
/// the next poll interval, so implementations should fail fast rather than
/// retry internally.
///
/// # Example
///
/// ```rust
/// use rs_matrixclock::traits::SensorSource;
/// use rs_matrixclock::hal::MockSensor;
/// use rs_matrixclock::messages::SensorReading;
///
/// let mut sensor = MockSensor::new();
/// sensor.queue_ok(SensorReading {
///     temperature: 21.5,
///     humidity: 45.0,
///     pressure: 1013.2,
/// });
///
/// let reading = sensor.fetch().unwrap();
/// assert_eq!(reading.temperature, 21.5);
/// assert_eq!(sensor.fetch_count, 1);
/// ```
pub trait SensorSource {
    /// Error type for fetch failures. `Debug` so the scheduler can log the
    /// failure before giving up.
    type Error: core::fmt::Debug;

    /// Fetch one reading from the sensor.
    fn fetch(&mut self) -> Result<SensorReading, Self::Error>;
}
