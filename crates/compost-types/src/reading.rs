use crate::metric::{get_status, MetricKey, MetricStatus, OptimalRange};
use crate::snapshot::SensorSnapshot;

/// Readings shown when the feed delivers an empty payload.
pub const DEMO_READINGS: [(MetricKey, f64, MetricStatus); 6] = [
    (MetricKey::Temperature, 55.2, MetricStatus::Optimal),
    (MetricKey::Moisture, 52.0, MetricStatus::Optimal),
    (MetricKey::Ph, 7.2, MetricStatus::Optimal),
    (MetricKey::Gas, 125.0, MetricStatus::Optimal),
    (MetricKey::Ec, 2.1, MetricStatus::Warning),
    (MetricKey::Maturity, 75.0, MetricStatus::Attention),
];

/// Display state of one metric. Only `value` and `status` ever change, and always together.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricReading {
    key: MetricKey,
    value: Option<f64>,
    status: MetricStatus,
    unit: &'static str,
    min: f64,
    max: f64,
    optimal_range: OptimalRange,
    description: &'static str,
}

impl MetricReading {
    pub fn new(key: MetricKey) -> Self {
        let config = key.config();
        Self {
            key,
            value: None,
            status: MetricStatus::Loading,
            unit: config.unit,
            min: config.min,
            max: config.max,
            optimal_range: config.optimal_range,
            description: config.description,
        }
    }

    pub fn key(&self) -> MetricKey {
        self.key
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn status(&self) -> MetricStatus {
        self.status
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn optimal_range(&self) -> OptimalRange {
        self.optimal_range
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Store a new value and re-derive the status from the fixed config band,
    /// not from the copy held in this reading.
    fn observe(&mut self, value: Option<f64>) {
        let band = self.key.config().optimal_range;
        self.value = value;
        self.status = get_status(value, band.min, band.max);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// A non-empty snapshot replaced every reading.
    Applied,
    /// An empty snapshot installed the demo readings.
    DemoFallback,
    /// An empty snapshot reset every reading to loading.
    Cleared,
}

/// The fixed set of six readings, in card order.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReadings {
    readings: [MetricReading; 6],
}

impl SensorReadings {
    pub fn new() -> Self {
        Self {
            readings: MetricKey::ALL.map(MetricReading::new),
        }
    }

    pub fn get(&self, key: MetricKey) -> &MetricReading {
        &self.readings[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricReading> {
        self.readings.iter()
    }

    /// Replace all six readings from one feed event.
    ///
    /// Keys missing from a non-empty snapshot reset to loading; nothing is carried over from
    /// the previous tick. An empty or absent payload installs [`DEMO_READINGS`] when
    /// `demoFallback` is set, otherwise it clears every reading.
    pub fn apply_snapshot(
        &mut self,
        snapshot: Option<&SensorSnapshot>,
        demoFallback: bool,
    ) -> SnapshotOutcome {
        match snapshot {
            Some(snapshot) if !snapshot.is_empty() => {
                for reading in self.readings.iter_mut() {
                    reading.observe(snapshot.value(reading.key));
                }
                SnapshotOutcome::Applied
            }
            _ if demoFallback => {
                self.install_demo_readings();
                SnapshotOutcome::DemoFallback
            }
            _ => {
                for reading in self.readings.iter_mut() {
                    reading.observe(None);
                }
                SnapshotOutcome::Cleared
            }
        }
    }

    fn install_demo_readings(&mut self) {
        for (key, value, status) in DEMO_READINGS {
            let reading = &mut self.readings[key.index()];
            reading.value = Some(value);
            reading.status = status;
        }
    }
}

impl Default for SensorReadings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(payload: serde_json::Value) -> SensorSnapshot {
        SensorSnapshot::from_payload(Some(payload)).unwrap()
    }

    fn statuses(readings: &SensorReadings) -> Vec<MetricStatus> {
        readings.iter().map(MetricReading::status).collect()
    }

    #[test]
    fn readings_start_loading() {
        let readings = SensorReadings::new();
        assert_eq!(readings.iter().count(), 6);
        for reading in readings.iter() {
            assert_eq!(reading.value(), None);
            assert_eq!(reading.status(), MetricStatus::Loading);
        }
        let gas = readings.get(MetricKey::Gas);
        assert_eq!(gas.unit(), "ppm");
        assert_eq!(gas.max(), 500.0);
    }

    #[test]
    fn full_snapshot_derives_every_status() {
        let mut readings = SensorReadings::new();
        let outcome = readings.apply_snapshot(
            Some(&snapshot(json!({
                "temperature": 55.2, "moisture": 52, "ph": 7.2,
                "gas": 125, "ec": 2.1, "maturity": 75
            }))),
            true,
        );

        assert_eq!(outcome, SnapshotOutcome::Applied);
        // ec=2.1 sits within the margin above 2, maturity=75 is exactly 80-5.
        assert_eq!(
            statuses(&readings),
            vec![
                MetricStatus::Optimal,
                MetricStatus::Optimal,
                MetricStatus::Optimal,
                MetricStatus::Optimal,
                MetricStatus::Attention,
                MetricStatus::Attention,
            ]
        );
        assert_eq!(readings.get(MetricKey::Ph).value(), Some(7.2));
    }

    #[test]
    fn empty_snapshot_installs_demo_readings() {
        let mut readings = SensorReadings::new();
        let outcome = readings.apply_snapshot(Some(&snapshot(json!({}))), true);

        assert_eq!(outcome, SnapshotOutcome::DemoFallback);
        for (key, value, status) in DEMO_READINGS {
            assert_eq!(readings.get(key).value(), Some(value));
            assert_eq!(readings.get(key).status(), status);
        }
        assert_eq!(readings.get(MetricKey::Ec).status(), MetricStatus::Warning);
    }

    #[test]
    fn absent_payload_installs_demo_readings() {
        let mut readings = SensorReadings::new();
        assert_eq!(readings.apply_snapshot(None, true), SnapshotOutcome::DemoFallback);
        assert_eq!(readings.get(MetricKey::Temperature).value(), Some(55.2));
    }

    #[test]
    fn scalar_payload_resets_every_reading() {
        let mut readings = SensorReadings::new();
        readings.apply_snapshot(None, true);
        let outcome = readings.apply_snapshot(Some(&snapshot(json!(42))), true);

        assert_eq!(outcome, SnapshotOutcome::Applied);
        assert!(readings.iter().all(|r| r.value().is_none()));
        assert!(statuses(&readings).iter().all(|s| *s == MetricStatus::Loading));
    }

    #[test]
    fn empty_snapshot_clears_when_fallback_disabled() {
        let mut readings = SensorReadings::new();
        readings.apply_snapshot(Some(&snapshot(json!({"temperature": 50}))), false);
        let outcome = readings.apply_snapshot(None, false);

        assert_eq!(outcome, SnapshotOutcome::Cleared);
        assert!(readings.iter().all(|r| r.value().is_none()));
        assert!(readings.iter().all(|r| r.status() == MetricStatus::Loading));
    }

    #[test]
    fn partial_snapshot_resets_missing_metrics() {
        let mut readings = SensorReadings::new();
        readings.apply_snapshot(None, true);
        readings.apply_snapshot(Some(&snapshot(json!({"temperature": 999}))), true);

        let temperature = readings.get(MetricKey::Temperature);
        assert_eq!(temperature.value(), Some(999.0));
        assert_eq!(temperature.status(), MetricStatus::Warning);
        for key in &MetricKey::ALL[1..] {
            assert_eq!(readings.get(*key).value(), None);
            assert_eq!(readings.get(*key).status(), MetricStatus::Loading);
        }
    }

    #[test]
    fn fixed_fields_survive_updates() {
        let mut readings = SensorReadings::new();
        let before = readings.get(MetricKey::Ec).clone();
        readings.apply_snapshot(Some(&snapshot(json!({"ec": 4.2}))), true);
        let after = readings.get(MetricKey::Ec);

        assert_eq!(after.unit(), before.unit());
        assert_eq!(after.min(), before.min());
        assert_eq!(after.max(), before.max());
        assert_eq!(after.optimal_range(), before.optimal_range());
        assert_eq!(after.description(), before.description());
        assert_eq!(after.status(), MetricStatus::Attention);
    }
}
