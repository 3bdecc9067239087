use serde::{Deserialize, Serialize};

/// Width of the band around the optimal range that still counts as "attention".
pub const ATTENTION_MARGIN: f64 = 5.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    Temperature,
    Moisture,
    Ph,
    Gas,
    Ec,
    Maturity,
}

impl MetricKey {
    /// Display order of the dashboard cards.
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Temperature,
        MetricKey::Moisture,
        MetricKey::Ph,
        MetricKey::Gas,
        MetricKey::Ec,
        MetricKey::Maturity,
    ];

    /// Key as it appears in feed snapshots, also used as the card style selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Temperature => "temperature",
            MetricKey::Moisture => "moisture",
            MetricKey::Ph => "ph",
            MetricKey::Gas => "gas",
            MetricKey::Ec => "ec",
            MetricKey::Maturity => "maturity",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            MetricKey::Temperature => 0,
            MetricKey::Moisture => 1,
            MetricKey::Ph => 2,
            MetricKey::Gas => 3,
            MetricKey::Ec => 4,
            MetricKey::Maturity => 5,
        }
    }

    pub fn config(&self) -> &'static MetricConfig {
        &METRIC_CONFIGS[self.index()]
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

/// Fixed per-metric constants. Nothing here changes after startup.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricConfig {
    pub key: MetricKey,
    pub title: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub optimal_range: OptimalRange,
    pub description: &'static str,
    pub icon: &'static str,
}

pub static METRIC_CONFIGS: [MetricConfig; 6] = [
    MetricConfig {
        key: MetricKey::Temperature,
        title: "Suhu",
        unit: "\u{00B0}C",
        min: 0.0,
        max: 80.0,
        optimal_range: OptimalRange { min: 40.0, max: 65.0 },
        description: "Suhu optimal untuk aktivitas mikroba thermophilic",
        icon: "\u{1F321}",
    },
    MetricConfig {
        key: MetricKey::Moisture,
        title: "Kelembaban",
        unit: "%",
        min: 0.0,
        max: 100.0,
        optimal_range: OptimalRange { min: 40.0, max: 60.0 },
        description: "Kelembaban ideal untuk proses pengomposan",
        icon: "\u{1F4A7}",
    },
    MetricConfig {
        key: MetricKey::Ph,
        title: "pH Level",
        unit: "pH",
        min: 0.0,
        max: 14.0,
        optimal_range: OptimalRange { min: 6.5, max: 8.0 },
        description: "Tingkat keasaman netral yang ideal",
        icon: "\u{25D4}",
    },
    MetricConfig {
        key: MetricKey::Gas,
        title: "Gas Amonia",
        unit: "ppm",
        min: 0.0,
        max: 500.0,
        optimal_range: OptimalRange { min: 0.0, max: 200.0 },
        description: "Level gas amonia dalam batas normal",
        icon: "\u{1F4A8}",
    },
    MetricConfig {
        key: MetricKey::Ec,
        title: "Konduktivitas",
        unit: "mS/cm",
        min: 0.0,
        max: 5.0,
        optimal_range: OptimalRange { min: 1.0, max: 2.0 },
        description: "Konduktivitas listrik agak tinggi",
        icon: "\u{26A1}",
    },
    MetricConfig {
        key: MetricKey::Maturity,
        title: "Kematangan",
        unit: "%",
        min: 0.0,
        max: 100.0,
        optimal_range: OptimalRange { min: 80.0, max: 100.0 },
        description: "Kompos sedang dalam proses pematangan",
        icon: "\u{1F343}",
    },
];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Loading,
    Optimal,
    Attention,
    Warning,
    #[serde(other)]
    Unknown,
}

impl MetricStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MetricStatus::Optimal => "Optimal",
            MetricStatus::Warning => "Perhatian",
            MetricStatus::Attention => "Perlu Monitor",
            MetricStatus::Loading => "Memuat...",
            MetricStatus::Unknown => "Unknown",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MetricStatus::Loading => "loading",
            MetricStatus::Optimal => "optimal",
            MetricStatus::Attention => "attention",
            MetricStatus::Warning => "warning",
            MetricStatus::Unknown => "unknown",
        }
    }
}

impl Default for MetricStatus {
    fn default() -> Self {
        MetricStatus::Loading
    }
}

/// Classify a reading against its optimal band with a fixed tolerance margin.
pub fn get_status(value: Option<f64>, optimalMin: f64, optimalMax: f64) -> MetricStatus {
    let Some(value) = value else {
        return MetricStatus::Loading;
    };

    if value >= optimalMin && value <= optimalMax {
        MetricStatus::Optimal
    } else if value < optimalMin - ATTENTION_MARGIN || value > optimalMax + ATTENTION_MARGIN {
        MetricStatus::Warning
    } else {
        MetricStatus::Attention
    }
}
