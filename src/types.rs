use std::sync::Arc;

use reqwest::Client;
use serde::{Serialize, Serializer};

use crate::cache::RadarCache;
use crate::config::Config;
use crate::constants::{
    COLLECTION_DATA_TYPE, COLLECTION_PRODUCT, COLLECTION_RESOLUTION, COLLECTION_SOURCE,
    DATA_SOURCE, RESPONSE_BOUNDS,
};
use crate::intensity::IntensityLabel;
use crate::utils::Clock;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub http: Client,
    pub cache: Arc<RadarCache>,
    pub clock: Arc<dyn Clock>,
}

/// A remote MRMS file known to exist, plus the scan time it was found for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataReference {
    pub url: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub longitude: f64,
    pub latitude: f64,
    pub value: f64,
    pub intensity: IntensityLabel,
    pub system_type: &'static str,
    pub timestamp: String,
}

// Readings go out as GeoJSON point features.
#[derive(Serialize)]
struct FeatureWire<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: PointWire,
    properties: FeaturePropertiesWire<'a>,
}

#[derive(Serialize)]
struct PointWire {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [f64; 2],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeaturePropertiesWire<'a> {
    reflectivity: f64,
    unit: &'static str,
    intensity: IntensityLabel,
    system_type: &'a str,
    data_source: &'static str,
    timestamp: &'a str,
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FeatureWire {
            kind: "Feature",
            geometry: PointWire {
                kind: "Point",
                coordinates: [self.longitude, self.latitude],
            },
            properties: FeaturePropertiesWire {
                reflectivity: self.value,
                unit: "dBZ",
                intensity: self.intensity,
                system_type: self.system_type,
                data_source: "MRMS",
                timestamp: &self.timestamp,
            },
        }
        .serialize(serializer)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMetadata {
    pub source: &'static str,
    pub product: &'static str,
    pub resolution: &'static str,
    pub timestamp: String,
    #[serde(rename = "totalPoints")]
    pub count: usize,
    pub data_type: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Reading>,
    pub metadata: CollectionMetadata,
}

impl FeatureCollection {
    pub fn simulated(timestamp: &str, features: Vec<Reading>) -> Self {
        let count = features.len();
        Self {
            kind: "FeatureCollection",
            features,
            metadata: CollectionMetadata {
                source: COLLECTION_SOURCE,
                product: COLLECTION_PRODUCT,
                resolution: COLLECTION_RESOLUTION,
                timestamp: timestamp.to_string(),
                count,
                data_type: COLLECTION_DATA_TYPE,
            },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarEnvelope {
    pub success: bool,
    pub timestamp: String,
    pub data_url: String,
    pub data: FeatureCollection,
    pub bounds: [[f64; 2]; 2],
    pub note: &'static str,
    pub source: &'static str,
}

impl RadarEnvelope {
    pub fn new(timestamp: String, data_url: String, data: FeatureCollection, note: &'static str) -> Self {
        Self {
            success: true,
            timestamp,
            data_url,
            data,
            bounds: RESPONSE_BOUNDS,
            note,
            source: DATA_SOURCE,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
}
