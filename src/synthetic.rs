//! Procedural CONUS reflectivity field.
//!
//! Eight fixed weather systems are scattered with random points whose strength
//! decays with distance from the system center and follows a diurnal cycle taken
//! from the scan timestamp. Positions use a planar polar offset in degree space.

use std::f64::consts::{PI, TAU};

use anyhow::{anyhow, Result};
use chrono::Timelike;
use rand::Rng;
use tracing::info;

use crate::constants::{
    CONUS_MAX_LAT, CONUS_MAX_LNG, CONUS_MIN_LAT, CONUS_MIN_LNG, DEFAULT_POINTS_PER_SYSTEM,
    MAX_REFLECTIVITY_DBZ, MAX_SYSTEM_INTENSITY_DBZ, MIN_POINT_DISTANCE_DEG, MIN_REFLECTIVITY_DBZ,
    MIN_SYSTEM_INTENSITY_DBZ, TURBULENCE_DBZ,
};
use crate::intensity::IntensityLabel;
use crate::types::{FeatureCollection, Reading};
use crate::utils::{clamp, parse_timestamp_utc, round_to};

#[derive(Clone, Copy, Debug)]
pub struct WeatherSystemTemplate {
    pub center_lat: f64,
    pub center_lng: f64,
    pub base_intensity: f64,
    pub time_boost: f64,
    pub radius: f64,
    pub system_type: &'static str,
}

pub const WEATHER_SYSTEMS: [WeatherSystemTemplate; 8] = [
    // Midwest convection has the widest diurnal swing
    WeatherSystemTemplate {
        center_lat: 39.0,
        center_lng: -95.0,
        base_intensity: 35.0,
        time_boost: 15.0,
        radius: 4.0,
        system_type: "convective",
    },
    WeatherSystemTemplate {
        center_lat: 32.5,
        center_lng: -86.0,
        base_intensity: 42.0,
        time_boost: 5.0,
        radius: 3.5,
        system_type: "stratiform",
    },
    WeatherSystemTemplate {
        center_lat: 41.5,
        center_lng: -74.0,
        base_intensity: 38.0,
        time_boost: 8.0,
        radius: 2.8,
        system_type: "showery",
    },
    // Pacific coast; spills past the western clip edge
    WeatherSystemTemplate {
        center_lat: 40.5,
        center_lng: -123.5,
        base_intensity: 45.0,
        time_boost: 2.0,
        radius: 3.2,
        system_type: "orographic",
    },
    WeatherSystemTemplate {
        center_lat: 44.0,
        center_lng: -110.5,
        base_intensity: 32.0,
        time_boost: 3.0,
        radius: 4.5,
        system_type: "mountain",
    },
    WeatherSystemTemplate {
        center_lat: 29.0,
        center_lng: -91.0,
        base_intensity: 55.0,
        time_boost: 10.0,
        radius: 3.8,
        system_type: "thunderstorm",
    },
    WeatherSystemTemplate {
        center_lat: 42.0,
        center_lng: -99.0,
        base_intensity: 40.0,
        time_boost: 12.0,
        radius: 3.0,
        system_type: "developing",
    },
    WeatherSystemTemplate {
        center_lat: 38.5,
        center_lng: -85.0,
        base_intensity: 37.0,
        time_boost: 6.0,
        radius: 2.5,
        system_type: "valley",
    },
];

pub fn points_for_system_type(system_type: &str) -> usize {
    match system_type {
        "convective" => 45,
        "thunderstorm" => 50,
        "stratiform" => 35,
        "showery" => 30,
        "orographic" => 40,
        "mountain" => 35,
        "developing" => 40,
        "valley" => 30,
        _ => DEFAULT_POINTS_PER_SYSTEM,
    }
}

/// Diurnal multiplier in [-1, 1], peaking at 06:00 and bottoming out at 18:00 UTC.
pub fn day_factor(hour: u32, minute: u32) -> f64 {
    let time_of_day = hour as f64 + minute as f64 / 60.0;
    (time_of_day * PI / 12.0).sin()
}

pub fn system_intensity(system: &WeatherSystemTemplate, day_factor: f64) -> f64 {
    clamp(
        system.base_intensity + system.time_boost * day_factor,
        MIN_SYSTEM_INTENSITY_DBZ,
        MAX_SYSTEM_INTENSITY_DBZ,
    )
}

fn within_conus(lat: f64, lng: f64) -> bool {
    (CONUS_MIN_LAT..=CONUS_MAX_LAT).contains(&lat) && (CONUS_MIN_LNG..=CONUS_MAX_LNG).contains(&lng)
}

/// Builds a simulated collection for an MRMS `YYYYMMDD-HHMMSS` timestamp.
pub fn generate<R: Rng>(timestamp: &str, rng: &mut R) -> Result<FeatureCollection> {
    let scan_time = parse_timestamp_utc(timestamp)
        .ok_or_else(|| anyhow!("Invalid MRMS timestamp: {timestamp}"))?;
    let day_factor = day_factor(scan_time.hour(), scan_time.minute());

    let mut features = Vec::new();
    for system in &WEATHER_SYSTEMS {
        let intensity = system_intensity(system, day_factor);
        let num_points = points_for_system_type(system.system_type);

        for _ in 0..num_points {
            let angle = rng.gen_range(0.0..TAU);
            let distance = rng.gen_range(MIN_POINT_DISTANCE_DEG..=system.radius);

            let lat = system.center_lat + distance * angle.cos();
            let lng = system.center_lng + distance * angle.sin();
            if !within_conus(lat, lng) {
                continue;
            }

            let distance_factor = 1.0 - distance / system.radius;
            let turbulence = rng.gen_range(-TURBULENCE_DBZ..=TURBULENCE_DBZ);
            let reflectivity = clamp(
                intensity * distance_factor + turbulence,
                MIN_REFLECTIVITY_DBZ,
                MAX_REFLECTIVITY_DBZ,
            );

            features.push(Reading {
                longitude: round_to(lng, 6),
                latitude: round_to(lat, 6),
                value: round_to(reflectivity, 1),
                intensity: IntensityLabel::classify(reflectivity),
                system_type: system.system_type,
                timestamp: timestamp.to_string(),
            });
        }
    }

    info!("Generated {} simulated MRMS points for {timestamp}", features.len());
    Ok(FeatureCollection::simulated(timestamp, features))
}
