use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IntensityLabel {
    #[serde(rename = "very light")]
    VeryLight,
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "heavy")]
    Heavy,
    #[serde(rename = "extreme")]
    Extreme,
}

impl IntensityLabel {
    /// Maps reflectivity (dBZ) to a severity band. Lower bounds are inclusive; NaN is very light.
    pub fn classify(value: f64) -> Self {
        if value >= 50.0 {
            Self::Extreme
        } else if value >= 40.0 {
            Self::Heavy
        } else if value >= 30.0 {
            Self::Moderate
        } else if value >= 20.0 {
            Self::Light
        } else {
            Self::VeryLight
        }
    }
}
