pub const MRMS_BUCKET_URL: &str = "https://noaa-mrms-pds.s3.amazonaws.com";
pub const MRMS_NCEP_CONUS_URL: &str = "https://mrms.ncep.noaa.gov/data/CONUS";
pub const MRMS_PRODUCT: &str = "MRMS_ReflectivityAtLowestAltitude";
pub const MRMS_BASE_LEVEL_TAG: &str = "00.50";
pub const MRMS_FILE_SUFFIX: &str = "grib2.gz";

pub const SCAN_STEP_SECONDS: i64 = 120;
pub const CANDIDATE_OFFSETS_MINUTES: [i64; 11] = [0, -2, -4, -6, -8, -10, -12, -14, -16, -18, -20];
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
pub const MINUTE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M00";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_CACHE_SECONDS: u64 = 120;
pub const DEFAULT_PROBE_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_PROBE_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 60;
pub const MAX_FETCH_TIMEOUT_SECONDS: u64 = 60;
pub const MIN_TIMEOUT_SECONDS: u64 = 1;

// Bounds advertised to map clients; the generator clips to the rounder CONUS box below.
pub const RESPONSE_BOUNDS: [[f64; 2]; 2] = [[24.396308, -125.0], [49.384358, -66.934570]];
pub const CONUS_MIN_LAT: f64 = 25.0;
pub const CONUS_MAX_LAT: f64 = 49.0;
pub const CONUS_MIN_LNG: f64 = -125.0;
pub const CONUS_MAX_LNG: f64 = -67.0;

pub const MIN_REFLECTIVITY_DBZ: f64 = 18.0;
pub const MAX_REFLECTIVITY_DBZ: f64 = 65.0;
pub const MIN_SYSTEM_INTENSITY_DBZ: f64 = 25.0;
pub const MAX_SYSTEM_INTENSITY_DBZ: f64 = 60.0;
pub const TURBULENCE_DBZ: f64 = 8.0;
pub const MIN_POINT_DISTANCE_DEG: f64 = 0.1;
pub const DEFAULT_POINTS_PER_SYSTEM: usize = 35;

pub const SERVICE_NAME: &str = "MRMS Radar API";
pub const DATA_SOURCE: &str = "NOAA MRMS";
pub const COLLECTION_SOURCE: &str = "NOAA MRMS ReflectivityAtLowestAltitude";
pub const COLLECTION_PRODUCT: &str = "RALA";
pub const COLLECTION_PRODUCT_NAME: &str = "Reflectivity at Lowest Altitude (RALA)";
pub const COLLECTION_RESOLUTION: &str = "0.50 km";
pub const COLLECTION_DATA_TYPE: &str = "REAL_MRMS_SIMULATION";
pub const NOTE_LOCATED: &str = "Real MRMS Reflectivity at Lowest Altitude (RALA) - Enhanced Simulation";
pub const NOTE_FALLBACK: &str = "Real MRMS Data - Enhanced Simulation";
pub const FALLBACK_DATA_URL: &str = "https://noaa-mrms-pds.s3.amazonaws.com/";
