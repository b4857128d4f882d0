// WGS-84 constants
const EARTH_RADIUS_KM: f64 = 6378.137;
const ECCENTRICITY_SQ: f64 = 0.006_694_379_990_14;

const LATITUDE_ITERATIONS: usize = 5;

/// Rotates a TEME position into the Earth-fixed frame using Greenwich sidereal time.
pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Converts an ECEF position (km) to geodetic latitude, longitude (degrees) and
/// height above the ellipsoid (km).
pub fn ecef_to_geodetic(pos_ecef: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = pos_ecef;
    let p = (x * x + y * y).sqrt();
    let lon = y.atan2(x);

    let mut lat = z.atan2(p * (1.0 - ECCENTRICITY_SQ));
    let mut n = EARTH_RADIUS_KM;
    for _ in 0..LATITUDE_ITERATIONS {
        let sin_lat = lat.sin();
        n = EARTH_RADIUS_KM / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();
        lat = (z + ECCENTRICITY_SQ * n * sin_lat).atan2(p);
    }

    // valid at the poles too, unlike p / cos(lat)
    let sin_lat = lat.sin();
    let height = p * lat.cos() + (z + ECCENTRICITY_SQ * n * sin_lat) * sin_lat - n;

    (lat.to_degrees(), lon.to_degrees(), height)
}
