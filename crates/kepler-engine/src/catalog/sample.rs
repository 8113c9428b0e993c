//! Fixed fallback catalog used when the live catalog fetch fails:
//! 11 planets across 5 Kepler systems.
//!
//! Values are rounded archive figures. The engine treats this list exactly
//! like fetched data.

use super::record::PlanetRecord;

struct Host {
    name: &'static str,
    ra: f64,
    dec: f64,
    distance: f64,
    teff: f64,
    radius: f64,
    mass: f64,
    log_lum: f64,
    planets: u32,
}

// (suffix, radius R⊕, period d, eq temp K, insolation S⊕, a AU, year)
type Row = (&'static str, f64, f64, f64, f64, f64, i32);

const KEPLER_22: Host = Host {
    name: "Kepler-22",
    ra: 289.2176,
    dec: 47.8840,
    distance: 194.6,
    teff: 5518.0,
    radius: 0.98,
    mass: 0.97,
    log_lum: -0.101,
    planets: 1,
};
const KEPLER_452: Host = Host {
    name: "Kepler-452",
    ra: 295.4365,
    dec: 44.2771,
    distance: 551.7,
    teff: 5757.0,
    radius: 1.11,
    mass: 1.04,
    log_lum: 0.083,
    planets: 1,
};
const KEPLER_186: Host = Host {
    name: "Kepler-186",
    ra: 298.6541,
    dec: 43.9550,
    distance: 177.6,
    teff: 3755.0,
    radius: 0.52,
    mass: 0.54,
    log_lum: -1.31,
    planets: 5,
};
const KEPLER_442: Host = Host {
    name: "Kepler-442",
    ra: 285.3676,
    dec: 39.2800,
    distance: 370.5,
    teff: 4402.0,
    radius: 0.60,
    mass: 0.61,
    log_lum: -0.89,
    planets: 1,
};
const KEPLER_62: Host = Host {
    name: "Kepler-62",
    ra: 283.2125,
    dec: 45.3497,
    distance: 300.9,
    teff: 4925.0,
    radius: 0.64,
    mass: 0.69,
    log_lum: -0.60,
    planets: 5,
};

const SAMPLE: [(&Host, Row); 11] = [
    (&KEPLER_22, ("b", 2.38, 289.8623, 262.0, 1.11, 0.849, 2011)),
    (&KEPLER_452, ("b", 1.63, 384.843, 265.0, 1.10, 1.046, 2015)),
    (&KEPLER_186, ("b", 1.07, 3.8867, 579.0, 31.4, 0.0378, 2014)),
    (&KEPLER_186, ("c", 1.25, 7.2673, 470.0, 11.6, 0.0574, 2014)),
    (&KEPLER_186, ("d", 1.40, 13.3428, 384.0, 5.2, 0.0861, 2014)),
    (&KEPLER_186, ("e", 1.27, 22.4077, 323.0, 2.6, 0.1216, 2014)),
    (&KEPLER_186, ("f", 1.17, 129.9441, 188.0, 0.29, 0.432, 2014)),
    (&KEPLER_442, ("b", 1.34, 112.3053, 233.0, 0.70, 0.409, 2015)),
    (&KEPLER_62, ("d", 1.95, 18.1640, 510.0, 15.1, 0.120, 2013)),
    (&KEPLER_62, ("e", 1.61, 122.3874, 270.0, 1.20, 0.427, 2013)),
    (&KEPLER_62, ("f", 1.41, 267.291, 208.0, 0.41, 0.718, 2013)),
];

/// The fallback rows, in display order.
pub fn fallback_records() -> Vec<PlanetRecord> {
    SAMPLE
        .iter()
        .map(|(host, (suffix, radius, period, eq_temp, insol, sma, year))| PlanetRecord {
            host: host.name.to_string(),
            name: format!("{} {}", host.name, suffix),
            radius: Some(*radius),
            period: Some(*period),
            eq_temp: Some(*eq_temp),
            mass: None,
            insolation: Some(*insol),
            semi_major_axis: Some(*sma),
            star_teff: Some(host.teff),
            star_radius: Some(host.radius),
            star_mass: Some(host.mass),
            star_log_luminosity: Some(host.log_lum),
            distance: Some(host.distance),
            ra: Some(host.ra),
            dec: Some(host.dec),
            system_planets: Some(host.planets),
            discovery_year: Some(*year),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn eleven_planets_five_hosts() {
        let rows = fallback_records();
        assert_eq!(rows.len(), 11);
        let hosts: HashSet<&str> = rows.iter().map(|r| r.host.as_str()).collect();
        assert_eq!(hosts.len(), 5);
    }

    #[test]
    fn planet_names_are_unique() {
        let rows = fallback_records();
        let names: HashSet<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), rows.len());
    }
}
