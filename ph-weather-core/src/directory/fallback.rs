//! Embedded place list used when the registry cannot be reached.

use crate::model::{Coordinates, PlaceRecord};

use super::Directory;

const PLACES: &[(&str, f64, f64)] = &[
    ("City of Manila", 14.5995, 120.9842),
    ("Quezon City", 14.6760, 121.0437),
    ("City of Makati", 14.5547, 121.0244),
    ("City of Pasig", 14.5764, 121.0851),
    ("City of Taguig", 14.5176, 121.0509),
    ("Municipality of Pateros", 14.5454, 121.0687),
    ("Municipality of Taytay", 14.5692, 121.1325),
    ("City of Baguio", 16.4023, 120.5960),
    ("Cebu City", 10.3157, 123.8854),
    ("Iloilo City", 10.7202, 122.5621),
    ("City of Bacolod", 10.6765, 122.9509),
    ("Tacloban City", 11.2444, 125.0039),
    ("Cagayan de Oro City", 8.4542, 124.6319),
    ("Davao City", 7.1907, 125.4553),
    ("City of General Santos", 6.1164, 125.1716),
    ("Zamboanga City", 6.9214, 122.0790),
    ("City of Puerto Princesa", 9.7392, 118.7353),
];

/// The embedded list, normalized like remote entries.
pub fn directory() -> Directory {
    Directory::new(
        PLACES
            .iter()
            .filter_map(|&(name, latitude, longitude)| {
                PlaceRecord::from_source(name, Coordinates { latitude, longitude })
            })
            .collect(),
    )
}
