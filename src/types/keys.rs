// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor and attribute keys.
//!
//! Sensor keys name entries in a device's live sensor mapping and in the
//! persisted snapshot. Attribute keys name entries in the projected
//! attribute bundle; where the two coincide the sensor key is reused.

// Sensors read for the presentation scalars.
pub const DEVICE_TRACKER_STATE_VALUE: &str = "dev_trk_state_value";
pub const DEVICE_TRACKER_STATE_ZONE: &str = "dev_trk_state_zone";
pub const GPS_ACCURACY: &str = "gps_accuracy";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const BATTERY: &str = "battery";

// Sensors read for the attribute bundle.
pub const LOCATION_SOURCE: &str = "location_source";
pub const DEVICE_STATUS: &str = "device_status";
pub const NAME: &str = "name";
pub const PICTURE: &str = "picture";
pub const ZONE: &str = "zone";
pub const ZONE_FNAME: &str = "zone_fname";
pub const LAST_ZONE: &str = "last_zone";
pub const ZONE_DATETIME: &str = "zone_datetime";
pub const LAST_LOCATED_DATETIME: &str = "last_located_datetime";
pub const LAST_UPDATE_DATETIME: &str = "last_update_datetime";
pub const NEXT_UPDATE_DATETIME: &str = "next_update_datetime";
pub const HOME_DISTANCE: &str = "home_distance";
pub const DISTANCE_TO_DEVICES: &str = "distance_to";
pub const TRIGGER: &str = "trigger";
pub const FROM_ZONE: &str = "from_zone";
pub const WAZE_DISTANCE: &str = "waze_distance";
pub const CALC_DISTANCE: &str = "calc_distance";

// Attribute-only keys.
pub const DATA_SOURCE: &str = "data_source";
pub const LAST_LOCATED: &str = "last_located";
pub const LAST_UPDATE: &str = "last_update";
pub const NEXT_UPDATE: &str = "next_update";
pub const TRACK_FROM_ZONES: &str = "track_from_zones";
pub const PRIMARY_HOME_ZONE: &str = "primary_home_zone";
pub const VERSION: &str = "version";
pub const EVENT_LOG_VERSION: &str = "event_log_version";
pub const TRACKING: &str = "tracking";
pub const INSTALL_DIRECTORY: &str = "install_directory";
