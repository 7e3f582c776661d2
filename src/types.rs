use std::net::IpAddr;

use serde::Serialize;

/// Inclusive setpoint bounds accepted by the portal, in degrees Celsius.
pub const TEMPERATURE_MIN: f64 = 4.0;
pub const TEMPERATURE_MAX: f64 = 30.0;

/// Round to the half-degree steps the portal accepts (half rounds up).
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Snapshot of the portal's device status page, scraped per read.
///
/// Field names serialize in camelCase, matching the portal tool's
/// historical JSON output. A `None` means the label was missing from
/// the page (or carried an empty value), not that the read failed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub device_id: String,
    pub device_alias: Option<String>,
    pub latest_report_time: Option<String>,
    pub connected_to: Option<String>,
    pub burning_hours: Option<f64>,
    pub boiler_heating_for: Option<String>,
    pub flame_status: Option<bool>,
    pub room_temperature: Option<f64>,
    pub outside_temperature: Option<f64>,
    pub dhw_setpoint: Option<f64>,
    pub dhw_water_temperature: Option<f64>,
    pub ch_setpoint: Option<f64>,
    pub ch_water_temperature: Option<f64>,
    pub ch_water_pressure: Option<f64>,
    pub ch_return_temperature: Option<f64>,
}

/// Thermostat found via its UDP broadcast announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredOne {
    pub address: IpAddr,
    pub device_id: String,
}
