//! Location acquisition: device fix first, IP geolocation as fallback,
//! and a user-triggered network retry when the device never answers.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::coordinates::Coordinates;
use crate::ui::messages::{info, warning};
use crate::utils::path::expand_tilde;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What the device reported when asked for a fix.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceReading {
    Fix(Coordinates),
    /// The device answered with an error (permission denied, no signal, ...).
    Error(String),
    /// No answer yet.
    Pending,
}

pub trait DeviceSource {
    fn read(&self) -> AppResult<DeviceReading>;
}

pub trait NetworkLocator {
    fn locate(&self) -> AppResult<Coordinates>;
}

/// Coordinates typed in by the user (`--lat` / `--lon`).
pub struct ExplicitFix(pub Coordinates);

impl DeviceSource for ExplicitFix {
    fn read(&self) -> AppResult<DeviceReading> {
        Ok(DeviceReading::Fix(self.0))
    }
}

/// A geolocation result saved by the device, in the shape of the
/// browser Geolocation API: `{"coords": {...}}` or `{"error": {...}}`.
pub struct GeolocationFile(pub PathBuf);

impl DeviceSource for GeolocationFile {
    fn read(&self) -> AppResult<DeviceReading> {
        if !self.0.exists() {
            return Ok(DeviceReading::Pending);
        }
        let content = fs::read_to_string(&self.0)?;
        parse_geolocation_json(&content)
    }
}

/// No GPS device available at all.
pub struct NoDevice;

impl DeviceSource for NoDevice {
    fn read(&self) -> AppResult<DeviceReading> {
        Ok(DeviceReading::Error("no GPS device available".into()))
    }
}

pub fn parse_geolocation_json(content: &str) -> AppResult<DeviceReading> {
    if content.trim().is_empty() {
        return Ok(DeviceReading::Pending);
    }

    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| AppError::Location(format!("malformed geolocation data: {}", e)))?;

    if let Some(coords) = value.get("coords") {
        let lat = coords.get("latitude").and_then(|v| v.as_f64());
        let lon = coords.get("longitude").and_then(|v| v.as_f64());
        return match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(DeviceReading::Fix(Coordinates::new(lat, lon)?)),
            _ => Err(AppError::Location(
                "geolocation 'coords' without latitude/longitude".into(),
            )),
        };
    }

    if let Some(err) = value.get("error") {
        let message = err
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Ok(DeviceReading::Error(message));
    }

    Ok(DeviceReading::Pending)
}

/// IP geolocation through an ipinfo.io compatible endpoint.
pub struct IpInfoLocator {
    pub url: String,
    pub timeout: Duration,
}

impl IpInfoLocator {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            url: cfg.ip_geolocation_url.clone(),
            timeout: Duration::from_secs(cfg.geolocation_timeout_secs),
        }
    }
}

impl NetworkLocator for IpInfoLocator {
    fn locate(&self) -> AppResult<Coordinates> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AppError::Location(e.to_string()))?;

        let body: serde_json::Value = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| AppError::Location(e.to_string()))?;

        parse_ipinfo(&body)
    }
}

/// Extract `"loc": "lat,lon"` from an ipinfo response.
pub fn parse_ipinfo(body: &serde_json::Value) -> AppResult<Coordinates> {
    let loc = body
        .get("loc")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::Location("response has no 'loc' field".into()))?;
    Coordinates::parse_pair(loc)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Gps,
    Network,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedLocation {
    pub coords: Coordinates,
    pub source: LocationSource,
    pub captured_at: String,
}

impl LocationSource {
    pub fn label(&self) -> &'static str {
        match self {
            LocationSource::Gps => "GPS",
            LocationSource::Network => "network",
        }
    }
}

impl CapturedLocation {
    fn new(coords: Coordinates, source: LocationSource) -> Self {
        Self {
            coords,
            source,
            captured_at: Local::now().to_rfc3339(),
        }
    }

    /// Capture time as `YYYY-MM-DD HH:MM:SS` in local time.
    pub fn captured_at_local(&self) -> String {
        DateTime::parse_from_rfc3339(&self.captured_at)
            .map(|dt| {
                dt.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|_| self.captured_at.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Captured(CapturedLocation),
    Pending,
    Failed(String),
}

/// Run the acquisition chain.
///
/// `force_network` skips the device entirely.
pub fn acquire(
    device: &dyn DeviceSource,
    network: &dyn NetworkLocator,
    force_network: bool,
) -> LocationOutcome {
    if force_network {
        info("Fetching network location...");
        return via_network(network);
    }

    match device.read() {
        Ok(DeviceReading::Fix(coords)) => {
            LocationOutcome::Captured(CapturedLocation::new(coords, LocationSource::Gps))
        }
        Ok(DeviceReading::Error(reason)) => {
            warning(format!(
                "GPS failed ({}). Switching to network location...",
                reason
            ));
            via_network(network)
        }
        Ok(DeviceReading::Pending) => LocationOutcome::Pending,
        Err(e) => {
            warning(format!("GPS read failed ({}). Using network location...", e));
            via_network(network)
        }
    }
}

fn via_network(network: &dyn NetworkLocator) -> LocationOutcome {
    match network.locate() {
        Ok(coords) => {
            LocationOutcome::Captured(CapturedLocation::new(coords, LocationSource::Network))
        }
        Err(e) => LocationOutcome::Failed(format!("Network location failed: {}", e)),
    }
}

/// Device inputs collected from the command line.
#[derive(Debug, Default, Clone)]
pub struct LocationRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub gps_fix: Option<String>,
    pub network: bool,
}

impl LocationRequest {
    /// True when the user supplied anything that asks for a fresh fix.
    pub fn is_explicit(&self) -> bool {
        self.lat.is_some() || self.lon.is_some() || self.gps_fix.is_some() || self.network
    }

    pub fn device(&self) -> AppResult<Box<dyn DeviceSource>> {
        match (self.lat, self.lon, &self.gps_fix) {
            (Some(lat), Some(lon), _) => Ok(Box::new(ExplicitFix(Coordinates::new(lat, lon)?))),
            (Some(_), None, _) | (None, Some(_), _) => Err(AppError::InvalidCoordinates(
                "--lat and --lon must be given together".into(),
            )),
            (None, None, Some(path)) => Ok(Box::new(GeolocationFile(expand_tilde(path)))),
            (None, None, None) => Ok(Box::new(NoDevice)),
        }
    }
}

/// Last captured location, kept on disk until reset.
pub struct LocationSession {
    path: PathBuf,
}

impl LocationSession {
    pub fn new(path: &str) -> Self {
        Self {
            path: expand_tilde(path),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.location_session)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> AppResult<Option<CapturedLocation>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    pub fn save(&self, loc: &CapturedLocation) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string(loc)?)?;
        Ok(())
    }

    /// Returns true if a stored location was removed.
    pub fn reset(&self) -> AppResult<bool> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Resolve the location for a command: a fresh fix when the user asked for
/// one, otherwise the session location, otherwise (if `record`) the chain
/// with no device. Captured fixes are written back to the session.
pub fn resolve(
    request: &LocationRequest,
    record: bool,
    session: &LocationSession,
    network: &dyn NetworkLocator,
) -> AppResult<LocationOutcome> {
    if !request.is_explicit() {
        if let Some(stored) = session.load()? {
            return Ok(LocationOutcome::Captured(stored));
        }
        if !record {
            return Ok(LocationOutcome::Pending);
        }
    }

    capture(request, session, network)
}

/// Always acquire a fresh fix, replacing the session location on success.
pub fn capture(
    request: &LocationRequest,
    session: &LocationSession,
    network: &dyn NetworkLocator,
) -> AppResult<LocationOutcome> {
    let device = request.device()?;
    let outcome = acquire(device.as_ref(), network, request.network);

    if let LocationOutcome::Captured(loc) = &outcome {
        session.save(loc)?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::env;

    struct FixedNetwork {
        result: Option<Coordinates>,
        calls: Cell<u32>,
    }

    impl FixedNetwork {
        fn ok(lat: f64, lon: f64) -> Self {
            Self {
                result: Some(Coordinates::new(lat, lon).unwrap()),
                calls: Cell::new(0),
            }
        }
        fn down() -> Self {
            Self {
                result: None,
                calls: Cell::new(0),
            }
        }
    }

    impl NetworkLocator for FixedNetwork {
        fn locate(&self) -> AppResult<Coordinates> {
            self.calls.set(self.calls.get() + 1);
            self.result
                .ok_or_else(|| AppError::Location("connection refused".into()))
        }
    }

    struct Reading(DeviceReading);

    impl DeviceSource for Reading {
        fn read(&self) -> AppResult<DeviceReading> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl DeviceSource for Broken {
        fn read(&self) -> AppResult<DeviceReading> {
            Err(AppError::Location("driver crashed".into()))
        }
    }

    fn temp_session(name: &str) -> LocationSession {
        let mut p = env::temp_dir();
        p.push(format!("{}_storevisit_location.yaml", name));
        fs::remove_file(&p).ok();
        LocationSession::new(&p.to_string_lossy())
    }

    #[test]
    fn device_fix_wins_without_touching_network() {
        let net = FixedNetwork::ok(1.0, 2.0);
        let fix = Coordinates::new(22.5, 88.3).unwrap();
        let out = acquire(&Reading(DeviceReading::Fix(fix)), &net, false);

        match out {
            LocationOutcome::Captured(loc) => {
                assert_eq!(loc.coords, fix);
                assert_eq!(loc.source, LocationSource::Gps);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(net.calls.get(), 0);
    }

    #[test]
    fn device_error_falls_back_to_network() {
        let net = FixedNetwork::ok(1.0, 2.0);
        let out = acquire(&Reading(DeviceReading::Error("denied".into())), &net, false);
        match out {
            LocationOutcome::Captured(loc) => assert_eq!(loc.source, LocationSource::Network),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn device_crash_falls_back_to_network() {
        let net = FixedNetwork::ok(1.0, 2.0);
        assert!(matches!(
            acquire(&Broken, &net, false),
            LocationOutcome::Captured(_)
        ));
    }

    #[test]
    fn both_sources_failing_is_reported() {
        let net = FixedNetwork::down();
        match acquire(&NoDevice, &net, false) {
            LocationOutcome::Failed(msg) => assert!(msg.contains("Network location failed")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn pending_device_waits_and_network_retry_resolves_it() {
        let net = FixedNetwork::ok(3.0, 4.0);
        let pending = Reading(DeviceReading::Pending);

        assert_eq!(acquire(&pending, &net, false), LocationOutcome::Pending);
        assert_eq!(net.calls.get(), 0);

        assert!(matches!(
            acquire(&pending, &net, true),
            LocationOutcome::Captured(_)
        ));
        assert_eq!(net.calls.get(), 1);
    }

    #[test]
    fn geolocation_json_shapes() {
        let fix = parse_geolocation_json(r#"{"coords":{"latitude":10.5,"longitude":-20.25}}"#)
            .unwrap();
        assert_eq!(
            fix,
            DeviceReading::Fix(Coordinates::new(10.5, -20.25).unwrap())
        );

        let err =
            parse_geolocation_json(r#"{"error":{"code":1,"message":"User denied"}}"#).unwrap();
        assert_eq!(err, DeviceReading::Error("User denied".into()));

        assert_eq!(parse_geolocation_json("").unwrap(), DeviceReading::Pending);
        assert!(parse_geolocation_json("{not json").is_err());
    }

    #[test]
    fn ipinfo_loc_is_parsed() {
        let body = serde_json::json!({"ip": "1.2.3.4", "loc": "22.5726,88.3639"});
        let c = parse_ipinfo(&body).unwrap();
        assert_eq!(c.latitude, 22.5726);

        assert!(parse_ipinfo(&serde_json::json!({"ip": "1.2.3.4"})).is_err());
    }

    #[test]
    fn session_is_reused_until_reset() {
        let session = temp_session("reuse");
        let net = FixedNetwork::down();

        let explicit = LocationRequest {
            lat: Some(12.0),
            lon: Some(77.0),
            ..Default::default()
        };
        let first = resolve(&explicit, true, &session, &net).unwrap();
        assert!(matches!(first, LocationOutcome::Captured(_)));

        let again = resolve(&LocationRequest::default(), false, &session, &net).unwrap();
        match again {
            LocationOutcome::Captured(loc) => assert_eq!(loc.coords.latitude, 12.0),
            other => panic!("unexpected outcome {:?}", other),
        }

        assert!(session.reset().unwrap());
        assert!(!session.reset().unwrap());
        assert_eq!(
            resolve(&LocationRequest::default(), false, &session, &net).unwrap(),
            LocationOutcome::Pending
        );
        assert_eq!(net.calls.get(), 0);
    }

    #[test]
    fn capture_ignores_session_and_uses_network_without_device() {
        let session = temp_session("capture");
        let net = FixedNetwork::ok(22.57, 88.36);

        session
            .save(&CapturedLocation::new(
                Coordinates::new(1.0, 1.0).unwrap(),
                LocationSource::Gps,
            ))
            .unwrap();

        match capture(&LocationRequest::default(), &session, &net).unwrap() {
            LocationOutcome::Captured(loc) => {
                assert_eq!(loc.source, LocationSource::Network);
                assert_eq!(loc.coords.latitude, 22.57);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(net.calls.get(), 1);
        assert_eq!(session.load().unwrap().unwrap().coords.latitude, 22.57);
    }

    /// Answer a single HTTP request on 127.0.0.1 and return the URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}/json", addr)
    }

    /// A URL on a port nothing listens on.
    fn refused_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/json", addr)
    }

    fn locator(url: String) -> IpInfoLocator {
        IpInfoLocator {
            url,
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn ipinfo_locator_reads_loc_over_http() {
        let url = serve_once("200 OK", r#"{"ip":"203.0.113.7","loc":"22.5,88.3"}"#);
        let coords = locator(url).locate().unwrap();
        assert_eq!(coords.latitude, 22.5);
        assert_eq!(coords.longitude, 88.3);
    }

    #[test]
    fn ipinfo_locator_rejects_error_status() {
        let url = serve_once("429 Too Many Requests", r#"{"error":"rate limited"}"#);
        assert!(matches!(
            locator(url).locate(),
            Err(AppError::Location(_))
        ));
    }

    #[test]
    fn unreachable_locator_fails_the_chain() {
        match acquire(&NoDevice, &locator(refused_url()), false) {
            LocationOutcome::Failed(msg) => assert!(msg.starts_with("Network location failed")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn capture_time_is_shown_in_local_time() {
        let loc = CapturedLocation {
            coords: Coordinates::new(1.0, 2.0).unwrap(),
            source: LocationSource::Gps,
            captured_at: "2026-03-02T09:15:30+00:00".into(),
        };
        let expected = DateTime::parse_from_rfc3339("2026-03-02T09:15:30+00:00")
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(loc.captured_at_local(), expected);

        let odd = CapturedLocation {
            captured_at: "yesterday".into(),
            ..loc
        };
        assert_eq!(odd.captured_at_local(), "yesterday");
    }

    #[test]
    fn lat_without_lon_is_rejected() {
        let req = LocationRequest {
            lat: Some(1.0),
            ..Default::default()
        };
        assert!(req.device().is_err());
    }
}
