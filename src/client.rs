use tracing::debug;

use crate::portal::{
    self, DEVICE_HOME_PATH, DIAGNOSTICS_PATH, LOGIN_PATH, TOKEN_FIELD, login_form, setpoint_url,
};
use crate::scrape;
use crate::types::{DiagnosticsReport, TEMPERATURE_MAX, TEMPERATURE_MIN, round_to_half};
use crate::{Error, Result};

pub struct OneClientBuilder {
    email: String,
    password: String,
    portal_url: String,
}

impl OneClientBuilder {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            portal_url: portal::PORTAL_URL.to_string(),
        }
    }

    /// Override the portal base URL, e.g. to point tests at a local server.
    pub fn portal_url(mut self, url: impl Into<String>) -> Self {
        self.portal_url = url.into();
        self
    }

    pub fn build(self) -> OneClient {
        // The portal keeps its session in cookies; one jar per client,
        // alive for the client's lifetime.
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("failed to build HTTP client");

        OneClient {
            http,
            portal_url: self.portal_url,
            email: self.email,
            password: self.password,
            device_id: None,
        }
    }
}

/// Client for the ATAG One web portal.
///
/// The portal is an HTML-rendering web application, not an API: every
/// operation fetches a page, the values are scraped out of the markup,
/// and each form post must echo back the anti-forgery token embedded
/// in a freshly rendered page. `login` resolves the device bound to
/// the account; diagnostics and setpoint calls require it.
pub struct OneClient {
    http: reqwest::Client,
    portal_url: String,
    email: String,
    password: String,
    device_id: Option<String>,
}

impl OneClient {
    pub fn builder(email: impl Into<String>, password: impl Into<String>) -> OneClientBuilder {
        OneClientBuilder::new(email, password)
    }

    /// Log in to the portal and select the first device found.
    ///
    /// A missing token or device id in the portal's responses surfaces
    /// as [`Error::Session`]; the portal renders the same login page
    /// for bad credentials as for an unknown layout, so the two are
    /// not distinguished.
    pub async fn login(&mut self) -> Result<()> {
        let login_url = format!("{}{}", self.portal_url, LOGIN_PATH);

        // We need a session cookie and a verification token first.
        let token = self.verification_token(&login_url).await?;

        debug!(url = %login_url, "posting credentials");
        let form = login_form(&token, &self.email, &self.password);
        let html = self
            .http
            .post(&login_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let device_id = scrape::device_id(&html)
            .ok_or_else(|| Error::Session("no device id found, cannot continue".to_string()))?;
        debug!(device_id = %device_id, "login succeeded");
        self.device_id = Some(device_id);
        Ok(())
    }

    /// Device id resolved by [`login`](Self::login), if any.
    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// Scrape the latest diagnostics report for the selected device.
    ///
    /// Individual fields missing from the page come back as `None` in
    /// their report slot; only transport failures and unparseable
    /// decimals fail the whole read.
    pub async fn diagnostics(&self) -> Result<DiagnosticsReport> {
        let device_id = self.device_id.as_deref().ok_or(Error::NotLoggedIn)?;

        let url = format!("{}{}", self.portal_url, DIAGNOSTICS_PATH);
        debug!(url = %url, device_id = %device_id, "fetching diagnostics");
        let html = self
            .http
            .get(&url)
            .query(&[("deviceId", device_id)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(DiagnosticsReport {
            device_id: device_id.to_string(),
            device_alias: scrape::text_by_label(&html, &["Apparaat alias", "Device alias"]),
            latest_report_time: scrape::text_by_label(
                &html,
                &["Laatste rapportagetijd", "Latest report time"],
            ),
            connected_to: scrape::text_by_label(&html, &["Verbonden met", "Connected to"]),
            burning_hours: scrape::number_by_label(&html, &["Branduren", "Burning hours"])?,
            boiler_heating_for: scrape::text_by_label(
                &html,
                &["Ketel in bedrijf voor", "Boiler heating for"],
            ),
            flame_status: scrape::flag_by_label(&html, &["Brander status", "Flame status"]),
            room_temperature: scrape::number_by_label(
                &html,
                &["Kamertemperatuur", "Room temperature"],
            )?,
            outside_temperature: scrape::number_by_label(
                &html,
                &["Buitentemperatuur", "Outside temperature"],
            )?,
            dhw_setpoint: scrape::number_by_label(&html, &["Setpoint warmwater", "DHW setpoint"])?,
            dhw_water_temperature: scrape::number_by_label(
                &html,
                &["Warmwatertemperatuur", "DHW water temperature"],
            )?,
            ch_setpoint: scrape::number_by_label(&html, &["Setpoint cv", "CH setpoint"])?,
            ch_water_temperature: scrape::number_by_label(
                &html,
                &["CV-aanvoertemperatuur", "CH water temperature"],
            )?,
            ch_water_pressure: scrape::number_by_label(
                &html,
                &["CV-waterdruk", "CH water pressure"],
            )?,
            ch_return_temperature: scrape::number_by_label(
                &html,
                &["CV retourtemperatuur", "CH return temperature"],
            )?,
        })
    }

    /// Set the target room temperature, in half-degree steps between
    /// [`TEMPERATURE_MIN`] and [`TEMPERATURE_MAX`] inclusive.
    ///
    /// Returns the current room temperature the portal acknowledges
    /// the change with. The requested value is rounded to the nearest
    /// half degree before validation, so e.g. `30.2` is accepted as
    /// `30.0` while `30.3` is rejected.
    pub async fn set_temperature(&self, temperature: f64) -> Result<f64> {
        let rounded = round_to_half(temperature);
        if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&rounded) {
            return Err(Error::OutOfRange {
                requested: rounded,
                min: TEMPERATURE_MIN,
                max: TEMPERATURE_MAX,
            });
        }
        let device_id = self.device_id.as_deref().ok_or(Error::NotLoggedIn)?;

        // The token on the device home page is single-use, fetch a fresh one.
        let home_template = format!("{}{}", self.portal_url, DEVICE_HOME_PATH);
        let token = self.verification_token(&home_template).await?;

        let url = setpoint_url(&self.portal_url, device_id, rounded);
        debug!(url = %url, "posting setpoint");
        let html = self
            .http
            .post(&url)
            .form(&[(TOKEN_FIELD, token.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        scrape::room_temperature(&html)
            .ok_or_else(|| Error::Parse("cannot read current room temperature".to_string()))
    }

    /// Fetch the page at `url_template` (with the device id substituted
    /// for `{0}`, when known) and extract its anti-forgery token.
    async fn verification_token(&self, url_template: &str) -> Result<String> {
        let url = portal::fill_device_id(url_template, self.device_id.as_deref());
        debug!(url = %url, "fetching verification token");
        let html = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        scrape::verification_token(&html)
            .ok_or_else(|| Error::Session("no request verification token received".to_string()))
    }
}
