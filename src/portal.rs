//! Wire contract of the ATAG One portal: endpoint paths, form field
//! names and URL builders. These must match the remote service exactly.

pub const PORTAL_URL: &str = "https://portal.atag-one.com";

pub const LOGIN_PATH: &str = "/Account/Login";
/// `{0}` is replaced by the device id, or dropped when none is known.
pub const DEVICE_HOME_PATH: &str = "/Home/Index/{0}";
pub const DIAGNOSTICS_PATH: &str = "/Device/LatestReport";
pub const SET_SETPOINT_PATH: &str = "/Home/DeviceSetSetpoint";

pub const TOKEN_FIELD: &str = "__RequestVerificationToken";

/// Login form body, in the field order the portal receives from its own
/// login page.
pub fn login_form(token: &str, email: &str, password: &str) -> Vec<(&'static str, String)> {
    vec![
        (TOKEN_FIELD, token.to_string()),
        ("Email", email.to_string()),
        ("Password", password.to_string()),
        ("RememberMe", "false".to_string()),
    ]
}

/// Substitute the device id into a URL template. A missing id leaves
/// the `{0}` placeholder dropped rather than failing.
pub fn fill_device_id(template: &str, device_id: Option<&str>) -> String {
    template.replace("{0}", device_id.unwrap_or(""))
}

/// Setpoint endpoint with device id and temperature embedded in the URL,
/// e.g. `/Home/DeviceSetSetpoint/6808-1401-3109_15-30-001-544?temperature=18.5`.
/// The temperature always carries one decimal place.
pub fn setpoint_url(base: &str, device_id: &str, temperature: f64) -> String {
    format!("{base}{SET_SETPOINT_PATH}/{device_id}?temperature={temperature:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_field_order() {
        let form = login_form("tok-123", "user@example.com", "hunter2");
        let names: Vec<_> = form.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            ["__RequestVerificationToken", "Email", "Password", "RememberMe"]
        );
        assert_eq!(form[0].1, "tok-123");
        assert_eq!(form[3].1, "false");
    }

    #[test]
    fn device_id_substitution() {
        let url = fill_device_id(
            "https://portal.atag-one.com/Home/Index/{0}",
            Some("6808-1401-3109_15-30-001-544"),
        );
        assert_eq!(
            url,
            "https://portal.atag-one.com/Home/Index/6808-1401-3109_15-30-001-544"
        );
    }

    #[test]
    fn device_id_placeholder_dropped_when_absent() {
        let url = fill_device_id("https://portal.atag-one.com/Home/Index/{0}", None);
        assert_eq!(url, "https://portal.atag-one.com/Home/Index/");
    }

    #[test]
    fn setpoint_url_one_decimal() {
        let url = setpoint_url("https://portal.atag-one.com", "6808-1401-3109_15-30-001-544", 18.0);
        assert_eq!(
            url,
            "https://portal.atag-one.com/Home/DeviceSetSetpoint/6808-1401-3109_15-30-001-544?temperature=18.0"
        );
        let url = setpoint_url("http://127.0.0.1:8080", "6808-1401-3109_15-30-001-544", 18.5);
        assert!(url.ends_with("?temperature=18.5"));
    }
}
