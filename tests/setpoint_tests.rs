use atag_one::{Error, OneClient, round_to_half};

// Bounds are checked before the login-state check, so an unreachable
// portal URL proves validation never touches the network.
fn offline_client() -> OneClient {
    OneClient::builder("user@example.com", "hunter2")
        .portal_url("http://127.0.0.1:1")
        .build()
}

#[test]
fn rounds_to_nearest_half_degree() {
    assert_eq!(round_to_half(18.26), 18.5);
    assert_eq!(round_to_half(18.24), 18.0);
    assert_eq!(round_to_half(18.5), 18.5);
    assert_eq!(round_to_half(21.0), 21.0);
}

#[tokio::test]
async fn rejects_below_minimum() {
    let err = offline_client().set_temperature(3.7).await.unwrap_err();
    assert!(
        matches!(err, Error::OutOfRange { requested, min, max } if requested == 3.5 && min == 4.0 && max == 30.0),
        "got {err:?}"
    );
}

#[tokio::test]
async fn rejects_above_maximum() {
    let err = offline_client().set_temperature(30.3).await.unwrap_err();
    assert!(
        matches!(err, Error::OutOfRange { requested, .. } if requested == 30.5),
        "got {err:?}"
    );
}

#[tokio::test]
async fn accepts_inclusive_bounds() {
    // Both values pass validation and fail on the login-state check instead.
    for value in [4.0, 30.0] {
        let err = offline_client().set_temperature(value).await.unwrap_err();
        assert!(matches!(err, Error::NotLoggedIn), "value {value}: got {err:?}");
    }
}

#[tokio::test]
async fn rounding_happens_before_validation() {
    // 3.9 and 30.2 round into range; 30.3 rounds up out of it.
    for value in [3.9, 30.2] {
        let err = offline_client().set_temperature(value).await.unwrap_err();
        assert!(matches!(err, Error::NotLoggedIn), "value {value}: got {err:?}");
    }

    let err = offline_client().set_temperature(30.3).await.unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }), "got {err:?}");
}
