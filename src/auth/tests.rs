//! Tests for the auth module

use super::*;

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
}

#[test]
fn test_bearer_auth() {
    let auth = Authenticator::new(AuthConfig::bearer("my-token"));
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-token"
    );
}

#[test]
fn test_credentials_acct() {
    let creds = Credentials::new("testuser", "testkey");
    assert_eq!(creds.acct(), "acct:testuser@hypothes.is");
    assert_eq!(creds.user_acct("otheruser"), "acct:otheruser@hypothes.is");

    let creds = creds.with_authority("custom.org");
    assert_eq!(creds.acct(), "acct:testuser@custom.org");
}

#[test]
fn test_credentials_auth_config() {
    assert!(Credentials::new("u", "k").auth_config().is_authenticated());
    assert!(!Credentials::new("u", "").auth_config().is_authenticated());
}

#[test]
fn test_debug_redacts_key() {
    let creds = Credentials::new("testuser", "secret-key");
    let rendered = format!("{creds:?}");
    assert!(!rendered.contains("secret-key"));
    assert!(rendered.contains("testuser"));

    let rendered = format!("{:?}", AuthConfig::bearer("secret-key"));
    assert!(!rendered.contains("secret-key"));
}
