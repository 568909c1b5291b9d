use std::collections::HashMap;

use sporldash::{
    config::{self, Config, ConfigError},
    spotify::auth::authorize_url,
};

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn secrets() -> HashMap<String, String> {
    vars(&[
        (config::ENV_CLIENT_ID, "id"),
        (config::ENV_CLIENT_SECRET, "secret"),
        (config::ENV_REDIRECT_URI, "http://127.0.0.1:8888/callback"),
    ])
}

#[test]
fn test_defaults_apply_when_only_secrets_are_set() {
    let config = Config::from_map(&secrets()).unwrap();

    assert_eq!(config.client_id, "id");
    assert_eq!(config.client_secret, "secret");
    assert_eq!(config.scope, "user-top-read");
    assert_eq!(config.auth_url, "https://accounts.spotify.com/authorize");
    assert_eq!(config.token_url, "https://accounts.spotify.com/api/token");
    assert_eq!(config.api_url, "https://api.spotify.com/v1");
    assert_eq!(config.server_address, "127.0.0.1:8888");
}

#[test]
fn test_each_missing_secret_is_reported() {
    for name in [
        config::ENV_CLIENT_ID,
        config::ENV_CLIENT_SECRET,
        config::ENV_REDIRECT_URI,
    ] {
        let mut vars = secrets();
        vars.remove(name);

        let err = Config::from_map(&vars).unwrap_err();
        assert_eq!(err, ConfigError::Missing(name));
        assert_eq!(err.to_string(), format!("{} must be set", name));
    }
}

#[test]
fn test_blank_secret_counts_as_missing() {
    let mut vars = secrets();
    vars.insert(config::ENV_CLIENT_SECRET.to_string(), "   ".to_string());

    assert_eq!(
        Config::from_map(&vars).unwrap_err(),
        ConfigError::Missing(config::ENV_CLIENT_SECRET)
    );
}

#[test]
fn test_overrides_and_trailing_slash() {
    let mut vars = secrets();
    vars.insert(config::ENV_API_URL.to_string(), "http://localhost:9000/v1/".to_string());
    vars.insert(config::ENV_SCOPE.to_string(), "user-top-read user-read-email".to_string());

    let config = Config::from_map(&vars).unwrap();

    assert_eq!(config.api_url, "http://localhost:9000/v1");
    assert_eq!(config.scope, "user-top-read user-read-email");
}

#[test]
fn test_authorize_url_carries_all_parameters() {
    let config = Config::from_map(&secrets()).unwrap();

    let url = authorize_url(&config, "abc123").unwrap();
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    assert_eq!(url.host_str(), Some("accounts.spotify.com"));
    assert_eq!(url.path(), "/authorize");
    assert_eq!(params["client_id"], "id");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], "http://127.0.0.1:8888/callback");
    assert_eq!(params["scope"], "user-top-read");
    assert_eq!(params["state"], "abc123");
    assert!(url.as_str().contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
}

#[test]
fn test_invalid_authorize_url_is_an_error() {
    let mut vars = secrets();
    vars.insert(config::ENV_AUTH_URL.to_string(), "not a url".to_string());
    let config = Config::from_map(&vars).unwrap();

    assert!(authorize_url(&config, "abc").is_err());
}
