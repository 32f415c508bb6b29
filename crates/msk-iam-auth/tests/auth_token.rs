//! End-to-end token generation using credentials from the environment,
//! exercising the default-chain entry point without any network access.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

fn query_params(url: &str) -> Vec<(String, String)> {
    let uri: http::Uri = url.parse().unwrap();
    form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
        .into_owned()
        .collect()
}

fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn test_should_generate_auth_token_from_environment_credentials() {
    // The environment provider is first in the default chain, so resolution
    // completes without remote calls. This is the only test in this binary
    // that touches the process environment.
    unsafe {
        std::env::set_var("AWS_ACCESS_KEY_ID", "TEST-ACCESS-KEY");
        std::env::set_var("AWS_SECRET_ACCESS_KEY", "TEST-SECRET-KEY");
        std::env::set_var("AWS_SESSION_TOKEN", "TEST-SESSION-TOKEN");
        std::env::set_var("AWS_EC2_METADATA_DISABLED", "true");
    }

    let (token, _expiration) = msk_iam_auth::generate_auth_token("us-west-2")
        .await
        .unwrap();

    let url = String::from_utf8(URL_SAFE_NO_PAD.decode(&token).unwrap()).unwrap();
    assert!(url.starts_with("https://kafka.us-west-2.amazonaws.com/"));

    let params = query_params(&url);
    assert_eq!(param(&params, "Action"), Some("kafka-cluster:Connect"));
    assert_eq!(param(&params, "X-Amz-Algorithm"), Some("AWS4-HMAC-SHA256"));
    assert_eq!(param(&params, "X-Amz-Expires"), Some("900"));
    assert_eq!(
        param(&params, "X-Amz-Security-Token"),
        Some("TEST-SESSION-TOKEN")
    );
    assert_eq!(param(&params, "X-Amz-SignedHeaders"), Some("host"));

    let credential = param(&params, "X-Amz-Credential").unwrap();
    let scope: Vec<&str> = credential.split('/').collect();
    assert_eq!(scope[0], "TEST-ACCESS-KEY");
    assert_eq!(scope[2], "us-west-2");
    assert_eq!(scope[3], "kafka-cluster");
    assert_eq!(scope[4], "aws4_request");

    unsafe {
        std::env::remove_var("AWS_ACCESS_KEY_ID");
        std::env::remove_var("AWS_SECRET_ACCESS_KEY");
        std::env::remove_var("AWS_SESSION_TOKEN");
        std::env::remove_var("AWS_EC2_METADATA_DISABLED");
    }
}
