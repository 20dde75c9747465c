mod support;

use std::time::Duration;

use serde_json::json;
use sporlgate::{error::ApiError, types::Profile};
use support::{FakeSpotify, REDIRECT_URI, Reply, credential};

#[tokio::test]
async fn test_exchange_code_creates_session() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    fake.push_token(Reply::token("T1", Some("R1")));

    let user_id = state.oauth.exchange_code("abc").await.unwrap();

    assert!(uuid::Uuid::parse_str(&user_id).is_ok());
    let stored = state.store.get(&user_id).await.unwrap();
    assert_eq!(stored.access_token, "T1");
    assert_eq!(stored.refresh_token.as_deref(), Some("R1"));
    assert_eq!(stored.expires_in, 3600);
    assert!(stored.obtained_at > 0);

    let requests = fake.token_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Basic Y2xpZW50OnNlY3JldA==")
    );
    assert_eq!(requests[0].form["grant_type"], "authorization_code");
    assert_eq!(requests[0].form["code"], "abc");
    assert_eq!(requests[0].form["redirect_uri"], REDIRECT_URI);
}

#[tokio::test]
async fn test_each_exchange_mints_a_new_identity() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    fake.push_token(Reply::token("T1", Some("R1")));
    fake.push_token(Reply::token("T2", Some("R2")));

    let first = state.oauth.exchange_code("abc").await.unwrap();
    let second = state.oauth.exchange_code("abc").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(state.store.get(&first).await.unwrap().access_token, "T1");
    assert_eq!(state.store.get(&second).await.unwrap().access_token, "T2");
}

#[tokio::test]
async fn test_exchange_empty_code_is_rejected_locally() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();

    let result = state.oauth.exchange_code("").await;

    assert!(matches!(result, Err(ApiError::InvalidArgument(_))));
    assert_eq!(fake.token_hits(), 0);
}

#[tokio::test]
async fn test_exchange_without_access_token_is_protocol_error() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    fake.push_token(Reply::ok(json!({ "token_type": "Bearer", "expires_in": 3600 })));

    let result = state.oauth.exchange_code("abc").await;

    assert!(matches!(result, Err(ApiError::UpstreamProtocol(_))));
}

#[tokio::test]
async fn test_exchange_rejected_code_is_protocol_error() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    fake.push_token(Reply::ok(json!({ "error": "invalid_grant" })).with_status(400));

    let result = state.oauth.exchange_code("expired").await;

    match result {
        Err(ApiError::UpstreamProtocol(message)) => assert!(message.contains("400")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(fake.token_hits(), 1);
}

#[tokio::test]
async fn test_exchange_malformed_body_is_protocol_error() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    fake.push_token(Reply::raw(200, "<html>oops</html>"));

    let result = state.oauth.exchange_code("abc").await;

    assert!(matches!(result, Err(ApiError::UpstreamProtocol(_))));
}

#[tokio::test]
async fn test_exchange_rate_limited_until_budget_spent() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    for _ in 0..5 {
        fake.push_token(Reply::rate_limited(Some("0")));
    }

    let result = state.oauth.exchange_code("abc").await;

    assert!(matches!(result, Err(ApiError::RateLimited)));
    assert_eq!(fake.token_hits(), 3);
}

#[tokio::test]
async fn test_exchange_recovers_after_rate_limit() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    fake.push_token(Reply::rate_limited(Some("0")));
    fake.push_token(Reply::token("T1", Some("R1")));

    let user_id = state.oauth.exchange_code("abc").await.unwrap();

    assert_eq!(state.store.get(&user_id).await.unwrap().access_token, "T1");
    assert_eq!(fake.token_hits(), 2);
}

#[tokio::test]
async fn test_refresh_unknown_user_is_false_without_call() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();

    assert!(!state.oauth.refresh("nobody").await);
    assert_eq!(fake.token_hits(), 0);
}

#[tokio::test]
async fn test_refresh_without_refresh_token_is_false_without_call() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    state.store.save("u1", credential("T1", None)).await.unwrap();
    state.store.save("u2", credential("T1", Some(""))).await.unwrap();

    assert!(!state.oauth.refresh("u1").await);
    assert!(!state.oauth.refresh("u2").await);
    assert_eq!(fake.token_hits(), 0);
}

#[tokio::test]
async fn test_refresh_keeps_previous_refresh_token() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    state.store.save("u1", credential("T1", Some("R1"))).await.unwrap();
    fake.push_token(Reply::token("T2", None));

    assert!(state.oauth.refresh("u1").await);

    let stored = state.store.get("u1").await.unwrap();
    assert_eq!(stored.access_token, "T2");
    assert_eq!(stored.refresh_token.as_deref(), Some("R1"));

    let request = &fake.token_requests()[0];
    assert_eq!(request.form["grant_type"], "refresh_token");
    assert_eq!(request.form["refresh_token"], "R1");
    assert_eq!(
        request.authorization.as_deref(),
        Some("Basic Y2xpZW50OnNlY3JldA==")
    );
}

#[tokio::test]
async fn test_refresh_adopts_rotated_refresh_token() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    state.store.save("u1", credential("T1", Some("R1"))).await.unwrap();
    fake.push_token(Reply::token("T2", Some("R2")));

    assert!(state.oauth.refresh("u1").await);
    assert_eq!(
        state.store.get("u1").await.unwrap().refresh_token.as_deref(),
        Some("R2")
    );
}

#[tokio::test]
async fn test_refresh_failures_leave_credential_untouched() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    let original = credential("T1", Some("R1"));
    state.store.save("u1", original.clone()).await.unwrap();

    fake.push_token(Reply::status(400));
    assert!(!state.oauth.refresh("u1").await);

    fake.push_token(Reply::ok(json!({ "token_type": "Bearer" })));
    assert!(!state.oauth.refresh("u1").await);

    fake.push_token(Reply::raw(200, "not json"));
    assert!(!state.oauth.refresh("u1").await);

    assert_eq!(state.store.get("u1").await, Some(original));
}

#[tokio::test]
async fn test_refresh_rate_limited_is_false() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    state.store.save("u1", credential("T1", Some("R1"))).await.unwrap();
    for _ in 0..3 {
        fake.push_token(Reply::rate_limited(None));
    }

    assert!(!state.oauth.refresh("u1").await);
    assert_eq!(fake.token_hits(), 3);
}

#[tokio::test]
async fn test_logout_during_pending_refresh_stays_logged_out() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    state.store.save("u1", credential("T1", Some("R1"))).await.unwrap();
    fake.push_token(Reply::token("T2", None).with_delay(Duration::from_millis(500)));

    let oauth = state.oauth.clone();
    let pending = tokio::spawn(async move { oauth.refresh("u1").await });

    tokio::time::sleep(Duration::from_millis(150)).await;
    state.oauth.logout("u1").await;

    assert!(!pending.await.unwrap());
    assert!(state.store.get("u1").await.is_none());
    assert_eq!(fake.token_hits(), 1);
}

#[tokio::test]
async fn test_logout_during_pending_replay_does_not_revive_session() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    state.store.save("u1", credential("T1", Some("R1"))).await.unwrap();
    fake.push_catalog(Reply::status(401));
    fake.push_token(Reply::token("T2", None).with_delay(Duration::from_millis(500)));
    fake.push_catalog(Reply::ok(json!({ "id": "spotify-user" })));

    let client = state.client.clone();
    let pending = tokio::spawn(async move {
        client
            .execute::<Profile>("u1", "/me")
            .await
    });

    tokio::time::sleep(Duration::from_millis(150)).await;
    state.oauth.logout("u1").await;

    assert!(matches!(pending.await.unwrap(), Err(ApiError::Unauthorized)));
    assert!(state.store.get("u1").await.is_none());
    assert_eq!(fake.catalog_hits(), 1);
}

#[tokio::test]
async fn test_logout_forgets_credential() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();
    state.store.save("u1", credential("T1", Some("R1"))).await.unwrap();

    state.oauth.logout("u1").await;
    assert!(state.store.get("u1").await.is_none());

    // second logout and unknown ids are no-ops
    state.oauth.logout("u1").await;
    state.oauth.logout("nobody").await;
    assert!(state.store.get("u1").await.is_none());
}

#[tokio::test]
async fn test_authorization_url_is_pure() {
    let fake = FakeSpotify::start().await;
    let state = fake.app_state();

    let url = state.oauth.authorization_url();

    assert!(url.starts_with("http://accounts.test/authorize?client_id=client&response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8080%2Fauth%2Fspotify%2Fcallback"));
    assert!(url.contains("scope=user-read-private%20user-top-read"));
    assert_eq!(url, state.oauth.authorization_url());
    assert_eq!(fake.token_hits(), 0);
}
