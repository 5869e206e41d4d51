use serde_json::json;
use spindle_discogs::{
    CancellationToken, Currency, DiscogsClient, DiscogsConfig, DiscogsError, EntityType,
    HttpError, ReleaseOptions, ReleaseResponse, Resource, SearchOptions,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, config: DiscogsConfig) -> DiscogsClient {
    DiscogsClient::builder(config)
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_release() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/releases/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Test Release",
            "id": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, DiscogsConfig::default());
    let release = client
        .release(&CancellationToken::new(), 1, &ReleaseOptions::default())
        .await
        .unwrap();

    assert_eq!(release.title, "Test Release");
    assert_eq!(release.id, 1);
}

#[tokio::test]
async fn test_release_with_currency() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/releases/249504"))
        .and(query_param("curr_abbr", "GBP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Never Gonna Give You Up",
            "id": 249504,
            "year": 1987,
            "genres": ["Electronic", "Pop"],
            "lowest_price": 0.63,
            "artists": [{"name": "Rick Astley", "id": 72872, "anv": "", "join": "", "role": "", "tracks": "", "resource_url": "https://api.discogs.com/artists/72872"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, DiscogsConfig::default());
    let options = ReleaseOptions {
        currency: Some(Currency::Gbp),
    };
    let release = client
        .release(&CancellationToken::new(), 249504, &options)
        .await
        .unwrap();

    assert_eq!(release.year, Some(1987));
    assert_eq!(release.artists[0].name, "Rick Astley");
    assert_eq!(release.artists[0].id, Some(72872));
    assert_eq!(release.genres, vec!["Electronic", "Pop"]);
}

#[tokio::test]
async fn test_release_not_found() {
    let server = MockServer::start().await;
    let body = r#"{"message": "Release not found."}"#;

    Mock::given(method("GET"))
        .and(path("/releases/2"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&server)
        .await;

    let client = client_for(&server, DiscogsConfig::default());
    let err = client
        .release(&CancellationToken::new(), 2, &ReleaseOptions::default())
        .await
        .unwrap_err();

    match &err {
        DiscogsError::NotFound {
            resource,
            id,
            error,
        } => {
            assert_eq!(*resource, Resource::Release);
            assert_eq!(*id, 2);
            assert_eq!(error.status, 404);
            assert_eq!(error.message, body);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        r#"Release ID 2 not found: {"message": "Release not found."}"#
    );
}

#[tokio::test]
async fn test_release_server_error_is_not_narrowed() {
    let server = MockServer::start().await;
    let body = r#"{"message":"Internal server error."}"#;

    Mock::given(method("GET"))
        .and(path("/releases/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .mount(&server)
        .await;

    let client = client_for(&server, DiscogsConfig::default());
    let err = client
        .release(&CancellationToken::new(), 3, &ReleaseOptions::default())
        .await
        .unwrap_err();

    match err {
        DiscogsError::Http(HttpError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, body);
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_release_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/releases/4"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server, DiscogsConfig::default());
    let release = client
        .release(&CancellationToken::new(), 4, &ReleaseOptions::default())
        .await
        .unwrap();

    assert_eq!(release, ReleaseResponse::default());
}

#[tokio::test]
async fn test_search_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/database/search"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(
        &server,
        DiscogsConfig::default().with_key_secret("key", "secret"),
    );
    let response = client
        .search(&CancellationToken::new(), &SearchOptions::new("Nevermind"))
        .await
        .unwrap();

    assert!(response.pagination.is_none());
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn test_master_artist_label_lookups() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/masters/1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1000,
            "title": "Stardiver",
            "main_release": 66785
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artists/108713"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 108713,
            "name": "Nickelback",
            "namevariations": ["Nickleback"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/labels/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Planet E",
            "sublabels": [{"id": 86537, "name": "Antidote (4)"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, DiscogsConfig::default());
    let cancel = CancellationToken::new();

    let master = client.master_release(&cancel, 1000).await.unwrap();
    assert_eq!(master.title, "Stardiver");
    assert_eq!(master.main_release, Some(66785));

    let artist = client.artist(&cancel, 108713).await.unwrap();
    assert_eq!(artist.name, "Nickelback");
    assert_eq!(artist.name_variations, vec!["Nickleback"]);

    let label = client.label(&cancel, 1).await.unwrap();
    assert_eq!(label.name, "Planet E");
    assert_eq!(label.sub_labels[0].id, Some(86537));
}

#[tokio::test]
async fn test_artist_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artists/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message": "Artist not found."}"#))
        .mount(&server)
        .await;

    let client = client_for(&server, DiscogsConfig::default());
    let err = client
        .artist(&CancellationToken::new(), 9)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DiscogsError::NotFound {
            resource: Resource::Artist,
            id: 9,
            ..
        }
    ));
}

#[tokio::test]
async fn test_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/database/search"))
        .and(query_param("q", "Nevermind"))
        .and(query_param("type", "release"))
        .and(query_param("per_page", "5"))
        .and(header("user-agent", "Test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"page": 1, "pages": 1, "items": 1, "per_page": 5, "urls": {}},
            "results": [{
                "id": 99,
                "type": "release",
                "title": "Nirvana - Nevermind",
                "year": "1991",
                "genre": ["Rock"],
                "style": ["Grunge"],
                "community": {"want": 10, "have": 20}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(
        &server,
        DiscogsConfig::new("Test/1.0").with_key_secret("key", "secret"),
    );
    let options = SearchOptions::new("Nevermind")
        .entity_type(EntityType::Release)
        .per_page(5);
    let response = client
        .search(&CancellationToken::new(), &options)
        .await
        .unwrap();

    assert_eq!(response.pagination.unwrap().items, 1);
    let result = &response.results[0];
    assert_eq!(result.id, Some(99));
    assert_eq!(result.entity_type, Some(EntityType::Release));
    assert_eq!(result.year, "1991");
    assert_eq!(result.community.have, Some(20));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("per_page=5&q=Nevermind&type=release")
    );
}

#[tokio::test]
async fn test_search_requires_key_secret() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, DiscogsConfig::default().with_access_token("token"));
    let err = client
        .search(&CancellationToken::new(), &SearchOptions::new("anything"))
        .await
        .unwrap_err();

    assert!(matches!(err, DiscogsError::MissingCredentials { .. }));
}
