use demarche_facile::domain::{GeocodeConfig, IpLocateConfig};
use demarche_facile::{
    find_mairies, Coordinates, GeocodeError, Geocoder, GeoplateformeClient, IpApiClient,
    IpLocator, SearchIndex, SearchQuery,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PARIS: Coordinates = Coordinates {
    lat: 48.8566,
    lon: 2.3522,
};

fn client(server: &MockServer) -> GeoplateformeClient {
    GeoplateformeClient::new(&GeocodeConfig {
        base_url: format!("{}/geocodage/", server.uri()),
        ..GeocodeConfig::default()
    })
    .expect("client")
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn non_2xx_is_upstream_error() {
    let server = MockServer::start().await;
    mount(&server, "/geocodage/reverse", ResponseTemplate::new(503)).await;
    mount(&server, "/geocodage/search", ResponseTemplate::new(429)).await;

    let geo = client(&server);
    let err = geo.reverse(PARIS).await.unwrap_err();
    assert!(matches!(err, GeocodeError::Upstream { status: 503 }), "{err:?}");

    let err = geo
        .search(&SearchQuery::new("mairie", SearchIndex::Poi))
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::Upstream { status: 429 }), "{err:?}");
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/geocodage/search",
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;

    let err = client(&server)
        .search(&SearchQuery::new("gare", SearchIndex::Address))
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn reverse_without_features_is_empty_result() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/geocodage/reverse",
        ResponseTemplate::new(200)
            .set_body_json(json!({"type": "FeatureCollection", "features": []})),
    )
    .await;

    let err = client(&server)
        .reverse(Coordinates::new(0.0, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::EmptyResult), "{err:?}");
}

#[tokio::test]
async fn body_without_features_is_empty_collection() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/geocodage/search",
        ResponseTemplate::new(200).set_body_json(json!({"type": "FeatureCollection"})),
    )
    .await;

    let collection = client(&server)
        .search(&SearchQuery::new("gare", SearchIndex::Address))
        .await
        .expect("collection");
    assert!(collection.is_empty());
}

#[tokio::test]
async fn mairie_lookup_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocodage/reverse"))
        .and(query_param("index", "address"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [{
                "geometry": {"type": "Point", "coordinates": [2.3522, 48.8566]},
                "properties": {"city": "Paris", "citycode": "75056"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geocodage/search"))
        .and(query_param("q", "mairie"))
        .and(query_param("index", "poi"))
        .and(query_param("citycode", "75056"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [
                {
                    "geometry": {"type": "Point", "coordinates": [2.3522, 48.8566]},
                    "properties": {
                        "toponym": ["Mairie de Paris"],
                        "citycode": ["75056"],
                        "category": ["mairie"],
                        "postcode": ["75004"]
                    }
                },
                {
                    "geometry": {"type": "Point", "coordinates": [2.35, 48.85]},
                    "properties": {
                        "toponym": ["Parking Mairie"],
                        "citycode": ["75056"],
                        "category": ["mairie"]
                    }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mairies = find_mairies(&client(&server), PARIS).await.expect("mairies");
    assert_eq!(mairies.len(), 1);
    assert_eq!(mairies[0].nom, "Mairie de Paris");
    assert_eq!(mairies[0].city, "Paris");
    assert_eq!(mairies[0].postcode, "75004");
}

fn ip_client(server: &MockServer) -> IpApiClient {
    IpApiClient::new(
        &IpLocateConfig {
            url: format!("{}/json/", server.uri()),
        },
        "demarche-facile-tests",
    )
    .expect("ip client")
}

#[tokio::test]
async fn ip_locate_status_and_payload() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/json/",
        ResponseTemplate::new(200)
            .set_body_json(json!({"latitude": 45.76, "longitude": 4.83, "city": "Lyon"})),
    )
    .await;
    let at = ip_client(&server).locate().await.expect("locate");
    assert_eq!(at, Some(Coordinates::new(45.76, 4.83)));

    let limited = MockServer::start().await;
    mount(&limited, "/json/", ResponseTemplate::new(429)).await;
    let err = ip_client(&limited).locate().await.unwrap_err();
    assert!(matches!(err, GeocodeError::Upstream { status: 429 }), "{err:?}");

    let reserved = MockServer::start().await;
    mount(
        &reserved,
        "/json/",
        ResponseTemplate::new(200).set_body_json(json!({"error": true, "reason": "Reserved IP Address"})),
    )
    .await;
    assert_eq!(ip_client(&reserved).locate().await.expect("locate"), None);
}
