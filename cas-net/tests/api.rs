use std::time::Duration;

use cas_net::{blocking, CasClient, CasError, Config, KeySource};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key";

fn butanediol() -> Value {
    json!({
        "uri": "substance/pt/110634",
        "rn": "110-63-4",
        "name": "1,4-Butanediol",
        "images": [""],
        "inchi": "InChI=1S/C4H10O2/c5-3-1-2-4-6/h5-6H,1-4H2",
        "inchiKey": "InChIKey=WERYXYBDKMZEQL-UHFFFAOYSA-N",
        "smile": "",
        "canonicalSmile": "OCCCCO",
        "molecularFormula": "C<sub>4</sub>H<sub>10</sub>O<sub>2</sub>",
        "molecularMass": "90.12",
        "experimentalProperties": [
            {"name": "Melting Point", "property": "20.1 °C", "sourceNumber": 1},
            {"name": "Boiling Point", "property": "228 °C", "sourceNumber": 2}
        ],
        "propertyCitations": [
            {"docUri": "", "sourceNumber": 1, "source": "PhysProp data"},
            {"docUri": "https://doi.org/10.1000/182", "sourceNumber": 2, "source": "Handbook"}
        ],
        "synonyms": ["1,4-Butanediol", "1,4-Butylene glycol", "Diol 14B"],
        "replacedRns": ["732189-03-6", "1204746-06-4", "1400594-63-9"],
        "hasMolFile": true
    })
}

fn hits(n: usize, count: u64) -> Value {
    let results: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "rn": "7647-14-5",
                "name": format!("Sodium compound {i}"),
                "images": ["<svg></svg>"]
            })
        })
        .collect();
    json!({"count": count, "results": results})
}

fn client_for(server: &MockServer) -> CasClient {
    CasClient::new(Config::with_api_key(KEY).with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn fetch_chemical_maps_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/detail"))
        .and(query_param("cas_rn", "110-63-4"))
        .and(header("X-API-KEY", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(butanediol()))
        .expect(1)
        .mount(&server)
        .await;

    let chemical = client_for(&server)
        .fetch_chemical("110-63-4")
        .await
        .unwrap();

    assert_eq!(chemical.cas, "110-63-4");
    assert_eq!(chemical.name, "1,4-Butanediol");
    assert_eq!(chemical.molecular_mass, 90.12);
    assert_eq!(chemical.inchi, "InChI=1S/C4H10O2/c5-3-1-2-4-6/h5-6H,1-4H2");
    assert_eq!(chemical.inchi_key, "InChIKey=WERYXYBDKMZEQL-UHFFFAOYSA-N");
    assert_eq!(chemical.canonical_smiles, "OCCCCO");
    assert_eq!(chemical.smiles, None);
    assert!(chemical.synonyms.iter().any(|s| s == "Diol 14B"));
    assert!(chemical.has_mol_file);

    let mut replaces = chemical.replaces.clone();
    replaces.sort();
    assert_eq!(replaces, ["1204746-06-4", "1400594-63-9", "732189-03-6"]);

    assert_eq!(chemical.experimental_properties.len(), 2);
    assert_eq!(chemical.property_citations[0].document_uri, None);
    assert_eq!(
        chemical.property_citations[1].document_uri.as_deref(),
        Some("https://doi.org/10.1000/182")
    );
}

#[tokio::test]
async fn fetch_unknown_is_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/detail"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_chemical("1234")
        .await
        .unwrap_err();
    assert!(matches!(err, CasError::HttpStatus { status: 404, .. }), "{err:?}");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_error_is_not_validation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search("butane", None, None)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn malformed_record_is_validation_error() {
    let server = MockServer::start().await;
    let mut body = butanediol();
    body["canonicalSmile"] = json!("");
    Mock::given(method("GET"))
        .and(path("/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_chemical("110-63-4")
        .await
        .unwrap_err();
    assert!(matches!(err, CasError::Validation(_)), "{err:?}");
}

#[tokio::test]
async fn non_json_body_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_chemical("110-63-4")
        .await
        .unwrap_err();
    assert!(matches!(err, CasError::Json(_)), "{err:?}");
}

#[tokio::test]
async fn search_single_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "butane"))
        .and(query_param_is_missing("offset"))
        .and(query_param_is_missing("size"))
        .and(header("X-API-KEY", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{"rn": "106-97-8", "name": "Butane", "images": ["<svg>butane</svg>"]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search("butane", None, None)
        .await
        .unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.results[0].cas, "106-97-8");
    assert_eq!(results.results[0].name, "Butane");
    assert_eq!(results.results[0].image.as_deref(), Some("<svg>butane</svg>"));
}

#[tokio::test]
async fn search_passes_size_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "sodium*"))
        .and(query_param("size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits(100, 2_345)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "sodium*"))
        .and(query_param_is_missing("size"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits(50, 2_345)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.config().base_url, format!("{}/", server.uri()));
    assert_eq!(client.config().timeout, Duration::from_secs(5));

    let default_page = client.search("sodium*", None, None).await.unwrap();
    assert!(default_page.count >= 2_000);
    assert_eq!(default_page.len(), 50);

    let big_page = client.search("sodium*", None, Some(100)).await.unwrap();
    assert_eq!(big_page.count, default_page.count);
    assert_eq!(big_page.len(), 100);

    // zero means "not set"
    let zero = client.search("sodium*", Some(0), Some(0)).await.unwrap();
    assert_eq!(zero.len(), 50);
}

#[tokio::test]
async fn search_sends_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits(3, 53)))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search("sodium*", Some(50), None)
        .await
        .unwrap();
    assert_eq!(page.len(), 3);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(butanediol())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = Config::with_api_key(KEY)
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(50));
    let err = CasClient::new(config)
        .unwrap()
        .fetch_chemical("110-63-4")
        .await
        .unwrap_err();
    assert!(matches!(err, CasError::Http(_)), "{err:?}");
}

#[test]
fn missing_key_fails_before_any_request() {
    let dir = std::env::temp_dir().join("cas-net-tests-no-config");
    let err = Config::from_sources(&[
        KeySource::Env("CAS_NET_TEST_NEVER_SET".to_string()),
        KeySource::File(dir.join("cas.toml")),
    ])
    .unwrap_err();
    assert!(matches!(err, CasError::Config(_)));
}

#[test]
fn plain_http_to_remote_host_is_rejected() {
    let config = Config::with_api_key(KEY).with_base_url("http://commonchemistry.cas.org/api");
    assert!(matches!(CasClient::new(config), Err(CasError::Config(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_client_matches_async() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/detail"))
        .and(query_param("cas_rn", "110-63-4"))
        .and(header("X-API-KEY", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(butanediol()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "butane"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{"rn": "106-97-8", "name": "Butane"}]
        })))
        .mount(&server)
        .await;

    let config = Config::with_api_key(KEY).with_base_url(server.uri());
    let (chemical, results) = tokio::task::spawn_blocking(move || {
        let client = blocking::CasClient::new(config).unwrap();
        assert_eq!(client.config().api_key, KEY);
        let chemical = client.fetch_chemical("110-63-4").unwrap();
        let results = client.search("butane", None, None).unwrap();
        (chemical, results)
    })
    .await
    .unwrap();

    assert_eq!(chemical.name, "1,4-Butanediol");
    assert_eq!(results.results[0].cas, "106-97-8");
    assert!(results.results[0].image.is_none());
}
