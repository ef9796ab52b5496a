//! Integration tests for `IdenticoleClient` using wiremock HTTP mocks.

use idcole_upstream::{IdenticoleClient, SchoolSearchForm};
use reqwest::Method;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> IdenticoleClient {
    IdenticoleClient::with_base_url(30, base_url).expect("client construction should not fail")
}

fn test_form() -> SchoolSearchForm {
    SchoolSearchForm::new(
        -12.0464,
        -77.0428,
        "13".into(),
        "1301".into(),
        "130101".into(),
        String::new(),
        "EBR".into(),
        String::new(),
    )
}

#[tokio::test]
async fn find_levels_forwards_modalidad_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/BuscaNivel"))
        .and(query_param("modalidad", "EBR"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"filtro": 1})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"[{\"id\":\"A0\",\"nombre\":\"Inicial\"}]".to_vec(), "application/json"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let relayed = client
        .find_levels("EBR", b"{\"filtro\": 1}".to_vec())
        .await
        .expect("relay should succeed");

    assert_eq!(relayed.status.as_u16(), 200);
    assert_eq!(relayed.body, "[{\"id\":\"A0\",\"nombre\":\"Inicial\"}]");
    assert_eq!(relayed.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn find_levels_percent_encodes_the_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/BuscaNivel"))
        .and(query_param("modalidad", "EBR Y MAS"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let relayed = client
        .find_levels("EBR Y MAS", b"{}".to_vec())
        .await
        .expect("relay should succeed");

    assert_eq!(relayed.status.as_u16(), 200);
}

#[tokio::test]
async fn relay_json_forwards_method_path_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/provincias/13"))
        .and(query_param("orden", "nombre"))
        .respond_with(ResponseTemplate::new(200).set_body_string("provincias"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let relayed = client
        .relay_json(Method::GET, "/api/provincias/13?orden=nombre", None)
        .await
        .expect("relay should succeed");

    assert_eq!(relayed.status.as_u16(), 200);
    assert_eq!(relayed.body, "provincias");
}

#[tokio::test]
async fn relay_json_passes_upstream_error_status_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/distritos/9999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no existe"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let relayed = client
        .relay_json(Method::GET, "/api/distritos/9999", None)
        .await
        .expect("a 404 is not a transport failure");

    assert_eq!(relayed.status.as_u16(), 404);
    assert_eq!(relayed.body, "no existe");
}

#[tokio::test]
async fn relay_json_sends_browser_identity_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/algo"))
        .and(header("origin", server.uri().as_str()))
        .and(header("referer", format!("{}/", server.uri()).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let relayed = client
        .relay_json(Method::POST, "/api/algo", Some(b"{}".to_vec()))
        .await
        .expect("relay should succeed");

    assert_eq!(relayed.status.as_u16(), 200);
}

#[tokio::test]
async fn search_schools_posts_form_to_bare_path_for_offset_zero() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/colegio/busqueda_colegios_detalle"))
        .and(header(
            "content-type",
            "application/x-www-form-urlencoded",
        ))
        .and(body_string_contains("accion=ubicacion"))
        .and(body_string_contains("lat=-12.0464"))
        .and(body_string_contains("lng=-77.0428"))
        .and(body_string_contains("s_departament_geo=13"))
        .and(body_string_contains("vacante=3"))
        .and(body_string_contains("participa=3"))
        .and(body_string_contains("dot-amount=2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("1||[{\"cod_mod\":\"0123\"}]"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let relayed = client
        .search_schools(&test_form(), 0)
        .await
        .expect("search should succeed");

    assert_eq!(relayed.status.as_u16(), 200);
    assert_eq!(relayed.body, "1||[{\"cod_mod\":\"0123\"}]");
}

#[tokio::test]
async fn search_schools_appends_offset_as_path_segment() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/colegio/busqueda_colegios_detalle/24"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0||"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let relayed = client
        .search_schools(&test_form(), 24)
        .await
        .expect("search should succeed");

    assert_eq!(relayed.status.as_u16(), 200);
}

#[tokio::test]
async fn search_schools_passes_upstream_failure_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/colegio/busqueda_colegios_detalle"))
        .respond_with(ResponseTemplate::new(503).set_body_string("mantenimiento"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let relayed = client
        .search_schools(&test_form(), 0)
        .await
        .expect("a 503 is not a transport failure");

    assert_eq!(relayed.status.as_u16(), 503);
    assert_eq!(relayed.body, "mantenimiento");
}
