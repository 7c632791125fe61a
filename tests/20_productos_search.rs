mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{api_call, create, failing_app, memory_app, names};

async fn seeded() -> axum::Router {
    let app = memory_app();
    create(&app, 1, "Mouse", 25.0, "Peripherals").await;
    create(&app, 2, "Monitor 27", 180.0, "Displays").await;
    create(&app, 3, "Mousepad XL", 8.5, "peripherals").await;
    create(&app, 4, "Headset", 25.0, "Audio").await;
    app
}

#[tokio::test]
async fn list_without_filter_returns_all_in_order() {
    let app = seeded().await;
    let (status, body) = api_call(&app, "GET", "/productos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Mouse", "Monitor 27", "Mousepad XL", "Headset"]);
}

#[tokio::test]
async fn list_filters_category_case_insensitively() {
    let app = seeded().await;
    let (status, body) = api_call(&app, "GET", "/productos?categoria=PERIPH", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Mouse", "Mousepad XL"]);

    let (status, body) = api_call(&app, "GET", "/productos?categoria=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn list_with_no_match_is_empty_200() {
    let app = seeded().await;
    let (status, body) = api_call(&app, "GET", "/productos?categoria=Cameras", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn categories_are_unique_in_first_seen_order() {
    let app = seeded().await;
    create(&app, 5, "Webcam", 45.0, "Peripherals").await;
    let (status, body) = api_call(&app, "GET", "/productos/categorias", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Peripherals", "Displays", "peripherals", "Audio"]));
}

#[tokio::test]
async fn categories_of_empty_collection_is_empty() {
    let app = memory_app();
    let (status, body) = api_call(&app, "GET", "/productos/categorias", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn name_search_example() {
    let app = memory_app();
    let mouse = create(&app, 1, "Mouse", 25.0, "Peripherals").await;

    let (status, body) = api_call(&app, "GET", "/productos/nombre/mou", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([mouse]));

    let (status, body) = api_call(&app, "GET", "/productos/importes/mayor/20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([mouse]));

    let (status, body) = api_call(&app, "GET", "/productos/importes/mayor/30", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No se encontro un producto con un precio mayor al indicado");
}

#[tokio::test]
async fn name_search_is_literal_and_404_when_empty() {
    let app = seeded().await;
    let (status, body) = api_call(&app, "GET", "/productos/nombre/MOUSEPAD", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Mousepad XL"]);

    let (status, body) = api_call(&app, "GET", "/productos/nombre/M.use", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No se encontraron los productos especificados");
}

#[tokio::test]
async fn greater_and_less_partition_the_collection() {
    let app = seeded().await;
    let (_, all) = api_call(&app, "GET", "/productos", None).await;
    let all = all.as_array().unwrap().clone();

    let (_, above) = api_call(&app, "GET", "/productos/importes/mayor/25", None).await;
    let (_, below) = api_call(&app, "GET", "/productos/importes/menor/25", None).await;
    let equal: Vec<Value> = all.iter().filter(|p| p["amount"] == 25.0).cloned().collect();

    let above = above.as_array().unwrap();
    let below = below.as_array().unwrap();
    assert!(above.iter().all(|p| !below.contains(p)));
    assert_eq!(above.len() + below.len() + equal.len(), all.len());
    assert_eq!(names(&json!(above)), vec!["Monitor 27"]);
    assert_eq!(names(&json!(below)), vec!["Mousepad XL"]);
}

#[tokio::test]
async fn less_than_404_when_nothing_cheaper() {
    let app = seeded().await;
    let (status, body) = api_call(&app, "GET", "/productos/importes/menor/8,5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No se encontro un producto con un precio menor al indicado");
}

#[tokio::test]
async fn comma_decimal_is_accepted() {
    let app = seeded().await;
    let (status, body) = api_call(&app, "GET", "/productos/importes/menor/8,6", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Mousepad XL"]);
}

#[tokio::test]
async fn range_is_inclusive() {
    let app = seeded().await;
    let (status, body) = api_call(&app, "GET", "/productos/rango/8.5/25", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Mouse", "Mousepad XL", "Headset"]);

    let (status, body) = api_call(&app, "GET", "/productos/rango/200/100", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No se encontraron productos dentro del rango especificado");
}

#[tokio::test]
async fn unparseable_amounts_are_400() {
    let app = seeded().await;
    for uri in [
        "/productos/importes/mayor/barato",
        "/productos/importes/menor/1e",
        "/productos/rango/0/mucho",
        "/productos/rango/x/100",
    ] {
        let (status, body) = api_call(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["message"].as_str().unwrap().starts_with("Importe inválido"), "{uri}: {body}");
    }
}

#[tokio::test]
async fn store_failures_are_500_with_message() {
    let app = failing_app();
    let key = uuid::Uuid::new_v4();
    let cases = [
        ("GET", "/productos".to_string(), None, "Error al obtener los productos"),
        ("GET", "/productos/categorias".to_string(), None, "Error al obtener las categorias"),
        ("GET", format!("/productos/{}", key), None, "Error al buscar un producto por su ID"),
        (
            "POST",
            "/productos".to_string(),
            Some(json!({ "identifier": 1, "name": "Mouse", "amount": 25, "category": "Peripherals" })),
            "Error al crear un nuevo producto",
        ),
        ("DELETE", format!("/productos/{}", key), None, "Error al eliminar el producto"),
        ("PATCH", format!("/productos/{}", key), Some(json!({ "name": "x" })), "Error al actualizar parcialmente un producto"),
        ("PUT", format!("/productos/{}", key), Some(json!({ "name": "x" })), "Error al actualizar un producto"),
        ("GET", "/productos/importes/mayor/1".to_string(), None, "Error al obtener los productos"),
        ("GET", "/productos/nombre/x".to_string(), None, "Error al obtener los productos con el nombre especificado"),
        (
            "GET",
            "/productos/rango/1/2".to_string(),
            None,
            "Error al obtener los productos dentro del rango especificado",
        ),
    ];

    for (method, uri, body, message) in cases {
        let (status, response) = api_call(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(response, json!({ "message": message }), "{method} {uri}");
    }
}

#[tokio::test]
async fn validation_happens_before_store_access() {
    let app = failing_app();
    let (status, _) = api_call(&app, "POST", "/productos", Some(json!({ "name": "Mouse" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reflects_store_state() {
    let (status, body) = api_call(&memory_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = api_call(&failing_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "message": "Base de datos no disponible" }));
}
