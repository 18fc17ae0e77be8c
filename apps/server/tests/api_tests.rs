//! Integration tests for the JSON API.

mod common;

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use common::{apk_form, file_part, text_part, TestServer};
use serde_json::{json, Value};

async fn create_item(server: &TestServer, name: &str, price: i64, stock: i64) -> Value {
    let (status, item) = server
        .json(
            "POST",
            "/api/items",
            Some(json!({ "name": name, "price": price, "stock": stock })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{item}");
    item
}

fn sale_body(item_id: &Value, quantity: i64) -> Value {
    json!({
        "storeId": 1,
        "staffId": 1,
        "details": [{ "itemId": item_id, "quantity": quantity }]
    })
}

// =============================================================================
// Items
// =============================================================================

#[tokio::test]
async fn test_item_crud() {
    let server = TestServer::new().await;

    let item = create_item(&server, "Juice", 120, 10).await;
    let id = item["id"].as_i64().unwrap();
    let code = item["itemId"].as_str().unwrap().to_string();
    assert!(code.starts_with("ITEM-"));
    assert_eq!(item["isDeleted"], json!(false));

    let (status, list) = server.json("GET", "/api/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, updated) = server
        .json(
            "PUT",
            &format!("/api/items/{id}"),
            Some(json!({ "name": "Orange Juice", "price": 150, "stock": 8 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Orange Juice");
    assert_eq!(updated["itemId"], code.as_str());

    let (status, found) = server.json("GET", &format!("/api/items/barcode/{code}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], id);

    let (status, body) = server.json("DELETE", &format!("/api/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item deleted successfully");
    assert_eq!(body["strategy"], "soft");

    let (status, body) = server.json("GET", &format!("/api/items/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("Item not found: {id}"));

    let (_, list) = server.json("GET", "/api/items", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_item_validation() {
    let server = TestServer::new().await;

    let (status, body) = server
        .json("POST", "/api/items", Some(json!({ "name": "", "price": 100, "stock": 1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name is required");

    let (status, _) = server
        .json("POST", "/api/items", Some(json!({ "name": "Cake", "price": -5, "stock": 1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .json("POST", "/api/items", Some(json!({ "name": "Cake", "price": 5, "stock": -1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server.json("GET", "/api/items/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid ID");

    let request = Request::builder()
        .method("POST")
        .uri("/api/items")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = server.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].is_string());
}

// =============================================================================
// Sales
// =============================================================================

#[tokio::test]
async fn test_sale_decrements_stock() {
    let server = TestServer::new().await;
    let item = create_item(&server, "Cookie", 100, 10).await;

    let (status, sale) = server.json("POST", "/api/sales", Some(sale_body(&item["id"], 3))).await;
    assert_eq!(status, StatusCode::CREATED, "{sale}");
    assert_eq!(sale["totalPrice"], 300);
    assert_eq!(sale["deposit"], 300);

    let (_, item) = server.json("GET", &format!("/api/items/{}", item["id"]), None).await;
    assert_eq!(item["stock"], 7);

    let (status, fetched) = server.json("GET", &format!("/api/sales/{}", sale["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    let details = fetched["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["quantity"], 3);
    assert_eq!(details[0]["price"], 100);
    assert_eq!(details[0]["item"]["name"], "Cookie");

    let (_, sales) = server.json("GET", "/api/sales", None).await;
    assert_eq!(sales[0]["store"]["name"], "Main Store");
    assert_eq!(sales[0]["staff"]["name"], "Admin");
}

#[tokio::test]
async fn test_rejected_sales_write_nothing() {
    let server = TestServer::new().await;
    let item = create_item(&server, "Cookie", 100, 2).await;

    let (status, body) = server.json("POST", "/api/sales", Some(sale_body(&item["id"], 3))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("insufficient stock"));

    let (status, _) = server
        .json(
            "POST",
            "/api/sales",
            Some(json!({ "storeId": 1, "staffId": 1, "details": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut unknown_store = sale_body(&item["id"], 1);
    unknown_store["storeId"] = json!(99);
    let (status, body) = server.json("POST", "/api/sales", Some(unknown_store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "store not found: 99");

    let (status, body) = server.json("POST", "/api/sales", Some(sale_body(&json!(4242), 1))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "item not found: 4242");

    let (_, sales) = server.json("GET", "/api/sales", None).await;
    assert!(sales.as_array().unwrap().is_empty());
    let (_, item) = server.json("GET", &format!("/api/items/{}", item["id"]), None).await;
    assert_eq!(item["stock"], 2);

    let (status, _) = server.json("GET", "/api/sales/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Stores & Staff
// =============================================================================

#[tokio::test]
async fn test_referenced_store_and_staff_cannot_be_deleted() {
    let server = TestServer::new().await;
    let item = create_item(&server, "Cookie", 100, 5).await;
    server.json("POST", "/api/sales", Some(sale_body(&item["id"], 1))).await;

    let (status, body) = server.json("DELETE", "/api/stores/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("referenced by sales"));

    let (status, _) = server.json("DELETE", "/api/staffs/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, store) = server
        .json("POST", "/api/stores", Some(json!({ "name": "Annex" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(store["storeId"].as_str().unwrap().starts_with("STORE-"));

    let (status, body) = server.json("DELETE", &format!("/api/stores/{}", store["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["strategy"], "hard_guarded");

    let (status, _) = server.json("GET", &format!("/api/stores/{}", store["id"]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_staff_by_barcode() {
    let server = TestServer::new().await;

    let (status, admin) = server.json("GET", "/api/staffs/barcode/STAFF001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin["name"], "Admin");

    let (status, staff) = server
        .json("POST", "/api/staffs", Some(json!({ "staffId": "BADGE9", "name": "Yuki" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(staff["staffId"], "BADGE9");

    let (status, renamed) = server
        .json("PUT", "/api/staffs/barcode/BADGE9", Some(json!({ "name": "Yuki S." })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Yuki S.");

    let (status, _) = server
        .json("POST", "/api/staffs", Some(json!({ "staffId": "BADGE9", "name": "Other" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = server.json("DELETE", "/api/staffs/barcode/BADGE9", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server.json("GET", "/api/staffs/barcode/BADGE9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test]
async fn test_settings() {
    let server = TestServer::new().await;

    let (status, list) = server.json("GET", "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["currency", "receiptFooter", "shopName", "taxRate"]);

    let (status, created) = server
        .json("POST", "/api/settings", Some(json!({ "key": "greeting", "value": "Hi" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["type"], "string");

    let (status, updated) = server
        .json("PUT", "/api/settings/shopName", Some(json!({ "value": "Bazaar" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["value"], "Bazaar");

    let (status, _) = server
        .json("PUT", "/api/settings/shopName", Some(json!({ "value": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .json("PUT", "/api/settings/nope", Some(json!({ "value": "x" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.json("DELETE", "/api/settings/greeting", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = server.json("DELETE", "/api/settings/greeting", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_sales_report() {
    let server = TestServer::new().await;
    let item = create_item(&server, "Cookie", 100, 10).await;
    server.json("POST", "/api/sales", Some(sale_body(&item["id"], 2))).await;
    server.json("POST", "/api/sales", Some(sale_body(&item["id"], 1))).await;

    let (status, report) = server.json("GET", "/api/reports/sales", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalSales"], 2);
    assert_eq!(report["totalAmount"], 300);

    let (_, report) = server
        .json("GET", "/api/reports/sales?startDate=2999-01-01", None)
        .await;
    assert_eq!(report["totalSales"], 0);

    let (_, report) = server
        .json("GET", "/api/reports/sales?startDate=2000-01-01&endDate=2999-12-31", None)
        .await;
    assert_eq!(report["totalSales"], 2);

    let (status, _) = server.json("GET", "/api/reports/sales?endDate=soon", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for uri in ["/api/reports/sales/excel", "/api/reports/sales/pdf"] {
        let (status, body) = server.json("GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert!(body["error"].is_string());
    }
}

// =============================================================================
// APK
// =============================================================================

async fn upload_apk(server: &TestServer, version: &str, code: i64) -> Value {
    let code = code.to_string();
    let (status, body) = server
        .upload("/api/apk/upload", &apk_form(version, &code, b"PK\x03\x04fake-apk"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_apk_update_check() {
    let server = TestServer::new().await;
    let mut ids = Vec::new();
    for code in [1, 2, 4] {
        let apk = upload_apk(&server, &format!("1.0.{code}"), code).await;
        assert_eq!(apk["isActive"], json!(true));
        ids.push(apk["id"].as_i64().unwrap());
    }

    let (status, check) = server
        .json("GET", "/api/apk/version/check?currentVersionCode=1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["hasUpdate"], json!(true));
    assert_eq!(check["latestVersion"]["versionCode"], 2);

    let (_, check) = server
        .json("GET", "/api/apk/version/check?currentVersionCode=4", None)
        .await;
    assert_eq!(check["hasUpdate"], json!(false));
    assert!(check["latestVersion"].is_null());

    let (status, body) = server.json("GET", "/api/apk/version/check", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "currentVersionCode is required");

    let (status, body) = server
        .json("GET", "/api/apk/version/check?currentVersionCode=abc", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid version code");

    let (_, latest) = server.json("GET", "/api/apk/version/latest", None).await;
    assert_eq!(latest["versionCode"], 4);

    let (status, deactivated) = server
        .json("PUT", &format!("/api/apk/version/{}/deactivate", ids[2]), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deactivated["isActive"], json!(false));

    let (_, latest) = server.json("GET", "/api/apk/version/latest", None).await;
    assert_eq!(latest["versionCode"], 2);

    let (_, all) = server.json("GET", "/api/apk/version/all", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_apk_upload_rejections() {
    let server = TestServer::with_config(|config| config.apk_max_file_size = 16).await;

    upload_apk(&server, "1.0.0", 1).await;
    assert_eq!(server.stored_files(), 1);

    let (status, body) = server
        .upload("/api/apk/upload", &apk_form("1.0.0", "2", b"PK\x03\x04"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("1.0.0"));
    assert_eq!(server.stored_files(), 1);

    let (status, _) = server
        .upload("/api/apk/upload", &apk_form("1.1.0", "2", &[0u8; 32]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .upload(
            "/api/apk/upload",
            &[
                text_part("version", "1.1.0"),
                text_part("versionCode", "2"),
                file_part("app.zip", b"zip"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .upload(
            "/api/apk/upload",
            &[text_part("version", "1.1.0"), text_part("versionCode", "2")],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "file is required");

    let (status, _) = server
        .upload(
            "/api/apk/upload",
            &[
                text_part("version", "1.1.0"),
                text_part("versionCode", "0"),
                file_part("app.apk", b"apk"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(server.stored_files(), 1);
}

#[tokio::test]
async fn test_apk_download_and_delete() {
    let server = TestServer::new().await;

    let (status, body) = server.json("GET", "/api/apk/download/latest", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No APK versions available");

    let apk = upload_apk(&server, "2.0.0", 20).await;
    let id = apk["id"].as_i64().unwrap();
    let file_name = apk["fileName"].as_str().unwrap().to_string();

    for uri in [format!("/api/apk/download/{id}"), "/api/apk/download/latest".to_string()] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, headers, body) = server.send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[CONTENT_TYPE], "application/vnd.android.package-archive");
        let disposition = headers[CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains(&file_name));
        assert_eq!(&body[..], b"PK\x03\x04fake-apk");
    }

    let (status, body) = server.json("DELETE", &format!("/api/apk/version/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "APK version deleted successfully");
    assert_eq!(server.stored_files(), 0);

    let (status, _) = server.json("GET", &format!("/api/apk/download/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server.json("DELETE", &format!("/api/apk/version/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_without_multipart_body() {
    let server = TestServer::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/apk/upload")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"version":"1.0.0"}"#))
        .unwrap();
    let (status, headers, body) = server.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[CONTENT_TYPE], "application/json");
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_oversized_upload_is_a_validation_error() {
    let server = TestServer::with_config(|config| config.apk_max_file_size = 16).await;

    let big = vec![7u8; 2 * 1024 * 1024];
    let (status, body) = server
        .upload("/api/apk/upload", &apk_form("9.9.9", "99", &big))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "file size exceeds maximum of 16 bytes");
    assert_eq!(server.stored_files(), 0);

    let (status, _) = server.json("GET", "/api/apk/version/latest", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_name_with_quote() {
    let server = TestServer::new().await;
    let apk = upload_apk(&server, "1.0\"x", 5).await;
    let file_name = apk["fileName"].as_str().unwrap();
    assert!(file_name.starts_with("1.0_x-"));

    let request = Request::builder()
        .uri(format!("/api/apk/download/{}", apk["id"]))
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = server.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[CONTENT_DISPOSITION],
        format!("attachment; filename=\"{file_name}\"").as_str()
    );
}

#[tokio::test]
async fn test_users_alias_for_staff() {
    let server = TestServer::new().await;

    let (status, users) = server.json("GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users[0]["staffId"], "STAFF001");

    let (status, admin) = server.json("GET", "/api/users/STAFF001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin["name"], "Admin");

    let (status, _) = server
        .json("POST", "/api/users", Some(json!({ "staffId": "KID7", "name": "Ren" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, renamed) = server
        .json("PUT", "/api/users/KID7", Some(json!({ "name": "Ren K." })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Ren K.");

    let (status, _) = server.json("DELETE", "/api/users/KID7", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = server.json("GET", "/api/staffs/barcode/KID7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deactivate_unknown_version() {
    let server = TestServer::new().await;
    upload_apk(&server, "1.0.0", 1).await;

    let (status, _) = server.json("PUT", "/api/apk/version/999/deactivate", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, latest) = server.json("GET", "/api/apk/version/latest", None).await;
    assert_eq!(latest["isActive"], json!(true));
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::new().await;
    let (status, body) = server.json("GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}
