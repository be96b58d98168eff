//! Integration tests for the sweets catalog and inventory endpoints
//!
//! Drives the full CRUD, search, purchase and restock surface through a real
//! server with an admin and a regular customer, asserting the exact response
//! envelopes and status codes callers see.

use reqwest::StatusCode;
use shop_test_utils::{TestShopServer, TEST_ADMIN_KEY};

/// Spawns a server with one admin and one customer already logged in.
async fn server_with_accounts() -> Result<(TestShopServer, String, String), anyhow::Error> {
    let server = TestShopServer::spawn().await?;
    let admin = server
        .register_and_login("boss", "password123", Some(TEST_ADMIN_KEY))
        .await?;
    let user = server.register_and_login("alice", "password123", None).await?;
    Ok((server, admin, user))
}

async fn create_sweet(
    server: &TestShopServer,
    admin: &str,
    name: &str,
    category: &str,
    price: f64,
    quantity: i32,
) -> Result<i64, anyhow::Error> {
    let response = server
        .client()
        .post(format!("{}/api/sweets", server.url()))
        .header("Authorization", format!("Bearer {admin}"))
        .json(&serde_json::json!({
            "name": name,
            "category": category,
            "price": price,
            "quantity": quantity
        }))
        .send()
        .await?;
    anyhow::ensure!(
        response.status() == StatusCode::CREATED,
        "sweet creation failed: {}",
        response.status()
    );
    let body: serde_json::Value = response.json().await?;
    body["data"]["id"]
        .as_i64()
        .ok_or_else(|| anyhow::anyhow!("no id in creation response"))
}

// ============================================================================
// CRUD
// ============================================================================

/// Creating a sweet returns 201 with the stored record.
#[tokio::test]
async fn test_create_sweet() -> Result<(), anyhow::Error> {
    let (server, admin, _) = server_with_accounts().await?;

    let response = server
        .client()
        .post(format!("{}/api/sweets", server.url()))
        .header("Authorization", format!("Bearer {admin}"))
        .json(&serde_json::json!({
            "name": "Gulab Jamun",
            "category": "Milk-Based",
            "price": 10.0,
            "quantity": 50
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Sweet added successfully");
    assert_eq!(body["data"]["name"], "Gulab Jamun");
    assert_eq!(body["data"]["quantity"], 50);
    assert!(body["data"]["id"].as_i64().is_some());

    Ok(())
}

/// Sweet names are unique.
#[tokio::test]
async fn test_create_duplicate_sweet_is_rejected() -> Result<(), anyhow::Error> {
    let (server, admin, _) = server_with_accounts().await?;
    create_sweet(&server, &admin, "Ladoo", "Nut-Based", 15.0, 30).await?;

    let response = server
        .client()
        .post(format!("{}/api/sweets", server.url()))
        .header("Authorization", format!("Bearer {admin}"))
        .json(&serde_json::json!({
            "name": "Ladoo",
            "category": "Other",
            "price": 12.0,
            "quantity": 5
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Sweet with this name already exists");

    Ok(())
}

/// Listing returns every sweet to any authenticated caller.
#[tokio::test]
async fn test_list_sweets() -> Result<(), anyhow::Error> {
    let (server, admin, user) = server_with_accounts().await?;
    create_sweet(&server, &admin, "Ladoo", "Nut-Based", 15.0, 30).await?;
    create_sweet(&server, &admin, "Barfi", "Milk-Based", 20.0, 10).await?;

    let response = server
        .client()
        .get(format!("{}/api/sweets", server.url()))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Fetched all sweets");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    Ok(())
}

/// Fetching a sweet by id.
#[tokio::test]
async fn test_get_sweet_by_id() -> Result<(), anyhow::Error> {
    let (server, admin, user) = server_with_accounts().await?;
    let id = create_sweet(&server, &admin, "Barfi", "Milk-Based", 20.0, 10).await?;

    let response = server
        .client()
        .get(format!("{}/api/sweets/{id}", server.url()))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Sweet found");
    assert_eq!(body["data"]["name"], "Barfi");

    Ok(())
}

/// Fetching a missing id returns 404 with the id in the message.
#[tokio::test]
async fn test_get_missing_sweet_is_not_found() -> Result<(), anyhow::Error> {
    let (server, _, user) = server_with_accounts().await?;

    let response = server
        .client()
        .get(format!("{}/api/sweets/9999", server.url()))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Sweet not found with id: 9999");

    Ok(())
}

/// Updates may be partial; unset fields keep their values.
#[tokio::test]
async fn test_partial_update_preserves_other_fields() -> Result<(), anyhow::Error> {
    let (server, admin, _) = server_with_accounts().await?;
    let id = create_sweet(&server, &admin, "Jalebi", "Syrup-Based", 8.0, 40).await?;

    let response = server
        .client()
        .put(format!("{}/api/sweets/{id}", server.url()))
        .header("Authorization", format!("Bearer {admin}"))
        .json(&serde_json::json!({ "price": 9.5 }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Sweet updated successfully");
    assert_eq!(body["data"]["price"], 9.5);
    assert_eq!(body["data"]["name"], "Jalebi");
    assert_eq!(body["data"]["quantity"], 40);

    Ok(())
}

/// Deleting a sweet removes it from subsequent fetches.
#[tokio::test]
async fn test_delete_sweet() -> Result<(), anyhow::Error> {
    let (server, admin, user) = server_with_accounts().await?;
    let id = create_sweet(&server, &admin, "Peda", "Milk-Based", 12.0, 25).await?;

    let response = server
        .client()
        .delete(format!("{}/api/sweets/{id}", server.url()))
        .header("Authorization", format!("Bearer {admin}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Sweet deleted successfully");

    let fetch = server
        .client()
        .get(format!("{}/api/sweets/{id}", server.url()))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;
    assert_eq!(fetch.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Deleting an unknown id uses the delete-specific 404 message.
#[tokio::test]
async fn test_delete_missing_sweet_is_not_found() -> Result<(), anyhow::Error> {
    let (server, admin, _) = server_with_accounts().await?;

    let response = server
        .client()
        .delete(format!("{}/api/sweets/9999", server.url()))
        .header("Authorization", format!("Bearer {admin}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Cannot delete. Sweet not found.");

    Ok(())
}

// ============================================================================
// Search
// ============================================================================

/// Search matches name or category, case-insensitively, with inclusive
/// price bounds.
#[tokio::test]
async fn test_search_by_query_and_price_range() -> Result<(), anyhow::Error> {
    let (server, admin, user) = server_with_accounts().await?;
    create_sweet(&server, &admin, "Kaju Katli", "Nut-Based", 50.0, 20).await?;
    create_sweet(&server, &admin, "Barfi", "Milk-Based", 20.0, 10).await?;
    create_sweet(&server, &admin, "Rasgulla", "Milk-Based", 25.0, 15).await?;

    // Query matches category, case-insensitive.
    let response = server
        .client()
        .get(format!("{}/api/sweets/search?query=milk", server.url()))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Search results");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    // Price bounds are inclusive.
    let response = server
        .client()
        .get(format!(
            "{}/api/sweets/search?minPrice=20&maxPrice=25",
            server.url()
        ))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    // Combined filters intersect.
    let response = server
        .client()
        .get(format!(
            "{}/api/sweets/search?query=milk&maxPrice=21",
            server.url()
        ))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["name"], "Barfi");

    Ok(())
}

// ============================================================================
// Inventory
// ============================================================================

/// Purchase decrements stock by one.
#[tokio::test]
async fn test_purchase_decrements_quantity() -> Result<(), anyhow::Error> {
    let (server, admin, user) = server_with_accounts().await?;
    let id = create_sweet(&server, &admin, "Barfi", "Milk-Based", 20.0, 2).await?;

    let response = server
        .client()
        .post(format!("{}/api/sweets/{id}/purchase", server.url()))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Purchase successful");
    assert_eq!(body["data"]["quantity"], 1);

    Ok(())
}

/// Purchasing a sold-out sweet fails and never drives stock negative.
#[tokio::test]
async fn test_purchase_out_of_stock() -> Result<(), anyhow::Error> {
    let (server, admin, user) = server_with_accounts().await?;
    let id = create_sweet(&server, &admin, "Barfi", "Milk-Based", 20.0, 1).await?;

    server
        .client()
        .post(format!("{}/api/sweets/{id}/purchase", server.url()))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;

    let response = server
        .client()
        .post(format!("{}/api/sweets/{id}/purchase", server.url()))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Out of Stock");

    let fetch: serde_json::Value = server
        .client()
        .get(format!("{}/api/sweets/{id}", server.url()))
        .header("Authorization", format!("Bearer {user}"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetch["data"]["quantity"], 0);

    Ok(())
}

/// Restock adds the given quantity.
#[tokio::test]
async fn test_restock_adds_quantity() -> Result<(), anyhow::Error> {
    let (server, admin, _) = server_with_accounts().await?;
    let id = create_sweet(&server, &admin, "Barfi", "Milk-Based", 20.0, 3).await?;

    let response = server
        .client()
        .post(format!("{}/api/sweets/{id}/restock?quantity=7", server.url()))
        .header("Authorization", format!("Bearer {admin}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Restock successful");
    assert_eq!(body["data"]["quantity"], 10);

    Ok(())
}

/// Restocking without a quantity parameter fails inside the uniform
/// envelope, not with the extractor's plain-text rejection.
#[tokio::test]
async fn test_restock_without_quantity_uses_envelope() -> Result<(), anyhow::Error> {
    let (server, admin, _) = server_with_accounts().await?;
    let id = create_sweet(&server, &admin, "Barfi", "Milk-Based", 20.0, 3).await?;

    let response = server
        .client()
        .post(format!("{}/api/sweets/{id}/restock", server.url()))
        .header("Authorization", format!("Bearer {admin}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Restock quantity is required");
    assert!(body["data"].is_null());

    Ok(())
}

/// Restocking with a non-positive quantity is rejected.
#[tokio::test]
async fn test_restock_rejects_non_positive_quantity() -> Result<(), anyhow::Error> {
    let (server, admin, _) = server_with_accounts().await?;
    let id = create_sweet(&server, &admin, "Barfi", "Milk-Based", 20.0, 3).await?;

    let response = server
        .client()
        .post(format!("{}/api/sweets/{id}/restock?quantity=0", server.url()))
        .header("Authorization", format!("Bearer {admin}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Restock amount must be greater than zero");

    Ok(())
}
