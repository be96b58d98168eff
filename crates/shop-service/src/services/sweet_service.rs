//! Catalog management.

use crate::errors::ShopError;
use crate::models::{NewSweet, Sweet, SweetUpdate};
use crate::repositories::SweetStore;

pub async fn add_sweet(sweets: &dyn SweetStore, new: NewSweet) -> Result<Sweet, ShopError> {
    if new.name.trim().is_empty() {
        return Err(ShopError::InvalidRequest("Sweet name is required".to_string()));
    }

    if sweets.find_by_name(&new.name).await?.is_some() {
        return Err(ShopError::DuplicateSweet);
    }

    sweets.insert(&new).await
}

pub async fn get_all_sweets(sweets: &dyn SweetStore) -> Result<Vec<Sweet>, ShopError> {
    sweets.list().await
}

pub async fn get_sweet_by_id(sweets: &dyn SweetStore, id: i64) -> Result<Sweet, ShopError> {
    sweets
        .find_by_id(id)
        .await?
        .ok_or_else(|| ShopError::SweetNotFound(format!("Sweet not found with id: {}", id)))
}

/// Partial update: only the fields present in `update` change.
pub async fn update_sweet(
    sweets: &dyn SweetStore,
    id: i64,
    update: SweetUpdate,
) -> Result<Sweet, ShopError> {
    let mut sweet = get_sweet_by_id(sweets, id).await?;

    if let Some(name) = update.name {
        sweet.name = name;
    }
    if let Some(category) = update.category {
        sweet.category = category;
    }
    if let Some(price) = update.price {
        sweet.price = price;
    }
    if let Some(quantity) = update.quantity {
        sweet.quantity = quantity;
    }

    sweets.update(&sweet).await
}

pub async fn delete_sweet(sweets: &dyn SweetStore, id: i64) -> Result<(), ShopError> {
    if !sweets.delete(id).await? {
        return Err(ShopError::SweetNotFound(
            "Cannot delete. Sweet not found.".to_string(),
        ));
    }

    Ok(())
}

pub async fn search_sweets(
    sweets: &dyn SweetStore,
    query: Option<&str>,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> Result<Vec<Sweet>, ShopError> {
    sweets.search(query, min_price, max_price).await
}
