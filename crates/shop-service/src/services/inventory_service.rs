//! Stock movements: purchase and restock.

use crate::errors::ShopError;
use crate::models::Sweet;
use crate::repositories::SweetStore;

/// Purchase one unit. Fails with `OutOfStock` when the shelf is empty.
pub async fn purchase_sweet(sweets: &dyn SweetStore, id: i64) -> Result<Sweet, ShopError> {
    let mut sweet = sweets
        .find_by_id(id)
        .await?
        .ok_or_else(|| ShopError::SweetNotFound(format!("Sweet not found with id: {}", id)))?;

    if sweet.quantity <= 0 {
        return Err(ShopError::OutOfStock);
    }

    sweet.quantity -= 1;
    sweets.update(&sweet).await
}

/// Add stock. The amount must be strictly positive.
pub async fn restock_sweet(
    sweets: &dyn SweetStore,
    id: i64,
    amount: i32,
) -> Result<Sweet, ShopError> {
    if amount <= 0 {
        return Err(ShopError::InvalidRequest(
            "Restock amount must be greater than zero".to_string(),
        ));
    }

    let mut sweet = sweets
        .find_by_id(id)
        .await?
        .ok_or_else(|| ShopError::SweetNotFound(format!("Sweet not found with id: {}", id)))?;

    sweet.quantity += amount;
    sweets.update(&sweet).await
}
