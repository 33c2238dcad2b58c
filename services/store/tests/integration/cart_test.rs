use rust_decimal::Decimal;

use shopfront_store::error::StoreServiceError;
use shopfront_store::usecase::cart::{
    AddToCartUseCase, ListCartUseCase, RemoveCartItemUseCase, UpdateCartItemQuantityUseCase,
};
use shopfront_store::usecase::catalog::RemoveProductUseCase;

use crate::helpers::{MemoryStore, test_product};

#[tokio::test]
async fn should_merge_repeated_adds_into_one_line() {
    let store = MemoryStore::new();
    let buyer = store.add_user("buyer");
    let mug = store.add_product(test_product("mug", "kitchen", Decimal::new(1250, 2), 0));

    let add = AddToCartUseCase {
        carts: store.carts(),
        products: store.products(),
    };
    add.execute(Some(buyer.id), mug.id, 1).await.unwrap();
    add.execute(Some(buyer.id), mug.id, 2).await.unwrap();

    let view = ListCartUseCase {
        carts: store.carts(),
        products: store.products(),
    }
    .execute(Some(buyer.id))
    .await
    .unwrap();

    assert_eq!(view.items.len(), 1, "expected a single merged line");
    assert_eq!(view.items[0].item.quantity, 3);
    assert_eq!(view.items[0].subtotal, Decimal::new(3750, 2));
    assert_eq!(view.total, Decimal::new(3750, 2));
}

#[tokio::test]
async fn should_merge_simultaneous_first_adds_into_one_line() {
    let store = MemoryStore::new();
    let buyer = store.add_user("buyer");
    let mug = store.add_product(test_product("mug", "kitchen", Decimal::new(1250, 2), 0));

    let add = AddToCartUseCase {
        carts: store.carts(),
        products: store.products(),
    };
    let results =
        futures::future::join_all((0..8).map(|_| add.execute(Some(buyer.id), mug.id, 1))).await;

    for result in &results {
        assert!(result.is_ok(), "expected every add to succeed, got {result:?}");
    }
    let lines = store.tables().cart_items.clone();
    assert_eq!(lines.len(), 1, "expected a single merged line");
    assert_eq!(lines[0].quantity, 8);
}

#[tokio::test]
async fn should_reject_add_that_overflows_line_quantity() {
    let store = MemoryStore::new();
    let buyer = store.add_user("buyer");
    let mug = store.add_product(test_product("mug", "kitchen", Decimal::ONE, 0));

    let add = AddToCartUseCase {
        carts: store.carts(),
        products: store.products(),
    };
    add.execute(Some(buyer.id), mug.id, i32::MAX).await.unwrap();
    let result = add.execute(Some(buyer.id), mug.id, 1).await;

    assert!(
        matches!(result, Err(StoreServiceError::InvalidQuantity)),
        "expected InvalidQuantity, got {result:?}"
    );
    assert_eq!(store.tables().cart_items[0].quantity, i32::MAX.unsigned_abs());
}

#[tokio::test]
async fn should_remove_line_when_quantity_set_to_zero() {
    let store = MemoryStore::new();
    let buyer = store.add_user("buyer");
    let mug = store.add_product(test_product("mug", "kitchen", Decimal::new(500, 2), 0));

    let item = AddToCartUseCase {
        carts: store.carts(),
        products: store.products(),
    }
    .execute(Some(buyer.id), mug.id, 4)
    .await
    .unwrap();

    UpdateCartItemQuantityUseCase {
        carts: store.carts(),
    }
    .execute(Some(buyer.id), item.id, 0)
    .await
    .unwrap();

    assert!(
        store.tables().cart_items.is_empty(),
        "quantity 0 should delete the cart row"
    );
}

#[tokio::test]
async fn should_not_let_another_user_touch_a_cart_item() {
    let store = MemoryStore::new();
    let owner = store.add_user("owner-of-cart");
    let intruder = store.add_user("intruder");
    let mug = store.add_product(test_product("mug", "kitchen", Decimal::new(500, 2), 0));

    let item = AddToCartUseCase {
        carts: store.carts(),
        products: store.products(),
    }
    .execute(Some(owner.id), mug.id, 1)
    .await
    .unwrap();

    let result = RemoveCartItemUseCase {
        carts: store.carts(),
    }
    .execute(Some(intruder.id), item.id)
    .await;

    assert!(
        matches!(result, Err(StoreServiceError::CartItemNotFound)),
        "expected CartItemNotFound, got {result:?}"
    );
    assert_eq!(store.tables().cart_items.len(), 1);
}

#[tokio::test]
async fn should_drop_lines_whose_product_was_deleted() {
    let store = MemoryStore::new();
    let root = store.add_user("owner");
    let buyer = store.add_user("buyer");
    let mug = store.add_product(test_product("mug", "kitchen", Decimal::new(500, 2), 1));
    let lamp = store.add_product(test_product("lamp", "home", Decimal::new(2000, 2), 0));

    let add = AddToCartUseCase {
        carts: store.carts(),
        products: store.products(),
    };
    add.execute(Some(buyer.id), mug.id, 1).await.unwrap();
    add.execute(Some(buyer.id), lamp.id, 1).await.unwrap();

    RemoveProductUseCase {
        access: store.access(),
        products: store.products(),
    }
    .execute(Some(root.id), lamp.id)
    .await
    .unwrap();

    let view = ListCartUseCase {
        carts: store.carts(),
        products: store.products(),
    }
    .execute(Some(buyer.id))
    .await
    .unwrap();

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].product.id, mug.id);
    assert_eq!(view.total, Decimal::new(500, 2));
}

#[tokio::test]
async fn should_require_identity_to_add() {
    let store = MemoryStore::new();
    let mug = store.add_product(test_product("mug", "kitchen", Decimal::ONE, 0));

    let result = AddToCartUseCase {
        carts: store.carts(),
        products: store.products(),
    }
    .execute(None, mug.id, 1)
    .await;

    assert!(
        matches!(result, Err(StoreServiceError::Unauthenticated)),
        "expected Unauthenticated, got {result:?}"
    );
}
