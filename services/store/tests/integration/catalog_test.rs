use rust_decimal::Decimal;

use shopfront_store::error::StoreServiceError;
use shopfront_store::usecase::catalog::{
    CreateProductUseCase, GetProductUseCase, ListAllProductsUseCase, ListCategoriesUseCase,
    ListProductsUseCase, RemoveProductUseCase, UpdateProductUseCase,
};

use crate::helpers::{MemoryStore, product_fields, test_product};

/// One active and one inactive product in `kitchen`, one active in `garden`.
fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.add_product(test_product("kettle", "kitchen", Decimal::new(3000, 2), 3));
    let mut retired = test_product("toaster", "kitchen", Decimal::new(2500, 2), 2);
    retired.is_active = false;
    store.add_product(retired);
    store.add_product(test_product("rake", "garden", Decimal::new(1200, 2), 1));
    store
}

fn names(products: &[shopfront_store::domain::types::Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn should_list_only_active_products_without_category() {
    let store = seeded_store();
    let list = ListProductsUseCase {
        products: store.products(),
    };

    let products = list.execute(None).await.unwrap();
    assert_eq!(names(&products), ["kettle", "rake"]);

    let products = list.execute(Some("")).await.unwrap();
    assert_eq!(names(&products), ["kettle", "rake"], "empty category is no filter");
}

#[tokio::test]
async fn should_include_inactive_products_when_filtering_by_category() {
    let store = seeded_store();

    let products = ListProductsUseCase {
        products: store.products(),
    }
    .execute(Some("kitchen"))
    .await
    .unwrap();

    assert_eq!(names(&products), ["kettle", "toaster"]);
}

#[tokio::test]
async fn should_list_categories_of_active_products() {
    let store = seeded_store();
    let mut retired = test_product("hammock", "outdoor", Decimal::ONE, 0);
    retired.is_active = false;
    store.add_product(retired);

    let categories = ListCategoriesUseCase {
        products: store.products(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(categories, ["garden", "kitchen"]);
}

#[tokio::test]
async fn should_let_admin_create_and_deactivate_product() {
    let store = MemoryStore::new();
    let root = store.add_user("owner");

    let id = CreateProductUseCase {
        access: store.access(),
        products: store.products(),
    }
    .execute(Some(root.id), product_fields("vase", "home", Decimal::new(4200, 2)))
    .await
    .unwrap();

    let created = GetProductUseCase {
        products: store.products(),
    }
    .execute(id)
    .await
    .unwrap()
    .expect("created product should be readable");
    assert!(created.is_active);
    assert_eq!(created.price, Decimal::new(4200, 2));

    UpdateProductUseCase {
        access: store.access(),
        products: store.products(),
    }
    .execute(
        Some(root.id),
        id,
        product_fields("vase", "home", Decimal::new(3900, 2)),
        false,
    )
    .await
    .unwrap();

    let public = ListProductsUseCase {
        products: store.products(),
    }
    .execute(None)
    .await
    .unwrap();
    assert!(public.is_empty(), "inactive product should leave the storefront");

    let all = ListAllProductsUseCase {
        access: store.access(),
        products: store.products(),
    }
    .execute(Some(root.id))
    .await
    .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].price, Decimal::new(3900, 2));
    assert_eq!(all[0].created_at, created.created_at);
}

#[tokio::test]
async fn should_forbid_catalog_writes_by_shoppers() {
    let store = MemoryStore::new();
    let shopper = store.add_user("shopper");

    let result = CreateProductUseCase {
        access: store.access(),
        products: store.products(),
    }
    .execute(Some(shopper.id), product_fields("vase", "home", Decimal::ONE))
    .await;

    assert!(
        matches!(result, Err(StoreServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert!(store.tables().products.is_empty());
}

#[tokio::test]
async fn should_forbid_product_update_by_shopper() {
    let store = MemoryStore::new();
    let shopper = store.add_user("shopper");
    let kettle = store.add_product(test_product("kettle", "kitchen", Decimal::new(3000, 2), 0));

    let result = UpdateProductUseCase {
        access: store.access(),
        products: store.products(),
    }
    .execute(
        Some(shopper.id),
        kettle.id,
        product_fields("kettle", "kitchen", Decimal::ONE),
        false,
    )
    .await;

    assert!(
        matches!(result, Err(StoreServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.tables().products[0], kettle, "product should be unchanged");
}

#[tokio::test]
async fn should_forbid_product_removal_by_shopper() {
    let store = MemoryStore::new();
    let shopper = store.add_user("shopper");
    let kettle = store.add_product(test_product("kettle", "kitchen", Decimal::new(3000, 2), 0));

    let result = RemoveProductUseCase {
        access: store.access(),
        products: store.products(),
    }
    .execute(Some(shopper.id), kettle.id)
    .await;

    assert!(
        matches!(result, Err(StoreServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.tables().products.len(), 1, "product should remain");
}

#[tokio::test]
async fn should_hide_full_catalog_from_shoppers_and_anonymous() {
    let store = seeded_store();
    let shopper = store.add_user("shopper");
    let list_all = ListAllProductsUseCase {
        access: store.access(),
        products: store.products(),
    };

    let result = list_all.execute(Some(shopper.id)).await;
    assert!(
        matches!(result, Err(StoreServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );

    let result = list_all.execute(None).await;
    assert!(
        matches!(result, Err(StoreServiceError::Unauthenticated)),
        "expected Unauthenticated, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_negative_price() {
    let store = MemoryStore::new();
    let root = store.add_user("owner");

    let result = CreateProductUseCase {
        access: store.access(),
        products: store.products(),
    }
    .execute(Some(root.id), product_fields("vase", "home", Decimal::new(-1, 0)))
    .await;

    assert!(
        matches!(result, Err(StoreServiceError::InvalidPrice)),
        "expected InvalidPrice, got {result:?}"
    );
}
