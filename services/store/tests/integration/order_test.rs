use rust_decimal::Decimal;

use shopfront_domain::order::OrderStatus;
use shopfront_store::error::StoreServiceError;
use shopfront_store::usecase::cart::{AddToCartUseCase, ListCartUseCase};
use shopfront_store::usecase::order::{
    CreateOrderInput, CreateOrderUseCase, GetOrderUseCase, ListAllOrdersUseCase,
    ListOrdersUseCase, OrderLineInput, UpdateOrderStatusUseCase,
};

use crate::helpers::{MemoryStore, shipping_address, test_product};

/// Buyer puts two of a 999 product in the cart and checks out.
async fn checkout_two_phones(store: &MemoryStore) -> (uuid::Uuid, uuid::Uuid) {
    let buyer = store.add_user("buyer");
    let phone = store.add_product(test_product("phone", "electronics", Decimal::new(999, 0), 0));

    AddToCartUseCase {
        carts: store.carts(),
        products: store.products(),
    }
    .execute(Some(buyer.id), phone.id, 2)
    .await
    .unwrap();

    let order_id = CreateOrderUseCase {
        orders: store.orders(),
    }
    .execute(
        Some(buyer.id),
        CreateOrderInput {
            items: vec![OrderLineInput {
                product_id: phone.id,
                product_name: phone.name.clone(),
                price: phone.price,
                quantity: 2,
            }],
            total_amount: Decimal::new(1998, 0),
            shipping: shipping_address(),
        },
    )
    .await
    .unwrap();
    (buyer.id, order_id)
}

#[tokio::test]
async fn should_place_pending_order_and_empty_cart() {
    let store = MemoryStore::new();
    let (buyer_id, order_id) = checkout_two_phones(&store).await;

    let orders = ListOrdersUseCase {
        orders: store.orders(),
    }
    .execute(Some(buyer_id))
    .await
    .unwrap();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.id, order_id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, Decimal::new(1998, 0));
    assert_eq!(order.items[0].quantity, 2);

    let cart = ListCartUseCase {
        carts: store.carts(),
        products: store.products(),
    }
    .execute(Some(buyer_id))
    .await
    .unwrap();
    assert!(cart.items.is_empty(), "checkout should clear the cart");
    assert_eq!(cart.total, Decimal::ZERO);
}

#[tokio::test]
async fn should_show_owner_the_status_an_admin_set() {
    let store = MemoryStore::new();
    let (buyer_id, order_id) = checkout_two_phones(&store).await;
    let root = store.add_user("owner");

    UpdateOrderStatusUseCase {
        access: store.access(),
        orders: store.orders(),
    }
    .execute(Some(root.id), order_id, "shipped")
    .await
    .unwrap();

    let order = GetOrderUseCase {
        orders: store.orders(),
    }
    .execute(Some(buyer_id), order_id)
    .await
    .unwrap();
    assert_eq!(order.status, OrderStatus::Shipped);
}

#[tokio::test]
async fn should_reject_moving_delivered_order_back_to_pending() {
    let store = MemoryStore::new();
    let (_, order_id) = checkout_two_phones(&store).await;
    let root = store.add_user("owner");
    let update = UpdateOrderStatusUseCase {
        access: store.access(),
        orders: store.orders(),
    };

    update
        .execute(Some(root.id), order_id, "delivered")
        .await
        .unwrap();
    let result = update.execute(Some(root.id), order_id, "pending").await;

    assert!(
        matches!(result, Err(StoreServiceError::InvalidStatusTransition { .. })),
        "expected InvalidStatusTransition, got {result:?}"
    );
    assert_eq!(store.tables().orders[0].status, OrderStatus::Delivered);
}

#[tokio::test]
async fn should_accept_only_one_of_two_terminal_statuses() {
    let store = MemoryStore::new();
    let (_, order_id) = checkout_two_phones(&store).await;
    let root = store.add_user("owner");
    let update = UpdateOrderStatusUseCase {
        access: store.access(),
        orders: store.orders(),
    };

    let (delivered, cancelled) = futures::future::join(
        update.execute(Some(root.id), order_id, "delivered"),
        update.execute(Some(root.id), order_id, "cancelled"),
    )
    .await;

    let accepted = [&delivered, &cancelled].iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1, "got {delivered:?} and {cancelled:?}");
    let stored = store.tables().orders[0].status;
    let winner = if delivered.is_ok() {
        OrderStatus::Delivered
    } else {
        OrderStatus::Cancelled
    };
    assert_eq!(stored, winner);
}

#[tokio::test]
async fn should_forbid_status_change_by_non_admin() {
    let store = MemoryStore::new();
    let (buyer_id, order_id) = checkout_two_phones(&store).await;

    let result = UpdateOrderStatusUseCase {
        access: store.access(),
        orders: store.orders(),
    }
    .execute(Some(buyer_id), order_id, "cancelled")
    .await;

    assert!(
        matches!(result, Err(StoreServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.tables().orders[0].status, OrderStatus::Pending);
}

#[tokio::test]
async fn should_hide_orders_of_other_users() {
    let store = MemoryStore::new();
    let (_, order_id) = checkout_two_phones(&store).await;
    let stranger = store.add_user("stranger");

    let result = GetOrderUseCase {
        orders: store.orders(),
    }
    .execute(Some(stranger.id), order_id)
    .await;
    assert!(
        matches!(result, Err(StoreServiceError::OrderNotFound)),
        "expected OrderNotFound, got {result:?}"
    );

    let listed = ListOrdersUseCase {
        orders: store.orders(),
    }
    .execute(Some(stranger.id))
    .await
    .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn should_list_all_orders_with_owner_for_admin() {
    let store = MemoryStore::new();
    let (_, order_id) = checkout_two_phones(&store).await;
    let staff = store.add_user("staff");
    store.add_admin(&staff, shopfront_domain::role::AdminRole::Admin);

    let list = ListAllOrdersUseCase {
        access: store.access(),
        orders: store.orders(),
        users: store.users(),
    };

    let all = list.execute(Some(staff.id), None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].order.id, order_id);
    assert_eq!(
        all[0].owner.as_ref().map(|o| o.email.as_str()),
        Some("buyer@example.com")
    );

    let shipped = list.execute(Some(staff.id), Some("shipped")).await.unwrap();
    assert!(shipped.is_empty());

    let result = list.execute(Some(staff.id), Some("lost")).await;
    assert!(
        matches!(result, Err(StoreServiceError::InvalidOrderStatus)),
        "expected InvalidOrderStatus, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_total_that_does_not_match_lines() {
    let store = MemoryStore::new();
    let buyer = store.add_user("buyer");

    let result = CreateOrderUseCase {
        orders: store.orders(),
    }
    .execute(
        Some(buyer.id),
        CreateOrderInput {
            items: vec![OrderLineInput {
                product_id: uuid::Uuid::now_v7(),
                product_name: "phone".to_owned(),
                price: Decimal::new(999, 0),
                quantity: 2,
            }],
            total_amount: Decimal::new(1, 0),
            shipping: shipping_address(),
        },
    )
    .await;

    assert!(
        matches!(result, Err(StoreServiceError::TotalMismatch)),
        "expected TotalMismatch, got {result:?}"
    );
    assert!(store.tables().orders.is_empty());
}
