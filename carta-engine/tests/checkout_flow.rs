//! End-to-end storefront flow
//!
//! Customize a product, run the cart through a real redb store (including
//! a restart), validate the order and hand it off as message + URL.

use carta_engine::cart::{CartService, RedbCartStorage};
use carta_engine::catalog::CatalogIndex;
use carta_engine::checkout::{prepare_checkout, CheckoutError};
use carta_engine::ids::{IdGenerator, UuidIdGenerator};
use carta_engine::money::to_f64;
use carta_engine::selection::{ExtraToggle, ItemCustomizer};
use chrono::{DateTime, TimeZone, Utc};
use shared::models::{
    Config, ExtraGroup, ExtraOption, MenuItem, OrderDetails, OrderTypesEnabled, VariantGroup,
    VariantOption,
};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn catalog() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: "pizza".to_string(),
            name: "Pizza Artesanal".to_string(),
            description: Some("Masa madre, horno de lena".to_string()),
            category: "Pizzas".to_string(),
            base_price: 20.0,
            image: "/img/pizza.jpg".to_string(),
            variants: vec![VariantGroup {
                id: "size".to_string(),
                name: "Tamano".to_string(),
                required: true,
                options: vec![
                    VariantOption {
                        id: "m".to_string(),
                        name: "Mediana".to_string(),
                        price: 0.0,
                    },
                    VariantOption {
                        id: "f".to_string(),
                        name: "Familiar".to_string(),
                        price: 8.0,
                    },
                ],
            }],
            extras: vec![ExtraGroup {
                id: "top".to_string(),
                name: "Toppings".to_string(),
                max_select: Some(2),
                options: vec![
                    ExtraOption {
                        id: "queso".to_string(),
                        name: "Queso extra".to_string(),
                        price: 3.0,
                    },
                    ExtraOption {
                        id: "champi".to_string(),
                        name: "Champinones".to_string(),
                        price: 2.5,
                    },
                    ExtraOption {
                        id: "aceituna".to_string(),
                        name: "Aceitunas".to_string(),
                        price: 1.5,
                    },
                ],
            }],
        },
        MenuItem {
            id: "chicha".to_string(),
            name: "Chicha Morada".to_string(),
            description: None,
            category: "Bebidas".to_string(),
            base_price: 6.0,
            image: "/img/chicha.jpg".to_string(),
            variants: vec![],
            extras: vec![],
        },
    ]
}

fn config() -> Config {
    Config {
        business_name: "La Esquina".to_string(),
        whatsapp_number: "+51 999 888 777".to_string(),
        currency: "PEN".to_string(),
        delivery_fee: Some(5.0),
        min_order: Some(20.0),
        hours_text: "Lun-Dom 12:00-22:00".to_string(),
        address_text: None,
        lock_table_from_url: None,
        order_types_enabled: OrderTypesEnabled {
            mesa: true,
            pickup: true,
            delivery: true,
        },
        schedule: None,
    }
}

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).unwrap()
}

#[test]
fn customize_persist_validate_and_hand_off() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cart.redb");
    let index = CatalogIndex::new(catalog());
    let ids: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);
    let config = config();

    // Customize the pizza: familiar + two toppings, a third is rejected
    let mut customizer =
        ItemCustomizer::new(index.get("pizza").unwrap().clone(), ids.clone());
    assert!(customizer.missing_required_variant());
    customizer.select_variant("size", "f");
    assert_eq!(customizer.toggle_extra("top", "queso"), ExtraToggle::Added);
    assert_eq!(customizer.toggle_extra("top", "champi"), ExtraToggle::Added);
    assert_eq!(
        customizer.toggle_extra("top", "aceituna"),
        ExtraToggle::LimitReached
    );
    assert!(customizer.extra_error("top").is_some());
    customizer.set_notes("bien cocida");

    let pizza_line = customizer.confirm().unwrap();
    // 20 + 8 + 3 + 2.5
    assert_eq!(to_f64(carta_engine::money::unit_price(&pizza_line)), 33.5);

    // Fill the cart against a real store
    {
        let storage = Arc::new(RedbCartStorage::open(&db_path).unwrap());
        let mut cart = CartService::new(storage);
        cart.add_item(pizza_line.clone());

        let mut drink = ItemCustomizer::new(index.get("chicha").unwrap().clone(), ids.clone());
        drink.increment_quantity();
        cart.add_item(drink.confirm().unwrap());
        assert_eq!(cart.len(), 2);
    }

    // A new session over the same store sees the same cart
    let storage = Arc::new(RedbCartStorage::open(&db_path).unwrap());
    let mut cart = CartService::new(storage);
    assert_eq!(cart.len(), 2);
    assert_eq!(to_f64(cart.subtotal()), 45.5);

    // Edit the pizza line: drop a topping, keep the line's identity
    let stored_pizza = cart.items()[0].clone();
    let mut editor = ItemCustomizer::edit(
        index.get(&stored_pizza.product_id).unwrap().clone(),
        &stored_pizza,
        ids.clone(),
    );
    assert_eq!(editor.toggle_extra("top", "champi"), ExtraToggle::Removed);
    let updated = editor.confirm().unwrap();
    assert_eq!(updated.cart_item_id, stored_pizza.cart_item_id);
    cart.update_item(updated);
    assert_eq!(to_f64(cart.subtotal()), 43.0);

    // Mesa order with a blank table number is blocked with the field error
    let blank_mesa = OrderDetails::for_session(&config, None);
    let error = prepare_checkout(&cart, &blank_mesa, &config, at()).unwrap_err();
    match error {
        CheckoutError::Validation(errors) => {
            assert_eq!(errors, vec!["Ingresa el numero de mesa.".to_string()]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    // With the table number the handoff succeeds
    let mesa = OrderDetails::for_session(&config, Some("12"));
    let summary = prepare_checkout(&cart, &mesa, &config, at()).unwrap();
    assert_eq!(to_f64(summary.total), 43.0);
    assert!(summary.message.contains("📍 *Mesa:* 12"));
    assert!(summary.message.contains("└ _Tamano: Familiar_"));
    assert!(summary.message.contains("└ + Queso extra"));
    assert!(!summary.message.contains("Champinones"));
    assert!(summary
        .handoff_url
        .starts_with("https://wa.me/51999888777?text="));
    assert!(!summary.handoff_url.contains('+'));

    // Clearing the cart blocks submission with the dedicated message
    cart.clear();
    let error = prepare_checkout(&cart, &mesa, &config, at()).unwrap_err();
    assert_eq!(error.to_string(), "Tu carrito esta vacio.");
}
