//! The built-in Los Pollos Hermanos menu.
//!
//! Used by the demo binary and by tests; a real deployment would load its
//! [`Menu`] from elsewhere.

use kiosk_core::menu::{
    CategoryBadge, CategoryId, Menu, MenuCategory, OptionGroup, OptionId, Product, ProductId,
    ProductOption,
};
use kiosk_core::money::Money;

/// `(id, name, description, sort order, active, badge)`
type CategoryRow = (&'static str, &'static str, &'static str, u32, bool, Option<CategoryBadge>);

/// `(id, category, name, description, price in cents, combo, sort order)`
type ProductRow = (&'static str, &'static str, &'static str, &'static str, i64, bool, u32);

/// `(id, product, group, label, extra in cents, default, sort order)`
type OptionRow = (&'static str, &'static str, OptionGroup, &'static str, i64, bool, u32);

const CATEGORIES: &[CategoryRow] = &[
    ("cat-1", "Pollos Clásicos", "Our famous fried chicken", 1, true, Some(CategoryBadge::Popular)),
    ("cat-2", "Familia Buckets", "Perfect for sharing", 2, true, None),
    ("cat-3", "Hermanos Burgers", "Juicy chicken burgers", 3, true, Some(CategoryBadge::New)),
    ("cat-4", "Los Sides", "Fries, salads & more", 4, true, None),
    ("cat-5", "Bebidas", "Refreshing beverages", 5, true, None),
    ("cat-6", "Postres", "Sweet treats", 6, true, None),
    ("cat-7", "Combos Hermanos", "Best value meals", 7, true, Some(CategoryBadge::Popular)),
    ("cat-8", "Specials", "Limited time offers", 8, false, Some(CategoryBadge::New)),
];

const PRODUCTS: &[ProductRow] = &[
    (
        "prod-1",
        "cat-1",
        "Gus Special (2pcs)",
        "The boss's favorite - 2 pieces of our legendary fried chicken",
        899,
        true,
        1,
    ),
    (
        "prod-2",
        "cat-1",
        "Heisenberg Meal (3pcs)",
        "Say my name - 3 pieces of crispy perfection with your choice of side",
        1199,
        true,
        2,
    ),
    (
        "prod-3",
        "cat-1",
        "Blue Sky Wings (6pcs)",
        "99.1% pure crispy spicy wings - the purest in the Southwest",
        799,
        false,
        3,
    ),
    (
        "prod-4",
        "cat-2",
        "Cartel Bucket (8pcs)",
        "For the whole crew - 8 pieces, 2 large sides, 4 biscuits",
        2499,
        true,
        1,
    ),
    (
        "prod-5",
        "cat-2",
        "Empire Bucket (12pcs)",
        "Build your empire - 12 pieces, 3 large sides, 6 biscuits",
        3499,
        true,
        2,
    ),
    (
        "prod-6",
        "cat-3",
        "Walter White Classic",
        "Chemistry perfected - crispy chicken fillet with lettuce, tomato, and special sauce",
        699,
        false,
        1,
    ),
    (
        "prod-7",
        "cat-3",
        "Jesse's Fire Burger",
        "Yeah science! - Spicy chicken with jalapeños and chipotle sauce",
        749,
        false,
        2,
    ),
    (
        "prod-8",
        "cat-4",
        "Albuquerque Fries",
        "Golden crispy fries from the Land of Enchantment",
        299,
        false,
        1,
    ),
    ("prod-9", "cat-4", "Coleslaw Blanco", "Fresh and creamy coleslaw", 249, false, 2),
    ("prod-10", "cat-5", "Hermanos Soda", "Coca-Cola, Sprite, or Fanta", 249, false, 1),
    (
        "prod-11",
        "cat-6",
        "Breaking Bad Sundae",
        "Dangerously delicious - vanilla ice cream with blue raspberry sauce",
        349,
        false,
        1,
    ),
];

const OPTIONS: &[OptionRow] = &[
    ("opt-1", "prod-10", OptionGroup::Size, "Small", 0, true, 1),
    ("opt-2", "prod-10", OptionGroup::Size, "Medium", 50, false, 2),
    ("opt-3", "prod-10", OptionGroup::Size, "Large", 100, false, 3),
    ("opt-4", "prod-8", OptionGroup::Size, "Regular", 0, true, 1),
    ("opt-5", "prod-8", OptionGroup::Size, "Large", 100, false, 2),
    ("opt-6", "prod-1", OptionGroup::Side, "Fries", 0, true, 1),
    ("opt-7", "prod-1", OptionGroup::Side, "Coleslaw", 0, false, 2),
    ("opt-8", "prod-1", OptionGroup::Side, "Mashed Potatoes", 50, false, 3),
    ("opt-9", "prod-2", OptionGroup::Side, "Fries", 0, true, 1),
    ("opt-10", "prod-2", OptionGroup::Side, "Coleslaw", 0, false, 2),
    ("opt-11", "prod-2", OptionGroup::Side, "Mashed Potatoes", 50, false, 3),
    ("opt-12", "prod-1", OptionGroup::Drink, "Coca-Cola", 0, true, 1),
    ("opt-13", "prod-1", OptionGroup::Drink, "Sprite", 0, false, 2),
    ("opt-14", "prod-1", OptionGroup::Drink, "Fanta", 0, false, 3),
    ("opt-15", "prod-1", OptionGroup::Drink, "No Drink", -100, false, 4),
    ("opt-16", "prod-3", OptionGroup::Sauce, "BBQ Sauce", 0, true, 1),
    ("opt-17", "prod-3", OptionGroup::Sauce, "Hot Sauce", 0, false, 2),
    ("opt-18", "prod-3", OptionGroup::Sauce, "Ranch", 25, false, 3),
    ("opt-19", "prod-6", OptionGroup::Addon, "Extra Cheese", 75, false, 1),
    ("opt-20", "prod-6", OptionGroup::Addon, "Bacon", 125, false, 2),
    ("opt-21", "prod-7", OptionGroup::Addon, "Extra Cheese", 75, false, 1),
    ("opt-22", "prod-7", OptionGroup::Addon, "Bacon", 125, false, 2),
];

/// The full Los Pollos Hermanos menu: 8 categories (one inactive), 11 products, 22 options
#[must_use]
pub fn los_pollos() -> Menu {
    let categories = CATEGORIES
        .iter()
        .map(|&(id, name, description, sort_order, is_active, badge)| MenuCategory {
            id: CategoryId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            sort_order,
            is_active,
            badge,
        })
        .collect();

    let products = PRODUCTS
        .iter()
        .map(
            |&(id, category, name, description, cents, is_combo, sort_order)| Product {
                id: ProductId::new(id),
                category_id: CategoryId::new(category),
                name: name.to_string(),
                description: description.to_string(),
                base_price: Money::from_cents(cents),
                image_url: Some(format!("/images/products/{id}.png")),
                is_combo,
                is_active: true,
                sort_order,
            },
        )
        .collect();

    let options = OPTIONS
        .iter()
        .map(
            |&(id, product, group, label, cents, is_default, sort_order)| ProductOption {
                id: OptionId::new(id),
                product_id: ProductId::new(product),
                group,
                label: label.to_string(),
                extra_price: Money::from_cents(cents),
                is_default,
                sort_order,
            },
        )
        .collect();

    Menu {
        categories,
        products,
        options,
    }
}
