//! Menu reference data: categories, products and their options.
//!
//! Products and options are immutable once loaded. A cart line keeps its own
//! copy of the product (see [`crate::cart::CartItem`]), so later menu changes
//! never reprice an order in progress.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a string identifier newtype with `new`, `as_str` and `Display`.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new `", stringify!($name), "`")]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the inner string value
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

pub(crate) use string_id;

string_id!(
    /// Identifier of a menu category (`cat-1`)
    CategoryId
);
string_id!(
    /// Identifier of a product (`prod-1`)
    ProductId
);
string_id!(
    /// Identifier of a product option (`opt-1`)
    OptionId
);

/// Highlight shown on a category tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryBadge {
    /// Recently added
    New,
    /// Best seller
    Popular,
}

/// A menu category
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    /// Category identifier
    pub id: CategoryId,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Position in the category list
    pub sort_order: u32,
    /// Inactive categories are hidden from the kiosk
    pub is_active: bool,
    /// Optional highlight
    pub badge: Option<CategoryBadge>,
}

/// A sellable product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,
    /// Owning category
    pub category_id: CategoryId,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Price before options
    pub base_price: Money,
    /// Image reference, if any
    pub image_url: Option<String>,
    /// Whether the product is a combo meal
    pub is_combo: bool,
    /// Inactive products are hidden from the kiosk
    pub is_active: bool,
    /// Position within its category
    pub sort_order: u32,
}

/// Kind of customization an option belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionGroup {
    /// Portion size
    Size,
    /// Side dish
    Side,
    /// Drink choice
    Drink,
    /// Dipping sauce
    Sauce,
    /// Paid extra
    Addon,
}

impl fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Size => "size",
            Self::Side => "side",
            Self::Drink => "drink",
            Self::Sauce => "sauce",
            Self::Addon => "addon",
        };
        f.write_str(name)
    }
}

/// A customization of a product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option identifier
    pub id: OptionId,
    /// Product this option belongs to
    pub product_id: ProductId,
    /// Option group
    pub group: OptionGroup,
    /// Display label
    pub label: String,
    /// Price delta applied per unit; may be negative
    pub extra_price: Money,
    /// Preselected when the product is opened
    pub is_default: bool,
    /// Position within its group
    pub sort_order: u32,
}

/// The catalog a kiosk sells from
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// All categories, active or not
    pub categories: Vec<MenuCategory>,
    /// All products, active or not
    pub products: Vec<Product>,
    /// All options of all products
    pub options: Vec<ProductOption>,
}

impl Menu {
    /// Active categories in display order
    #[must_use]
    pub fn active_categories(&self) -> Vec<&MenuCategory> {
        let mut categories: Vec<_> = self.categories.iter().filter(|c| c.is_active).collect();
        categories.sort_by_key(|c| c.sort_order);
        categories
    }

    /// Active products of a category in display order
    #[must_use]
    pub fn products_in_category(&self, category_id: &CategoryId) -> Vec<&Product> {
        let mut products: Vec<_> = self
            .products
            .iter()
            .filter(|p| p.is_active && &p.category_id == category_id)
            .collect();
        products.sort_by_key(|p| p.sort_order);
        products
    }

    /// Looks up a product by id
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Options of a product, grouped and in display order
    #[must_use]
    pub fn options_for(&self, product_id: &ProductId) -> Vec<&ProductOption> {
        let mut options: Vec<_> = self
            .options
            .iter()
            .filter(|o| &o.product_id == product_id)
            .collect();
        options.sort_by_key(|o| (o.group, o.sort_order));
        options
    }

    /// Options preselected for a product
    #[must_use]
    pub fn default_options(&self, product_id: &ProductId) -> Vec<ProductOption> {
        self.options_for(product_id)
            .into_iter()
            .filter(|o| o.is_default)
            .cloned()
            .collect()
    }
}
