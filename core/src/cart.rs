//! The shopping cart and its pricing.
//!
//! Lines are kept in insertion order, which is also display order. Totals are
//! derived on demand with [`Cart::totals`] and never stored, so they can not
//! drift from the lines.

use crate::menu::{OptionGroup, OptionId, Product, ProductId, ProductOption, string_id};
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

string_id!(
    /// Identifier of a cart line
    CartItemId
);

/// One line of the cart: a product, its chosen options and a quantity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    id: CartItemId,
    product: Product,
    selected_options: Vec<ProductOption>,
    quantity: u32,
    unit_price: Money,
    total_price: Money,
}

/// Total order over options; ties on group and position fall through to the payload
fn option_key(
    option: &ProductOption,
) -> (OptionGroup, u32, &OptionId, Money, &str, &ProductId, bool) {
    (
        option.group,
        option.sort_order,
        &option.id,
        option.extra_price,
        option.label.as_str(),
        &option.product_id,
        option.is_default,
    )
}

impl CartItem {
    /// Prices a new line. Options are stored sorted by group and sort order,
    /// so the same selection always yields the same line.
    ///
    /// Returns `None` when `quantity` is zero.
    #[must_use]
    pub fn new(
        id: CartItemId,
        product: Product,
        mut options: Vec<ProductOption>,
        quantity: u32,
    ) -> Option<Self> {
        if quantity == 0 {
            return None;
        }
        options.sort_by(|a, b| option_key(a).cmp(&option_key(b)));
        let unit_price = product.base_price + options.iter().map(|o| o.extra_price).sum::<Money>();
        Some(Self {
            id,
            product,
            selected_options: options,
            quantity,
            unit_price,
            total_price: unit_price.times(quantity),
        })
    }

    /// Line id
    #[must_use]
    pub const fn id(&self) -> &CartItemId {
        &self.id
    }

    /// Product snapshot taken when the line was added
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Chosen options
    #[must_use]
    pub fn selected_options(&self) -> &[ProductOption] {
        &self.selected_options
    }

    /// Number of units
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Base price plus option extras
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `unit_price × quantity`
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = self.unit_price.times(quantity);
    }
}

/// Derived cart figures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line totals
    pub subtotal: Money,
    /// `subtotal × tax rate`, unrounded
    pub tax: Money,
    /// `subtotal + tax`
    pub total: Money,
    /// Sum of quantities
    pub item_count: u32,
}

/// Ordered collection of cart lines
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in display order
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// True when there are no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a line by id
    #[must_use]
    pub fn get(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// First line holding `product_id`
    #[must_use]
    pub fn find_by_product(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    /// Appends a new line. Identical products are never merged.
    ///
    /// Returns the new line, or `None` (cart unchanged) when `quantity` is zero.
    pub fn add(
        &mut self,
        id: CartItemId,
        product: Product,
        options: Vec<ProductOption>,
        quantity: u32,
    ) -> Option<&CartItem> {
        let item = CartItem::new(id, product, options, quantity)?;
        self.items.push(item);
        self.items.last()
    }

    /// Sets the quantity of a line; zero removes it.
    ///
    /// Returns false when no line has `id`.
    pub fn update(&mut self, id: &CartItemId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.set_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Deletes a line. Returns false when no line has `id`.
    pub fn remove(&mut self, id: &CartItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Removes every line
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line totals
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::total_price).sum()
    }

    /// Sum of quantities
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(CartItem::quantity).sum()
    }

    /// Subtotal, tax at `tax_rate`, total and item count
    #[must_use]
    pub fn totals(&self, tax_rate: Decimal) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.apply_rate(tax_rate);
        CartTotals {
            subtotal,
            tax,
            total: subtotal + tax,
            item_count: self.item_count(),
        }
    }
}
