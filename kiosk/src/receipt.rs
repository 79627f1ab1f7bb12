//! Plain-text thermal receipt for a placed order.

use crate::types::{OrderNumber, SessionState};
use chrono::{DateTime, Utc};
use kiosk_core::money::Money;
use kiosk_core::step::{OrderType, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Columns of a 58 mm thermal printer
pub const RECEIPT_WIDTH: usize = 32;

const HEADER: &[&str] = &[
    "LOS POLLOS",
    "HERMANOS",
    "\"The Chicken Brothers\"",
    "",
    "308 Negra Arroyo Lane",
    "Albuquerque, NM 87104",
    "Tel: (505) 555-0123",
];

const FOOTER: &[&str] = &[
    "\u{2605} Thank You! \u{2605}",
    "\"Taste the Family Recipe\"",
    "Visit us at: www.lospollos.com",
    "Keep this receipt for refunds",
    "within 24 hours of purchase",
];

/// One cart line as printed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Product name
    pub name: String,
    /// Units
    pub quantity: u32,
    /// Price of one unit with options
    pub unit_price: Money,
    /// `unit_price × quantity`
    pub line_total: Money,
    /// Labels of the chosen options
    pub options: Vec<String>,
}

/// Receipt data captured from a session with a placed order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Counter number
    pub order_number: OrderNumber,
    /// When the order was placed
    pub placed_at: DateTime<Utc>,
    /// Customer name, `Guest` when none was given
    pub customer_name: String,
    /// Dine in or take away
    pub order_type: Option<OrderType>,
    /// Printed lines in cart order
    pub lines: Vec<ReceiptLine>,
    /// Sum of line totals
    pub subtotal: Money,
    /// Tax rate the totals were computed with
    pub tax_rate: Decimal,
    /// Tax on the subtotal
    pub tax: Money,
    /// Amount due
    pub total: Money,
    /// How the customer paid
    pub payment_method: Option<PaymentMethod>,
    /// Cash handed over, for cash payments
    pub cash_tendered: Option<Money>,
}

impl Receipt {
    /// Builds the receipt for the session's order, or `None` before one is placed
    #[must_use]
    pub fn from_session(state: &SessionState, tax_rate: Decimal) -> Option<Self> {
        let order = state.order.as_ref()?;
        let totals = state.totals(tax_rate);
        let customer_name = match state.customer_name.trim() {
            "" => "Guest".to_string(),
            name => name.to_string(),
        };
        let lines = state
            .cart
            .items()
            .iter()
            .map(|item| ReceiptLine {
                name: item.product().name.clone(),
                quantity: item.quantity(),
                unit_price: item.unit_price(),
                line_total: item.total_price(),
                options: item
                    .selected_options()
                    .iter()
                    .map(|option| option.label.clone())
                    .collect(),
            })
            .collect();

        Some(Self {
            order_number: order.order_number.clone(),
            placed_at: order.placed_at,
            customer_name,
            order_type: state.order_type,
            lines,
            subtotal: totals.subtotal,
            tax_rate,
            tax: totals.tax,
            total: totals.total,
            payment_method: state.payment_method,
            cash_tendered: None,
        })
    }

    /// Records the cash handed over. Ignored for other payment methods.
    #[must_use]
    pub fn with_cash_tendered(mut self, amount: Money) -> Self {
        if self.payment_method == Some(PaymentMethod::Cash) {
            self.cash_tendered = Some(amount);
        }
        self
    }

    /// Cash to hand back, rounded to cents
    #[must_use]
    pub fn change(&self) -> Option<Money> {
        self.cash_tendered
            .map(|tendered| (tendered - self.total).rounded())
    }

    /// Fixed-width text, [`RECEIPT_WIDTH`] columns on the kiosk printer
    #[must_use]
    pub fn render_text(&self, width: usize) -> String {
        let mut out = String::new();
        let divider = "-".repeat(width);
        let order_type = match self.order_type {
            Some(OrderType::DineIn) => "DINE IN",
            _ => "TAKE AWAY",
        };

        for line in HEADER {
            push_line(&mut out, &center(line, width));
        }
        push_line(&mut out, &divider);

        push_line(&mut out, &row("Order #:", self.order_number.as_str(), width));
        push_line(
            &mut out,
            &row("Date:", &self.placed_at.format("%b %-d, %Y").to_string(), width),
        );
        push_line(
            &mut out,
            &row("Time:", &self.placed_at.format("%I:%M %p").to_string(), width),
        );
        push_line(&mut out, &row("Customer:", &self.customer_name, width));
        push_line(&mut out, &row("Type:", order_type, width));
        push_line(&mut out, &divider);

        push_line(&mut out, &row("Item", "Amount", width));
        for line in &self.lines {
            push_line(&mut out, &row(&line.name, &line.line_total.to_string(), width));
            push_line(
                &mut out,
                &format!("  {} x {}", line.quantity, line.unit_price),
            );
            for option in &line.options {
                for (i, part) in wrap(option, width.saturating_sub(4)).iter().enumerate() {
                    let marker = if i == 0 { "  + " } else { "    " };
                    push_line(&mut out, &format!("{marker}{part}"));
                }
            }
        }
        push_line(&mut out, &divider);

        let tax_label = format!("Tax ({}%):", (self.tax_rate * Decimal::ONE_HUNDRED).normalize());
        push_line(&mut out, &row("Subtotal:", &self.subtotal.to_string(), width));
        push_line(&mut out, &row(&tax_label, &self.tax.to_string(), width));
        push_line(&mut out, &row("TOTAL:", &self.total.to_string(), width));
        push_line(&mut out, &divider);

        let payment = self
            .payment_method
            .map_or_else(|| "-".to_string(), |method| method.as_str().to_uppercase());
        push_line(&mut out, &row("Payment:", &payment, width));
        if let (Some(tendered), Some(change)) = (self.cash_tendered, self.change()) {
            push_line(&mut out, &row("Cash Received:", &tendered.to_string(), width));
            push_line(&mut out, &row("Change:", &change.to_string(), width));
        }
        push_line(&mut out, &divider);

        for line in FOOTER {
            push_line(&mut out, &center(line, width));
        }
        push_line(&mut out, "");
        push_line(&mut out, &center(self.order_number.as_str(), width));
        push_line(&mut out, &center(&format!("[ {order_type} ]"), width));
        out
    }
}

fn push_line(out: &mut String, line: &str) {
    let _ = writeln!(out, "{}", line.trim_end());
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let pad = width.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(pad))
}

/// `left` and `right` pushed to opposite edges, at least one space apart.
///
/// When they do not fit together a short `right` stays on the last line of the
/// wrapped `left`; a long one gets its own right-aligned lines.
fn row(left: &str, right: &str, width: usize) -> String {
    let left_len = left.chars().count();
    let right_len = right.chars().count();
    if left_len + right_len < width {
        return format!("{left}{}{right}", " ".repeat(width - left_len - right_len));
    }

    if right_len <= width / 2 {
        let mut parts = wrap(left, width.saturating_sub(right_len + 1));
        let last = parts.pop().unwrap_or_default();
        let gap = width.saturating_sub(last.chars().count() + right_len).max(1);
        parts.push(format!("{last}{}{right}", " ".repeat(gap)));
        return parts.join("\n");
    }

    let mut parts = wrap(left, width);
    parts.extend(
        wrap(right, width)
            .into_iter()
            .map(|part| format!("{part:>width$}")),
    );
    parts.join("\n")
}

/// Word-wraps `text` to lines of at most `width` characters, splitting words
/// that are longer than a line
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
