// quote: Quote data model (items, money, client details)

use serde::Deserialize;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use uuid::Uuid;

use crate::validation::{check_max_chars, check_required, Field, FieldError, ValidationErrors};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length of a line-item description
pub const MAX_ITEM_DESCRIPTION_CHARS: usize = 200;

/// Maximum length of the project description
pub const MAX_PROJECT_DESCRIPTION_CHARS: usize = 10_000;

// ============================================================================
// Money
// ============================================================================

/// A non-negative amount of US dollars, held as whole cents so sums are exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "f64")]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Line amount for `quantity` units at this price.
    pub fn times(self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl TryFrom<f64> for Money {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(format!("{} is not a valid amount", value));
        }
        if value < 0.0 {
            return Err(format!("amount cannot be negative: {}", value));
        }
        let cents = (value * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(format!("amount is too large: {}", value));
        }
        Ok(Money(cents as u64))
    }
}

impl FromStr for Money {
    type Err = String;

    /// Accepts `125`, `125.5`, `$1,250.00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        let value: f64 = cleaned
            .parse()
            .map_err(|_| format!("'{}' is not a valid amount", s.trim()))?;
        Money::try_from(value)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// en-US currency style: `$1,234.56`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.0 / 100).to_string();
        let cents = self.0 % 100;

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        write!(f, "${}.{:02}", grouped, cents)
    }
}

// ============================================================================
// Line Items
// ============================================================================

/// Opaque unique token identifying an item within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        ItemId(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Item as typed into the "add item" row, before it is accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewItem {
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub price: Money,
}

fn default_quantity() -> u32 {
    1
}

impl NewItem {
    pub fn new(description: impl Into<String>, quantity: u32, price: Money) -> Self {
        Self {
            description: description.into(),
            quantity,
            price,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if check_required(&mut errors, Field::ItemDescription, &self.description) {
            check_max_chars(
                &mut errors,
                Field::ItemDescription,
                &self.description,
                MAX_ITEM_DESCRIPTION_CHARS,
            );
        }
        if self.quantity == 0 {
            errors.add(FieldError::new(
                Field::ItemQuantity,
                "Quantity must be at least 1",
            ));
        }
        if self.price.is_zero() {
            errors.add(FieldError::new(
                Field::ItemPrice,
                "Price must be greater than zero",
            ));
        }

        errors.into_result()
    }
}

impl FromStr for NewItem {
    type Err = String;

    /// Parses `DESCRIPTION:QUANTITY:PRICE`. The description may itself
    /// contain colons; quantity and price are taken from the right.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ':');
        let price = parts.next();
        let quantity = parts.next();
        let description = parts.next();

        match (description, quantity, price) {
            (Some(description), Some(quantity), Some(price)) => {
                let quantity: u32 = quantity
                    .trim()
                    .parse()
                    .map_err(|_| format!("'{}' is not a valid quantity", quantity.trim()))?;
                let price: Money = price.parse()?;
                Ok(NewItem::new(description.trim(), quantity, price))
            }
            _ => Err(format!("expected DESCRIPTION:QUANTITY:PRICE, got '{}'", s)),
        }
    }
}

/// An accepted line item.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteItem {
    pub id: ItemId,
    pub description: String,
    pub quantity: u32,
    pub price: Money,
}

impl QuoteItem {
    pub fn amount(&self) -> Money {
        self.price.times(self.quantity)
    }
}

impl From<NewItem> for QuoteItem {
    fn from(item: NewItem) -> Self {
        QuoteItem {
            id: ItemId::new(),
            description: item.description.trim().to_string(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

pub fn total_of(items: &[QuoteItem]) -> Money {
    items.iter().map(QuoteItem::amount).sum()
}

// ============================================================================
// Client Details and Form
// ============================================================================

/// Client and project fields as entered on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientDetails {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub project_description: String,
}

impl ClientDetails {
    /// Collects every field problem into `errors`.
    pub fn check(&self, errors: &mut ValidationErrors) {
        check_required(errors, Field::CustomerName, &self.customer_name);

        if check_required(errors, Field::CustomerEmail, &self.customer_email)
            && !crate::validation::is_valid_email(self.customer_email.trim())
        {
            errors.add(FieldError::new(Field::CustomerEmail, "Invalid email address"));
        }

        check_required(errors, Field::CustomerPhone, &self.customer_phone);
        check_required(errors, Field::CustomerAddress, &self.customer_address);

        if check_required(errors, Field::ProjectDescription, &self.project_description) {
            check_max_chars(
                errors,
                Field::ProjectDescription,
                &self.project_description,
                MAX_PROJECT_DESCRIPTION_CHARS,
            );
        }
    }

    fn trimmed(self) -> Self {
        ClientDetails {
            customer_name: self.customer_name.trim().to_string(),
            customer_email: self.customer_email.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            customer_address: self.customer_address.trim().to_string(),
            project_description: self.project_description.trim().to_string(),
        }
    }
}

/// A submitted quote, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteForm {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub project_description: String,
    pub items: Vec<QuoteItem>,
}

impl QuoteForm {
    /// Builds a form from already-validated parts.
    pub(crate) fn from_parts(client: ClientDetails, items: Vec<QuoteItem>) -> Self {
        let client = client.trimmed();
        QuoteForm {
            customer_name: client.customer_name,
            customer_email: client.customer_email,
            customer_phone: client.customer_phone,
            customer_address: client.customer_address,
            project_description: client.project_description,
            items,
        }
    }

    pub fn total(&self) -> Money {
        total_of(&self.items)
    }
}
