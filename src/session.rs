// session: Editable quote state between sign-in and submission

use tracing::debug;

use crate::auth::AccessGate;
use crate::error::{AppError, Result};
use crate::quote::{total_of, ClientDetails, ItemId, Money, NewItem, QuoteForm, QuoteItem};
use crate::validation::{Field, FieldError, ValidationErrors};

/// Item list being edited by a signed-in admin.
#[derive(Debug, Default)]
pub struct QuoteSession {
    items: Vec<QuoteItem>,
}

impl QuoteSession {
    pub fn start(gate: &AccessGate) -> Result<Self> {
        if !gate.is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }
        Ok(Self::default())
    }

    pub fn add_item(&mut self, item: NewItem) -> Result<&QuoteItem> {
        item.validate()?;
        let item = QuoteItem::from(item);
        debug!(id = %item.id, description = %item.description, amount = %item.amount(), "added item");
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Adds every valid item and reports the rejected ones, numbered from 1
    /// in input order.
    pub fn add_items(&mut self, items: impl IntoIterator<Item = NewItem>) -> ValidationErrors {
        let mut rejected = ValidationErrors::new();
        for (index, item) in items.into_iter().enumerate() {
            if let Err(AppError::Validation(errors)) = self.add_item(item) {
                for error in errors.errors() {
                    rejected.add(FieldError::new(
                        error.field,
                        format!("Item {}: {}", index + 1, error.message),
                    ));
                }
            }
        }
        rejected
    }

    pub fn remove_item(&mut self, id: &ItemId) -> Option<QuoteItem> {
        let index = self.items.iter().position(|item| item.id == *id)?;
        Some(self.items.remove(index))
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        total_of(&self.items)
    }

    /// Validates the client fields together with the item list. On success
    /// the items move into the returned form and the session is empty again.
    pub fn submit(&mut self, client: ClientDetails) -> Result<QuoteForm> {
        self.submit_with(client, ValidationErrors::new())
    }

    /// Like `submit`, reporting `errors` (e.g. rejected items) together with
    /// the form's own errors.
    pub fn submit_with(
        &mut self,
        client: ClientDetails,
        mut errors: ValidationErrors,
    ) -> Result<QuoteForm> {
        client.check(&mut errors);
        if self.items.is_empty() {
            errors.add(FieldError::new(
                Field::Items,
                "Please add at least one item to the quote.",
            ));
        }
        errors.into_result()?;

        let items = std::mem::take(&mut self.items);
        Ok(QuoteForm::from_parts(client, items))
    }
}
