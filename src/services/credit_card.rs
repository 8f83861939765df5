//! Credit card service

use chrono::NaiveDate;

use crate::audit::{generate_diff, EntityType};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{CreditCard, Money};
use crate::storage::{StoredRecord, Storage};

pub struct CreditCardService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateCreditCardInput {
    pub name: String,
    pub credit_limit: Money,
    pub used: Money,
    pub due_day: u32,
    pub closing_day: u32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCreditCardInput {
    pub name: Option<String>,
    pub credit_limit: Option<Money>,
    pub used: Option<Money>,
    pub due_day: Option<u32>,
    pub closing_day: Option<u32>,
}

impl<'a> CreditCardService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateCreditCardInput) -> FinboardResult<CreditCard> {
        let name = input.name.trim();
        if self.storage.credit_cards.find(name)?.is_some() {
            return Err(FinboardError::Validation(format!(
                "A card named '{}' already exists",
                name
            )));
        }

        let card = CreditCard::new(name, input.credit_limit, input.due_day, input.closing_day)
            .with_used(input.used);
        card.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;

        self.storage.credit_cards.upsert(card.clone())?;
        self.storage.credit_cards.save()?;

        self.storage.log_create(
            EntityType::CreditCard,
            card.id.to_string(),
            Some(card.name.clone()),
            &card.to_row(),
        )?;

        Ok(card)
    }

    /// Find a card by id or by name (case-insensitive)
    pub fn find(&self, identifier: &str) -> FinboardResult<Option<CreditCard>> {
        self.storage.credit_cards.find(identifier)
    }

    pub fn list(&self) -> FinboardResult<Vec<CreditCard>> {
        self.storage.credit_cards.get_all()
    }

    /// Cards whose bill falls due within `window_days` of `today`, soonest first
    pub fn due_soon(&self, today: NaiveDate, window_days: i64) -> FinboardResult<Vec<CreditCard>> {
        let mut cards: Vec<CreditCard> = self
            .list()?
            .into_iter()
            .filter(|c| c.is_due_soon(today, window_days))
            .collect();
        cards.sort_by_key(|c| c.days_until_due(today));
        Ok(cards)
    }

    pub fn update(
        &self,
        identifier: &str,
        input: UpdateCreditCardInput,
    ) -> FinboardResult<CreditCard> {
        let before = self
            .find(identifier)?
            .ok_or_else(|| FinboardError::card_not_found(identifier))?;
        let mut card = before.clone();

        if let Some(name) = input.name {
            card.name = name.trim().to_string();
        }
        if let Some(limit) = input.credit_limit {
            card.credit_limit = limit;
        }
        if let Some(used) = input.used {
            card.used = used;
        }
        if let Some(day) = input.due_day {
            card.due_day = day;
        }
        if let Some(day) = input.closing_day {
            card.closing_day = day;
        }

        card.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;

        self.storage.credit_cards.upsert(card.clone())?;
        self.storage.credit_cards.save()?;

        let before_row = before.to_row();
        let after_row = card.to_row();
        let diff = generate_diff(
            &serde_json::to_value(&before_row)?,
            &serde_json::to_value(&after_row)?,
        );
        self.storage.log_update(
            EntityType::CreditCard,
            card.id.to_string(),
            Some(card.name.clone()),
            &before_row,
            &after_row,
            diff,
        )?;

        Ok(card)
    }
}
