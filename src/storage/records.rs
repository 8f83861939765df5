//! Stored row shapes and the decode boundary
//!
//! Files hold rows in the backend's table layout: snake_case columns, plain
//! JSON numbers for amounts, the transaction kind under `type`, and
//! installments either as an object or as a JSON-encoded string. Rows are
//! turned into typed records here and nowhere else; a row that cannot be
//! decoded yields a `DecodeError` instead of a half-filled record.

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, NaiveDate};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::FinboardError;
use crate::models::{
    CreditCard, CreditCardId, DatedPayable, Installments, Money, MonthKey, PayableId, PayableItem,
    PaymentMethod, Transaction, TransactionId, TransactionKind, TransactionStatus,
};

/// Why a stored row was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Record kind, e.g. "transaction"
    pub kind: &'static str,
    /// Row id when it could be read
    pub id: Option<String>,
    pub reason: String,
}

impl DecodeError {
    fn new(kind: &'static str, id: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.map(str::to_string),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} row {}: {}", self.kind, id, self.reason),
            None => write!(f, "{} row: {}", self.kind, self.reason),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<DecodeError> for FinboardError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A typed record that the store keeps as a row
pub trait StoredRecord: Clone + Sized {
    type Id: Copy + Eq + Hash + fmt::Display;
    type Row: Serialize + DeserializeOwned;

    /// Lowercase record kind used in messages and logs
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Whether a user-typed identifier (full or short id) names this record
    fn matches_id(&self, identifier: &str) -> bool;

    fn to_row(&self) -> Self::Row;

    fn from_row(row: Self::Row) -> Result<Self, DecodeError>;

    /// Decode one untyped row value
    fn decode(value: Value) -> Result<Self, DecodeError> {
        let id = value.get("id").and_then(Value::as_str).map(str::to_string);
        let row: Self::Row = serde_json::from_value(value)
            .map_err(|e| DecodeError::new(Self::KIND, id.as_deref(), e.to_string()))?;
        Self::from_row(row)
    }
}

fn parse_id<T: std::str::FromStr>(kind: &'static str, id: &str) -> Result<T, DecodeError> {
    id.parse()
        .map_err(|_| DecodeError::new(kind, Some(id), "id is not a valid UUID"))
}

fn parse_amount(kind: &'static str, id: &str, field: &str, value: f64) -> Result<Money, DecodeError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DecodeError::new(
            kind,
            Some(id),
            format!("{} must be a non-negative number, got {}", field, value),
        ));
    }
    Money::from_f64_checked(value).ok_or_else(|| {
        DecodeError::new(
            kind,
            Some(id),
            format!("{} is out of range, got {}", field, value),
        )
    })
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (its UTC date is used)
fn parse_date(kind: &'static str, id: &str, raw: &str) -> Result<NaiveDate, DecodeError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc().date())
        .map_err(|_| DecodeError::new(kind, Some(id), format!("invalid date '{}'", raw)))
}

fn parse_status(kind: &'static str, id: &str, raw: &str) -> Result<TransactionStatus, DecodeError> {
    TransactionStatus::parse(raw)
        .ok_or_else(|| DecodeError::new(kind, Some(id), format!("unknown status '{}'", raw)))
}

/// Installments may arrive as an object, a JSON-encoded string, or null
fn parse_installments(id: &str, raw: Option<Value>) -> Result<Option<Installments>, DecodeError> {
    let invalid = |reason: String| DecodeError::new(TRANSACTION, Some(id), reason);

    let installments: Installments = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(encoded)) if encoded.trim().is_empty() => return Ok(None),
        Some(Value::String(encoded)) => serde_json::from_str(&encoded)
            .map_err(|e| invalid(format!("invalid installments '{}': {}", encoded, e)))?,
        Some(value) => serde_json::from_value(value)
            .map_err(|e| invalid(format!("invalid installments: {}", e)))?,
    };

    if !installments.is_valid() {
        return Err(invalid(format!("installment {} out of range", installments)));
    }
    Ok(Some(installments))
}

const TRANSACTION: &str = "transaction";
const PAYABLE: &str = "payable";
const CREDIT_CARD: &str = "credit card";

/// Row layout of the `transactions` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub amount: f64,
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub payment_method: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<Value>,
}

impl StoredRecord for Transaction {
    type Id = TransactionId;
    type Row = TransactionRow;

    const KIND: &'static str = TRANSACTION;

    fn id(&self) -> TransactionId {
        self.id
    }

    fn matches_id(&self, identifier: &str) -> bool {
        self.id.matches(identifier)
    }

    fn to_row(&self) -> TransactionRow {
        TransactionRow {
            id: self.id.to_string(),
            date: self.date.format("%Y-%m-%d").to_string(),
            amount: self.amount.as_f64(),
            description: self.description.clone(),
            category: self.category.clone(),
            kind: self.kind.as_str().to_string(),
            payment_method: self.payment_method.as_str().to_string(),
            status: self.status.as_str().to_string(),
            installments: self
                .installments
                .and_then(|i| serde_json::to_value(i).ok()),
        }
    }

    fn from_row(row: TransactionRow) -> Result<Self, DecodeError> {
        let id: TransactionId = parse_id(TRANSACTION, &row.id)?;
        let kind = TransactionKind::parse(&row.kind).ok_or_else(|| {
            DecodeError::new(TRANSACTION, Some(&row.id), format!("unknown type '{}'", row.kind))
        })?;
        let payment_method = PaymentMethod::parse(&row.payment_method).ok_or_else(|| {
            DecodeError::new(
                TRANSACTION,
                Some(&row.id),
                format!("unknown payment method '{}'", row.payment_method),
            )
        })?;

        let mut txn = Transaction::with_id(
            id,
            parse_date(TRANSACTION, &row.id, &row.date)?,
            parse_amount(TRANSACTION, &row.id, "amount", row.amount)?,
            kind,
        );
        txn.description = row.description;
        txn.category = row.category;
        txn.payment_method = payment_method;
        txn.status = parse_status(TRANSACTION, &row.id, &row.status)?;
        txn.installments = parse_installments(&row.id, row.installments)?;
        Ok(txn)
    }
}

/// Row layout of the `to_be_paid` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayableRow {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub status: String,
    /// Zero-based month
    pub month: u32,
    pub year: i32,
}

impl StoredRecord for DatedPayable {
    type Id = PayableId;
    type Row = PayableRow;

    const KIND: &'static str = PAYABLE;

    fn id(&self) -> PayableId {
        self.item.id
    }

    fn matches_id(&self, identifier: &str) -> bool {
        self.item.id.matches(identifier)
    }

    fn to_row(&self) -> PayableRow {
        PayableRow {
            id: self.item.id.to_string(),
            description: self.item.description.clone(),
            amount: self.item.amount.as_f64(),
            status: self.item.status.as_str().to_string(),
            month: self.month.month,
            year: self.month.year,
        }
    }

    fn from_row(row: PayableRow) -> Result<Self, DecodeError> {
        let month = MonthKey::new(row.year, row.month);
        if !month.is_valid() {
            return Err(DecodeError::new(
                PAYABLE,
                Some(&row.id),
                format!("month {} is outside 0-11", row.month),
            ));
        }
        let item = PayableItem {
            id: parse_id(PAYABLE, &row.id)?,
            amount: parse_amount(PAYABLE, &row.id, "amount", row.amount)?,
            status: parse_status(PAYABLE, &row.id, &row.status)?,
            description: row.description,
        };
        Ok(DatedPayable::new(month, item))
    }
}

/// Row layout of the `credit_cards` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardRow {
    pub id: String,
    pub name: String,
    pub credit_limit: f64,
    pub used: f64,
    pub due_date: u32,
    pub closing_date: u32,
}

impl StoredRecord for CreditCard {
    type Id = CreditCardId;
    type Row = CreditCardRow;

    const KIND: &'static str = CREDIT_CARD;

    fn id(&self) -> CreditCardId {
        self.id
    }

    fn matches_id(&self, identifier: &str) -> bool {
        self.id.matches(identifier) || self.name.eq_ignore_ascii_case(identifier.trim())
    }

    fn to_row(&self) -> CreditCardRow {
        CreditCardRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            credit_limit: self.credit_limit.as_f64(),
            used: self.used.as_f64(),
            due_date: self.due_day,
            closing_date: self.closing_day,
        }
    }

    fn from_row(row: CreditCardRow) -> Result<Self, DecodeError> {
        let card = CreditCard {
            id: parse_id(CREDIT_CARD, &row.id)?,
            credit_limit: parse_amount(CREDIT_CARD, &row.id, "credit_limit", row.credit_limit)?,
            used: parse_amount(CREDIT_CARD, &row.id, "used", row.used)?,
            due_day: row.due_date,
            closing_day: row.closing_date,
            name: row.name,
        };
        card.validate()
            .map_err(|e| DecodeError::new(CREDIT_CARD, Some(&row.id), e.to_string()))?;
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn transaction_row() -> Value {
        json!({
            "id": ID,
            "date": "2025-03-14T15:00:00.000Z",
            "amount": 89.9,
            "description": "Pizza",
            "category": "Food",
            "type": "expense",
            "payment_method": "C6 Bank",
            "status": "paid",
            "installments": "{\"current\":2,\"total\":3}",
            "user_id": "ignored"
        })
    }

    #[test]
    fn test_decode_transaction_with_encoded_installments() {
        let txn = Transaction::decode(transaction_row()).unwrap();
        assert_eq!(txn.id.to_string(), ID);
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(txn.amount, Money::from_cents(8990));
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.payment_method, PaymentMethod::C6Bank);
        assert_eq!(txn.status, TransactionStatus::Paid);
        assert_eq!(txn.installments, Some(Installments::new(2, 3)));
    }

    #[test]
    fn test_decode_transaction_with_object_installments() {
        let mut row = transaction_row();
        row["installments"] = json!({"current": 1, "total": 12});
        row["date"] = json!("2025-03-14");
        let txn = Transaction::decode(row).unwrap();
        assert_eq!(txn.installments, Some(Installments::new(1, 12)));
    }

    #[test]
    fn test_decode_transaction_without_installments() {
        let mut row = transaction_row();
        row["installments"] = Value::Null;
        assert_eq!(Transaction::decode(row).unwrap().installments, None);
    }

    #[test]
    fn test_decode_rejects_bad_rows() {
        let mut row = transaction_row();
        row["type"] = json!("transfer");
        let err = Transaction::decode(row).unwrap_err();
        assert_eq!(err.id.as_deref(), Some(ID));
        assert!(err.reason.contains("transfer"));

        let mut row = transaction_row();
        row["amount"] = json!(-5);
        assert!(Transaction::decode(row).is_err());

        let mut row = transaction_row();
        row["installments"] = json!("{\"current\":4,\"total\":3}");
        assert!(Transaction::decode(row).is_err());

        let mut row = transaction_row();
        row["date"] = json!("14/03/2025");
        assert!(Transaction::decode(row).is_err());

        let mut row = transaction_row();
        row.as_object_mut().unwrap().remove("description");
        let err = Transaction::decode(row).unwrap_err();
        assert_eq!(err.kind, "transaction");
    }

    #[test]
    fn test_decode_rejects_out_of_range_amounts() {
        for amount in [json!(1e17), json!(1e300), json!(100_000_000_000.01)] {
            let mut row = transaction_row();
            row["type"] = json!("income");
            row["amount"] = amount;
            let err = Transaction::decode(row).unwrap_err();
            assert!(err.reason.contains("out of range"));
        }
    }

    #[test]
    fn test_amounts_at_max_decode_and_sum() {
        let rows: Vec<Transaction> = (0..3)
            .map(|_| {
                let mut row = transaction_row();
                row["type"] = json!("income");
                row["amount"] = json!(1e11);
                Transaction::decode(row).unwrap()
            })
            .collect();
        assert_eq!(rows[0].amount, Money::MAX);

        let buckets = crate::engine::bucket_by_month(&rows, &[]);
        let summary = crate::engine::summarize(&buckets[0]);
        assert_eq!(summary.income, Money::from_cents(Money::MAX.cents() * 3));
    }

    #[test]
    fn test_transaction_row_round_trip_keeps_wire_names() {
        let txn = Transaction::decode(transaction_row()).unwrap();
        let row = serde_json::to_value(txn.to_row()).unwrap();
        assert_eq!(row["type"], "expense");
        assert_eq!(row["payment_method"], "C6 Bank");
        assert_eq!(row["installments"], json!({"current": 2, "total": 3}));
        assert_eq!(Transaction::decode(row).unwrap(), txn);
    }

    #[test]
    fn test_decode_payable() {
        let row = json!({
            "id": ID,
            "description": "Water bill",
            "amount": 150,
            "status": "pending",
            "month": 0,
            "year": 2025
        });
        let payable = DatedPayable::decode(row).unwrap();
        assert_eq!(payable.month, MonthKey::new(2025, 0));
        assert_eq!(payable.item.amount, Money::from_units(150));
        assert!(payable.item.is_outstanding());
    }

    #[test]
    fn test_decode_payable_rejects_month_twelve() {
        let row = json!({
            "id": ID, "description": "x", "amount": 1, "status": "paid", "month": 12, "year": 2025
        });
        assert!(DatedPayable::decode(row).is_err());
    }

    #[test]
    fn test_decode_credit_card() {
        let row = json!({
            "id": ID,
            "name": "Nubank",
            "credit_limit": 5000,
            "used": 2300.5,
            "due_date": 10,
            "closing_date": 3
        });
        let card = CreditCard::decode(row).unwrap();
        assert_eq!(card.used, Money::from_cents(230_050));
        assert_eq!(card.due_day, 10);
        assert!(card.matches_id("nubank"));

        let bad = json!({
            "id": ID, "name": "Inter", "credit_limit": 0, "used": 0, "due_date": 10, "closing_date": 3
        });
        assert!(CreditCard::decode(bad).is_err());
    }
}
