//! Domain type for a single expense entry.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category tags offered by the add form. Any other text is accepted too.
pub const DEFAULT_CATEGORIES: [&str; 2] = ["Personal", "Business"];

/// One expense entry. Immutable once built: fields are only readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    id: Uuid,
    name: String,
    category: String,
    amount: f64,
}

impl ExpenseRecord {
    /// Builds a record with a freshly generated identifier.
    pub fn new(name: impl Into<String>, category: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            amount,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Name and category, as shown in pickers and logs.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.display_label(), self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_get_distinct_ids() {
        let a = ExpenseRecord::new("Lunch", "Personal", 5.0);
        let b = ExpenseRecord::new("Lunch", "Personal", 5.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn core_accepts_free_form_values() {
        let record = ExpenseRecord::new("", "travel", -3.5);
        assert_eq!(record.name(), "");
        assert_eq!(record.category(), "travel");
        assert_eq!(record.amount(), -3.5);
    }

    #[test]
    fn display_includes_label_and_amount() {
        let record = ExpenseRecord::new("Taxi", "travel", 12.0);
        assert_eq!(record.to_string(), "Taxi (travel) 12.00");
    }
}
