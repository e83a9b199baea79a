//! User settings for the finance tracker
//!
//! Settings are a flat key-value mapping persisted in `settings.json`,
//! independent of the record collections. Keys the user never set fall back
//! to built-in defaults (category lists, currency, locale).

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;
use crate::storage::file_io::{read_json, write_json_atomic};

pub const CATEGORIES_KEY: &str = "categories";
pub const CURRENCY_KEY: &str = "currency";
pub const LOCALE_KEY: &str = "locale";

const DEFAULT_CURRENCY: &str = "EUR";
const DEFAULT_LOCALE: &str = "fr-FR";

const DEFAULT_INCOME_CATEGORIES: &[&str] = &[
    "Salaire",
    "Freelance",
    "Cadeaux",
    "Remboursements",
    "Autres revenus",
];

const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Logement",
    "Alimentation",
    "Transport",
    "Loisirs",
    "Santé",
    "Éducation",
    "Habillement",
    "Factures",
    "Épargne",
    "Divers",
];

/// Category labels offered for each transaction type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLists {
    pub income: Vec<String>,
    pub expense: Vec<String>,
}

impl Default for CategoryLists {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            expense: DEFAULT_EXPENSE_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Built-in values for every well-known key
pub fn default_settings() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert(CATEGORIES_KEY.into(), json!(CategoryLists::default()));
    defaults.insert(CURRENCY_KEY.into(), json!(DEFAULT_CURRENCY));
    defaults.insert(LOCALE_KEY.into(), json!(DEFAULT_LOCALE));
    defaults
}

/// Persistent key-value settings store
pub struct SettingsStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl SettingsStore {
    /// Create a store backed by `path`; nothing is read until `load`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            values: RwLock::new(Map::new()),
        }
    }

    /// Load stored keys from disk (missing file means no stored keys)
    pub fn load(&self) -> FinanceResult<()> {
        let stored: Map<String, Value> = read_json(&self.path)
            .map_err(|e| FinanceError::Config(format!("Failed to load settings: {}", e)))?;

        let mut values = self.write_lock()?;
        *values = stored;
        Ok(())
    }

    /// Current mapping: stored keys layered over the defaults
    pub fn get_all(&self) -> FinanceResult<Map<String, Value>> {
        let values = self.read_lock()?;
        let mut merged = default_settings();
        for (key, value) in values.iter() {
            merged.insert(key.clone(), value.clone());
        }
        Ok(merged)
    }

    /// Look up a single key, falling back to its default
    pub fn get(&self, key: &str) -> FinanceResult<Option<Value>> {
        let values = self.read_lock()?;
        Ok(values
            .get(key)
            .cloned()
            .or_else(|| default_settings().remove(key)))
    }

    /// Set every key of `changes`, persist, and return the current mapping
    ///
    /// Nothing changes in memory unless the file was written.
    pub fn update(&self, changes: Map<String, Value>) -> FinanceResult<Map<String, Value>> {
        {
            let mut values = self.write_lock()?;
            let mut next = values.clone();
            for (key, value) in changes {
                next.insert(key, value);
            }
            write_json_atomic(&self.path, &next)?;
            *values = next;
        }
        tracing::debug!(path = %self.path.display(), "settings updated");
        self.get_all()
    }

    /// Forget every stored key; defaults apply again afterwards
    pub fn clear(&self) -> FinanceResult<()> {
        let mut values = self.write_lock()?;
        write_json_atomic(&self.path, &Map::new())?;
        values.clear();
        Ok(())
    }

    /// Whether any key has been stored
    pub fn is_empty(&self) -> FinanceResult<bool> {
        Ok(self.read_lock()?.is_empty())
    }

    pub fn categories(&self) -> FinanceResult<CategoryLists> {
        match self.get(CATEGORIES_KEY)? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                FinanceError::Config(format!("Invalid '{}' setting: {}", CATEGORIES_KEY, e))
            }),
            None => Ok(CategoryLists::default()),
        }
    }

    pub fn currency(&self) -> FinanceResult<String> {
        self.string_setting(CURRENCY_KEY, DEFAULT_CURRENCY)
    }

    pub fn locale(&self) -> FinanceResult<String> {
        self.string_setting(LOCALE_KEY, DEFAULT_LOCALE)
    }

    /// Configured currency and locale, for formatting many amounts
    pub fn currency_format(&self) -> FinanceResult<CurrencyFormat> {
        Ok(CurrencyFormat {
            currency: self.currency()?,
            locale: self.locale()?,
        })
    }

    /// Format an amount with the configured currency and locale
    pub fn format_currency(&self, amount: Money) -> FinanceResult<String> {
        Ok(self.currency_format()?.format(amount))
    }

    fn string_setting(&self, key: &str, default: &str) -> FinanceResult<String> {
        match self.get(key)? {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(FinanceError::Config(format!(
                "Setting '{}' must be a string, got {}",
                key, other
            ))),
            None => Ok(default.to_string()),
        }
    }

    fn read_lock(&self) -> FinanceResult<std::sync::RwLockReadGuard<'_, Map<String, Value>>> {
        self.values
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> FinanceResult<std::sync::RwLockWriteGuard<'_, Map<String, Value>>> {
        self.values
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

/// Currency code and locale used to render amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub currency: String,
    pub locale: String,
}

impl CurrencyFormat {
    pub fn format(&self, amount: Money) -> String {
        format_currency(amount, &self.currency, &self.locale)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Format an amount for a currency code and locale tag
///
/// French-style locales group thousands with spaces, use a decimal comma and
/// put the symbol after the amount; other locales use `1,234.50` with a
/// leading symbol.
pub fn format_currency(amount: Money, currency: &str, locale: &str) -> String {
    let symbol = match currency.to_uppercase().as_str() {
        "EUR" => "€".to_string(),
        "USD" => "$".to_string(),
        "GBP" => "£".to_string(),
        other => other.to_string(),
    };
    let sign = if amount.is_negative() { "-" } else { "" };
    let units = amount.units().abs();
    let cents = amount.cents_part();

    if locale.to_lowercase().starts_with("fr") {
        format!("{}{},{:02} {}", sign, group_thousands(units, ' '), cents, symbol)
    } else {
        format!("{}{}{}.{:02}", sign, symbol, group_thousands(units, ','), cents)
    }
}

fn group_thousands(value: i64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}
