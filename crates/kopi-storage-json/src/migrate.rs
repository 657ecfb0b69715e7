//! Schema upgrades applied to raw snapshot JSON before typed decoding.

use serde_json::{Map, Value};
use tracing::{info, warn};

use kopi_core::CoreError;
use kopi_domain::{
    generate_id, is_valid_payment_day, parse_amount, parse_payment_day, ExpenseKind, Income,
    CURRENT_SCHEMA_VERSION,
};

const SCHEMA_FIELD: &str = "schemaVersion";

/// Snapshot JSON brought up to [`CURRENT_SCHEMA_VERSION`].
#[derive(Debug, Clone, PartialEq)]
pub struct Upgrade {
    pub value: Value,
    pub from_version: u32,
    pub migrations: Vec<String>,
    pub warnings: Vec<String>,
}

/// Detects the stored schema version, applies every pending step and repairs
/// malformed records.
///
/// A snapshot without `schemaVersion` is treated as v0. Newer versions are rejected.
/// Record repair runs for every accepted version.
pub fn upgrade(value: Value) -> Result<Upgrade, CoreError> {
    let Value::Object(mut root) = value else {
        return Err(CoreError::Serde("snapshot root must be a JSON object".into()));
    };
    let from_version = schema_version(&root)?;
    if from_version > CURRENT_SCHEMA_VERSION {
        return Err(CoreError::Storage(format!(
            "snapshot schema v{} is newer than supported v{}",
            from_version, CURRENT_SCHEMA_VERSION
        )));
    }

    let mut migrations = Vec::new();
    let mut warnings = Vec::new();
    repair_collections(&mut root, &mut warnings);
    if from_version == 0 {
        root.insert(SCHEMA_FIELD.to_string(), Value::from(CURRENT_SCHEMA_VERSION));
        migrations.push("v0 -> v1".to_string());
        info!(from = 0, to = 1, "snapshot schema upgraded");
    }
    for warning in &warnings {
        warn!(%warning, "snapshot repaired during upgrade");
    }

    Ok(Upgrade {
        value: Value::Object(root),
        from_version,
        migrations,
        warnings,
    })
}

fn schema_version(root: &Map<String, Value>) -> Result<u32, CoreError> {
    match root.get(SCHEMA_FIELD) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| CoreError::Serde(format!("invalid {}: {}", SCHEMA_FIELD, n))),
        Some(other) => Err(CoreError::Serde(format!(
            "invalid {}: {}",
            SCHEMA_FIELD, other
        ))),
    }
}

struct Collection {
    field: &'static str,
    default_day: u32,
    linked: bool,
}

impl Collection {
    fn is_known_field(&self, key: &str) -> bool {
        match key {
            "id" | "name" | "amount" | "paymentDay" => true,
            "incomeId" => self.linked,
            "frequency" => !self.linked,
            _ => false,
        }
    }
}

fn collections() -> [Collection; 3] {
    [
        Collection {
            field: "incomes",
            default_day: Income::DEFAULT_PAYMENT_DAY,
            linked: false,
        },
        Collection {
            field: "fixedExpenses",
            default_day: ExpenseKind::Fixed.default_payment_day(),
            linked: true,
        },
        Collection {
            field: "variableExpenses",
            default_day: ExpenseKind::Variable.default_payment_day(),
            linked: true,
        },
    ]
}

fn repair_collections(root: &mut Map<String, Value>, warnings: &mut Vec<String>) {
    for collection in &collections() {
        let items = match root.remove(collection.field) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                warnings.push(format!("{} was not a list; reset to empty", collection.field));
                Vec::new()
            }
        };
        let repaired: Vec<Value> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Value::Object(record) => {
                    Some(Value::Object(repair_record(record, collection, warnings)))
                }
                _ => {
                    warnings.push(format!(
                        "{}[{}] is not an object; dropped",
                        collection.field, index
                    ));
                    None
                }
            })
            .collect();
        root.insert(collection.field.to_string(), Value::Array(repaired));
    }
}

fn repair_record(
    mut record: Map<String, Value>,
    collection: &Collection,
    warnings: &mut Vec<String>,
) -> Map<String, Value> {
    let id = match record.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            let id = generate_id();
            warnings.push(format!("{} record without id assigned {}", collection.field, id));
            id
        }
    };
    record.insert("id".into(), Value::String(id.clone()));

    let unknown: Vec<String> = record
        .keys()
        .filter(|key| !collection.is_known_field(key))
        .cloned()
        .collect();
    for key in unknown {
        record.remove(&key);
        warnings.push(format!("{} {}: unknown field `{}` dropped", collection.field, id, key));
    }

    let name = match record.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    record.insert("name".into(), Value::String(name));

    let amount = match record.get("amount") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(raw)) => parse_amount(raw),
        _ => 0.0,
    };
    let amount = if amount.is_finite() && amount >= 0.0 {
        amount
    } else {
        warnings.push(format!("{} {} had negative amount; set to 0", collection.field, id));
        0.0
    };
    record.insert("amount".into(), Value::from(amount));

    let day = match record.get("paymentDay") {
        None | Some(Value::Null) => Some(i64::from(collection.default_day)),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(raw)) => Some(parse_payment_day(raw)),
        Some(_) => None,
    };
    let day = match day {
        Some(day) if is_valid_payment_day(day) => day,
        _ => {
            warnings.push(format!(
                "{} {} had invalid paymentDay; reset to {}",
                collection.field, id, collection.default_day
            ));
            i64::from(collection.default_day)
        }
    };
    record.insert("paymentDay".into(), Value::from(day));

    if !collection.linked {
        match record.get("frequency") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => {
                warnings.push(format!(
                    "{} {} had non-text frequency; reset to monthly",
                    collection.field, id
                ));
                record.insert("frequency".into(), Value::String("monthly".into()));
            }
        }
    }

    if collection.linked {
        match record.get("incomeId") {
            Some(Value::String(_)) => {}
            Some(Value::Number(n)) => {
                let linked = n.to_string();
                record.insert("incomeId".into(), Value::String(linked));
            }
            _ => {
                record.insert("incomeId".into(), Value::String(String::new()));
            }
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn current_version_passes_through() {
        let snapshot = json!({ "schemaVersion": 1, "incomes": [], "fixedExpenses": [], "variableExpenses": [] });
        let upgrade = upgrade(snapshot.clone()).unwrap();
        assert_eq!(upgrade.value, snapshot);
        assert_eq!(upgrade.from_version, 1);
        assert!(upgrade.migrations.is_empty());
    }

    #[test]
    fn newer_version_is_rejected() {
        let err = upgrade(json!({ "schemaVersion": 99 })).expect_err("too new");
        assert!(matches!(err, CoreError::Storage(_)));
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(upgrade(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn v0_backfills_defaults() {
        let upgrade = upgrade(json!({
            "incomes": [{ "id": "a", "name": "Salary", "amount": 100, "frequency": "monthly" }],
            "fixedExpenses": [{ "id": "b", "name": "Rent", "amount": "50.5" }]
        }))
        .unwrap();

        assert_eq!(upgrade.from_version, 0);
        assert_eq!(upgrade.migrations, vec!["v0 -> v1".to_string()]);
        assert!(upgrade.warnings.is_empty());
        let value = upgrade.value;
        assert_eq!(value["schemaVersion"], json!(1));
        assert_eq!(value["incomes"][0]["paymentDay"], json!(1));
        assert_eq!(value["fixedExpenses"][0]["paymentDay"], json!(5));
        assert_eq!(value["fixedExpenses"][0]["amount"], json!(50.5));
        assert_eq!(value["fixedExpenses"][0]["incomeId"], json!(""));
        assert_eq!(value["variableExpenses"], json!([]));
    }

    #[test]
    fn v0_repairs_invalid_fields_with_warnings() {
        let upgrade = upgrade(json!({
            "variableExpenses": [
                { "id": "c", "name": "Food", "amount": -20, "paymentDay": 45 },
                "garbage"
            ]
        }))
        .unwrap();

        let food = &upgrade.value["variableExpenses"][0];
        assert_eq!(food["amount"], json!(0.0));
        assert_eq!(food["paymentDay"], json!(10));
        assert_eq!(upgrade.value["variableExpenses"].as_array().map(Vec::len), Some(1));
        assert_eq!(upgrade.warnings.len(), 3);
    }

    #[test]
    fn current_version_records_are_repaired_too() {
        let upgrade = upgrade(json!({
            "schemaVersion": 1,
            "incomes": [{ "id": "a", "name": "Salary", "amount": 100, "frequency": "monthly", "paymentDay": 0 }],
            "fixedExpenses": [{ "id": "b", "name": "Rent", "amount": -5, "paymentDay": 45, "incomeId": "a" }],
            "variableExpenses": []
        }))
        .unwrap();

        assert!(upgrade.migrations.is_empty());
        assert_eq!(upgrade.value["schemaVersion"], json!(1));
        assert_eq!(upgrade.value["incomes"][0]["paymentDay"], json!(1));
        assert_eq!(upgrade.value["fixedExpenses"][0]["paymentDay"], json!(5));
        assert_eq!(upgrade.value["fixedExpenses"][0]["amount"], json!(0.0));
        assert_eq!(upgrade.warnings.len(), 3);
        assert!(upgrade.warnings[0].contains("incomes a had invalid paymentDay"));
    }

    #[test]
    fn unknown_fields_are_dropped_with_a_warning() {
        let upgrade = upgrade(json!({
            "schemaVersion": 1,
            "incomes": [{ "id": "a", "name": "Salary", "amount": 100, "paymentDay": 5, "incomeId": "x" }],
            "fixedExpenses": [{ "id": "b", "name": "Rent", "amount": 5, "paymentDay": 5, "type": "fixed" }]
        }))
        .unwrap();

        assert!(upgrade.value["incomes"][0].get("incomeId").is_none());
        assert!(upgrade.value["fixedExpenses"][0].get("type").is_none());
        assert_eq!(
            upgrade.warnings,
            vec![
                "incomes a: unknown field `incomeId` dropped".to_string(),
                "fixedExpenses b: unknown field `type` dropped".to_string(),
            ]
        );
    }

    #[test]
    fn non_text_frequency_is_reset_to_monthly() {
        let upgrade = upgrade(json!({
            "schemaVersion": 1,
            "incomes": [{ "id": "a", "name": "Gig", "amount": 10, "frequency": 7, "paymentDay": 3 }]
        }))
        .unwrap();

        assert_eq!(upgrade.value["incomes"][0]["frequency"], json!("monthly"));
        assert_eq!(upgrade.warnings, vec!["incomes a had non-text frequency; reset to monthly".to_string()]);
    }
}
