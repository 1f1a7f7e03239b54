//! Attacks and inventory, both read off the record's item list. Attacks are
//! additionally collected from the explicit actions list; the two sources
//! are concatenated without deduplication.

use serde_json::Value;

use crate::engine::raw;
use crate::model::character::{Attack, Item};
use crate::text::clean;

const DEFAULT_RANGE: i64 = 5;

/// An inventory item becomes an attack when it is displayed as one,
/// equipped, or attuned. Items with no definition are skipped.
pub fn attacks(record: &Value) -> Vec<Attack> {
    let mut out = Vec::new();

    for item in raw::array(record, "inventory") {
        let flagged = raw::bool_field(item, "displayAsAttack")
            || raw::bool_field(item, "isAttuned")
            || raw::bool_field(item, "equipped");
        if !flagged {
            continue;
        }
        let Some(def) = definition(item) else {
            continue;
        };
        let damage = def.get("damage").unwrap_or(&Value::Null);
        out.push(Attack {
            name: raw::str_field(def, "name", "unknown"),
            range: raw::int_field(def, "range", DEFAULT_RANGE),
            hit_bonus: raw::int_field(def, "attackBonus", 0),
            damage: raw::str_opt(damage, "diceString"),
            damage_type: damage
                .get("damageType")
                .and_then(|t| t.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string),
            notes: clean(&raw::str_field(def, "description", "")),
        });
    }

    let actions = record.get("actions").unwrap_or(&Value::Null);
    for action in raw::array(actions, "attack") {
        let damage = action.get("damage").unwrap_or(&Value::Null);
        out.push(Attack {
            name: raw::str_field(action, "name", "unknown"),
            range: raw::int_field(action, "range", DEFAULT_RANGE),
            hit_bonus: raw::int_field(action, "toHitBonus", 0),
            damage: raw::str_opt(damage, "diceString"),
            damage_type: None,
            notes: clean(&raw::str_field(action, "notes", "")),
        });
    }

    out
}

/// Every item in the source inventory, definition or not.
pub fn inventory(record: &Value) -> Vec<Item> {
    raw::array(record, "inventory")
        .iter()
        .map(|item| {
            let def = item.get("definition").unwrap_or(&Value::Null);
            let damage = def.get("damage").unwrap_or(&Value::Null);
            Item {
                name: raw::str_field(def, "name", "unknown"),
                item_type: raw::str_opt(def, "type")
                    .or_else(|| raw::str_opt(def, "filterType"))
                    .unwrap_or_else(|| "Misc".to_string()),
                quantity: raw::int_field(item, "quantity", 1),
                equipped: raw::bool_field(item, "equipped"),
                damage: raw::str_opt(damage, "diceString"),
                properties: property_names(def),
                description: clean(&raw::str_field(def, "description", "")),
            }
        })
        .collect()
}

fn property_names(def: &Value) -> Vec<String> {
    raw::array(def, "properties")
        .iter()
        .filter_map(|p| p.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// A definition that is missing, null, or an empty object counts as absent.
fn definition(item: &Value) -> Option<&Value> {
    item.get("definition")
        .filter(|d| d.as_object().is_some_and(|o| !o.is_empty()))
}
