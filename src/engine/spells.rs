//! Spell derivation. Each class-spell group resolves a casting ability via
//! its owning class, and every spell gets the standard-rule save DC of
//! 8 + proficiency bonus + ability modifier.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde_json::Value;

use crate::engine::raw;
use crate::model::abilities::{ability_modifier, Ability};
use crate::model::character::Spell;
use crate::text::clean;

/// Type id of the at-higher-levels entry that carries extra damage dice.
const HIGHER_LEVEL_DAMAGE_TYPE_ID: i64 = 15;

pub fn spells(
    record: &Value,
    stats: &BTreeMap<Ability, i64>,
    proficiency_bonus: i64,
) -> Vec<Spell> {
    let classes = class_index(record);
    let record_default = raw::int_opt(record, "spellCastingAbilityId").and_then(Ability::from_id);

    let mut out = Vec::new();
    for group in raw::array(record, "classSpells") {
        let class_id = raw::int_field(group, "characterClassId", 0);
        let (class_name, class_ability) = match classes.get(&class_id) {
            Some((name, ability)) => (name.clone(), *ability),
            None => ("unknown".to_string(), None),
        };
        // Resolution chain: owning class, then the record-level default,
        // then intelligence.
        let casting = class_ability
            .or(record_default)
            .unwrap_or(Ability::Intelligence);
        let casting_mod = ability_modifier(stats[&casting]);

        for spell in raw::array(group, "spells") {
            let Some(def) = spell
                .get("definition")
                .filter(|d| d.as_object().is_some_and(|o| !o.is_empty()))
            else {
                continue;
            };

            let dc_ability = raw::int_opt(def, "saveDcAbilityId")
                .and_then(Ability::from_id)
                .unwrap_or(casting);
            let attack_bonus = raw::bool_field(def, "requiresAttackRoll")
                .then_some(proficiency_bonus + casting_mod);

            out.push(Spell {
                name: raw::str_field(def, "name", "unknown"),
                level: raw::int_field(def, "level", 0),
                school: raw::str_opt(def, "school"),
                range: def.get("range").and_then(|r| raw::int_opt(r, "rangeValue")),
                time: def
                    .get("activation")
                    .and_then(|a| raw::int_opt(a, "activationTime")),
                damage: higher_level_damage(def),
                save_dc: 8 + proficiency_bonus + ability_modifier(stats[&dc_ability]),
                attack_bonus,
                description: clean(&raw::str_field(def, "description", "")),
                components: raw::str_field(def, "componentsDescription", ""),
                class_name: class_name.clone(),
            });
        }
    }
    out
}

/// Class id -> (name, casting ability from the class definition).
fn class_index(record: &Value) -> HashMap<i64, (String, Option<Ability>)> {
    let mut index = HashMap::new();
    for cls in raw::array(record, "classes") {
        let id = raw::int_field(cls, "id", 0);
        let def = cls.get("definition").unwrap_or(&Value::Null);
        let name = raw::str_field(def, "name", "unknown");
        let ability = raw::int_opt(def, "spellCastingAbilityId").and_then(Ability::from_id);
        index.insert(id, (name, ability));
    }
    index
}

/// First at-higher-levels entry carrying damage dice, when any.
fn higher_level_damage(def: &Value) -> Option<String> {
    let higher = def.get("atHigherLevels").unwrap_or(&Value::Null);
    raw::array(higher, "higherLevelDefinitions")
        .iter()
        .find(|entry| raw::int_field(entry, "typeId", 0) == HIGHER_LEVEL_DAMAGE_TYPE_ID)
        .and_then(|entry| entry.get("dice"))
        .and_then(|dice| raw::str_opt(dice, "diceString"))
}
