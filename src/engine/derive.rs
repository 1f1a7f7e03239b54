//! The derivation engine: reconcile the record's overlapping modifier
//! sources into final numbers. Pure and total; malformed input degrades to
//! defaults instead of failing.

use std::collections::BTreeMap;

use log::debug;
use serde_json::Value;

use crate::engine::{equipment, raw, spells};
use crate::model::abilities::{ability_modifier, Ability, ABILITIES, SKILLS};
use crate::model::character::{CharacterSheet, Feature};
use crate::model::modifier::{Modifier, ModifierKind, MODIFIER_SOURCES};
use crate::model::payload::{RawCharacter, SheetOutput};
use crate::text::clean;

/// Derive the flat sheet from a fetched record. An error payload from the
/// fetcher passes through untouched.
pub fn derive_sheet(raw_character: &RawCharacter) -> SheetOutput {
    let record = match raw_character {
        RawCharacter::Error(payload) => return SheetOutput::Error(payload.clone()),
        RawCharacter::Record(record) => record,
    };

    let modifiers = collect_modifiers(record);
    let stats = ability_scores(record, &modifiers);
    let level = total_level(record);
    let proficiency_bonus = proficiency_bonus(record, level);
    let (max_hp, current_hp) = hit_points(record);

    SheetOutput::Sheet(CharacterSheet {
        name: raw::str_field(record, "name", "unknown"),
        level,
        race: race_name(record),
        classes: class_names(record),
        max_hp,
        current_hp,
        armor_class: raw::int_field(record, "armorClass", 10),
        initiative: initiative(&stats, &modifiers),
        proficiency_bonus,
        saving_throws: saving_throws(&stats, &modifiers, proficiency_bonus),
        skills: skills(&stats, &modifiers, proficiency_bonus),
        attacks: equipment::attacks(record),
        spells: spells::spells(record, &stats, proficiency_bonus),
        inventory: equipment::inventory(record),
        features: features(record),
        stats,
    })
}

/// Flatten the five modifier groups into one sequence. Missing or mistyped
/// groups contribute nothing; unrecognized modifier kinds are dropped.
pub fn collect_modifiers(record: &Value) -> Vec<Modifier> {
    let Some(groups) = record.get("modifiers") else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for source in MODIFIER_SOURCES {
        for entry in raw::array(groups, source) {
            let Some(kind) = entry
                .get("type")
                .and_then(Value::as_str)
                .and_then(ModifierKind::parse)
            else {
                continue;
            };
            out.push(Modifier {
                kind,
                sub_type: raw::str_field(entry, "subType", ""),
                value: entry.get("value").map(raw::num).unwrap_or(0.0),
            });
        }
    }
    out
}

/// Base scores come from the stats list (matched on service ability id),
/// defaulting to 10, then every `<ability>-score` bonus is summed in.
fn ability_scores(record: &Value, modifiers: &[Modifier]) -> BTreeMap<Ability, i64> {
    let mut scores: BTreeMap<Ability, i64> = ABILITIES.iter().map(|&a| (a, 10)).collect();

    let stats = raw::array(record, "stats");
    if stats.is_empty() {
        debug!("record has no stats list; all abilities default to 10");
    }
    for entry in stats {
        let Some(ability) = Ability::from_id(raw::int_field(entry, "id", 0)) else {
            continue;
        };
        if let Some(value) = entry.get("value").filter(|v| !v.is_null()) {
            scores.insert(ability, raw::num(value) as i64);
        }
    }

    for &ability in &ABILITIES {
        let sub_type = ability.score_sub_type();
        let bonus: f64 = modifiers
            .iter()
            .filter(|m| m.is_bonus(&sub_type))
            .map(|m| m.value)
            .sum();
        if let Some(score) = scores.get_mut(&ability) {
            *score += bonus as i64;
        }
    }
    scores
}

fn total_level(record: &Value) -> i64 {
    raw::array(record, "classes")
        .iter()
        .map(|cls| raw::int_field(cls, "level", 0))
        .sum()
}

/// Trust the source integer when it is one; otherwise the standard
/// progression from total level.
fn proficiency_bonus(record: &Value, level: i64) -> i64 {
    if let Some(pb) = raw::int_opt(record, "proficiencyBonus") {
        return pb;
    }
    debug!("proficiencyBonus absent; deriving from level {}", level);
    2 + ((level - 1).div_euclid(4)).max(0)
}

/// HP fields are taken verbatim from the source; constitution is never
/// re-applied here (the service already folded it in).
fn hit_points(record: &Value) -> (i64, i64) {
    let max_hp = raw::int_opt(record, "overrideHitPoints").unwrap_or_else(|| {
        raw::int_field(record, "baseHitPoints", 0) + raw::int_field(record, "bonusHitPoints", 0)
    });
    let current_hp = raw::int_opt(record, "currentHitPoints")
        .unwrap_or_else(|| max_hp - raw::int_field(record, "removedHitPoints", 0));
    (max_hp, current_hp)
}

fn initiative(stats: &BTreeMap<Ability, i64>, modifiers: &[Modifier]) -> i64 {
    let dex_mod = ability_modifier(stats[&Ability::Dexterity]);
    let bonus: f64 = modifiers
        .iter()
        .filter(|m| m.is_bonus("initiative"))
        .map(|m| m.value)
        .sum();
    dex_mod + bonus as i64
}

fn saving_throws(
    stats: &BTreeMap<Ability, i64>,
    modifiers: &[Modifier],
    proficiency_bonus: i64,
) -> BTreeMap<Ability, i64> {
    let mut saves = BTreeMap::new();
    for &ability in &ABILITIES {
        let sub_type = ability.save_sub_type();
        let mut value = ability_modifier(stats[&ability]);
        if modifiers.iter().any(|m| m.grants_proficiency(&sub_type)) {
            value += proficiency_bonus;
        }
        let extra: f64 = modifiers
            .iter()
            .filter(|m| m.is_bonus(&sub_type))
            .map(|m| m.value)
            .sum();
        saves.insert(ability, value + extra as i64);
    }
    saves
}

/// Expertise doubles the proficiency bonus and wins over a plain proficiency
/// for the same skill. Every skill appears in the output, proficient or not.
fn skills(
    stats: &BTreeMap<Ability, i64>,
    modifiers: &[Modifier],
    proficiency_bonus: i64,
) -> BTreeMap<String, i64> {
    let mut out = BTreeMap::new();
    for (skill, ability) in SKILLS {
        let mut value = ability_modifier(stats[&ability]);
        if modifiers.iter().any(|m| m.grants_expertise(skill)) {
            value += 2 * proficiency_bonus;
        } else if modifiers.iter().any(|m| m.grants_proficiency(skill)) {
            value += proficiency_bonus;
        }
        let extra: f64 = modifiers
            .iter()
            .filter(|m| m.is_bonus(skill))
            .map(|m| m.value)
            .sum();
        out.insert(skill.to_string(), value + extra as i64);
    }
    out
}

fn race_name(record: &Value) -> String {
    record
        .get("race")
        .map(|race| raw::str_field(race, "fullName", "unknown"))
        .unwrap_or_else(|| "unknown".to_string())
}

fn class_names(record: &Value) -> Vec<String> {
    raw::array(record, "classes")
        .iter()
        .map(|cls| {
            cls.get("definition")
                .map(|def| raw::str_field(def, "name", "unknown"))
                .unwrap_or_else(|| "unknown".to_string())
        })
        .collect()
}

/// Racial traits plus the record-level feats list, reduced to name and
/// cleaned description.
fn features(record: &Value) -> Vec<Feature> {
    let mut out = Vec::new();

    if let Some(race) = record.get("race") {
        for entry in raw::array(race, "racialTraits") {
            out.push(feature_from(entry));
        }
    }
    for entry in raw::array(record, "feats") {
        out.push(feature_from(entry));
    }
    out
}

fn feature_from(entry: &Value) -> Feature {
    let def = entry.get("definition").unwrap_or(&Value::Null);
    Feature {
        name: raw::str_field(def, "name", "unknown"),
        description: clean(&raw::str_field(def, "description", "")),
    }
}
