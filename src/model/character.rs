use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::abilities::Ability;

/// The flattened, fully derived character summary.
/// Built once per fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    pub level: i64,
    pub race: String,
    pub classes: Vec<String>,
    pub max_hp: i64,
    pub current_hp: i64,
    pub armor_class: i64,
    pub initiative: i64,
    pub proficiency_bonus: i64,
    pub stats: BTreeMap<Ability, i64>,
    pub saving_throws: BTreeMap<Ability, i64>,
    pub skills: BTreeMap<String, i64>,
    pub attacks: Vec<Attack>,
    pub spells: Vec<Spell>,
    pub inventory: Vec<Item>,
    pub features: Vec<Feature>,
}

/// One attack line, either from a weapon in the inventory or from the
/// explicit actions list. The two sources are concatenated, not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    pub range: i64,
    pub hit_bonus: i64,
    pub damage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub level: i64,
    pub school: Option<String>,
    pub range: Option<i64>,
    pub time: Option<i64>,
    /// Dice string of the first at-higher-levels damage entry, when present.
    pub damage: Option<String>,
    pub save_dc: i64,
    /// Only populated when the spell requires an attack roll.
    pub attack_bonus: Option<i64>,
    pub description: String,
    pub components: String,
    #[serde(rename = "class")]
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub quantity: i64,
    pub equipped: bool,
    pub damage: Option<String>,
    pub properties: Vec<String>,
    pub description: String,
}

/// Racial traits and feats, reduced to name plus cleaned description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub description: String,
}
