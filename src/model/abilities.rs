use serde::{Deserialize, Serialize};

/// The six abilities, in the order the character service numbers them (id 1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

pub const ABILITIES: [Ability; 6] = [
    Ability::Strength,
    Ability::Dexterity,
    Ability::Constitution,
    Ability::Intelligence,
    Ability::Wisdom,
    Ability::Charisma,
];

impl Ability {
    /// Service ability ids run 1-6 in the order above.
    pub fn from_id(id: i64) -> Option<Ability> {
        match id {
            1 => Some(Ability::Strength),
            2 => Some(Ability::Dexterity),
            3 => Some(Ability::Constitution),
            4 => Some(Ability::Intelligence),
            5 => Some(Ability::Wisdom),
            6 => Some(Ability::Charisma),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    /// Modifier sub-type carrying a flat score bonus, e.g. "strength-score".
    pub fn score_sub_type(self) -> String {
        format!("{}-score", self.name())
    }

    /// Modifier sub-type marking saving-throw proficiency or bonuses,
    /// e.g. "dexterity-saving-throws".
    pub fn save_sub_type(self) -> String {
        format!("{}-saving-throws", self.name())
    }
}

/// Standard ability modifier. `div_euclid` keeps the floor correct for
/// scores below 10 (score 7 is -2, not -1).
pub fn ability_modifier(score: i64) -> i64 {
    (score - 10).div_euclid(2)
}

/// The 18 skills and their governing abilities, keyed by the service's
/// modifier sub-type spelling.
pub const SKILLS: [(&str, Ability); 18] = [
    ("acrobatics", Ability::Dexterity),
    ("animal-handling", Ability::Wisdom),
    ("arcana", Ability::Intelligence),
    ("athletics", Ability::Strength),
    ("deception", Ability::Charisma),
    ("history", Ability::Intelligence),
    ("insight", Ability::Wisdom),
    ("intimidation", Ability::Charisma),
    ("investigation", Ability::Intelligence),
    ("medicine", Ability::Wisdom),
    ("nature", Ability::Intelligence),
    ("perception", Ability::Wisdom),
    ("performance", Ability::Charisma),
    ("persuasion", Ability::Charisma),
    ("religion", Ability::Intelligence),
    ("sleight-of-hand", Ability::Dexterity),
    ("stealth", Ability::Dexterity),
    ("survival", Ability::Wisdom),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_mapping_covers_one_through_six() {
        assert_eq!(Ability::from_id(1), Some(Ability::Strength));
        assert_eq!(Ability::from_id(6), Some(Ability::Charisma));
        assert_eq!(Ability::from_id(0), None);
        assert_eq!(Ability::from_id(7), None);
    }

    #[test]
    fn modifier_floors_below_ten() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(7), -2);
        assert_eq!(ability_modifier(1), -5);
    }
}
