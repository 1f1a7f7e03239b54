/// The service groups modifiers by where they came from; these are the keys
/// under the record's `modifiers` object.
pub const MODIFIER_SOURCES: [&str; 5] = ["class", "race", "feat", "item", "background"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    Bonus,
    Proficiency,
    Expertise,
}

impl ModifierKind {
    /// Anything other than the three recognized kinds is dropped during
    /// aggregation (the service carries many kinds we never evaluate).
    pub fn parse(s: &str) -> Option<ModifierKind> {
        match s {
            "bonus" => Some(ModifierKind::Bonus),
            "proficiency" => Some(ModifierKind::Proficiency),
            "expertise" => Some(ModifierKind::Expertise),
            _ => None,
        }
    }
}

/// One entry of the flattened modifier sequence. Order across sources never
/// affects the derived numbers; reconciliation is purely additive.
#[derive(Debug, Clone)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub sub_type: String,
    pub value: f64,
}

impl Modifier {
    pub fn is_bonus(&self, sub_type: &str) -> bool {
        self.kind == ModifierKind::Bonus && self.sub_type == sub_type
    }

    pub fn grants_proficiency(&self, sub_type: &str) -> bool {
        self.kind == ModifierKind::Proficiency && self.sub_type == sub_type
    }

    pub fn grants_expertise(&self, sub_type: &str) -> bool {
        self.kind == ModifierKind::Expertise && self.sub_type == sub_type
    }
}
