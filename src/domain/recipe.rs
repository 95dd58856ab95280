//! Fabricator name normalization.
//!
//! Inventory and market display names for killstreak kit fabricators come in a
//! few shapes:
//!
//! - `Specialized Killstreak Rocket Launcher Kit Fabricator`
//! - `Killstreak Fabricator - Scattergun`
//!
//! [`normalize`] maps any of them to a [`NormalizedRecipe`], the
//! `(base_name, variant)` key used by every downstream lookup.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::error::NotRecognized;

/// Killstreak tier of a fabricator and of the kit it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    /// Plain `Killstreak`.
    Killstreak,
    /// `Specialized Killstreak`.
    Specialized,
    /// `Professional Killstreak`.
    Professional,
}

impl Variant {
    /// Resolve the captured tier word. An empty capture is the plain tier.
    fn from_capture(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "" => Some(Self::Killstreak),
            "specialized" => Some(Self::Specialized),
            "professional" => Some(Self::Professional),
            _ => None,
        }
    }

    /// The tag as it appears in item names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Killstreak => "Killstreak",
            Self::Specialized => "Specialized Killstreak",
            Self::Professional => "Professional Killstreak",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured key for a fabricator recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedRecipe {
    base_name: String,
    variant: Variant,
}

impl NormalizedRecipe {
    /// Build a key from its parts. The base name is trimmed.
    pub fn new(base_name: impl Into<String>, variant: Variant) -> Self {
        Self {
            base_name: base_name.into().trim().to_string(),
            variant,
        }
    }

    /// Weapon name, e.g. `Rocket Launcher`.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Name of the kit this recipe produces, e.g.
    /// `Specialized Killstreak Rocket Launcher`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.variant, self.base_name)
    }

    /// Market name of the fabricator itself.
    #[must_use]
    pub fn fabricator_name(&self) -> String {
        format!("{} Kit Fabricator", self.display_name())
    }
}

impl fmt::Display for NormalizedRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.variant, self.base_name)
    }
}

/// Known name templates, tried in order. Each captures `(tier, base)`.
const TEMPLATES: [&str; 2] = [
    r"(?i)^(Professional|Specialized|)\s?Killstreak (.+?) Kit Fabricator$",
    r"(?i)^(Professional|Specialized|)\s?Killstreak Fabricator - (.+?)$",
];

fn templates() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        TEMPLATES
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

/// Map a raw fabricator display name to its recipe key.
///
/// The first template that matches wins.
pub fn normalize(raw_name: &str) -> Result<NormalizedRecipe, NotRecognized> {
    let name = raw_name.trim();

    for template in templates() {
        let Some(captures) = template.captures(name) else {
            continue;
        };
        let tier = captures.get(1).map_or("", |m| m.as_str());
        let base = captures.get(2).map_or("", |m| m.as_str()).trim();

        if let (Some(variant), false) = (Variant::from_capture(tier), base.is_empty()) {
            return Ok(NormalizedRecipe::new(base, variant));
        }
    }

    Err(NotRecognized {
        raw: raw_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_compile() {
        assert_eq!(templates().len(), TEMPLATES.len());
    }

    #[test]
    fn kit_fabricator_template() {
        let recipe = normalize("Specialized Killstreak Rocket Launcher Kit Fabricator").unwrap();

        assert_eq!(recipe.base_name(), "Rocket Launcher");
        assert_eq!(recipe.variant(), Variant::Specialized);
        assert_eq!(recipe.display_name(), "Specialized Killstreak Rocket Launcher");
    }

    #[test]
    fn plain_tier_defaults_to_killstreak() {
        let recipe = normalize("Killstreak Scattergun Kit Fabricator").unwrap();

        assert_eq!(recipe.variant(), Variant::Killstreak);
        assert_eq!(recipe.display_name(), "Killstreak Scattergun");
    }

    #[test]
    fn dash_template() {
        let recipe = normalize("Professional Killstreak Fabricator - Flame Thrower").unwrap();

        assert_eq!(recipe.base_name(), "Flame Thrower");
        assert_eq!(recipe.variant(), Variant::Professional);
    }

    #[test]
    fn matching_ignores_case() {
        let recipe = normalize("specialized killstreak Minigun kit fabricator").unwrap();

        assert_eq!(recipe.variant(), Variant::Specialized);
        assert_eq!(recipe.base_name(), "Minigun");
    }

    #[test]
    fn normalize_is_deterministic() {
        let name = "Professional Killstreak Huntsman Kit Fabricator";

        assert_eq!(normalize(name).unwrap(), normalize(name).unwrap());
    }

    #[test]
    fn reconstructed_name_has_single_space() {
        let recipe = NormalizedRecipe::new("  Medi Gun ", Variant::Professional);

        assert_eq!(recipe.display_name(), "Professional Killstreak Medi Gun");
        assert_eq!(
            recipe.fabricator_name(),
            "Professional Killstreak Medi Gun Kit Fabricator"
        );
    }

    #[test]
    fn unknown_names_are_not_recognized() {
        for name in [
            "Mann Co. Supply Crate Key",
            "Strange Specialized Killstreak Rocket Launcher Kit Fabricator",
            "Killstreak Kit Fabricator",
            "",
        ] {
            let err = normalize(name).unwrap_err();
            assert_eq!(err.raw, name);
        }
    }
}
