//! Candidate filtering and selection.

use thiserror::Error;

const VARIANT_TOKEN: &str = "Killstreak";
const RECIPE_TOKEN: &str = "Fabricator";

/// Which candidates to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every fabricator in the inventory.
    All,
    /// One inventory entry, 1-based as shown in the menu.
    Index(usize),
    /// A name typed by the user, analyzed even if not owned.
    Custom(String),
}

/// Selection that does not resolve to any candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection {index} is out of range (1-{available})")]
    OutOfRange { index: usize, available: usize },

    #[error("custom selection needs a fabricator name")]
    EmptyCustomName,

    #[error("invalid selection {0:?}: use 0 for all, 00 for a custom name, or an index")]
    Unparseable(String),
}

impl Selection {
    /// Parse the menu syntax: `0` for all, `00` for custom, `N` for an entry.
    ///
    /// `custom` supplies the name for `00`.
    pub fn parse(choice: &str, custom: Option<&str>) -> Result<Self, SelectionError> {
        let choice = choice.trim();
        if choice == "00" {
            return match custom.map(str::trim) {
                Some(name) if !name.is_empty() => Ok(Self::Custom(name.to_string())),
                _ => Err(SelectionError::EmptyCustomName),
            };
        }
        match choice.parse::<usize>() {
            Ok(0) => Ok(Self::All),
            Ok(index) => Ok(Self::Index(index)),
            Err(_) => Err(SelectionError::Unparseable(choice.to_string())),
        }
    }
}

/// Keep inventory names that look like killstreak fabricators.
pub fn fabricator_candidates<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::into)
        .filter(|name| name.contains(VARIANT_TOKEN) && name.contains(RECIPE_TOKEN))
        .collect()
}

/// Resolve a selection against the candidate list.
pub fn select(candidates: &[String], selection: &Selection) -> Result<Vec<String>, SelectionError> {
    match selection {
        Selection::All => Ok(candidates.to_vec()),
        Selection::Index(index) => candidates
            .get(index.wrapping_sub(1))
            .map(|name| vec![name.clone()])
            .ok_or(SelectionError::OutOfRange {
                index: *index,
                available: candidates.len(),
            }),
        Selection::Custom(name) if name.trim().is_empty() => Err(SelectionError::EmptyCustomName),
        Selection::Custom(name) => Ok(vec![name.trim().to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<String> {
        fabricator_candidates([
            "Specialized Killstreak Rocket Launcher Kit Fabricator",
            "Mann Co. Supply Crate Key",
            "Killstreak Fabricator - Scattergun",
            "Killstreak Rocket Launcher",
        ])
    }

    #[test]
    fn filter_keeps_fabricators_only() {
        assert_eq!(
            candidates(),
            [
                "Specialized Killstreak Rocket Launcher Kit Fabricator",
                "Killstreak Fabricator - Scattergun",
            ]
        );
    }

    #[test]
    fn parse_menu_choices() {
        assert_eq!(Selection::parse("0", None).unwrap(), Selection::All);
        assert_eq!(Selection::parse(" 2 ", None).unwrap(), Selection::Index(2));
        assert_eq!(
            Selection::parse("00", Some("Killstreak Fabricator - Medi Gun")).unwrap(),
            Selection::Custom("Killstreak Fabricator - Medi Gun".into())
        );
        assert_eq!(
            Selection::parse("00", None).unwrap_err(),
            SelectionError::EmptyCustomName
        );
        assert!(matches!(
            Selection::parse("all", None),
            Err(SelectionError::Unparseable(_))
        ));
    }

    #[test]
    fn select_resolves_each_variant() {
        let list = candidates();

        assert_eq!(select(&list, &Selection::All).unwrap().len(), 2);
        assert_eq!(
            select(&list, &Selection::Index(2)).unwrap(),
            ["Killstreak Fabricator - Scattergun"]
        );
        assert_eq!(
            select(&list, &Selection::Custom(" Custom Name ".into())).unwrap(),
            ["Custom Name"]
        );
    }

    #[test]
    fn select_rejects_out_of_range_index() {
        let list = candidates();

        assert_eq!(
            select(&list, &Selection::Index(3)).unwrap_err(),
            SelectionError::OutOfRange {
                index: 3,
                available: 2
            }
        );
        assert!(select(&list, &Selection::Index(0)).is_err());
    }
}
