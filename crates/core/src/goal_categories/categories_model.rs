//! Money goal category domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a money goal category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalCategory {
    pub id: String,
    pub name: String,
    pub name_fr: Option<String>,
    pub name_mg: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MoneyGoalCategory {
    /// Category label for a locale (`fr`, `mg`, anything else uses the default name).
    pub fn localized_name(&self, locale: &str) -> &str {
        let localized = match locale.split(['-', '_']).next().unwrap_or_default() {
            "fr" => self.name_fr.as_deref(),
            "mg" => self.name_mg.as_deref(),
            _ => None,
        };
        localized
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

/// Input model for creating a category
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMoneyGoalCategory {
    pub name: String,
    pub name_fr: Option<String>,
    pub name_mg: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl NewMoneyGoalCategory {
    pub fn validate(&self) -> Result<()> {
        validate_category_name(&self.name)?;
        validate_color(self.color.as_deref())
    }
}

/// Input model for updating a category. The whole record is replaced.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalCategoryUpdate {
    pub id: Option<String>,
    pub name: String,
    pub name_fr: Option<String>,
    pub name_mg: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_enabled: bool,
}

impl MoneyGoalCategoryUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category ID is required for updates".to_string(),
            )));
        }
        validate_category_name(&self.name)?;
        validate_color(self.color.as_deref())
    }
}

fn validate_category_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Category name cannot be empty".to_string(),
        )));
    }
    Ok(())
}

/// Colors are `#RGB` or `#RRGGBB` hex strings.
fn validate_color(color: Option<&str>) -> Result<()> {
    let Some(color) = color else {
        return Ok(());
    };
    let valid = color
        .strip_prefix('#')
        .filter(|hex| matches!(hex.len(), 3 | 6))
        .is_some_and(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Invalid category color '{}'",
            color
        ))));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> MoneyGoalCategory {
        MoneyGoalCategory {
            id: "c1".to_string(),
            name: "Building".to_string(),
            name_fr: Some("Construction".to_string()),
            name_mg: Some("Fanorenana".to_string()),
            description: None,
            color: Some("#1e88e5".to_string()),
            icon: Some("church".to_string()),
            is_enabled: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_localized_name() {
        let category = category();
        assert_eq!(category.localized_name("fr"), "Construction");
        assert_eq!(category.localized_name("mg-MG"), "Fanorenana");
        assert_eq!(category.localized_name("en"), "Building");
    }

    #[test]
    fn test_localized_name_falls_back_when_missing() {
        let category = MoneyGoalCategory {
            name_mg: Some(" ".to_string()),
            ..category()
        };
        assert_eq!(category.localized_name("mg"), "Building");
    }

    #[test]
    fn test_color_validation() {
        let mut new_category = NewMoneyGoalCategory {
            name: "Missions".to_string(),
            name_fr: None,
            name_mg: None,
            description: None,
            color: Some("#abc".to_string()),
            icon: None,
            is_enabled: true,
        };
        assert!(new_category.validate().is_ok());

        new_category.color = Some("blue".to_string());
        assert!(new_category.validate().is_err());
    }
}
