//! Business-unit classification catalog.
//!
//! Classification is two-stage: an exact business-id lookup, then keyword
//! rules over the upper-cased legal name in declared priority order, then
//! the catalog's default company.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::Company;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub company: Company,
}

impl KeywordRule {
    fn matches(&self, upper_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|kw| upper_name.contains(&kw.to_uppercase()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub default_company: Company,
    /// Business ids (digits only) known to belong to each company.
    #[serde(default)]
    pub ids: BTreeMap<Company, Vec<String>>,
    /// Evaluated top to bottom; the first matching rule wins.
    #[serde(default)]
    pub keyword_rules: Vec<KeywordRule>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            default_company: Company::Pluma,
            ids: BTreeMap::new(),
            keyword_rules: vec![
                KeywordRule {
                    keywords: vec!["BELLO".to_string(), "BELLA".to_string()],
                    company: Company::Bello,
                },
                KeywordRule {
                    keywords: vec!["LEVO".to_string()],
                    company: Company::Levo,
                },
                KeywordRule {
                    keywords: vec!["PLUMA".to_string()],
                    company: Company::Pluma,
                },
            ],
        }
    }
}

impl Catalog {
    /// Classify a registry record.
    #[must_use]
    pub fn classify(&self, business_id: &str, legal_name: &str) -> Company {
        let id = crate::text::digits(business_id);
        if let Some(company) = self.company_for_id(&id) {
            return company;
        }
        let upper = legal_name.to_uppercase();
        self.keyword_rules
            .iter()
            .find(|rule| rule.matches(&upper))
            .map_or(self.default_company, |rule| rule.company)
    }

    fn company_for_id(&self, id: &str) -> Option<Company> {
        self.ids
            .iter()
            .find(|(_, ids)| ids.iter().any(|known| known == id))
            .map(|(company, _)| *company)
    }

    /// Replace the id list of one company.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if an id is already listed under
    /// another company; the catalog is left unchanged.
    pub fn set_ids(&mut self, company: Company, ids: Vec<String>) -> Result<(), ConfigError> {
        let ids: Vec<String> = ids.iter().map(|id| crate::text::digits(id)).collect();
        let mut candidate = self.clone();
        candidate.ids.insert(company, ids);
        validate_catalog(&candidate)?;
        *self = candidate;
        Ok(())
    }
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut catalog: Catalog = serde_yaml::from_str(&content)?;
    for ids in catalog.ids.values_mut() {
        for id in ids.iter_mut() {
            *id = crate::text::digits(id);
        }
    }

    validate_catalog(&catalog)?;

    Ok(catalog)
}

/// Load the catalog at `path`, or the built-in default when the file does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or validated.
pub fn load_catalog_or_default(path: &Path) -> Result<Catalog, ConfigError> {
    if path.exists() {
        load_catalog(path)
    } else {
        Ok(Catalog::default())
    }
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    let mut owner: HashMap<&str, Company> = HashMap::new();

    for (company, ids) in &catalog.ids {
        for id in ids {
            if id.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "empty business id listed under {company}"
                )));
            }
            if let Some(previous) = owner.insert(id.as_str(), *company) {
                if previous != *company {
                    return Err(ConfigError::Validation(format!(
                        "business id {id} listed under both {previous} and {company}"
                    )));
                }
            }
        }
    }

    for (position, rule) in catalog.keyword_rules.iter().enumerate() {
        if rule.keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "keyword rule #{position} for {} has no keywords",
                rule.company
            )));
        }
        if rule.keywords.iter().any(|kw| kw.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "keyword rule #{position} for {} has an empty keyword",
                rule.company
            )));
        }
    }

    Ok(())
}
