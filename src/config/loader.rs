//! Seed file loading.
//!
//! This module provides the [`ConfigLoader`] type for loading tenant seed
//! files from a directory and assembling them into a repository.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::repository::InMemoryRepository;

use super::types::TenantSeed;

/// Loads tenant seed files and builds an in-memory repository from them.
///
/// # Directory Structure
///
/// The configuration directory holds one YAML file per tenant:
/// ```text
/// config/tenants/
/// ├── acme.yaml
/// └── globex.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/tenants")?;
/// let repository = loader.into_repository()?;
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    seeds: Vec<TenantSeed>,
}

impl ConfigLoader {
    /// Loads every `.yaml` file in the directory as a tenant seed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when the directory is missing
    /// or contains no seed files, and [`EngineError::ConfigParseError`] for
    /// the first file that fails to parse. Bracket schedules are not
    /// validated here; [`ConfigLoader::into_repository`] does that.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let entries = fs::read_dir(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let mut seeds = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: path_str.clone(),
            })?;

            let file_path = entry.path();
            if file_path.extension().is_some_and(|ext| ext == "yaml") {
                seeds.push(Self::load_seed(&file_path)?);
            }
        }

        if seeds.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no seed files found)", path_str),
            });
        }

        seeds.sort_by(|a, b| a.tenant_id.cmp(&b.tenant_id));
        Ok(Self { seeds })
    }

    /// Loads and parses one seed file.
    fn load_seed(path: &Path) -> EngineResult<TenantSeed> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded seeds, sorted by tenant id.
    pub fn seeds(&self) -> &[TenantSeed] {
        &self.seeds
    }

    /// Validates every seed and assembles a repository from all of them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTaxTable`] for the first bracket
    /// schedule that fails validation. Nothing is partially imported: a
    /// single bad table rejects the whole load.
    pub fn into_repository(self) -> EngineResult<InMemoryRepository> {
        let mut repository = InMemoryRepository::new();

        for seed in &self.seeds {
            for table in seed.tax_tables()? {
                repository.add_tax_table(table);
            }
            for rate in seed.contribution_rates() {
                repository.add_contribution_rate(rate);
            }
            for rate in seed.currency_rates() {
                repository.add_currency_rate(rate);
            }
            if let Some(policy) = seed.leave_policy() {
                repository.set_leave_policy(policy);
            }
            for employee in seed.employees() {
                repository.add_employee(employee);
            }
            tracing::info!(tenant_id = %seed.tenant_id, "imported tenant seed");
        }

        Ok(repository)
    }
}
