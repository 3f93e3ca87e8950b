//! Phase 3: Factory Merging
//!
//! This is the third phase of the `container-installer` pipeline. It turns the
//! ordered packages into the final list of factory entries.
//!
//! ## Process
//!
//! 1.  **Normalization (`normalize`)**: Each package's `container-factory`
//!     declaration is classified once (see [`crate::factory::classify`]) and
//!     expanded into declared factories. Bare code strings get a synthesized
//!     `{package}_{index}` name and a description. A declaration that cannot be
//!     classified is recorded as `Error::MalformedDeclaration` and the package
//!     is skipped; the remaining packages are still processed.
//!
//! 2.  **Concatenation**: Declared factories are concatenated in package order.
//!
//! 3.  **Reconciliation (`merge_entries`)**: Each declared factory is matched by
//!     name against the entries of the previous containers file. A match keeps
//!     the previous attributes the package does not set (notably `enable`),
//!     while name, description and factory code always come from the package.
//!     Unmatched factories start enabled.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::warn;

use crate::error::Error;
use crate::factory::{classify, DeclaredFactory, FactoryEntry, ENTRY_KEYS};
use crate::package::PackageRecord;
use crate::php::PhpValue;

/// Result of Phase 3
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Merged entries, in package order
    pub entries: Vec<FactoryEntry>,
    /// One `Error::MalformedDeclaration` per package that was skipped
    pub malformed: Vec<Error>,
}

/// Declared factories of all packages, plus the packages that were skipped
#[derive(Debug, Default)]
pub struct Normalized {
    pub factories: Vec<DeclaredFactory>,
    pub malformed: Vec<Error>,
}

/// Execute Phase 3: normalize declarations and merge with `previous`
pub fn execute(packages: &[PackageRecord], previous: &[FactoryEntry]) -> MergeOutcome {
    let normalized = normalize(packages);
    MergeOutcome {
        entries: merge_entries(normalized.factories, previous),
        malformed: normalized.malformed,
    }
}

/// Expand every package's declaration into declared factories.
pub fn normalize(packages: &[PackageRecord]) -> Normalized {
    let mut normalized = Normalized::default();

    for package in packages {
        let Some(raw) = package.factory_declaration() else {
            continue;
        };

        match classify(raw) {
            Ok(declaration) => {
                normalized
                    .factories
                    .extend(declaration.into_declared(&package.name));
            }
            Err(e) => {
                let error = Error::MalformedDeclaration {
                    package: package.name.clone(),
                    value: raw.to_string(),
                    message: e.message,
                };
                warn!("{}", error);
                normalized.malformed.push(error);
            }
        }
    }

    let mut seen = HashSet::new();
    for factory in &normalized.factories {
        if !seen.insert(factory.name.as_str()) {
            warn!(
                "Factory name '{}' is declared more than once; each occurrence is kept",
                factory.name
            );
        }
    }

    normalized
}

/// Reconcile declared factories with the entries of the previous file.
///
/// The previous entry's extra attributes come first, in their original order,
/// followed by attributes only the declaration carries. On a key present in
/// both, the declaration wins. Name, description, factory and `enable` are
/// never taken from the previous extras.
pub fn merge_entries(declared: Vec<DeclaredFactory>, previous: &[FactoryEntry]) -> Vec<FactoryEntry> {
    let mut by_name: HashMap<&str, &FactoryEntry> = HashMap::new();
    for entry in previous {
        by_name.entry(entry.name.as_str()).or_insert(entry);
    }

    declared
        .into_iter()
        .map(|factory| match by_name.get(factory.name.as_str()) {
            Some(existing) => {
                let mut extra: IndexMap<String, PhpValue> = existing
                    .extra
                    .iter()
                    .filter(|(key, _)| !ENTRY_KEYS.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                for (key, value) in factory.extra {
                    extra.insert(key, value);
                }
                let (enable, enable_expression) = match factory.enable {
                    Some(enable) => (enable, None),
                    None => (existing.enable, existing.enable_expression.clone()),
                };
                FactoryEntry {
                    name: factory.name,
                    description: factory.description,
                    factory: factory.factory,
                    enable,
                    enable_expression,
                    extra,
                }
            }
            None => FactoryEntry {
                name: factory.name,
                description: factory.description,
                factory: factory.factory,
                enable: factory.enable.unwrap_or(true),
                enable_expression: None,
                extra: factory.extra,
            },
        })
        .collect()
}
