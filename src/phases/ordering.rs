//! Phase 2: Dependency Ordering
//!
//! This is the second phase of the `container-installer` pipeline. It sorts the
//! candidate packages so that every package comes after the packages it
//! depends on, which makes the factories of a dependency appear before the
//! factories of its dependents in the containers file.
//!
//! ## Process
//!
//! 1.  **Graph construction**: An edge `package -> dependency` exists for every
//!     declared dependency that is itself a candidate. Dependencies outside the
//!     candidate set do not affect the order.
//!
//! 2.  **Stable topological sort**: Kahn's algorithm, always taking the ready
//!     package with the lowest collection index next. Independent packages
//!     therefore keep their collection order, and identical input always gives
//!     identical output.
//!
//! 3.  **Cycle handling**: When packages remain but none is ready, they sit on
//!     (or behind) a cycle. The cycle is located by walking unmet dependencies
//!     from the lowest-index remaining package. Under [`CyclePolicy::Fallback`]
//!     the cycle member with the lowest collection index is emitted early and
//!     the cycle is reported; under [`CyclePolicy::Fail`] the phase returns
//!     `Error::CycleDetected`.

use std::collections::{BTreeSet, HashMap};

use log::warn;

use super::{CyclePolicy, OrderedPackages};
use crate::error::{Error, Result};
use crate::package::PackageRecord;

/// Execute Phase 2: order candidates so dependencies precede dependents
pub fn execute(candidates: Vec<PackageRecord>, policy: CyclePolicy) -> Result<OrderedPackages> {
    let graph = DependencyGraph::new(&candidates);
    let (order, cycles) = graph.sort(policy)?;

    let mut slots: Vec<Option<PackageRecord>> = candidates.into_iter().map(Some).collect();
    let packages = order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect();

    Ok(OrderedPackages { packages, cycles })
}

/// Dependency edges between candidates, by collection index
struct DependencyGraph {
    names: Vec<String>,
    /// `dependencies[i]`: candidates that package `i` requires, ascending
    dependencies: Vec<Vec<usize>>,
    /// `dependents[j]`: candidates that require package `j`
    dependents: Vec<Vec<usize>>,
}

impl DependencyGraph {
    fn new(candidates: &[PackageRecord]) -> Self {
        // Names are unique within a resolution; should one repeat, the first
        // occurrence is the one dependencies resolve to.
        let mut index_of: HashMap<&str, usize> = HashMap::new();
        for (index, package) in candidates.iter().enumerate() {
            index_of.entry(package.name.as_str()).or_insert(index);
        }

        let mut dependencies = vec![Vec::new(); candidates.len()];
        let mut dependents = vec![Vec::new(); candidates.len()];
        for (index, package) in candidates.iter().enumerate() {
            let mut edges: Vec<usize> = package
                .dependencies
                .iter()
                .filter_map(|name| index_of.get(name.as_str()).copied())
                .filter(|&dependency| dependency != index)
                .collect();
            edges.sort_unstable();
            edges.dedup();

            for &dependency in &edges {
                dependents[dependency].push(index);
            }
            dependencies[index] = edges;
        }

        Self {
            names: candidates.iter().map(|p| p.name.clone()).collect(),
            dependencies,
            dependents,
        }
    }

    fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns the emission order (collection indices) and the broken cycles.
    fn sort(&self, policy: CyclePolicy) -> Result<(Vec<usize>, Vec<String>)> {
        let mut unmet: Vec<usize> = self.dependencies.iter().map(Vec::len).collect();
        let mut emitted = vec![false; self.len()];
        let mut ready: BTreeSet<usize> = (0..self.len()).filter(|&i| unmet[i] == 0).collect();
        let mut order = Vec::with_capacity(self.len());
        let mut cycles = Vec::new();

        while order.len() < self.len() {
            let next = match ready.pop_first() {
                Some(index) => index,
                None => {
                    let cycle = self.find_cycle(&emitted);
                    let description = self.describe(&cycle);
                    if policy == CyclePolicy::Fail {
                        return Err(Error::CycleDetected { cycle: description });
                    }
                    warn!(
                        "Dependency cycle among container packages: {}; falling back to collection order",
                        description
                    );
                    cycles.push(description);
                    cycle.into_iter().min().unwrap_or_default()
                }
            };

            emitted[next] = true;
            order.push(next);
            for &dependent in &self.dependents[next] {
                if emitted[dependent] {
                    continue;
                }
                unmet[dependent] -= 1;
                if unmet[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        Ok((order, cycles))
    }

    /// Locate a cycle among the packages not yet emitted.
    ///
    /// Only called when nothing is ready, so every remaining package has at
    /// least one remaining dependency and the walk must revisit a package.
    fn find_cycle(&self, emitted: &[bool]) -> Vec<usize> {
        let Some(start) = (0..self.len()).find(|&i| !emitted[i]) else {
            return Vec::new();
        };

        let mut path = vec![start];
        let mut position: HashMap<usize, usize> = HashMap::from([(start, 0)]);
        let mut current = start;
        loop {
            let Some(&next) = self.dependencies[current].iter().find(|&&d| !emitted[d]) else {
                return path;
            };
            if let Some(&at) = position.get(&next) {
                return path.split_off(at);
            }
            position.insert(next, path.len());
            path.push(next);
            current = next;
        }
    }

    fn describe(&self, cycle: &[usize]) -> String {
        let mut names: Vec<&str> = cycle.iter().map(|&i| self.names[i].as_str()).collect();
        if let Some(&first) = names.first() {
            names.push(first);
        }
        names.join(" -> ")
    }
}
