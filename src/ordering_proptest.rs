//! Property-based tests for dependency ordering and factory merging.
//!
//! These tests use proptest to generate random package graphs and verify that
//! the ordering invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::factory::FactoryEntry;
    use crate::package::PackageRecord;
    use crate::phases::{merge, ordering, CyclePolicy};
    use crate::php;
    use proptest::prelude::*;
    use serde_json::json;

    /// Packages `p0..pn` where `p{i}` may only depend on `p{j}` with `j < i`,
    /// presented in a shuffled collection order. Always acyclic.
    fn acyclic_packages() -> impl Strategy<Value = Vec<PackageRecord>> {
        (1usize..12)
            .prop_flat_map(|n| {
                (
                    Just(n),
                    proptest::collection::vec(any::<bool>(), n * n),
                    Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
                )
            })
            .prop_map(|(n, edges, order)| {
                order
                    .into_iter()
                    .map(|i| {
                        let mut package = PackageRecord::new(format!("vendor/p{}", i));
                        for j in 0..i {
                            if edges[i * n + j] {
                                package = package.with_dependency(format!("vendor/p{}", j));
                            }
                        }
                        package
                    })
                    .collect()
            })
    }

    /// Packages with arbitrary edges, cycles included.
    fn arbitrary_packages() -> impl Strategy<Value = Vec<PackageRecord>> {
        (1usize..10).prop_flat_map(|n| {
            proptest::collection::vec(proptest::collection::vec(0..n, 0..4), n).prop_map(
                move |deps| {
                    deps.into_iter()
                        .enumerate()
                        .map(|(i, targets)| {
                            targets.into_iter().fold(
                                PackageRecord::new(format!("vendor/p{}", i)),
                                |package, j| package.with_dependency(format!("vendor/p{}", j)),
                            )
                        })
                        .collect()
                },
            )
        })
    }

    fn names(packages: &[PackageRecord]) -> Vec<String> {
        packages.iter().map(|p| p.name.clone()).collect()
    }

    proptest! {
        /// Property: every dependency is emitted before each of its dependents
        #[test]
        fn dependencies_precede_dependents(packages in acyclic_packages()) {
            let ordered = ordering::execute(packages, CyclePolicy::Fail).unwrap();
            let order = names(&ordered.packages);
            for (index, package) in ordered.packages.iter().enumerate() {
                for dependency in &package.dependencies {
                    let at = order.iter().position(|n| n == dependency).unwrap();
                    prop_assert!(
                        at < index,
                        "{} was emitted after its dependent {}",
                        dependency,
                        package.name
                    );
                }
            }
            prop_assert!(ordered.cycles.is_empty());
        }

        /// Property: ordering is deterministic
        #[test]
        fn ordering_is_deterministic(packages in arbitrary_packages()) {
            let first = ordering::execute(packages.clone(), CyclePolicy::Fallback).unwrap();
            let second = ordering::execute(packages, CyclePolicy::Fallback).unwrap();
            prop_assert_eq!(names(&first.packages), names(&second.packages));
            prop_assert_eq!(first.cycles, second.cycles);
        }

        /// Property: cycles never drop or duplicate packages
        #[test]
        fn fallback_emits_every_package_once(packages in arbitrary_packages()) {
            let mut expected = names(&packages);
            let ordered = ordering::execute(packages, CyclePolicy::Fallback).unwrap();
            let mut actual = names(&ordered.packages);
            expected.sort();
            actual.sort();
            prop_assert_eq!(actual, expected);
        }

        /// Property: packages without dependencies keep their collection order
        #[test]
        fn independent_packages_keep_order(count in 1usize..20) {
            let packages: Vec<PackageRecord> = (0..count)
                .rev()
                .map(|i| PackageRecord::new(format!("vendor/p{}", i)))
                .collect();
            let expected = names(&packages);
            let ordered = ordering::execute(packages, CyclePolicy::Fail).unwrap();
            prop_assert_eq!(names(&ordered.packages), expected);
        }

        /// Property: a disabled entry stays disabled whatever the new factory code
        #[test]
        fn disabled_entries_survive_regeneration(code in "[A-Za-z]{1,12}::[a-z]{1,8}\\(\\)") {
            let mut previous = FactoryEntry::new("vendor/p_0", "old", "Old::make()");
            previous.enable = false;
            let rendered = php::render_entries(&[previous]);
            let previous = php::parse_entries(&rendered).unwrap();

            let packages = vec![PackageRecord::new("vendor/p").with_factories(json!(code.clone()))];
            let outcome = merge::execute(&packages, &previous);
            prop_assert_eq!(outcome.entries.len(), 1);
            prop_assert!(!outcome.entries[0].enable);
            prop_assert_eq!(&outcome.entries[0].factory, &code);
        }
    }
}
