//! # Factory Declarations and Entries
//!
//! A package contributes container factories through
//! `extra.container-interop.container-factory`. The value may take one of
//! four shapes:
//!
//! - a string: the code of a single factory,
//! - a list of strings: several factories,
//! - a descriptor object: `{ "name": ..., "description": ..., "factory": ... }`,
//! - a list of descriptor objects.
//!
//! [`classify`] turns the raw JSON value into a [`FactoryDeclaration`] once, at
//! ingestion, so that nothing downstream inspects JSON shapes again. Lists may
//! mix strings and descriptors element by element.
//!
//! [`FactoryDeclaration::into_declared`] then expands a declaration into
//! [`DeclaredFactory`] values, synthesizing names and descriptions for bare
//! code strings. A [`FactoryEntry`] is the final, persisted form produced by
//! the merge phase.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::php::PhpValue;

/// Keys with a dedicated field; every other key is an extra attribute.
pub const NAME_KEY: &str = "name";
pub const DESCRIPTION_KEY: &str = "description";
pub const FACTORY_KEY: &str = "factory";
pub const ENABLE_KEY: &str = "enable";
pub const ENTRY_KEYS: [&str; 4] = [NAME_KEY, DESCRIPTION_KEY, FACTORY_KEY, ENABLE_KEY];

/// An explicit factory descriptor as declared by a package
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryDescriptor {
    pub name: Option<String>,
    pub description: Option<String>,
    pub factory: String,
    pub enable: Option<bool>,
    pub extra: IndexMap<String, PhpValue>,
}

/// One element of a factory list
#[derive(Debug, Clone, PartialEq)]
pub enum FactoryItem {
    Code(String),
    Descriptor(FactoryDescriptor),
}

/// A classified `container-factory` declaration
#[derive(Debug, Clone, PartialEq)]
pub enum FactoryDeclaration {
    /// A single factory code string
    Scalar(String),
    /// A list of factory code strings
    ScalarList(Vec<String>),
    /// A single descriptor object
    Descriptor(FactoryDescriptor),
    /// A list of descriptor objects
    DescriptorList(Vec<FactoryDescriptor>),
    /// A list mixing code strings and descriptor objects
    MixedList(Vec<FactoryItem>),
}

/// Why a declaration could not be classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyError {
    pub message: String,
}

impl ClassifyError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Classify a raw `container-factory` value.
///
/// A JSON object whose keys are exactly `"0"` to `"n-1"` is a list that went
/// through an associative-array round trip and is treated as one; any other
/// object is a single descriptor.
pub fn classify(value: &Value) -> Result<FactoryDeclaration, ClassifyError> {
    match value {
        Value::String(code) => Ok(FactoryDeclaration::Scalar(code.clone())),
        Value::Array(items) => classify_list(items.iter()),
        Value::Object(map) => match sequential_values(map) {
            Some(items) => classify_list(items.into_iter()),
            None => Ok(FactoryDeclaration::Descriptor(parse_descriptor(map)?)),
        },
        Value::Null => Err(ClassifyError::new("declaration is null")),
        Value::Bool(_) | Value::Number(_) => Err(ClassifyError::new(
            "expected a factory code string, a list, or a factory descriptor",
        )),
    }
}

fn classify_list<'a>(
    items: impl Iterator<Item = &'a Value>,
) -> Result<FactoryDeclaration, ClassifyError> {
    let mut parsed = Vec::new();
    for (index, item) in items.enumerate() {
        let item = match item {
            Value::String(code) => FactoryItem::Code(code.clone()),
            Value::Object(map) => FactoryItem::Descriptor(parse_descriptor(map).map_err(|e| {
                ClassifyError::new(format!("element {}: {}", index, e.message))
            })?),
            _ => {
                return Err(ClassifyError::new(format!(
                    "element {} is neither a factory code string nor a descriptor",
                    index
                )))
            }
        };
        parsed.push(item);
    }

    let all_code = parsed.iter().all(|i| matches!(i, FactoryItem::Code(_)));
    let all_descriptors = parsed
        .iter()
        .all(|i| matches!(i, FactoryItem::Descriptor(_)));

    Ok(if all_code {
        FactoryDeclaration::ScalarList(
            parsed
                .into_iter()
                .filter_map(|i| match i {
                    FactoryItem::Code(code) => Some(code),
                    FactoryItem::Descriptor(_) => None,
                })
                .collect(),
        )
    } else if all_descriptors {
        FactoryDeclaration::DescriptorList(
            parsed
                .into_iter()
                .filter_map(|i| match i {
                    FactoryItem::Descriptor(descriptor) => Some(descriptor),
                    FactoryItem::Code(_) => None,
                })
                .collect(),
        )
    } else {
        FactoryDeclaration::MixedList(parsed)
    })
}

/// Values of an object keyed `"0"..="n-1"`, in index order.
fn sequential_values(map: &Map<String, Value>) -> Option<Vec<&Value>> {
    if map.is_empty() {
        return None;
    }
    (0..map.len())
        .map(|index| map.get(&index.to_string()))
        .collect()
}

fn parse_descriptor(map: &Map<String, Value>) -> Result<FactoryDescriptor, ClassifyError> {
    let optional_string = |key: &str| -> Result<Option<String>, ClassifyError> {
        match map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(ClassifyError::new(format!(
                "descriptor field '{}' must be a string",
                key
            ))),
        }
    };

    let factory = optional_string(FACTORY_KEY)?
        .ok_or_else(|| ClassifyError::new("descriptor has no 'factory' code"))?;

    let enable = match map.get(ENABLE_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            return Err(ClassifyError::new(
                "descriptor field 'enable' must be a boolean",
            ))
        }
    };

    let extra = map
        .iter()
        .filter(|(key, _)| !ENTRY_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), PhpValue::from(value)))
        .collect();

    Ok(FactoryDescriptor {
        name: optional_string(NAME_KEY)?,
        description: optional_string(DESCRIPTION_KEY)?,
        factory,
        enable,
        extra,
    })
}

/// A factory declared by a package, before merging with the previous file
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredFactory {
    pub name: String,
    pub description: String,
    pub factory: String,
    /// Set only when the descriptor states it explicitly
    pub enable: Option<bool>,
    pub extra: IndexMap<String, PhpValue>,
}

/// Name synthesized for the factory at `index` of `package`.
pub fn synthesized_name(package: &str, index: usize) -> String {
    format!("{}_{}", package, index)
}

/// Description synthesized for the factory at `index` of `package` when the
/// package declares `count` factories.
pub fn synthesized_description(package: &str, index: usize, count: usize) -> String {
    if count == 1 {
        format!("Container for package {}", package)
    } else {
        format!("Container number {} for package {}", index, package)
    }
}

impl FactoryDeclaration {
    /// Flatten into list items, in declaration order.
    pub fn into_items(self) -> Vec<FactoryItem> {
        match self {
            FactoryDeclaration::Scalar(code) => vec![FactoryItem::Code(code)],
            FactoryDeclaration::ScalarList(codes) => {
                codes.into_iter().map(FactoryItem::Code).collect()
            }
            FactoryDeclaration::Descriptor(descriptor) => {
                vec![FactoryItem::Descriptor(descriptor)]
            }
            FactoryDeclaration::DescriptorList(descriptors) => descriptors
                .into_iter()
                .map(FactoryItem::Descriptor)
                .collect(),
            FactoryDeclaration::MixedList(items) => items,
        }
    }

    /// Expand into declared factories for `package`.
    ///
    /// Missing names and descriptions are synthesized from the element's index
    /// within this package's own list.
    pub fn into_declared(self, package: &str) -> Vec<DeclaredFactory> {
        let items = self.into_items();
        let count = items.len();
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                FactoryItem::Code(factory) => DeclaredFactory {
                    name: synthesized_name(package, index),
                    description: synthesized_description(package, index, count),
                    factory,
                    enable: None,
                    extra: IndexMap::new(),
                },
                FactoryItem::Descriptor(descriptor) => DeclaredFactory {
                    name: descriptor
                        .name
                        .unwrap_or_else(|| synthesized_name(package, index)),
                    description: descriptor
                        .description
                        .unwrap_or_else(|| synthesized_description(package, index, count)),
                    factory: descriptor.factory,
                    enable: descriptor.enable,
                    extra: descriptor.extra,
                },
            })
            .collect()
    }
}

/// A factory entry as written to the containers file
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryEntry {
    /// Stable identity key
    pub name: String,
    pub description: String,
    /// Factory code, written verbatim
    pub factory: String,
    pub enable: bool,
    /// Hand-written code deciding `enable` when the file is loaded. Written
    /// back in place of `enable` while set.
    pub enable_expression: Option<String>,
    /// Any other attributes, in first-seen order
    pub extra: IndexMap<String, PhpValue>,
}

impl FactoryEntry {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        factory: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            factory: factory.into(),
            enable: true,
            enable_expression: None,
            extra: IndexMap::new(),
        }
    }
}
