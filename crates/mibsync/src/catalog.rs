//! Attribute catalog: field name → (wire type, cardinality).
//!
//! Built from a message descriptor. The `severity` and `title` entries are
//! always present and always win over same-named schema fields.

use std::collections::BTreeMap;
use std::path::Path;

use mibsync_core::schema::{FieldLabel, FieldType, MessageDescriptor};

use crate::error::{Result, SyncError};

/// Type information for a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeInfo {
    pub field_type: FieldType,
    pub label: FieldLabel,
}

#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    entries: BTreeMap<String, AttributeInfo>,
}

impl AttributeCatalog {
    /// Build the catalog from a descriptor.
    ///
    /// Fails on the first field whose type or label code is outside the
    /// known table.
    pub fn from_descriptor(descriptor: &MessageDescriptor) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for field in &descriptor.fields {
            let field_type =
                FieldType::try_from(field.type_code).map_err(|source| SyncError::Catalog {
                    field: field.name.clone(),
                    source,
                })?;
            let label =
                FieldLabel::try_from(field.label_code).map_err(|source| SyncError::Catalog {
                    field: field.name.clone(),
                    source,
                })?;
            entries.insert(field.name.clone(), AttributeInfo { field_type, label });
        }

        entries.insert(
            "severity".to_string(),
            AttributeInfo {
                field_type: FieldType::Int64,
                label: FieldLabel::Optional,
            },
        );
        entries.insert(
            "title".to_string(),
            AttributeInfo {
                field_type: FieldType::String,
                label: FieldLabel::Optional,
            },
        );

        tracing::debug!(
            message = %descriptor.name,
            attributes = entries.len(),
            "Attribute catalog built"
        );

        Ok(Self { entries })
    }

    /// Build the catalog from a JSON descriptor file.
    pub fn from_descriptor_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let descriptor: MessageDescriptor =
            serde_json::from_str(&json).map_err(|source| SyncError::Descriptor {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_descriptor(&descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&AttributeInfo> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use mibsync_core::schema::FieldDescriptor;
    use mibsync_core::CoreError;

    use super::*;

    fn descriptor(fields: Vec<FieldDescriptor>) -> MessageDescriptor {
        MessageDescriptor {
            name: "Test".to_string(),
            fields,
        }
    }

    #[test]
    fn test_builtin_check_schema() {
        let catalog = AttributeCatalog::from_descriptor(&MessageDescriptor::check_schema()).unwrap();
        let name = catalog.get("name").unwrap();
        assert_eq!(name.field_type, FieldType::String);
        assert_eq!(name.label, FieldLabel::Required);
        assert_eq!(
            catalog.get("causes").unwrap().label,
            FieldLabel::Repeated
        );
    }

    #[test]
    fn test_overrides_always_win() {
        let catalog = AttributeCatalog::from_descriptor(&descriptor(vec![
            FieldDescriptor::new("severity", 1, 9, 3),
            FieldDescriptor::new("title", 2, 8, 2),
        ]))
        .unwrap();

        assert_eq!(
            catalog.get("severity"),
            Some(&AttributeInfo {
                field_type: FieldType::Int64,
                label: FieldLabel::Optional,
            })
        );
        assert_eq!(
            catalog.get("title"),
            Some(&AttributeInfo {
                field_type: FieldType::String,
                label: FieldLabel::Optional,
            })
        );
    }

    #[test]
    fn test_overrides_present_for_empty_schema() {
        let catalog = AttributeCatalog::from_descriptor(&descriptor(vec![])).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("severity").is_some());
        assert!(catalog.get("title").is_some());
    }

    #[test]
    fn test_unknown_type_code_fails() {
        let err = AttributeCatalog::from_descriptor(&descriptor(vec![
            FieldDescriptor::new("name", 1, 9, 1),
            FieldDescriptor::new("payload", 2, 18, 1),
        ]))
        .unwrap_err();

        match err {
            SyncError::Catalog { field, source } => {
                assert_eq!(field, "payload");
                assert_eq!(source, CoreError::UnknownFieldType(18));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_label_code_fails() {
        let err = AttributeCatalog::from_descriptor(&descriptor(vec![FieldDescriptor::new(
            "name", 1, 9, 0,
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            SyncError::Catalog {
                source: CoreError::UnknownFieldLabel(0),
                ..
            }
        ));
    }

    #[test]
    fn test_descriptor_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("descriptor.json");
        std::fs::write(
            &path,
            r#"{"name": "AlertConfig", "fields": [{"name": "impact", "type": 9, "label": 1}]}"#,
        )
        .unwrap();

        let catalog = AttributeCatalog::from_descriptor_file(&path).unwrap();
        assert_eq!(catalog.get("impact").unwrap().field_type, FieldType::String);

        std::fs::write(&path, "not json").unwrap();
        let err = AttributeCatalog::from_descriptor_file(&path).unwrap_err();
        assert!(matches!(err, SyncError::Descriptor { .. }));
    }
}
