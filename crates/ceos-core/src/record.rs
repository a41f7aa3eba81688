//! Mission records and their JSON shape.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Output key holding the resolved agency names.
pub const CANONICAL_AGENCY_NAMES: &str = "canonical-agency-names";

/// Value of one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Cell text, or `None` when the registry had no data.
    Text(Option<String>),
    /// Agency acronyms with their canonical names, index-aligned.
    Agencies {
        acronyms: Vec<String>,
        canonical_names: Vec<String>,
    },
}

/// One row of the mission table, fields in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionRecord {
    fields: Vec<(String, FieldValue)>,
}

impl MissionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, header: impl Into<String>, value: Option<String>) {
        self.set(header.into(), FieldValue::Text(value));
    }

    /// Attach the agency list and its resolved names.
    ///
    /// # Panics
    /// If the two lists differ in length; the resolver produces exactly one
    /// name per acronym.
    pub fn push_agencies(
        &mut self,
        header: impl Into<String>,
        acronyms: Vec<String>,
        canonical_names: Vec<String>,
    ) {
        assert_eq!(
            acronyms.len(),
            canonical_names.len(),
            "one canonical name per acronym"
        );
        self.set(
            header.into(),
            FieldValue::Agencies {
                acronyms,
                canonical_names,
            },
        );
    }

    /// A repeated header keeps its first position and takes the new value.
    fn set(&mut self, header: String, value: FieldValue) {
        match self.fields.iter_mut().find(|(h, _)| *h == header) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((header, value)),
        }
    }

    pub fn get(&self, header: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    /// Resolved agency names, if the record carries an agency column.
    pub fn canonical_agency_names(&self) -> Option<&[String]> {
        self.fields.iter().find_map(|(_, v)| match v {
            FieldValue::Agencies {
                canonical_names, ..
            } => Some(canonical_names.as_slice()),
            FieldValue::Text(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for MissionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = self
            .fields
            .iter()
            .filter(|(_, v)| matches!(v, FieldValue::Agencies { .. }))
            .count();
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        for (header, value) in &self.fields {
            match value {
                FieldValue::Text(text) => map.serialize_entry(header, text)?,
                FieldValue::Agencies {
                    acronyms,
                    canonical_names,
                } => {
                    map.serialize_entry(header, acronyms)?;
                    map.serialize_entry(CANONICAL_AGENCY_NAMES, canonical_names)?;
                }
            }
        }
        map.end()
    }
}
