// src/record.rs
//! Firm records and the in-memory result set.
//!
//! A [`FirmRecord`] is the id plus the ordered `key: value` pairs read from the
//! firm's detail table. On disk it is one flat JSON object with `FirmId` first:
//!
//! ```text
//! { "FirmId": 42, "Firm Name": "Example & Co", "Address": "..." }
//! ```

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const ID_KEY: &str = "FirmId";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirmRecord {
    firm_id: u32,
    fields: Vec<(String, String)>,
}

impl FirmRecord {
    pub fn new(firm_id: u32) -> Self {
        Self { firm_id, fields: Vec::new() }
    }

    /// Build a record from extracted pairs. `None` when nothing but the id
    /// would be left, which is the "no data" case.
    pub fn from_fields<I>(firm_id: u32, fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut rec = Self::new(firm_id);
        for (k, v) in fields {
            rec.insert(k, v);
        }
        rec.is_valid().then_some(rec)
    }

    /// Insert or overwrite. An overwritten key keeps its first position.
    /// A key equal to `FirmId` is dropped; the id is not a table field.
    pub fn insert(&mut self, key: String, value: String) {
        if key == ID_KEY {
            logd!("FirmId {}: ignoring table row keyed {ID_KEY:?}", self.firm_id);
            return;
        }
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn firm_id(&self) -> u32 {
        self.firm_id
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Fields in table order, id excluded.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// At least one field besides the id.
    pub fn is_valid(&self) -> bool {
        !self.fields.is_empty()
    }
}

impl Serialize for FirmRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_KEY, &self.firm_id)?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FirmRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = FirmRecord;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with an integer FirmId and string fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FirmRecord, A::Error> {
        let mut firm_id: Option<u32> = None;
        let mut fields: Vec<(String, String)> = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == ID_KEY {
                if firm_id.is_some() {
                    return Err(de::Error::duplicate_field(ID_KEY));
                }
                firm_id = Some(map.next_value()?);
            } else {
                let value: String = map.next_value()?;
                fields.push((key, value));
            }
        }

        let firm_id = firm_id.ok_or_else(|| de::Error::missing_field(ID_KEY))?;
        Ok(FirmRecord { firm_id, fields })
    }
}

/// Accepted records in the order they were stored. Append-only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<FirmRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FirmRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[FirmRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FirmRecord> {
        self.records.iter()
    }

    pub fn into_vec(self) -> Vec<FirmRecord> {
        self.records
    }
}
