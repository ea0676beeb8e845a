use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The kinds of record that carry an opaque id.
///
/// Each kind owns a three-letter prefix; ids render as `"<prefix>_<32 hex chars>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Tournament,
    Bowl,
    Event,
    Division,
    Squad,
    Lane,
    Pot,
    Bracket,
    Eliminator,
}

impl EntityKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Tournament => "tmt",
            Self::Bowl => "bwl",
            Self::Event => "evt",
            Self::Division => "div",
            Self::Squad => "sqd",
            Self::Lane => "lan",
            Self::Pot => "pot",
            Self::Bracket => "brk",
            Self::Eliminator => "elm",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        [
            Self::Tournament,
            Self::Bowl,
            Self::Event,
            Self::Division,
            Self::Squad,
            Self::Lane,
            Self::Pot,
            Self::Bracket,
            Self::Eliminator,
        ]
        .into_iter()
        .find(|kind| kind.prefix() == prefix)
    }

    /// Human-readable singular name, used in blocking messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tournament => "Tournament",
            Self::Bowl => "Bowl",
            Self::Event => "Event",
            Self::Division => "Division",
            Self::Squad => "Squad",
            Self::Lane => "Lane",
            Self::Pot => "Pot",
            Self::Bracket => "Bracket",
            Self::Eliminator => "Eliminator",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const HEX_LEN: usize = 32;

/// Opaque record id of the shape `evt_0123...cdef`.
///
/// Construction goes through [`EntityId::parse`] or an [`IdGenerator`], so a
/// held id always has a known prefix and exactly 32 hex characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    kind: EntityKind,
    text: String,
}

impl EntityId {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let Some((prefix, digits)) = value.split_once('_') else {
            return Err(DomainError::MalformedId { value });
        };
        let Some(kind) = EntityKind::from_prefix(prefix) else {
            return Err(DomainError::UnknownIdPrefix {
                prefix: prefix.to_string(),
            });
        };
        if digits.len() != HEX_LEN || hex::decode(digits).is_err() {
            return Err(DomainError::MalformedId { value });
        }
        Ok(Self {
            kind,
            text: value.to_ascii_lowercase(),
        })
    }

    /// Build an id from a kind and 16 raw bytes.
    pub fn from_parts(kind: EntityKind, bytes: [u8; 16]) -> Self {
        Self {
            kind,
            text: format!("{}_{}", kind.prefix(), hex::encode(bytes)),
        }
    }

    /// Deterministic id for fixtures: the number is big-endian encoded into the hex part.
    pub fn numbered(kind: EntityKind, n: u128) -> Self {
        Self::from_parts(kind, n.to_be_bytes())
    }

    /// All-zero placeholder carried by staged drafts until they are committed.
    pub fn placeholder(kind: EntityKind) -> Self {
        Self::numbered(kind, 0)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.text
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Source of fresh ids for newly added records.
pub trait IdGenerator {
    fn next_id(&mut self, kind: EntityKind) -> EntityId;
}

/// Random v4 UUIDs rendered in simple (undashed) form.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, kind: EntityKind) -> EntityId {
        EntityId::from_parts(kind, *Uuid::new_v4().as_bytes())
    }
}

/// Counts upward from a starting value. Deterministic, so handy for fixtures.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    last: u128,
}

impl SequentialIds {
    pub fn starting_after(last: u128) -> Self {
        Self { last }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: EntityKind) -> EntityId {
        self.last += 1;
        EntityId::numbered(kind, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_ids_render_prefix_and_32_hex_chars() {
        let id = EntityId::numbered(EntityKind::Event, 1);
        assert_eq!(id.as_str(), "evt_00000000000000000000000000000001");
        assert_eq!(id.kind(), EntityKind::Event);
    }

    #[test]
    fn parse_accepts_generated_ids() {
        let mut ids = UuidIds;
        let id = ids.next_id(EntityKind::Bracket);
        assert_eq!(EntityId::parse(id.to_string()).unwrap(), id);
        assert!(id.as_str().starts_with("brk_"));
    }

    #[test]
    fn parse_rejects_unknown_prefix() {
        let err = EntityId::parse("xyz_00000000000000000000000000000001").unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownIdPrefix {
                prefix: "xyz".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_short_or_non_hex_digits() {
        assert!(EntityId::parse("sqd_1234").is_err());
        assert!(EntityId::parse("sqd_zz000000000000000000000000000001").is_err());
        assert!(EntityId::parse("sqd00000000000000000000000000000001").is_err());
    }

    #[test]
    fn sequential_ids_are_distinct_and_ordered() {
        let mut ids = SequentialIds::default();
        let a = ids.next_id(EntityKind::Pot);
        let b = ids.next_id(EntityKind::Pot);
        assert!(a < b);
    }

    #[test]
    fn ids_round_trip_through_serde_as_plain_strings() {
        let id = EntityId::numbered(EntityKind::Division, 7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"div_00000000000000000000000000000007\"");
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<EntityId>("\"div_7\"").is_err());
    }
}
