//! # Domain Model: The Persisted Store and Its Records
//!
//! Everything the workspace persists lives in one root aggregate, [`Store`]:
//! a flat list of [`Novel`] records plus seven maps keyed by novel id — six
//! typed collections (`parts`, `chapters`, `characters`, `world`,
//! `relations`, `ideas`) and a `trash` bucket of [`TrashItem`]s.
//!
//! ## Wire Format
//!
//! The serialized shape is a stable contract shared with exported backups
//! and with data written by earlier versions of the workspace:
//!
//! - Field names are camelCase (`createdAt`, `partId`, `linkedCharacters`).
//! - Timestamps are integer epoch milliseconds.
//! - Ids are opaque random string tokens, never reused. New ids are minted
//!   from UUIDv4, but the model accepts any string so older blobs (which
//!   used short base36 tokens) round-trip unchanged.
//! - A trash item serializes as `{id, originalCollection, data, deletedAt}`,
//!   where `data` is the full original record verbatim.
//!
//! ## Ordering
//!
//! Parts order the manuscript; chapters order themselves within a part via
//! the same integer `order` field. Gaps are tolerated — only the relative
//! order matters on read. Missing `order` values read as 0. Reorder
//! operations replace a whole bucket with a caller-renumbered list; the
//! store never renumbers on its own.
//!
//! ## The `Record` Trait
//!
//! [`Record`] ties each collection entity to its [`Collection`] tag, its
//! bucket inside [`Store`], and its [`TrashedRecord`] variant. It is what
//! lets the repository and trash operations stay generic without losing
//! typing.

use std::collections::HashMap;
use std::fmt;

use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, SubsecRound, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mint a fresh opaque id token.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The current instant at wire precision. Timestamps persist as epoch
/// milliseconds, so anything minted here must carry no sub-millisecond
/// part — otherwise a value handed to the caller would differ from what a
/// later read observes.
pub(crate) fn now_ms() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Novel {
    pub id: String,
    pub title: String,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub last_modified: DateTime<Utc>,
    /// Soft-deletion marker. `Some` means the novel sits in the novel-level
    /// trash view; clearing it restores the novel.
    #[serde(
        default,
        with = "ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    /// Weak reference to a [`Part`]. Empty or unmatched means the chapter
    /// is unsectioned; it is never validated on write.
    #[serde(default)]
    pub part_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub order: i64,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_characters: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_locations: Option<Vec<String>>,
}

/// A character sheet. Besides the fixed identity fields, a sheet carries an
/// open-ended bag of descriptive fields (physical, psychological, social)
/// that the editor UI defines. They are kept as a flattened map so every
/// field round-trips losslessly without this crate hard-coding the
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A directed link between two characters. Both endpoints are weak
/// references by id; `kind` and `intensity` are free-text labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub intensity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub color: String,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Names one of the six per-novel collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Parts,
    Chapters,
    Characters,
    World,
    Relations,
    Ideas,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Parts => "parts",
            Collection::Chapters => "chapters",
            Collection::Characters => "characters",
            Collection::World => "world",
            Collection::Relations => "relations",
            Collection::Ideas => "ideas",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A soft-deleted record, tagged with the collection it came from.
///
/// Serializes adjacently tagged so the wire shape is the pair
/// `"originalCollection": "chapters", "data": {...}` with the original
/// record stored verbatim — including its `order` and `part_id`, which is
/// what makes restore land it back in its exact slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "originalCollection", content = "data", rename_all = "camelCase")]
pub enum TrashedRecord {
    Parts(Part),
    Chapters(Chapter),
    Characters(Character),
    World(Location),
    Relations(Relation),
    Ideas(Idea),
}

impl TrashedRecord {
    pub fn collection(&self) -> Collection {
        match self {
            TrashedRecord::Parts(_) => Collection::Parts,
            TrashedRecord::Chapters(_) => Collection::Chapters,
            TrashedRecord::Characters(_) => Collection::Characters,
            TrashedRecord::World(_) => Collection::World,
            TrashedRecord::Relations(_) => Collection::Relations,
            TrashedRecord::Ideas(_) => Collection::Ideas,
        }
    }

    /// Put the record back into its original bucket. Parts and chapters are
    /// re-sorted by `order` so the restored record lands in its numerically
    /// correct slot; the sort is stable, so siblings with equal `order`
    /// keep their pre-existing relative position. No referential checks —
    /// a chapter may restore into a part that no longer exists.
    pub(crate) fn restore_into(self, store: &mut Store, novel_id: &str) {
        match self {
            TrashedRecord::Parts(part) => {
                let bucket = store.parts.entry(novel_id.to_string()).or_default();
                bucket.push(part);
                bucket.sort_by_key(|p| p.order);
            }
            TrashedRecord::Chapters(chapter) => {
                let bucket = store.chapters.entry(novel_id.to_string()).or_default();
                bucket.push(chapter);
                bucket.sort_by_key(|c| c.order);
            }
            TrashedRecord::Characters(character) => {
                store
                    .characters
                    .entry(novel_id.to_string())
                    .or_default()
                    .push(character);
            }
            TrashedRecord::World(location) => {
                store
                    .world
                    .entry(novel_id.to_string())
                    .or_default()
                    .push(location);
            }
            TrashedRecord::Relations(relation) => {
                store
                    .relations
                    .entry(novel_id.to_string())
                    .or_default()
                    .push(relation);
            }
            TrashedRecord::Ideas(idea) => {
                store
                    .ideas
                    .entry(novel_id.to_string())
                    .or_default()
                    .push(idea);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashItem {
    pub id: String,
    #[serde(flatten)]
    pub record: TrashedRecord,
    #[serde(with = "ts_milliseconds")]
    pub deleted_at: DateTime<Utc>,
}

/// The root aggregate: the entire persisted workspace.
///
/// Field order matches the historical blob layout. Every field defaults so
/// partial or older blobs read cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub novels: Vec<Novel>,
    #[serde(default)]
    pub parts: HashMap<String, Vec<Part>>,
    #[serde(default)]
    pub chapters: HashMap<String, Vec<Chapter>>,
    #[serde(default)]
    pub characters: HashMap<String, Vec<Character>>,
    #[serde(default)]
    pub world: HashMap<String, Vec<Location>>,
    #[serde(default)]
    pub relations: HashMap<String, Vec<Relation>>,
    #[serde(default)]
    pub ideas: HashMap<String, Vec<Idea>>,
    #[serde(default)]
    pub trash: HashMap<String, Vec<TrashItem>>,
}

/// A typed collection entity: knows its collection tag, its id, its bucket
/// within the [`Store`], and how to wrap itself for the trash.
pub trait Record: Clone + Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn bucket(store: &Store) -> &HashMap<String, Vec<Self>>;
    fn bucket_mut(store: &mut Store) -> &mut HashMap<String, Vec<Self>>;
    fn into_trashed(self) -> TrashedRecord;
}

macro_rules! impl_record {
    ($ty:ident, $collection:ident, $field:ident) => {
        impl Record for $ty {
            const COLLECTION: Collection = Collection::$collection;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn bucket(store: &Store) -> &HashMap<String, Vec<Self>> {
                &store.$field
            }

            fn bucket_mut(store: &mut Store) -> &mut HashMap<String, Vec<Self>> {
                &mut store.$field
            }

            fn into_trashed(self) -> TrashedRecord {
                TrashedRecord::$collection(self)
            }
        }
    };
}

impl_record!(Part, Parts, parts);
impl_record!(Chapter, Chapters, chapters);
impl_record!(Character, Characters, characters);
impl_record!(Location, World, world);
impl_record!(Relation, Relations, relations);
impl_record!(Idea, Ideas, ideas);
