//! Trash Subsystem: per-record soft delete.
//!
//! State machine per record:
//! `Active -> (soft_delete) -> Trashed -> (restore) -> Active`, or
//! `Trashed -> (purge) -> Gone` (terminal). The trash item holds the sole
//! surviving copy of the record — removal from the live collection and
//! insertion into trash happen inside one read-modify-write, so there is
//! never duplication or loss.

use super::Database;
use crate::error::Result;
use crate::model::{new_id, now_ms, Record, TrashItem};
use crate::store::StorageBackend;

impl<B: StorageBackend> Database<B> {
    /// Move a record from its live collection into the novel's trash
    /// bucket, wrapped under a fresh trash-item id with the full record as
    /// payload. Silent no-op when the record is not found.
    pub fn soft_delete<T: Record>(&self, novel_id: &str, id: &str) -> Result<()> {
        let mut store = self.read()?;

        let removed = match T::bucket_mut(&mut store).get_mut(novel_id) {
            Some(bucket) => bucket
                .iter()
                .position(|r| r.id() == id)
                .map(|at| bucket.remove(at)),
            None => None,
        };

        if let Some(record) = removed {
            store
                .trash
                .entry(novel_id.to_string())
                .or_default()
                .push(TrashItem {
                    id: new_id(),
                    record: record.into_trashed(),
                    deleted_at: now_ms(),
                });
        }

        self.write(&store)
    }

    /// The novel's trash bucket, newest last. Empty when the novel has
    /// never trashed anything.
    pub fn list_trash(&self, novel_id: &str) -> Result<Vec<TrashItem>> {
        let store = self.read()?;
        Ok(store.trash.get(novel_id).cloned().unwrap_or_default())
    }

    /// Put a trashed record back into its original collection, exactly as
    /// it was at deletion time (`order`, `part_id`, links untouched).
    /// Parts and chapters re-sort by `order` so the record lands in its
    /// numerically correct slot. The original part of a restored chapter
    /// may itself be gone by now; the chapter then renders as unsectioned,
    /// which is the client's concern, not ours. Silent no-op when the
    /// trash item id is unknown.
    pub fn restore_from_trash(&self, novel_id: &str, trash_item_id: &str) -> Result<()> {
        let mut store = self.read()?;

        let item = match store.trash.get_mut(novel_id) {
            Some(bucket) => bucket
                .iter()
                .position(|item| item.id == trash_item_id)
                .map(|at| bucket.remove(at)),
            None => None,
        };

        if let Some(item) = item {
            item.record.restore_into(&mut store, novel_id);
        }

        self.write(&store)
    }

    /// Remove a trash item permanently. Terminal; silent no-op when
    /// unknown.
    pub fn purge_trash_item(&self, novel_id: &str, trash_item_id: &str) -> Result<()> {
        let mut store = self.read()?;
        if let Some(bucket) = store.trash.get_mut(novel_id) {
            bucket.retain(|item| item.id != trash_item_id);
        }
        self.write(&store)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::InMemoryDb;
    use crate::model::{Chapter, Collection, Location, Part, TrashedRecord};
    use chrono::Utc;

    fn chapter(part_id: &str, title: &str, order: i64) -> Chapter {
        Chapter {
            id: String::new(),
            part_id: part_id.into(),
            title: title.into(),
            content: String::new(),
            order,
            created_at: Utc::now(),
            linked_characters: None,
            linked_locations: None,
        }
    }

    #[test]
    fn soft_delete_moves_record_into_trash() {
        let db = InMemoryDb::new();
        let novel = db.create_novel("Alpha").unwrap();
        let ch = db.add(&novel.id, chapter("p1", "Uno", 0)).unwrap();

        db.soft_delete::<Chapter>(&novel.id, &ch.id).unwrap();

        let chapters: Vec<Chapter> = db.list(&novel.id).unwrap();
        assert!(chapters.is_empty());

        let trash = db.list_trash(&novel.id).unwrap();
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].record.collection(), Collection::Chapters);
        match &trash[0].record {
            TrashedRecord::Chapters(trashed) => {
                assert_eq!(trashed.id, ch.id);
                assert_eq!(trashed.order, 0);
                assert_eq!(trashed.part_id, "p1");
            }
            other => panic!("wrong trash payload: {other:?}"),
        }
    }

    #[test]
    fn soft_delete_unknown_id_is_a_silent_noop() {
        let db = InMemoryDb::new();
        let novel = db.create_novel("Alpha").unwrap();
        db.add(&novel.id, chapter("p1", "Uno", 0)).unwrap();

        db.soft_delete::<Chapter>(&novel.id, "missing").unwrap();
        db.soft_delete::<Chapter>("missing-novel", "missing").unwrap();

        let chapters: Vec<Chapter> = db.list(&novel.id).unwrap();
        assert_eq!(chapters.len(), 1);
        assert!(db.list_trash(&novel.id).unwrap().is_empty());
    }

    #[test]
    fn restore_preserves_fields_and_slot_among_siblings() {
        let db = InMemoryDb::new();
        let novel = db.create_novel("Alpha").unwrap();
        for (title, order) in [("Cero", 0), ("Uno", 1), ("Dos", 2), ("Tres", 3)] {
            db.add(&novel.id, chapter("p1", title, order)).unwrap();
        }

        let target = db
            .list::<Chapter>(&novel.id)
            .unwrap()
            .into_iter()
            .find(|c| c.order == 1)
            .unwrap();

        db.soft_delete::<Chapter>(&novel.id, &target.id).unwrap();
        let trash = db.list_trash(&novel.id).unwrap();
        db.restore_from_trash(&novel.id, &trash[0].id).unwrap();

        let chapters: Vec<Chapter> = db.list(&novel.id).unwrap();
        let orders: Vec<i64> = chapters.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);

        let restored = &chapters[1];
        assert_eq!(restored.id, target.id);
        assert_eq!(restored.order, 1);
        assert_eq!(restored.title, "Uno");
        assert!(db.list_trash(&novel.id).unwrap().is_empty());
    }

    #[test]
    fn restore_into_deleted_part_still_succeeds() {
        let db = InMemoryDb::new();
        let novel = db.create_novel("Alpha").unwrap();
        let part = db
            .add(
                &novel.id,
                Part {
                    id: String::new(),
                    name: "Prólogo".into(),
                    order: 0,
                    created_at: Utc::now(),
                },
            )
            .unwrap();
        let ch = db.add(&novel.id, chapter(&part.id, "Huérfano", 0)).unwrap();

        db.soft_delete::<Chapter>(&novel.id, &ch.id).unwrap();
        db.soft_delete::<Part>(&novel.id, &part.id).unwrap();

        // Restore only the chapter; its part stays in the trash.
        let chapter_item = db
            .list_trash(&novel.id)
            .unwrap()
            .into_iter()
            .find(|item| item.record.collection() == Collection::Chapters)
            .unwrap();
        db.restore_from_trash(&novel.id, &chapter_item.id).unwrap();

        let chapters: Vec<Chapter> = db.list(&novel.id).unwrap();
        assert_eq!(chapters.len(), 1);
        // The dangling reference is kept verbatim.
        assert_eq!(chapters[0].part_id, part.id);
        assert!(db.list::<Part>(&novel.id).unwrap().is_empty());
    }

    #[test]
    fn restore_unknown_item_is_a_silent_noop() {
        let db = InMemoryDb::new();
        let novel = db.create_novel("Alpha").unwrap();
        db.restore_from_trash(&novel.id, "missing").unwrap();
        db.restore_from_trash("missing-novel", "missing").unwrap();
        assert!(db.list_trash(&novel.id).unwrap().is_empty());
    }

    #[test]
    fn purge_trash_item_is_terminal() {
        let db = InMemoryDb::new();
        let novel = db.create_novel("Alpha").unwrap();
        let loc = db
            .add(
                &novel.id,
                Location {
                    id: String::new(),
                    name: "Aldea".into(),
                    description: "junto al río".into(),
                },
            )
            .unwrap();

        db.soft_delete::<Location>(&novel.id, &loc.id).unwrap();
        let trash = db.list_trash(&novel.id).unwrap();
        db.purge_trash_item(&novel.id, &trash[0].id).unwrap();

        assert!(db.list_trash(&novel.id).unwrap().is_empty());
        let world: Vec<Location> = db.list(&novel.id).unwrap();
        assert!(world.is_empty());

        // Purging again changes nothing.
        db.purge_trash_item(&novel.id, &trash[0].id).unwrap();
        assert!(db.list_trash(&novel.id).unwrap().is_empty());
    }

    #[test]
    fn trash_keeps_the_sole_copy() {
        let db = InMemoryDb::new();
        let novel = db.create_novel("Alpha").unwrap();
        let ch = db.add(&novel.id, chapter("p1", "Único", 0)).unwrap();

        db.soft_delete::<Chapter>(&novel.id, &ch.id).unwrap();

        // Exactly one copy exists, and it is in the trash.
        assert!(db.list::<Chapter>(&novel.id).unwrap().is_empty());
        assert_eq!(db.list_trash(&novel.id).unwrap().len(), 1);

        db.restore_from_trash(&novel.id, &db.list_trash(&novel.id).unwrap()[0].id)
            .unwrap();
        assert_eq!(db.list::<Chapter>(&novel.id).unwrap().len(), 1);
        assert!(db.list_trash(&novel.id).unwrap().is_empty());
    }
}
