use crate::repos::shared::repo::DeleteResult;
use gather_notifier_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    find_by(collection, |item| item.id() == val_id).into_iter().next()
}

/// Replaces the first item matching `compare` or inserts `val` when
/// nothing matches. Returns the stored value.
pub fn upsert_by<T: Clone, F: Fn(&T) -> bool, U: FnOnce(&mut T)>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> T {
    let mut collection = collection.lock().unwrap();
    match collection.iter_mut().find(|item| compare(item)) {
        Some(existing) => {
            update(existing);
            existing.clone()
        }
        None => {
            collection.push(val.clone());
            val.clone()
        }
    }
}

pub fn delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> DeleteResult {
    DeleteResult {
        deleted_count: find_and_delete_by(collection, compare).len() as i64,
    }
}

pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Vec<T> {
    let mut collection = collection.lock().unwrap();
    let mut deleted_items = Vec::new();
    let mut index = 0;
    while index < collection.len() {
        if compare(&collection[index]) {
            deleted_items.push(collection.remove(index));
        } else {
            index += 1;
        }
    }

    deleted_items
}
