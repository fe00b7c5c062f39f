use crate::struct_info::StructInfo;
use crate::types::Urlstruct;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

type Entry = Arc<dyn Any + Send + Sync>;

static REGISTRY: OnceLock<RwLock<HashMap<TypeId, Entry>>> = OnceLock::new();

thread_local! {
    /// Record types whose field tables are being built on this thread, outermost first.
    static BUILDING: RefCell<Vec<(TypeId, &'static str)>> = const { RefCell::new(Vec::new()) };
}

fn registry() -> &'static RwLock<HashMap<TypeId, Entry>> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Returns the field table for `T`, building and publishing it on first use.
///
/// The table is built outside the lock and published with `or_insert`, so
/// callers racing on an unseen type all observe the same published table.
///
/// # Panics
///
/// Panics when `T` embeds itself, directly or through other records.
pub fn struct_info<T: Urlstruct>() -> Arc<StructInfo<T>> {
    let key = TypeId::of::<T>();
    if let Some(entry) = lookup(key) {
        return downcast(entry);
    }

    let built: Entry = {
        let _guard = BuildGuard::enter(key, std::any::type_name::<T>());
        Arc::new(StructInfo::new(T::shape()))
    };

    let published = registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(key)
        .or_insert(built)
        .clone();
    downcast(published)
}

/// Returns true when the field table for `T` has been published.
pub fn is_registered<T: Urlstruct>() -> bool {
    lookup(TypeId::of::<T>()).is_some()
}

fn lookup(key: TypeId) -> Option<Entry> {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned()
}

fn downcast<T: Urlstruct>(entry: Entry) -> Arc<StructInfo<T>> {
    entry
        .downcast::<StructInfo<T>>()
        .unwrap_or_else(|_| unreachable!("registry entries are keyed by their TypeId"))
}

struct BuildGuard;

impl BuildGuard {
    fn enter(key: TypeId, type_name: &'static str) -> Self {
        BUILDING.with(|building| {
            let mut building = building.borrow_mut();
            if let Some(start) = building.iter().position(|(id, _)| *id == key) {
                let ring: Vec<&str> = building[start..]
                    .iter()
                    .map(|(_, name)| *name)
                    .chain(std::iter::once(type_name))
                    .collect();
                drop(building);
                panic!("urlstruct: embedding cycle detected: {}", ring.join(" -> "));
            }
            building.push((key, type_name));
        });
        BuildGuard
    }
}

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with(|building| {
            building.borrow_mut().pop();
        });
    }
}
