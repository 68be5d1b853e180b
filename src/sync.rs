#[cfg(feature = "loom")]
mod imp {
    use crate::types::{HashSet, IndexMap};
    use core::{cell::RefCell, hash::Hash, marker::PhantomData};
    pub(crate) use loom::sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    };
    use loom::{sync::Mutex, thread};

    pub(crate) struct ConcurrentSet<T>(Mutex<HashSet<T>>);

    impl<T: Eq + Hash> ConcurrentSet<T> {
        pub(crate) fn new() -> Self {
            Self(Mutex::new(HashSet::default()))
        }

        pub(crate) fn insert(&self, value: T) -> bool {
            self.0.lock().unwrap().insert(value)
        }

        pub(crate) fn contains(&self, value: &T) -> bool {
            self.0.lock().unwrap().contains(value)
        }

        pub(crate) fn len(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    pub(crate) struct ConcurrentMap<K, V>(Mutex<IndexMap<K, V>>);

    impl<K: Eq + Hash, V: Copy> ConcurrentMap<K, V> {
        pub(crate) fn new() -> Self {
            Self(Mutex::new(IndexMap::default()))
        }

        pub(crate) fn insert_if_absent(&self, key: K, value: V) -> bool {
            let mut map = self.0.lock().unwrap();
            if map.contains_key(&key) {
                return false;
            }
            map.insert(key, value);
            true
        }

        pub(crate) fn get(&self, key: &K) -> Option<V> {
            self.0.lock().unwrap().get(key).copied()
        }
    }

    /// Loom join handles are not `Send`, so every thread joins the threads it
    /// spawned itself before finishing.
    pub(crate) struct Scope<'a, 's> {
        threads: RefCell<Vec<thread::JoinHandle<()>>>,
        _lifetimes: PhantomData<(&'a (), &'s ())>,
    }

    pub(crate) fn scope<'s, R: Send>(f: impl FnOnce(&Scope<'_, 's>) -> R + Send) -> R {
        let scope = Scope::new();
        let result = f(&scope);
        scope.join_all();
        result
    }

    impl<'s> Scope<'_, 's> {
        fn new() -> Self {
            Self {
                threads: RefCell::new(Vec::new()),
                _lifetimes: PhantomData,
            }
        }

        fn join_all(self) {
            for thread in self.threads.into_inner() {
                if let Err(payload) = thread.join() {
                    std::panic::resume_unwind(payload);
                }
            }
        }

        pub(crate) fn spawn<T: Send + 'static>(
            &self,
            f: impl FnOnce(&Scope<'_, 's>) -> T + Send + 'static,
        ) -> Handle<T> {
            let slot = Arc::new(Mutex::new(None));
            let output = Arc::clone(&slot);
            let thread = thread::spawn(move || {
                let scope = Scope::new();
                let value = f(&scope);
                scope.join_all();
                *output.lock().unwrap() = Some(value);
            });
            self.threads.borrow_mut().push(thread);
            Handle(slot)
        }
    }

    pub(crate) struct Handle<T>(Arc<Mutex<Option<T>>>);

    impl<T> Handle<T> {
        pub(crate) fn join(self) -> T {
            self.0.lock().unwrap().take().expect("Handle::join: [1]")
        }
    }
}

#[cfg(not(feature = "loom"))]
mod imp {
    use core::hash::Hash;
    pub(crate) use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use dashmap::{DashMap, DashSet, mapref::entry::Entry};
    use rustc_hash::FxBuildHasher;
    pub(crate) use std::sync::Arc;
    use std::sync::{Mutex, PoisonError};

    pub(crate) struct ConcurrentSet<T>(DashSet<T, FxBuildHasher>);

    impl<T: Eq + Hash> ConcurrentSet<T> {
        pub(crate) fn new() -> Self {
            Self(DashSet::with_hasher(FxBuildHasher))
        }

        /// Atomic "add if absent". Returns `true` iff `value` was not present.
        pub(crate) fn insert(&self, value: T) -> bool {
            self.0.insert(value)
        }

        pub(crate) fn contains(&self, value: &T) -> bool {
            self.0.contains(value)
        }

        pub(crate) fn len(&self) -> usize {
            self.0.len()
        }
    }

    pub(crate) struct ConcurrentMap<K, V>(DashMap<K, V, FxBuildHasher>);

    impl<K: Eq + Hash, V: Copy> ConcurrentMap<K, V> {
        pub(crate) fn new() -> Self {
            Self(DashMap::with_hasher(FxBuildHasher))
        }

        /// First writer wins. Returns `true` iff this call stored `value`.
        pub(crate) fn insert_if_absent(&self, key: K, value: V) -> bool {
            match self.0.entry(key) {
                Entry::Occupied(_) => false,
                Entry::Vacant(entry) => {
                    entry.insert(value);
                    true
                }
            }
        }

        pub(crate) fn get(&self, key: &K) -> Option<V> {
            self.0.get(key).map(|entry| *entry)
        }
    }

    /// Structured fork/join scope. Every job spawned into it, also from other
    /// jobs of the same scope, has finished by the time [`scope`] returns, and
    /// a panicking job re-panics there.
    ///
    /// Jobs receive the scope itself, so a whole job tree shares one scope and
    /// only its owner ever blocks.
    pub(crate) struct Scope<'a, 's>(&'a rayon::Scope<'s>);

    pub(crate) fn scope<'s, R: Send>(f: impl FnOnce(&Scope<'_, 's>) -> R + Send) -> R {
        rayon::scope(|s| f(&Scope(s)))
    }

    impl<'s> Scope<'_, 's> {
        pub(crate) fn spawn<T: Send + 's>(
            &self,
            f: impl FnOnce(&Scope<'_, 's>) -> T + Send + 's,
        ) -> Handle<T> {
            let slot = Arc::new(Mutex::new(None));
            let output = Arc::clone(&slot);
            self.0.spawn(move |s| {
                let value = f(&Scope(s));
                *output.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
            });
            Handle(slot)
        }
    }

    /// Result slot of a spawned job. Only readable after the owning scope has
    /// returned.
    pub(crate) struct Handle<T>(Arc<Mutex<Option<T>>>);

    impl<T> Handle<T> {
        pub(crate) fn join(self) -> T {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
                .expect("Handle::join: [1]")
        }
    }
}

pub(crate) use imp::*;
