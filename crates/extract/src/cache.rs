use protocol::{Category, SessionId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::schema::Annotation;

/// Entities of the most recently processed article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityCache {
    values: BTreeMap<Category, BTreeSet<String>>,
    processed: bool,
}

/// Result of asking the cache for one category.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    NotProcessed,
    Empty,
    Found(Vec<&'a str>),
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a processed cache from provider output.
    ///
    /// Every supported category gets a key, unsupported labels are dropped and
    /// repeated values collapse into one.
    pub fn from_annotations(annotations: &[Annotation]) -> Self {
        let mut values: BTreeMap<Category, BTreeSet<String>> = Category::ALL
            .into_iter()
            .map(|category| (category, BTreeSet::new()))
            .collect();

        for annotation in annotations {
            let Some(category) = Category::from_label(&annotation.category) else {
                continue;
            };
            let value = annotation.value.trim();
            if value.is_empty() {
                continue;
            }
            values
                .entry(category)
                .or_default()
                .insert(value.to_string());
        }

        Self {
            values,
            processed: true,
        }
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Drop everything and go back to "not processed".
    pub fn reset(&mut self) {
        self.values.clear();
        self.processed = false;
    }

    pub fn lookup(&self, category: Category) -> Lookup<'_> {
        if !self.processed {
            return Lookup::NotProcessed;
        }
        match self.values.get(&category) {
            Some(values) if !values.is_empty() => {
                Lookup::Found(values.iter().map(String::as_str).collect())
            }
            _ => Lookup::Empty,
        }
    }

    pub fn total_values(&self) -> usize {
        self.values.values().map(BTreeSet::len).sum()
    }
}

/// One [`EntityCache`] per session, created on first use and evicted on session end.
#[derive(Debug, Default)]
pub struct SessionCaches {
    caches: HashMap<SessionId, EntityCache>,
}

impl SessionCaches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session: &SessionId) -> Option<&EntityCache> {
        self.caches.get(session)
    }

    pub fn lookup(&self, session: &SessionId, category: Category) -> Lookup<'_> {
        self.caches
            .get(session)
            .map_or(Lookup::NotProcessed, |cache| cache.lookup(category))
    }

    pub fn is_processed(&self, session: &SessionId) -> bool {
        self.caches.get(session).is_some_and(EntityCache::is_processed)
    }

    pub fn reset(&mut self, session: &SessionId) {
        self.caches.entry(session.clone()).or_default().reset();
    }

    /// Replace the session's cache in one step.
    pub fn install(&mut self, session: &SessionId, cache: EntityCache) {
        self.caches.insert(session.clone(), cache);
    }

    pub fn evict(&mut self, session: &SessionId) -> bool {
        self.caches.remove(session).is_some()
    }

    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cache_is_not_processed() {
        let cache = EntityCache::new();
        for category in Category::ALL {
            assert_eq!(cache.lookup(category), Lookup::NotProcessed);
        }
    }

    #[test]
    fn test_processed_cache_has_every_category() {
        let cache = EntityCache::from_annotations(&[]);
        assert!(cache.is_processed());
        for category in Category::ALL {
            assert_eq!(cache.lookup(category), Lookup::Empty);
        }
    }

    #[test]
    fn test_dedup_and_filtering() {
        let cache = EntityCache::from_annotations(&[
            Annotation::new("PERSON", "Obama"),
            Annotation::new("person", " Obama "),
            Annotation::new("MISC", "Olympics"),
            Annotation::new("LOCATION", ""),
            Annotation::new("LOCATION", "Paris"),
        ]);

        assert_eq!(cache.lookup(Category::Person), Lookup::Found(vec!["Obama"]));
        assert_eq!(cache.lookup(Category::Location), Lookup::Found(vec!["Paris"]));
        assert_eq!(cache.total_values(), 2);
    }

    #[test]
    fn test_reset_discards_values() {
        let mut cache = EntityCache::from_annotations(&[Annotation::new("MONEY", "$5")]);
        cache.reset();
        assert!(!cache.is_processed());
        assert_eq!(cache.lookup(Category::Money), Lookup::NotProcessed);
        assert_eq!(cache.total_values(), 0);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut caches = SessionCaches::new();
        let a = SessionId::new("a");
        let b = SessionId::new("b");

        caches.install(&a, EntityCache::from_annotations(&[Annotation::new("DATE", "2011")]));

        assert_eq!(caches.lookup(&a, Category::Date), Lookup::Found(vec!["2011"]));
        assert_eq!(caches.lookup(&b, Category::Date), Lookup::NotProcessed);

        caches.reset(&a);
        assert!(!caches.is_processed(&a));
        assert!(caches.evict(&a));
        assert!(!caches.evict(&a));
        assert!(caches.is_empty());
    }
}
