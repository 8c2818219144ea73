use crate::{eval::Plan, resolver::Focus};
use model::{Filterable, Record, Value};
use std::{fmt, marker::PhantomData, sync::Arc};

/// A compiled filter: a pure test over records of the schema it was
/// compiled against
///
/// Cloning is cheap and the predicate can be shared across threads.
#[derive(Debug, Clone)]
pub struct Predicate {
    plan: Arc<Plan>,
    schema_name: String,
}

impl Predicate {
    pub(crate) fn new(plan: Plan, schema_name: &str) -> Self {
        Self {
            plan: Arc::new(plan),
            schema_name: schema_name.to_string(),
        }
    }

    pub fn test(&self, record: &Record) -> bool {
        self.plan.eval(Focus::Record(record))
    }

    /// Tests a value holding a record, or the element of a collection when
    /// the predicate was compiled for the element type.
    pub fn test_value(&self, value: &Value) -> bool {
        self.plan.eval(Focus::Value(value))
    }

    /// Keeps the records that pass the predicate.
    pub fn filter<'a, I>(&'a self, records: I) -> impl Iterator<Item = &'a Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        records.into_iter().filter(move |record| self.test(record))
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn node_count(&self) -> usize {
        self.plan.node_count()
    }
}

/// Predicate over a typed entity
pub struct TypedPredicate<T> {
    inner: Predicate,
    _entity: PhantomData<fn(&T) -> bool>,
}

impl<T: Filterable> TypedPredicate<T> {
    pub(crate) fn new(inner: Predicate) -> Self {
        Self {
            inner,
            _entity: PhantomData,
        }
    }

    pub fn test(&self, entity: &T) -> bool {
        self.inner.test(&entity.to_record())
    }

    pub fn filter<'a, I>(&'a self, entities: I) -> impl Iterator<Item = &'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        entities.into_iter().filter(move |entity| self.test(entity))
    }
}

impl<T> Clone for TypedPredicate<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedPredicate")
            .field("inner", &self.inner)
            .finish()
    }
}
