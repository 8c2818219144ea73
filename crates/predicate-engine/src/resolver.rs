use filter_syntax::PropertyPath;
use model::{DataType, Record, Value};
use tracing::trace;

static NULL: Value = Value::Null;

/// Stands in for a top-level record wherever a value is needed. Records are
/// only ever tested for nullness, so any non-null record will do.
static PRESENT_RECORD: Value = Value::Record(Record {
    field_values: Vec::new(),
});

/// One access step of a lowered path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Field(String),
    Index(usize),
}

/// Outcome of resolving a path against a type
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTarget<'s> {
    /// Every segment was consumed. The reached type may still be a
    /// collection, which the compiler quantifies.
    Scalar {
        steps: Vec<Step>,
        data_type: &'s DataType,
    },
    /// A collection was met before the path was exhausted; `remaining` must
    /// be resolved against each element.
    Quantified {
        steps: Vec<Step>,
        element_type: &'s DataType,
        remaining: PropertyPath,
    },
}

/// Resolves `path` against `data_type` at compile time.
///
/// A segment met while the current type is a list stops resolution, even
/// when the segment carries an index: the index then applies to a field of
/// each element. A field missing from the schema, a field access on a
/// scalar, or an index on a non-list is an error.
pub fn resolve<'s>(
    data_type: &'s DataType,
    path: &PropertyPath,
) -> Result<ResolvedTarget<'s>, String> {
    let mut steps = Vec::with_capacity(path.len());
    let mut current = data_type;

    for (position, segment) in path.segments.iter().enumerate() {
        if let DataType::List(element_type) = current {
            return Ok(ResolvedTarget::Quantified {
                steps,
                element_type,
                remaining: path.tail(position),
            });
        }

        let schema = current.as_record().ok_or_else(|| {
            format!("cannot access field '{}' on a value of type {current}", segment.name)
        })?;
        let field = schema.field(&segment.name).ok_or_else(|| {
            format!(
                "no field '{}' in {} (available: {})",
                segment.name,
                schema.name,
                schema.field_names().join(", ")
            )
        })?;

        steps.push(Step::Field(field.name.clone()));
        current = &field.data_type;

        if let Some(index) = segment.index {
            current = current.element_type().ok_or_else(|| {
                format!("cannot index field '{}' of type {current}", field.name)
            })?;
            steps.push(Step::Index(index));
        }
    }

    Ok(ResolvedTarget::Scalar {
        steps,
        data_type: current,
    })
}

/// The value evaluation currently looks at
#[derive(Debug, Clone, Copy)]
pub enum Focus<'a> {
    Record(&'a Record),
    Value(&'a Value),
}

impl<'a> Focus<'a> {
    /// Applies `steps` in order. Missing fields, null intermediates and out of
    /// bounds indices all lead to null.
    pub fn walk(self, steps: &[Step]) -> Focus<'a> {
        steps.iter().fold(self, |focus, step| match step {
            Step::Field(name) => focus.field(name),
            Step::Index(index) => focus.index(*index),
        })
    }

    fn field(self, name: &str) -> Focus<'a> {
        let record = match self {
            Focus::Record(record) | Focus::Value(Value::Record(record)) => record,
            Focus::Value(Value::Null) => return Focus::Value(&NULL),
            Focus::Value(other) => {
                trace!("Field '{}' requested on a {} value", name, other.kind());
                return Focus::Value(&NULL);
            }
        };
        // Step names are already the schema's own spelling.
        Focus::Value(record.get_exact(name).unwrap_or(&NULL))
    }

    fn index(self, index: usize) -> Focus<'a> {
        match self {
            Focus::Value(Value::List(items)) => Focus::Value(items.get(index).unwrap_or(&NULL)),
            Focus::Value(Value::Null) => Focus::Value(&NULL),
            other => {
                trace!("Index [{}] requested on a {} value", index, other.kind());
                Focus::Value(&NULL)
            }
        }
    }

    /// Elements of the focused collection; null counts as empty.
    pub fn elements(self) -> &'a [Value] {
        match self {
            Focus::Value(Value::List(items)) => items,
            Focus::Value(Value::Null) => &[],
            other => {
                trace!("Expected a list, found a {} value", other.kind());
                &[]
            }
        }
    }

    pub fn value(self) -> &'a Value {
        match self {
            Focus::Record(_) => &PRESENT_RECORD,
            Focus::Value(value) => value,
        }
    }

    fn kind(self) -> &'static str {
        match self {
            Focus::Record(_) => "record",
            Focus::Value(value) => value.kind(),
        }
    }
}
