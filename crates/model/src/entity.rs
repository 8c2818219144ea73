use crate::records::{record::Record, schema::Schema};

/// A Rust type that can be filtered by a compiled predicate.
///
/// `schema` describes the type statically; `to_record` must produce a record
/// whose fields follow that schema. Plain `Record`s carry no static schema and
/// are compiled with `compile` against an explicit one instead.
pub trait Filterable {
    fn schema() -> Schema;

    fn to_record(&self) -> Record;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{data_type::DataType, value::Value};

    struct Tag {
        label: String,
        weight: Option<i64>,
    }

    impl Filterable for Tag {
        fn schema() -> Schema {
            Schema::new("tag")
                .with_field("label", DataType::String)
                .with_field("weight", DataType::Int)
        }

        fn to_record(&self) -> Record {
            Record::default()
                .with("label", self.label.as_str())
                .with("weight", self.weight)
        }
    }

    #[test]
    fn test_record_matches_schema() {
        let tag = Tag {
            label: "red".into(),
            weight: None,
        };
        let record = tag.to_record();
        let schema = Tag::schema();

        for field in &schema.fields {
            assert!(record.get(&field.name).is_some(), "missing {}", field.name);
        }
        assert_eq!(record.get("weight"), Some(&Value::Null));
    }
}
