mod common;

use common::{customer_schema, evaluate, order};
use filter_syntax::{CombineOperator, FilterNode, FilterOperator::*, Literal, QueryBuilder, field};
use model::{DataType, Filterable, Record, Schema, Value};
use predicate_engine::{
    CompileSettings, EmptyGroupPolicy, FilterCompiler, FilterError, PredicateCompiler, compile,
    compile_for,
};
use std::thread;

fn alice() -> Record {
    Record::default()
        .with("name", "Alice")
        .with("age", 30)
        .with("tags", Vec::<&str>::new())
        .with("orders", Vec::<Value>::new())
}

fn assert_matches_reference(node: &FilterNode, record: &Record, expected: bool) {
    let predicate = compile(node, &customer_schema()).unwrap();
    assert_eq!(predicate.test(record), expected, "compiled: {node}");
    assert_eq!(
        evaluate(node, &Value::Record(record.clone())),
        expected,
        "reference: {node}"
    );
}

#[test]
fn scenario_a_scalar_conditions() {
    let record = alice();
    let starts = FilterNode::condition("name", StartsWith, "Al");
    let older = FilterNode::condition("age", GreaterThan, 25);

    assert_matches_reference(&starts, &record, true);
    assert_matches_reference(&older, &record, true);
    assert_matches_reference(&FilterNode::and(vec![starts, older]), &record, true);
}

#[test]
fn scenario_b_membership_over_collection() {
    let record = Record::default()
        .with("tags", vec!["x", "y", "z"])
        .with("orders", Vec::<Value>::new());

    assert_matches_reference(&FilterNode::condition("tags", In, vec!["x"]), &record, true);
    assert_matches_reference(&FilterNode::condition("tags", In, vec!["q"]), &record, false);
}

#[test]
fn scenario_c_quantified_orders() {
    let record = Record::default()
        .with("tags", Vec::<&str>::new())
        .with("orders", vec![order(Some(5), "a"), order(Some(15), "b")]);

    let over = |quantifier, threshold: i64| {
        FilterNode::quantified(
            "orders.amt",
            quantifier,
            FilterNode::condition("", GreaterThan, threshold),
        )
    };

    assert_matches_reference(&over(All, 0), &record, true);
    assert_matches_reference(&over(All, 10), &record, false);
    assert_matches_reference(&over(Any, 10), &record, true);
}

#[test]
fn scenario_d_null_field() {
    let record = Record::default()
        .with("email", Value::Null)
        .with("tags", Vec::<&str>::new())
        .with("orders", Vec::<Value>::new());

    assert_matches_reference(&FilterNode::check("email", IsNull), &record, true);
    assert_matches_reference(&FilterNode::condition("email", StartsWith, "a"), &record, false);
    assert_matches_reference(&FilterNode::condition("email", DoesNotStartWith, "a"), &record, true);
}

#[test]
fn scenario_e_empty_groups() {
    let record = alice();
    assert_matches_reference(&FilterNode::and(vec![]), &record, true);
    assert_matches_reference(&FilterNode::or(vec![]), &record, false);
    assert_matches_reference(&FilterNode::xor(vec![]), &record, false);
}

#[test]
fn empty_groups_can_be_rejected() {
    let compiler = PredicateCompiler::new(
        CompileSettings::default().with_empty_groups(EmptyGroupPolicy::Reject),
    );
    let err = compiler
        .compile(&FilterNode::xor(vec![]), &customer_schema())
        .unwrap_err();
    assert!(matches!(err, FilterError::EmptyGroup { .. }));
}

#[test]
fn implicit_any_mid_path() {
    let record = Record::default()
        .with("tags", Vec::<&str>::new())
        .with("orders", vec![order(Some(5), "a"), order(None, "b")]);

    assert_matches_reference(&FilterNode::condition("orders.amt", Equal, 5), &record, true);
    assert_matches_reference(&FilterNode::condition("orders.amt", GreaterThan, 5), &record, false);
    assert_matches_reference(&FilterNode::check("orders.amt", IsNull), &record, true);
    assert_matches_reference(&FilterNode::condition("orders.sku", Equal, "b").negate(), &record, false);
}

#[test]
fn sub_filter_over_record_elements() {
    let record = Record::default()
        .with("tags", Vec::<&str>::new())
        .with("orders", vec![order(Some(5), "apple"), order(Some(15), "avocado")]);

    let node = QueryBuilder::new(CombineOperator::And)
        .add_quantified("orders", All, |body| {
            body.add("sku", StartsWith, "a").add("amt", LessThan, 20)
        })
        .build();
    assert_matches_reference(&node, &record, true);

    let node = QueryBuilder::new(CombineOperator::And)
        .add_quantified("orders", Any, |body| {
            body.xor().add("sku", EndsWith, "e").add("amt", GreaterThan, 10)
        })
        .build();
    assert_matches_reference(&node, &record, true);
}

#[test]
fn indexed_paths() {
    let record = Record::default()
        .with("tags", vec!["x", "y"])
        .with("orders", vec![order(Some(5), "a")]);

    assert_matches_reference(&FilterNode::condition("orders[0].amt", Equal, 5), &record, true);
    assert_matches_reference(&FilterNode::check("orders[3].amt", IsNull), &record, true);
    assert_matches_reference(&FilterNode::condition("tags[1]", Equal, "y"), &record, true);
    assert_matches_reference(&FilterNode::condition("tags[2]", Equal, "y"), &record, false);
}

#[test]
fn errors_surface_path_and_operator() {
    let node = FilterNode::and(vec![
        FilterNode::condition("name", Equal, "Alice"),
        FilterNode::or(vec![FilterNode::condition("orders.total", GreaterThan, 3)]),
    ]);
    let err = compile(&node, &customer_schema()).unwrap_err();

    assert!(matches!(err, FilterError::SchemaMismatch { .. }));
    assert_eq!(err.location().indices(), &[1, 0]);
    assert_eq!(err.path(), Some("orders.total"));
    assert_eq!(err.operator(), Some(GreaterThan));
    assert!(err.to_string().contains("no field 'total' in order"), "{err}");
}

#[test]
fn tree_from_json() {
    let schema: Schema = serde_json::from_value(serde_json::json!({
        "name": "event",
        "fields": [
            { "name": "at", "data_type": "timestamp" },
            { "name": "labels", "data_type": { "list": "string" } }
        ]
    }))
    .unwrap();

    let node: FilterNode = serde_json::from_value(serde_json::json!({
        "kind": "group",
        "combinator": "And",
        "children": [
            { "kind": "condition", "path": "at", "operator": "GreaterOrEqual", "value": "2024-01-01T00:00:00Z" },
            {
                "kind": "condition", "path": "labels", "operator": "Any",
                "value": { "kind": "condition", "path": "", "operator": "Matches", "value": "^prod-" }
            }
        ]
    }))
    .unwrap();

    let predicate = compile(&node, &schema).unwrap();
    let event = |at: &str, labels: Vec<&str>| {
        Record::from_json(&serde_json::json!({ "at": at, "labels": labels }), &schema).unwrap()
    };

    assert!(predicate.test(&event("2024-03-01T12:00:00Z", vec!["dev", "prod-eu"])));
    assert!(!predicate.test(&event("2023-12-31T23:59:59Z", vec!["prod-eu"])));
    assert!(!predicate.test(&event("2024-03-01T12:00:00Z", vec!["dev"])));
}

#[test]
fn membership_list_from_json_is_a_literal() {
    let schema = Schema::new("member").with_field("role", DataType::String);
    let node: FilterNode = serde_json::from_value(serde_json::json!({
        "kind": "condition", "path": "role", "operator": "In", "value": ["group", "And"]
    }))
    .unwrap();

    let predicate = compile(&node, &schema).unwrap();
    assert!(predicate.test(&Record::default().with("role", "group")));
    assert!(!predicate.test(&Record::default().with("role", "admin")));
}

#[test]
fn fields_differing_only_in_case_stay_apart() {
    let schema = Schema::new("person")
        .with_field("name", DataType::String)
        .with_field("Name", DataType::Int);
    let record = Record::from_json(&serde_json::json!({ "Name": 7 }), &schema).unwrap();

    assert!(compile(&FilterNode::check("name", IsNull), &schema).unwrap().test(&record));
    assert!(compile(&FilterNode::condition("Name", Equal, 7), &schema).unwrap().test(&record));
}

#[test]
fn bad_literal_for_typed_field() {
    let schema = Schema::new("event").with_field("at", DataType::Timestamp);
    let err = compile(&FilterNode::condition("at", LessThan, "last tuesday"), &schema).unwrap_err();
    assert!(matches!(err, FilterError::SchemaMismatch { .. }));

    let err = compile(&FilterNode::condition("at", LessThan, true), &schema).unwrap_err();
    assert!(err.to_string().contains("boolean literal"), "{err}");
}

#[test]
fn null_literal_equality() {
    let record = alice();
    assert_matches_reference(&FilterNode::condition("email", Equal, Literal::Null), &record, true);
    assert_matches_reference(&FilterNode::condition("name", NotEqual, Literal::Null), &record, true);
}

struct Customer {
    name: String,
    age: i64,
    tags: Vec<String>,
}

impl Filterable for Customer {
    fn schema() -> Schema {
        Schema::new("customer")
            .with_field("name", DataType::String)
            .with_field("age", DataType::Int)
            .with_field("tags", DataType::list_of(DataType::String))
    }

    fn to_record(&self) -> Record {
        Record::default()
            .with("name", self.name.as_str())
            .with("age", self.age)
            .with("tags", self.tags.iter().map(String::as_str).collect::<Vec<_>>())
    }
}

#[test]
fn typed_entities_with_checked_paths() {
    let customers = vec![
        Customer {
            name: "Alice".into(),
            age: 30,
            tags: vec!["vip".into()],
        },
        Customer {
            name: "Bob".into(),
            age: 17,
            tags: vec![],
        },
    ];

    let node = QueryBuilder::new(CombineOperator::Or)
        .add(&field!(Customer => age), GreaterOrEqual, 18)
        .add(&field!(Customer => tags), Equal, "vip")
        .build();
    let predicate = compile_for::<Customer>(&node).unwrap();

    let names: Vec<&str> = predicate.filter(&customers).map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alice"]);
}

#[test]
fn predicate_is_shared_across_threads() {
    let node = FilterNode::condition("age", GreaterOrEqual, 18);
    let predicate = compile(&node, &customer_schema()).unwrap();
    let records: Vec<Record> = (0..64).map(|age| Record::default().with("age", age)).collect();

    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = records
            .chunks(16)
            .map(|chunk| {
                let predicate = predicate.clone();
                scope.spawn(move || predicate.filter(chunk).count())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts.iter().sum::<usize>(), 64 - 18);
}
