#![allow(dead_code)]

use filter_syntax::{FilterNode, FilterOperator, FilterValue, Literal, PathSegment, PropertyPath};
use model::{DataType, Record, Schema, Value};
use regex::Regex;

pub fn order_schema() -> Schema {
    Schema::new("order")
        .with_field("amt", DataType::Int)
        .with_field("sku", DataType::String)
}

pub fn customer_schema() -> Schema {
    Schema::new("customer")
        .with_field("name", DataType::String)
        .with_field("nickname", DataType::String)
        .with_field("age", DataType::Int)
        .with_field("active", DataType::Boolean)
        .with_field("email", DataType::String)
        .with_field("tags", DataType::list_of(DataType::String))
        .with_field("orders", DataType::list_of(order_schema().into_type()))
}

pub fn order(amt: Option<i64>, sku: &str) -> Value {
    Value::Record(Record::default().with("amt", amt).with("sku", sku))
}

/// Direct interpretation of a filter tree, without compilation.
///
/// Records must carry every list field of the schema (possibly empty):
/// without a schema the interpreter cannot tell a null list from a null
/// scalar.
pub fn evaluate(node: &FilterNode, focus: &Value) -> bool {
    match node {
        FilterNode::Group(group) => {
            let combined = group
                .children
                .iter()
                .fold(group.combinator.identity(), |acc, child| {
                    group.combinator.apply(acc, evaluate(child, focus))
                });
            combined != group.negated
        }
        FilterNode::Condition(condition) => {
            let path = PropertyPath::parse(&condition.path).expect("reference paths are valid");
            let parts = Parts {
                operator: condition.operator,
                value: condition.value.as_ref(),
            };
            let result = follow(&path.segments, focus, parts);
            result != condition.negated
        }
    }
}

#[derive(Clone, Copy)]
struct Parts<'a> {
    operator: FilterOperator,
    value: Option<&'a FilterValue>,
}

fn quantify(items: &[Value], operator: FilterOperator, test: impl Fn(&Value) -> bool) -> bool {
    if operator == FilterOperator::All {
        items.iter().all(test)
    } else {
        items.iter().any(test)
    }
}

fn follow(segments: &[PathSegment], focus: &Value, parts: Parts<'_>) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return at_end(focus, parts);
    };

    if let Value::List(items) = focus {
        return quantify(items, parts.operator, |item| follow(segments, item, parts));
    }

    let mut next = match focus {
        Value::Record(record) => record.get(&segment.name).cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    };
    if let Some(index) = segment.index {
        next = match next {
            Value::List(items) => items.get(index).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        };
    }

    follow(rest, &next, parts)
}

fn at_end(focus: &Value, parts: Parts<'_>) -> bool {
    if parts.operator.is_quantifier() {
        let body = parts
            .value
            .and_then(FilterValue::as_filter)
            .expect("quantifiers carry a sub-filter");
        return match focus {
            Value::List(items) => quantify(items, parts.operator, |item| evaluate(body, item)),
            other => evaluate(body, other),
        };
    }

    if let Value::List(items) = focus
        && !parts.operator.is_null_check()
    {
        return items.iter().any(|item| at_end(item, parts));
    }

    let literal = parts
        .value
        .and_then(FilterValue::as_literal)
        .cloned()
        .unwrap_or(Literal::Null);
    apply(parts.operator, focus, &literal)
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Int(i) => Value::Int(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::String(s) => Value::String(s.clone()),
        Literal::Date(d) => Value::Date(*d),
        Literal::Timestamp(ts) => Value::Timestamp(*ts),
        Literal::List(items) => Value::List(items.iter().map(literal_value).collect()),
    }
}

fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        _ => false,
    }
}

fn apply(operator: FilterOperator, actual: &Value, literal: &Literal) -> bool {
    use FilterOperator::*;

    let expected = literal_value(literal);
    let ints = match (actual, &expected) {
        (Value::Int(a), Value::Int(b)) => Some((*a, *b)),
        _ => None,
    };
    let texts = match (actual, &expected) {
        (Value::String(a), Value::String(b)) => Some((a.as_str(), b.as_str())),
        _ => None,
    };
    let member = || match &expected {
        Value::List(candidates) => candidates.iter().any(|c| same(actual, c)),
        _ => false,
    };
    let pattern = || match texts {
        Some((text, pattern)) => Regex::new(pattern).expect("valid pattern").is_match(text),
        None => false,
    };

    match operator {
        Equal => same(actual, &expected),
        NotEqual => !same(actual, &expected),
        GreaterThan => ints.is_some_and(|(a, b)| a > b),
        GreaterOrEqual => ints.is_some_and(|(a, b)| a >= b),
        LessThan => ints.is_some_and(|(a, b)| a < b),
        LessOrEqual => ints.is_some_and(|(a, b)| a <= b),
        StartsWith => texts.is_some_and(|(a, b)| a.starts_with(b)),
        DoesNotStartWith => !texts.is_some_and(|(a, b)| a.starts_with(b)),
        EndsWith => texts.is_some_and(|(a, b)| a.ends_with(b)),
        DoesNotEndWith => !texts.is_some_and(|(a, b)| a.ends_with(b)),
        Contains => texts.is_some_and(|(a, b)| a.contains(b)),
        DoesNotContain => !texts.is_some_and(|(a, b)| a.contains(b)),
        IsNull => actual.is_null(),
        NotNull => !actual.is_null(),
        Matches => pattern(),
        DoesNotMatch => !pattern(),
        In => member(),
        NotIn => !member(),
        All | Any => unreachable!("quantifiers are handled before apply"),
    }
}
