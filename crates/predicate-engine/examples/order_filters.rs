/// Example building, printing and applying a filter over nested orders
use filter_syntax::{CombineOperator, FilterOperator, QueryBuilder};
use model::{DataType, Record, Schema, Value};
use predicate_engine::compile;

fn main() {
    let order = Schema::new("order")
        .with_field("amt", DataType::Decimal)
        .with_field("sku", DataType::String);
    let customer = Schema::new("customer")
        .with_field("name", DataType::String)
        .with_field("email", DataType::String)
        .with_field("orders", DataType::list_of(order.into_type()));

    let tree = QueryBuilder::new(CombineOperator::And)
        .add("name", FilterOperator::StartsWith, "Al")
        .add_quantified("orders", FilterOperator::All, |body| {
            body.add("amt", FilterOperator::GreaterThan, 0)
                .add("sku", FilterOperator::Matches, r"^[A-Z]-\d+$")
        })
        .group(CombineOperator::Or, |g| {
            g.add_check("email", FilterOperator::IsNull)
                .add("email", FilterOperator::EndsWith, "@example.com")
        })
        .build();

    println!("=== Filter ===\n{tree}");

    let predicate = match compile(&tree, &customer) {
        Ok(predicate) => predicate,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let order = |amt: i64, sku: &str| Value::Record(Record::default().with("amt", amt).with("sku", sku));
    let customers = vec![
        Record::default()
            .with("name", "Alice")
            .with("orders", vec![order(5, "A-1"), order(15, "B-22")]),
        Record::default()
            .with("name", "Alfred")
            .with("email", "alfred@elsewhere.org")
            .with("orders", vec![order(3, "C-3")]),
        Record::default()
            .with("name", "Albert")
            .with("orders", vec![order(0, "D-4")]),
    ];

    println!("=== Matches ===");
    for record in predicate.filter(&customers) {
        println!("{record}");
    }
}
