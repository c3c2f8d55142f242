use schemars::schema_for;
use tripsum_core::Summary;

fn main() {
    let schema = schema_for!(Summary);
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
