use serde::Serialize;
use surql_core::{op, table, Conjunction, FilterOptions, Operation};

#[derive(Serialize)]
struct NewPerson<'a> {
    name: &'a str,
    age: u32,
}

fn main() -> surql_core::Result<()> {
    // SELECT with mixed conjunctions; the OR goes on the clause before the branch
    let select_query = table("person")?
        .namespace_and_db("app", "main")?
        .filter(("age", op::GTE, 30))?
        .or_filter(("name", "John"))?
        .filter(("status", "active"))?
        .sort("name")?
        .limit(10)?;

    println!("SELECT: {}", select_query.build_query(Operation::Select)?);

    // CREATE from a typed record; field order follows the struct
    let create_query = table("person")?
        .namespace_and_db("app", "main")?
        .data(&NewPerson { name: "John Doe", age: 30 })?;

    println!("CREATE: {}", create_query.build_query(Operation::Create)?);

    // UPDATE with explicit per-clause options
    let update_query = table("person")?
        .namespace_and_db("app", "main")?
        .data(&serde_json::json!({"status": "inactive"}))?
        .filter_with(
            "last_login",
            "2020-01-01",
            FilterOptions::new().operator(op::LT).conjunction(Conjunction::Or),
        )?
        .filter(("age", op::GT, 90))?;

    println!("UPDATE: {}", update_query.build_query(Operation::Update)?);

    // The payload handed to a transport
    let payload = table("person")?
        .namespace_and_db("app", "main")?
        .filter(("age", op::LT, 13))?
        .query_payload(Operation::Delete)?;

    println!("PAYLOAD: {}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
