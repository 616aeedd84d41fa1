use surql_core::{op, table, HttpTransport, Operation, TransportConfig};

#[tokio::main]
async fn main() -> surql_core::Result<()> {
    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000/sql".to_string());

    let transport = HttpTransport::new(TransportConfig::new(&endpoint)?.with_token("root"));

    let query = table("person")?
        .namespace_and_db("app", "main")?
        .filter(("age", op::GTE, 18))?
        .limit(5)?;

    match query.execute(Operation::Select, &transport).await {
        Ok(response) => println!("{response:#}"),
        Err(err) => eprintln!("query failed: {err}"),
    }

    Ok(())
}
