use surql_core::{define_table, FieldDescriptor, IndexDescriptor, SchemaMode};

fn main() -> surql_core::Result<()> {
    // Descriptor constructors
    let person = define_table("person", SchemaMode::Schemafull)?
        .field("name", FieldDescriptor::string())?
        .field("age", FieldDescriptor::number().optional())?
        .field("tags", FieldDescriptor::array_of(FieldDescriptor::string()))?
        .field("settings", FieldDescriptor::flexible_object())?
        .field("company", FieldDescriptor::record("company"))?
        .index(IndexDescriptor::new("idx_name", ["name"])?.unique())
        .index(IndexDescriptor::new("idx_company_age", ["company", "age"])?);

    println!("{}\n", person.generate());

    // Raw type tokens, validated on entry
    let post = define_table("post", SchemaMode::Schemafull)?
        .qualified("app", "main")?
        .define_schema([
            ("title", "string"),
            ("views", "int"),
            ("author", "record(person)"),
        ])?;

    println!("{}\n", post.generate());

    // Malformed record references are rejected with the field name
    match define_table("post", SchemaMode::Schemafull)?.define_schema([("company", "record()")]) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(err) => println!("rejected: {err}"),
    }

    Ok(())
}
