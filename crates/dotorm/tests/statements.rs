use dotorm::{EntityDef, Kwargs, OrmError, Registry, Separator, SqlType, Value, kwargs};
use std::sync::LazyLock;
use std::thread;

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::new()
        .with(
            EntityDef::new("Author")
                .field("name", SqlType::Text)
                .field("born", SqlType::Date)
                .relation("publisher", "Publisher"),
        )
        .and_then(|r| {
            r.with(
                EntityDef::new("Book")
                    .field("title", SqlType::Text)
                    .field("pages", SqlType::Integer)
                    .field("price", SqlType::Float)
                    .relation("author", "Author")
                    .relation("editor", "Author"),
            )
        })
        .and_then(|r| {
            r.with(
                EntityDef::new("Publisher")
                    .field("name", SqlType::Text)
                    .field("founded", SqlType::DateTime),
            )
        })
        .and_then(|r| r.validate().map(|()| r))
        .expect("static registry is well formed")
});

fn book() -> dotorm::Model<'static> {
    REGISTRY.model("Book").unwrap()
}

#[test]
fn select_plain_column_has_no_where() {
    let sql = book().select(&["title"], &Kwargs::new()).unwrap();
    assert_eq!(sql, "SELECT Book.title FROM Book");
}

#[test]
fn select_without_columns_fails() {
    let err = book().select::<&str>(&[], &Kwargs::new()).unwrap_err();
    assert!(matches!(err, OrmError::Validation(_)));
}

#[test]
fn select_integer_comparison() {
    let sql = book()
        .select(&["title"], &kwargs! { "pages__gt" => 5 })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT Book.title FROM Book WHERE Book.pages > %(pages__gt)s"
    );
}

#[test]
fn select_two_hops_and_dedup() {
    let sql = book()
        .select(
            &["title", "author.name", "author.publisher.name", "author.born"],
            &Kwargs::new(),
        )
        .unwrap();
    assert_eq!(
        sql,
        "SELECT Book.title, Author.name, Publisher.name, Author.born FROM Book \
         INNER JOIN Author ON Author.entity_id = Book.author \
         INNER JOIN Publisher ON Publisher.entity_id = Author.publisher"
    );
    assert_eq!(sql.matches("INNER JOIN Author").count(), 1);
}

#[test]
fn select_filter_on_joined_entity() {
    let sql = book()
        .select(
            &["title"],
            &kwargs! { "author__publisher__name__ne" => "Acme", "price__le" => 9.5 },
        )
        .unwrap();
    assert_eq!(
        sql,
        "SELECT Book.title FROM Book \
         INNER JOIN Author ON Author.entity_id = Book.author \
         INNER JOIN Publisher ON Publisher.entity_id = Author.publisher \
         WHERE Publisher.name != %(author__publisher__name__ne)s \
         AND Book.price <= %(price__le)s"
    );
}

#[test]
fn select_accepts_dates_and_int_for_float() {
    let born = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let sql = book()
        .select(
            &["title"],
            &kwargs! { "author__born__lt" => born, "price" => 10 },
        )
        .unwrap();
    assert!(sql.ends_with("WHERE Author.born < %(author__born__lt)s AND Book.price = %(price)s"));
}

#[test]
fn insert_keys_are_placeholders() {
    let sql = book()
        .insert(&kwargs! { "pages" => 1, "title" => "s" })
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO Book(pages, title) VALUES(%(pages)s, %(title)s)"
    );
}

#[test]
fn insert_foreign_key_by_integer() {
    let sql = book()
        .insert(&kwargs! { "title" => "Dune", "author" => 7, "price" => Value::Null })
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO Book(title, author, price) VALUES(%(title)s, %(author)s, %(price)s)"
    );
    assert!(book().insert(&kwargs! { "author" => "Frank" }).is_err());
}

#[test]
fn update_set_and_where() {
    let sql = book()
        .update(&kwargs! { "title" => "n", "where__pages" => 3 })
        .unwrap();
    assert_eq!(
        sql,
        "UPDATE Book SET Book.title = %(title)s WHERE Book.pages = %(where__pages)s"
    );
}

#[test]
fn update_filtered_through_relation() {
    let sql = book()
        .update(&kwargs! { "price" => 12.0, "where__author__name" => "Le Guin" })
        .unwrap();
    assert_eq!(
        sql,
        "UPDATE Book INNER JOIN Author ON Author.entity_id = Book.author \
         SET Book.price = %(price)s WHERE Author.name = %(where__author__name)s"
    );
}

#[test]
fn delete_not_equal() {
    let sql = book().delete(&kwargs! { "pages__ne" => 5 }).unwrap();
    assert_eq!(sql, "DELETE Book.* FROM Book WHERE Book.pages != %(pages__ne)s");
}

#[test]
fn type_mismatch_rejected_everywhere() {
    let bad = kwargs! { "pages" => "many" };
    assert!(book().select(&["title"], &bad).is_err());
    assert!(book().insert(&bad).is_err());
    assert!(book().update(&bad).is_err());
    assert!(book().delete(&bad).is_err());
}

#[test]
fn validators_and_resolver() {
    let model = book();
    assert!(model.validate_columns(&["title", "author.publisher.founded", "editor"]));
    assert!(!model.validate_columns(&["author.title"]));
    assert!(model.validate_types(Separator::DoubleUnderscore, &kwargs! { "author__name" => "x" }));
    assert!(!model.validate_types(Separator::DoubleUnderscore, &kwargs! { "author__name" => 1 }));

    let resolved = model.resolve("author.publisher", Separator::Dot).unwrap();
    assert_eq!(resolved.as_entity().map(|e| e.name()), Some("Publisher"));
    assert!(model.resolve("author.publisher.missing", Separator::Dot).is_none());
}

#[test]
fn qualify_uses_owning_table() {
    let model = book();
    assert_eq!(model.qualify("author.publisher.name").unwrap(), "Publisher.name");
    assert_eq!(model.qualify("Book.title").unwrap(), "Book.title");
    assert!(model.qualify("author.nothing").is_err());
}

#[test]
fn unknown_entity() {
    let err = REGISTRY.model("Magazine").unwrap_err();
    assert!(err.is_unknown_entity());
}

#[test]
fn shared_registry_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let filter = Kwargs::new().with("pages__ge", i);
                REGISTRY
                    .model("Book")
                    .and_then(|m| m.select(&["title", "author.name"], &filter))
            })
        })
        .collect();

    for handle in handles {
        let sql = handle.join().unwrap().unwrap();
        assert_eq!(
            sql,
            "SELECT Book.title, Author.name FROM Book \
             INNER JOIN Author ON Author.entity_id = Book.author \
             WHERE Book.pages >= %(pages__ge)s"
        );
    }
}
