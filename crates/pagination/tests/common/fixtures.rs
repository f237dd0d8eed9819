//! Fixture tables shared by the backend integration tests.
//!
//! - `manufacturers` / `cars`: 27 cars with ids 1..=27
//! - `movies`: 7 movies, four of them with a NULL description and one with
//!   an empty description

use helios_pagination::backends::sql::Dialect;
use helios_pagination::types::{CursorValue, Page, Record};

/// `(id, name)`
pub const MANUFACTURERS: &[(i64, &str)] = &[
    (1, "Chrysler"),
    (2, "BMW"),
    (3, "Porsche"),
    (4, "Audi"),
    (5, "Dodge"),
    (6, "Honda"),
    (7, "Ford"),
    (8, "Chevrolet"),
    (9, "Cadillac"),
    (10, "Mercedes-Benz"),
    (11, "Nissan"),
    (12, "Subaru"),
    (13, "Volkswagen"),
    (14, "Mitsubishi"),
    (15, "Mazda"),
    (16, "Tesla"),
    (17, "Toyota"),
    (18, "Buick"),
    (19, "Suzuki"),
    (20, "Volvo"),
    (21, "Jeep"),
    (22, "GMC"),
];

/// `(id, manufacturer_id, description)`
pub const CARS: &[(i64, i64, &str)] = &[
    (1, 1, "300"),
    (2, 2, "3 Series"),
    (3, 3, "911"),
    (4, 4, "A6"),
    (5, 5, "Challenger"),
    (6, 6, "Civic"),
    (7, 8, "Cruze"),
    (8, 10, "E-Class"),
    (9, 9, "Escalade"),
    (10, 7, "Focus"),
    (11, 11, "GT-R"),
    (12, 8, "Impala"),
    (13, 12, "Impreza"),
    (14, 13, "Jetta"),
    (15, 14, "Lancer"),
    (16, 15, "Miata"),
    (17, 16, "Model S"),
    (18, 7, "Mustang"),
    (19, 6, "NSX"),
    (20, 17, "Prius"),
    (21, 11, "Q50"),
    (22, 18, "Regal"),
    (23, 17, "RX"),
    (24, 19, "Swift"),
    (25, 20, "Volvo V40"),
    (26, 21, "Wrangler"),
    (27, 22, "Yukon"),
];

/// `(id, name, description)`
pub const MOVIES: &[(i64, &str, Option<&str>)] = &[
    (1, "Moon", Some("Some movie about the moon")),
    (2, "Terminator", Some("Movie about a terminator")),
    (3, "The Avengers 2", None),
    (4, "The Avengers 1", None),
    (5, "A Beautiful Mind", None),
    (6, "Forrest Gump", None),
    (7, "Some Empty Movie", Some("")),
];

/// Returns the DDL for the fixture tables.
///
/// PostgreSQL text columns use the "C" collation so both backends compare
/// strings bytewise.
pub fn schema_sql(dialect: Dialect) -> String {
    let (int, text) = match dialect {
        Dialect::Sqlite => ("INTEGER", "TEXT"),
        Dialect::Postgres => ("BIGINT", "TEXT COLLATE \"C\""),
    };
    format!(
        "CREATE TABLE manufacturers (id {int} PRIMARY KEY, name {text} NOT NULL);
         CREATE TABLE cars (
             id {int} PRIMARY KEY,
             manufacturer_id {int} NOT NULL REFERENCES manufacturers (id),
             description {text} NOT NULL
         );
         CREATE TABLE movies (id {int} PRIMARY KEY, name {text} NOT NULL, description {text});"
    )
}

/// Returns the INSERT statements for the fixture rows.
pub fn fixture_sql() -> String {
    let mut sql = String::new();
    for (id, name) in MANUFACTURERS {
        sql.push_str(&format!(
            "INSERT INTO manufacturers (id, name) VALUES ({}, '{}');\n",
            id, name
        ));
    }
    for (id, manufacturer_id, description) in CARS {
        sql.push_str(&format!(
            "INSERT INTO cars (id, manufacturer_id, description) VALUES ({}, {}, '{}');\n",
            id, manufacturer_id, description
        ));
    }
    for (id, name, description) in MOVIES {
        let description = match description {
            Some(d) => format!("'{}'", d),
            None => "NULL".to_string(),
        };
        sql.push_str(&format!(
            "INSERT INTO movies (id, name, description) VALUES ({}, '{}', {});\n",
            id, name, description
        ));
    }
    sql
}

/// Returns the integer `column` of every row.
pub fn ints(page: &Page<Record>, column: &str) -> Vec<i64> {
    page.rows
        .iter()
        .filter_map(|row| row.get(column).and_then(CursorValue::as_i64))
        .collect()
}

/// Returns the `id` of every row.
pub fn ids(page: &Page<Record>) -> Vec<i64> {
    ints(page, "id")
}

/// Returns the text `column` of every row.
pub fn strings(page: &Page<Record>, column: &str) -> Vec<String> {
    page.rows
        .iter()
        .filter_map(|row| row.get(column).and_then(CursorValue::as_str))
        .map(String::from)
        .collect()
}

/// Builds a cursor tuple from integers.
pub fn int_cursor(values: &[i64]) -> Vec<CursorValue> {
    values.iter().map(|&v| CursorValue::from(v)).collect()
}
