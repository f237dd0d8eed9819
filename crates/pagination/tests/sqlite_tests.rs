//! SQLite backend integration tests.
//!
//! These tests page through the fixture tables end to end: SQL rendering,
//! execution, counting and cursor extraction.

mod common;

use helios_pagination::backends::sql::Dialect;
use helios_pagination::backends::sqlite::SqliteBackend;
use helios_pagination::error::{PaginationError, ValidationError};
use helios_pagination::types::{
    BaseQuery, CursorValue, OrderDirective, PageOptions, Predicate, SortDirection, SortKey,
};
use helios_pagination::{PaginationConfig, Paginator};

use common::*;

fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend
        .execute_batch(&schema_sql(Dialect::Sqlite))
        .expect("Failed to create schema");
    backend
        .execute_batch(&fixture_sql())
        .expect("Failed to load fixtures");
    backend
}

fn create_paginator() -> Paginator<SqliteBackend> {
    Paginator::new(create_backend())
}

fn cars() -> BaseQuery {
    BaseQuery::new("cars")
}

// ============================================================================
// Single-Key Pagination
// ============================================================================

#[tokio::test]
async fn test_first_page_defaults() {
    let paginator = create_paginator();

    let page = paginator.fetch_page(&cars(), PageOptions::new()).await.unwrap();

    assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
    assert_eq!(page.pagination.row_count, Some(27));
    assert_eq!(page.pagination.limit, 10);
    assert!(page.pagination.has_more);
    assert_eq!(page.pagination.cursors.before, Some(int_cursor(&[1])));
    assert_eq!(page.pagination.cursors.after, Some(int_cursor(&[10])));
    assert_eq!(
        page.pagination.ordered_by,
        vec![SortKey::new("cars", "id", SortDirection::Ascending)]
    );
}

#[tokio::test]
async fn test_after_cursor() {
    let paginator = create_paginator();

    let page = paginator
        .fetch_page(&cars(), PageOptions::new().after(int_cursor(&[5])))
        .await
        .unwrap();

    assert_eq!(ids(&page), (6..=15).collect::<Vec<_>>());
    assert_eq!(page.pagination.row_count, Some(27));
    assert_eq!(page.pagination.cursors.before, Some(int_cursor(&[6])));
    assert_eq!(page.pagination.cursors.after, Some(int_cursor(&[15])));
}

#[tokio::test]
async fn test_before_cursor_returns_reversed_rows() {
    let paginator = create_paginator();

    let page = paginator
        .fetch_page(&cars(), PageOptions::new().before(int_cursor(&[12])))
        .await
        .unwrap();

    assert!(page.is_backward());
    assert_eq!(ids(&page), (2..=11).rev().collect::<Vec<_>>());
    assert_eq!(page.pagination.cursors.before, Some(int_cursor(&[2])));
    assert_eq!(page.pagination.cursors.after, Some(int_cursor(&[11])));

    let canonical: Vec<i64> = page
        .into_canonical_rows()
        .iter()
        .filter_map(|row| row.get("id").and_then(CursorValue::as_i64))
        .collect();
    assert_eq!(canonical, (2..=11).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_before_cursor_near_start() {
    let paginator = create_paginator();

    let page = paginator
        .fetch_page(
            &cars(),
            PageOptions::new().with_limit(5).before(int_cursor(&[3])),
        )
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![2, 1]);
    assert!(!page.pagination.has_more);
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_after_last_row_is_empty() {
    let paginator = create_paginator();

    let page = paginator
        .fetch_page(&cars(), PageOptions::new().after(int_cursor(&[27])))
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(page.pagination.cursors.is_empty());
    assert!(!page.pagination.has_more);
    assert_eq!(page.pagination.row_count, Some(27));
}

#[tokio::test]
async fn test_descending_primary_key() {
    let paginator = create_paginator();
    let query = cars().order_by(OrderDirective::desc("id"));

    let page = paginator
        .fetch_page(&query, PageOptions::new().with_limit(3).after(int_cursor(&[20])))
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![19, 18, 17]);
    assert_eq!(page.pagination.cursors.before, Some(int_cursor(&[19])));
    assert_eq!(page.pagination.cursors.after, Some(int_cursor(&[17])));
}

// ============================================================================
// Multi-Key Pagination
// ============================================================================

#[tokio::test]
async fn test_two_keys_mixed_directions() {
    let paginator = create_paginator();
    let query = cars()
        .order_by(OrderDirective::asc("manufacturer_id"))
        .order_by(OrderDirective::desc("description"));

    let page = paginator
        .fetch_page(
            &query,
            PageOptions::new()
                .with_limit(2)
                .after(vec![CursorValue::from(8i64), CursorValue::from("Impala")]),
        )
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.pagination.row_count, Some(27));
    assert_eq!(
        page.pagination.cursors.before,
        Some(vec![CursorValue::from(8i64), CursorValue::from("Cruze")])
    );
    assert_eq!(
        page.pagination.cursors.after,
        Some(vec![CursorValue::from(9i64), CursorValue::from("Escalade")])
    );
}

#[tokio::test]
async fn test_two_keys_backward() {
    let paginator = create_paginator();
    let query = cars()
        .order_by(OrderDirective::asc("manufacturer_id"))
        .order_by(OrderDirective::desc("description"));

    let page = paginator
        .fetch_page(
            &query,
            PageOptions::new()
                .with_limit(3)
                .before(vec![CursorValue::from(9i64), CursorValue::from("Escalade")]),
        )
        .await
        .unwrap();

    // Canonical order before (9, Escalade): ..., (7, Focus), (8, Impala), (8, Cruze)
    assert_eq!(strings(&page, "description"), vec!["Cruze", "Impala", "Focus"]);
    assert_eq!(
        page.pagination.cursors.before,
        Some(vec![CursorValue::from(7i64), CursorValue::from("Focus")])
    );
    assert_eq!(
        page.pagination.cursors.after,
        Some(vec![CursorValue::from(8i64), CursorValue::from("Cruze")])
    );
}

#[tokio::test]
async fn test_directions_are_case_insensitive() {
    let paginator = create_paginator();
    let query = cars()
        .order_by(OrderDirective::new("manufacturer_id", "DESC"))
        .order_by(OrderDirective::new("id", "sideways"));

    let page = paginator
        .fetch_page(&query, PageOptions::new().with_limit(3))
        .await
        .unwrap();

    // Manufacturer 22 (27), 21 (26), 20 (25)
    assert_eq!(ids(&page), vec![27, 26, 25]);
    assert_eq!(
        page.pagination.ordered_by[1],
        SortKey::new("cars", "id", SortDirection::Ascending)
    );
}

#[tokio::test]
async fn test_qualified_order_across_join() {
    let paginator = create_paginator();
    let query = cars()
        .inner_join("manufacturers", "cars.manufacturer_id", "manufacturers.id")
        .order_by(OrderDirective::asc("manufacturers.name"))
        .order_by(OrderDirective::asc("cars.id"));
    let columns = serde_json::json!(["cars.id", "cars.description", "manufacturers.name"]);

    let first = paginator
        .fetch_page(
            &query,
            PageOptions::new()
                .with_limit(4)
                .with_fetch_option("columns", columns.clone()),
        )
        .await
        .unwrap();

    // Audi, BMW, Buick, Cadillac
    assert_eq!(ids(&first), vec![4, 2, 22, 9]);
    assert_eq!(
        first.pagination.cursors.after,
        Some(vec![CursorValue::from("Cadillac"), CursorValue::from(9i64)])
    );
    assert_eq!(
        first.pagination.ordered_by[0],
        SortKey::new("manufacturers", "name", SortDirection::Ascending)
    );

    let second = paginator.next(&first).await.unwrap().unwrap();
    // Chevrolet (7, 12), Chrysler (1), Dodge (5)
    assert_eq!(ids(&second), vec![7, 12, 1, 5]);
    assert_eq!(second.pagination.row_count, Some(27));
}

#[tokio::test]
async fn test_joined_order_with_default_projection() {
    let paginator = create_paginator();
    let query = cars()
        .inner_join("manufacturers", "cars.manufacturer_id", "manufacturers.id")
        .order_by(OrderDirective::asc("manufacturers.name"))
        .order_by(OrderDirective::asc("cars.id"));

    let first = paginator
        .fetch_page(&query, PageOptions::new().with_limit(4))
        .await
        .unwrap();

    assert_eq!(ids(&first), vec![4, 2, 22, 9]);
    assert_eq!(
        first.pagination.cursors.after,
        Some(vec![CursorValue::from("Cadillac"), CursorValue::from(9i64)])
    );

    let second = paginator.next(&first).await.unwrap().unwrap();
    assert_eq!(ids(&second), vec![7, 12, 1, 5]);
}

#[tokio::test]
async fn test_joined_order_on_shared_column_name() {
    let paginator = create_paginator();
    let query = cars()
        .inner_join("manufacturers", "cars.manufacturer_id", "manufacturers.id")
        .order_by(OrderDirective::desc("manufacturers.id"))
        .order_by(OrderDirective::asc("cars.id"));
    let options = PageOptions::new().with_limit(3).with_fetch_option(
        "columns",
        serde_json::json!(["cars.id", "manufacturers.id"]),
    );

    let first = paginator.fetch_page(&query, options.clone()).await.unwrap();
    assert_eq!(ids(&first), vec![27, 26, 25]);
    assert_eq!(
        first.pagination.cursors.after,
        Some(vec![CursorValue::from(20i64), CursorValue::from(25i64)])
    );

    let second = paginator.next(&first).await.unwrap().unwrap();
    // Suzuki (24), Buick (22), Toyota (20)
    assert_eq!(ids(&second), vec![24, 22, 20]);

    let mut seen = Vec::new();
    paginator
        .for_each(&query, options, |page| seen.extend(ids(page)))
        .await
        .unwrap();
    seen.sort();
    assert_eq!(seen, (1..=27).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_filters_are_kept() {
    let paginator = create_paginator();
    let query = cars().with_predicate(Predicate::gt("manufacturer_id", 10i64));

    let page = paginator
        .fetch_page(&query, PageOptions::new().with_limit(4).after(int_cursor(&[13])))
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![14, 15, 16, 17]);
    // cars with manufacturer_id > 10
    assert_eq!(page.pagination.row_count, Some(14));
}

// ============================================================================
// Limits and Counting
// ============================================================================

#[tokio::test]
async fn test_limit_falls_back_to_default() {
    let paginator = create_paginator();

    for limit in [0, -5] {
        let page = paginator
            .fetch_page(&cars(), PageOptions::new().with_limit(limit))
            .await
            .unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page.pagination.limit, 10);
    }
}

#[tokio::test]
async fn test_configured_limits() {
    let paginator = Paginator::with_config(
        create_backend(),
        PaginationConfig::default()
            .with_default_limit(4)
            .with_max_limit(6),
    );

    let page = paginator.fetch_page(&cars(), PageOptions::new()).await.unwrap();
    assert_eq!(page.len(), 4);

    let page = paginator
        .fetch_page(&cars(), PageOptions::new().with_limit(100))
        .await
        .unwrap();
    assert_eq!(page.len(), 6);
    assert_eq!(page.pagination.limit, 6);
}

#[tokio::test]
async fn test_count_ignores_order_and_grouping() {
    let paginator = create_paginator();

    let plain = paginator.count(&cars()).await.unwrap();
    let ordered = paginator
        .count(
            &cars()
                .order_by(OrderDirective::desc("description"))
                .group_by("manufacturer_id"),
        )
        .await
        .unwrap();

    assert_eq!(plain, Some(27));
    assert_eq!(ordered, Some(27));
}

#[tokio::test]
async fn test_count_with_join_is_distinct() {
    let paginator = create_paginator();
    let query = BaseQuery::new("manufacturers").inner_join(
        "cars",
        "manufacturers.id",
        "cars.manufacturer_id",
    );

    assert_eq!(paginator.count(&query).await.unwrap(), Some(22));
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_cursor_length_mismatch() {
    let paginator = create_paginator();
    let query = cars()
        .order_by(OrderDirective::asc("manufacturer_id"))
        .order_by(OrderDirective::desc("description"));

    let err = paginator
        .fetch_page(&query, PageOptions::new().after(int_cursor(&[8])))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PaginationError::Validation(ValidationError::CursorLengthMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[tokio::test]
async fn test_both_cursors_rejected() {
    let paginator = create_paginator();

    let err = paginator
        .fetch_page(
            &cars(),
            PageOptions::new()
                .after(int_cursor(&[5]))
                .before(int_cursor(&[12])),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PaginationError::Validation(ValidationError::ConflictingCursors)
    ));
}

#[tokio::test]
async fn test_invalid_order_column_rejected() {
    let paginator = create_paginator();
    let query = cars().order_by(OrderDirective::asc("id; DROP TABLE cars"));

    let err = paginator
        .fetch_page(&query, PageOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PaginationError::Validation(ValidationError::InvalidIdentifier { .. })
    ));
    assert_eq!(paginator.count(&cars()).await.unwrap(), Some(27));
}

// ============================================================================
// Opaque Tokens
// ============================================================================

#[tokio::test]
async fn test_cursor_tokens() {
    let paginator = create_paginator();

    let first = paginator
        .fetch_page(&cars(), PageOptions::new().with_limit(5))
        .await
        .unwrap();
    let token = first.pagination.cursors.after_token().unwrap().unwrap();

    let second = paginator
        .fetch_page(
            &cars(),
            PageOptions::new()
                .with_limit(5)
                .with_cursor_token(&token)
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ids(&second), vec![6, 7, 8, 9, 10]);

    let token = second.pagination.cursors.before_token().unwrap().unwrap();
    let back = paginator
        .fetch_page(
            &cars(),
            PageOptions::new()
                .with_limit(5)
                .with_cursor_token(&token)
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ids(&back), vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_file_backed_database() {
    let dir = tempfile::tempdir().unwrap();
    let backend = SqliteBackend::open(dir.path().join("cars.db")).unwrap();
    backend.execute_batch(&schema_sql(Dialect::Sqlite)).unwrap();
    backend.execute_batch(&fixture_sql()).unwrap();
    let paginator = Paginator::new(backend);

    let page = paginator
        .fetch_page(&cars(), PageOptions::new().after(int_cursor(&[20])))
        .await
        .unwrap();

    assert_eq!(ids(&page), (21..=27).collect::<Vec<_>>());
    assert!(!page.pagination.has_more);
}
