//! Tests for page-based slicing.

use listkit::State;
use listkit::pagination::{Pagination, PaginationConfig};

fn numbers(len: usize) -> State<Vec<usize>> {
    State::new((0..len).collect())
}

#[test]
fn test_defaults() {
    let pages = Pagination::new(numbers(35), PaginationConfig::default());
    assert_eq!(pages.page_size(), 10);
    assert_eq!(pages.page_index(), 0);
    assert_eq!(pages.page_count(), 4);
    assert_eq!(pages.page_items(), (0..10).collect::<Vec<_>>());
    assert!(!pages.is_last_page());
}

#[test]
fn test_page_count_and_item_count_for_many_sizes() {
    for len in 0..30 {
        for size in 1..8 {
            let pages = Pagination::new(numbers(len), PaginationConfig::new().with_page_size(size));
            let count = len.div_ceil(size);
            assert_eq!(pages.page_count(), count, "len={} size={}", len, size);

            for index in 0..count {
                pages.goto(index as isize);
                let expected = size.min(len - index * size);
                assert_eq!(pages.page_items().len(), expected);
                assert_eq!(pages.is_last_page(), index == count - 1);
            }
        }
    }
}

#[test]
fn test_empty_list() {
    let pages = Pagination::new(Vec::<u8>::new(), PaginationConfig::default());
    assert_eq!(pages.page_count(), 0);
    assert!(pages.page_items().is_empty());
    assert!(!pages.is_last_page());

    pages.goto(3);
    pages.next();
    pages.prev();
    assert_eq!(pages.page_index(), 0);
}

#[test]
fn test_goto_wraps_negative_and_large_values() {
    let pages = Pagination::new(numbers(50), PaginationConfig::default());
    assert_eq!(pages.page_count(), 5);

    pages.goto(-1);
    assert_eq!(pages.page_index(), 4);
    assert!(pages.is_last_page());

    pages.goto(7);
    assert_eq!(pages.page_index(), 2);

    pages.goto(-7);
    assert_eq!(pages.page_index(), 3);
}

#[test]
fn test_next_and_prev_wrap() {
    let pages = Pagination::new(numbers(30), PaginationConfig::default());
    pages.prev();
    assert_eq!(pages.page_index(), 2);
    pages.next();
    assert_eq!(pages.page_index(), 0);
    pages.next();
    assert_eq!(pages.page_items(), (10..20).collect::<Vec<_>>());
}

#[test]
fn test_shrinking_list_clamps_index() {
    let items = numbers(50);
    let pages = Pagination::new(items.clone(), PaginationConfig::default());
    pages.goto(4);

    items.update(|v| v.truncate(21));
    assert_eq!(pages.page_count(), 3);
    assert_eq!(pages.page_index(), 2);
    assert_eq!(pages.page_items(), vec![20]);
}

#[test]
fn test_growing_list_keeps_index() {
    let items = numbers(20);
    let pages = Pagination::new(items.clone(), PaginationConfig::default());
    pages.goto(1);

    items.update(|v| v.extend(20..40));
    assert_eq!(pages.page_index(), 1);
    assert_eq!(pages.page_count(), 4);
}

#[test]
fn test_emptying_list_resets_index() {
    let items = numbers(20);
    let pages = Pagination::new(items.clone(), PaginationConfig::default());
    pages.goto(1);

    items.set(Vec::new());
    assert_eq!(pages.page_index(), 0);
    assert!(pages.page_items().is_empty());
}

#[test]
fn test_page_size_is_at_least_one_and_clamps_index() {
    let pages = Pagination::new(numbers(10), PaginationConfig::new().with_page_size(2));
    pages.goto(4);

    pages.set_page_size(0);
    assert_eq!(pages.page_size(), 1);
    assert_eq!(pages.page_index(), 4);

    pages.set_page_size(5);
    assert_eq!(pages.page_count(), 2);
    assert_eq!(pages.page_index(), 1);
    assert_eq!(pages.page_items(), vec![5, 6, 7, 8, 9]);
}

#[test]
fn test_page_items_follow_item_changes() {
    let items = numbers(5);
    let pages = Pagination::new(items.clone(), PaginationConfig::default());
    assert_eq!(pages.page_items(), vec![0, 1, 2, 3, 4]);

    items.update(|v| v[0] = 99);
    assert_eq!(pages.page_items(), vec![99, 1, 2, 3, 4]);
}
