use super::*;

fn literal(term: &str) -> SearchQuery {
    SearchQuery::new(term).case_sensitive(true)
}

#[test]
fn test_find_all_positions() {
    let doc = "hello world\nsay hello hello\nnothing";
    let matches = SearchService::find_all(doc, &literal("hello"));

    assert_eq!(matches.len(), 3);
    assert_eq!((matches[0].line, matches[0].column), (1, 1));
    assert_eq!((matches[1].line, matches[1].column), (2, 5));
    assert_eq!((matches[2].line, matches[2].column), (2, 11));
    assert_eq!(matches[1].matched_text, "hello");
    assert_eq!(matches[1].context_line, "say hello hello");
}

#[test]
fn test_literal_mode_escapes_metacharacters() {
    let query = literal("a.b");
    assert_eq!(SearchService::find_all("a.b", &query).len(), 1);
    assert!(SearchService::find_all("axb", &query).is_empty());

    let query = literal("(x)+[y]");
    assert_eq!(SearchService::find_all("z (x)+[y] z", &query).len(), 1);
}

#[test]
fn test_regex_mode() {
    let query = SearchQuery::new(r"\d+").regex(true);
    let matches = SearchService::find_all("a1 b22\nc333", &query);

    let texts: Vec<&str> = matches.iter().map(|m| m.matched_text.as_str()).collect();
    assert_eq!(texts, vec!["1", "22", "333"]);
    assert_eq!((matches[2].line, matches[2].column), (2, 2));
}

#[test]
fn test_case_sensitivity() {
    let doc = "Foo foo FOO";
    assert_eq!(SearchService::find_all(doc, &SearchQuery::new("foo")).len(), 3);
    assert_eq!(SearchService::find_all(doc, &literal("foo")).len(), 1);
}

#[test]
fn test_columns_count_chars() {
    let matches = SearchService::find_all("héllo wörld", &literal("wörld"));
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].column, 7);
}

#[test]
fn test_zero_length_regex_terminates() {
    let query = SearchQuery::new("^").regex(true);
    let matches = SearchService::find_all("ab\ncd", &query);
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.matched_text.is_empty() && m.column == 1));

    let query = SearchQuery::new("b*").regex(true);
    let matches = SearchService::find_all("abc", &query);
    let columns: Vec<usize> = matches.iter().map(|m| m.column).collect();
    assert_eq!(columns, vec![1, 2, 3, 4]);
}

#[test]
fn test_invalid_regex_yields_no_matches() {
    let query = SearchQuery::new("foo(").regex(true);
    assert!(SearchService::find_all("foo(", &query).is_empty());
    assert_eq!(SearchService::replace_all("foo(", &query, "x"), "foo(");
}

#[test]
fn test_empty_term() {
    let query = SearchQuery::new("");
    assert!(SearchService::find_all("abc", &query).is_empty());
    assert_eq!(SearchService::replace_all("abc", &query, "x"), "abc");
}

#[test]
fn test_replace_one_targets_ordinal() {
    let doc = "foo foo foo";
    let query = literal("foo");
    let matches = SearchService::find_all(doc, &query);

    assert_eq!(
        SearchService::replace_one(doc, &matches, 1, &query, "BAR"),
        "foo BAR foo"
    );
    assert_eq!(
        SearchService::replace_one(doc, &matches, 2, &query, "BAR"),
        "foo foo BAR"
    );
}

#[test]
fn test_replace_one_leaves_other_lines() {
    let doc = "foo\r\nfoo foo\r\nfoo";
    let query = literal("foo");
    let matches = SearchService::find_all(doc, &query);
    assert_eq!(matches.len(), 4);

    // index 2 is the second "foo" on line 2
    let out = SearchService::replace_one(doc, &matches, 2, &query, "x");
    assert_eq!(out, "foo\r\nfoo x\r\nfoo");
}

#[test]
fn test_replace_one_noop_cases() {
    let doc = "foo foo";
    let query = literal("foo");
    let matches = SearchService::find_all(doc, &query);

    assert_eq!(SearchService::replace_one(doc, &[], 0, &query, "x"), doc);
    assert_eq!(SearchService::replace_one(doc, &matches, 9, &query, "x"), doc);
    assert_eq!(
        SearchService::replace_one(doc, &matches, 0, &literal(""), "x"),
        doc
    );
}

#[test]
fn test_replace_one_regex_is_literal_replacement() {
    let doc = "a1 a2 a3";
    let query = SearchQuery::new(r"a(\d)").regex(true);
    let matches = SearchService::find_all(doc, &query);

    assert_eq!(
        SearchService::replace_one(doc, &matches, 1, &query, "$1"),
        "a1 $1 a3"
    );
}

#[test]
fn test_replace_all() {
    assert_eq!(
        SearchService::replace_all("foo foo foo", &literal("foo"), "bar"),
        "bar bar bar"
    );
    assert_eq!(
        SearchService::replace_all("Foo\nFOO", &SearchQuery::new("foo"), "x"),
        "x\nx"
    );
}

#[test]
fn test_replace_all_inserts_replacement_literally() {
    let query = SearchQuery::new(r"(\w+)@(\w+)").regex(true);
    assert_eq!(
        SearchService::replace_all("me@host", &query, "$2 at $1"),
        "$2 at $1"
    );
}

#[test]
fn test_find_next_and_prev_wrap() {
    let matches = SearchService::find_all("ab ab\nab", &literal("ab"));
    assert_eq!(SearchService::find_next(&matches, 1, 1), Some(1));
    assert_eq!(SearchService::find_next(&matches, 2, 1), Some(0));
    assert_eq!(SearchService::find_prev(&matches, 1, 4), Some(0));
    assert_eq!(SearchService::find_prev(&matches, 1, 1), Some(2));
    assert_eq!(SearchService::find_next(&[], 1, 1), None);
}
