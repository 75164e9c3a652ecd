//! Dialect-aware index queries.
//!
//! A search pattern is split on whitespace into terms. Every term must
//! occur as a substring of the entry name, in any order (an unordered
//! multi-substring match, not a phrase match). Terms are bound as
//! parameters, never spliced into the SQL text.
//!
//! Both dialects project the same four columns `(type, name, path, anchor)`
//! so rows can be read without checking the dialect again, and both order
//! by name length, then case-insensitive name: shorter, more specific
//! entries come first.

use crate::types::Dialect;
use rusqlite::types::Value;

/// Escape character used in every `LIKE` clause.
const LIKE_ESCAPE: char = '\\';

/// A ready-to-run index query.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexQuery {
    pub sql: String,
    /// Bound values, positional: one `LIKE` pattern per term, then the limit.
    pub params: Vec<Value>,
}

/// Splits a pattern into search terms, discarding empty ones.
pub fn split_terms(pattern: &str) -> Vec<&str> {
    pattern.split_whitespace().collect()
}

/// Wraps a term as a `%term%` LIKE pattern, escaping `%`, `_` and the
/// escape character so the term only ever matches literally.
#[must_use]
pub fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// Builds the query for `dialect` matching every term of `pattern`.
///
/// A pattern with no terms matches every entry, still ordered and capped
/// at `limit` rows.
#[must_use]
pub fn build(dialect: Dialect, pattern: &str, limit: usize) -> IndexQuery {
    let (select, name_column) = match dialect {
        Dialect::Legacy => (
            "SELECT type, name, path, NULL AS anchor FROM searchIndex",
            "name",
        ),
        Dialect::Modern => (
            "SELECT ty.ZTYPENAME, t.ZTOKENNAME, f.ZPATH, m.ZANCHOR \
             FROM ZTOKEN t \
             JOIN ZTOKENTYPE ty ON ty.Z_PK = t.ZTOKENTYPE \
             JOIN ZTOKENMETAINFORMATION m ON m.ZTOKEN = t.Z_PK \
             JOIN ZFILEPATH f ON f.Z_PK = m.ZFILE",
            "t.ZTOKENNAME",
        ),
    };

    let terms = split_terms(pattern);
    let mut params: Vec<Value> = terms
        .iter()
        .map(|term| Value::from(like_pattern(term)))
        .collect();

    let mut sql = String::from(select);
    if !terms.is_empty() {
        let clauses: Vec<String> = (1..=terms.len())
            .map(|i| format!("{name_column} LIKE ?{i} ESCAPE '{LIKE_ESCAPE}'"))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    // Trailing raw name keeps ordering total when names differ only by case
    sql.push_str(&format!(
        " ORDER BY LENGTH({name_column}), LOWER({name_column}), {name_column} LIMIT ?{}",
        terms.len() + 1
    ));
    params.push(Value::from(i64::try_from(limit).unwrap_or(i64::MAX)));

    IndexQuery { sql, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_terms() {
        assert_eq!(split_terms("  list   push "), vec!["list", "push"]);
        assert!(split_terms("   ").is_empty());
        assert!(split_terms("").is_empty());
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("blpop"), "%blpop%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("__init__"), "%\\_\\_init\\_\\_%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_legacy_query() {
        let query = build(Dialect::Legacy, "list push", 1000);
        assert!(query.sql.starts_with("SELECT type, name, path, NULL AS anchor FROM searchIndex"));
        assert!(query.sql.contains("name LIKE ?1 ESCAPE '\\' AND name LIKE ?2 ESCAPE '\\'"));
        assert!(query.sql.contains("ORDER BY LENGTH(name), LOWER(name)"));
        assert!(query.sql.ends_with("LIMIT ?3"));
        assert_eq!(
            query.params,
            vec![
                Value::from("%list%".to_string()),
                Value::from("%push%".to_string()),
                Value::from(1000_i64),
            ]
        );
    }

    #[test]
    fn test_modern_query_joins_all_tables() {
        let query = build(Dialect::Modern, "Array", 1000);
        for table in ["ZTOKEN t", "ZTOKENTYPE ty", "ZTOKENMETAINFORMATION m", "ZFILEPATH f"] {
            assert!(query.sql.contains(table), "missing {table}");
        }
        assert!(query.sql.contains("t.ZTOKENNAME LIKE ?1"));
        assert!(query.sql.contains("ORDER BY LENGTH(t.ZTOKENNAME), LOWER(t.ZTOKENNAME)"));
        assert_eq!(query.params.len(), 2);
    }

    #[test]
    fn test_no_terms_has_no_filter() {
        let query = build(Dialect::Legacy, "   ", 10);
        assert!(!query.sql.contains("WHERE"));
        assert!(query.sql.ends_with("LIMIT ?1"));
        assert_eq!(query.params, vec![Value::from(10_i64)]);
    }

    #[test]
    fn test_user_input_never_reaches_sql_text() {
        let query = build(Dialect::Legacy, "'; DROP TABLE searchIndex; --", 1000);
        assert!(!query.sql.contains("DROP"));
    }
}
