//! SQL statement classification.

/// Whether a statement returns rows or reports an affected-row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// A row-returning query.
    Read,
    /// Anything else (INSERT/UPDATE/DELETE/DDL).
    Write,
}

impl StatementKind {
    /// Classifies a statement by its leading keyword.
    ///
    /// A statement is a read iff its trimmed text starts with `select`,
    /// case-insensitively. Known limitation: statements opening with a
    /// comment or a CTE (`WITH ... SELECT`) classify as writes.
    pub fn classify(sql: &str) -> Self {
        let head = sql.trim_start();
        match head.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("select") => StatementKind::Read,
            _ => StatementKind::Write,
        }
    }

    /// True for row-returning statements.
    pub fn is_read(self) -> bool {
        matches!(self, StatementKind::Read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_is_a_read() {
        assert_eq!(
            StatementKind::classify("SELECT * FROM users"),
            StatementKind::Read
        );
    }

    #[test]
    fn case_and_leading_whitespace_do_not_matter() {
        assert_eq!(
            StatementKind::classify("  \n\tselect 1"),
            StatementKind::Read
        );
        assert_eq!(StatementKind::classify("SeLeCt 1"), StatementKind::Read);
    }

    #[test]
    fn writes_and_ddl_are_writes() {
        assert_eq!(
            StatementKind::classify("INSERT INTO users VALUES (1)"),
            StatementKind::Write
        );
        assert_eq!(
            StatementKind::classify("UPDATE users SET name = 'x'"),
            StatementKind::Write
        );
        assert_eq!(
            StatementKind::classify("CREATE TABLE t (id INT)"),
            StatementKind::Write
        );
    }

    #[test]
    fn leading_comments_and_ctes_misclassify_by_design() {
        // Documented limitation of prefix classification.
        assert_eq!(
            StatementKind::classify("-- top customers\nSELECT * FROM users"),
            StatementKind::Write
        );
        assert_eq!(
            StatementKind::classify("WITH t AS (SELECT 1) SELECT * FROM t"),
            StatementKind::Write
        );
    }

    #[test]
    fn short_fragments_are_writes() {
        assert_eq!(StatementKind::classify(""), StatementKind::Write);
        assert_eq!(StatementKind::classify("sel"), StatementKind::Write);
    }
}
