//! Tests for statement building

use super::*;
use crate::{GrantError, Grantee, KnownPrivilege, Privilege, PrivilegeOperation, PrivilegeScope};
use rstest::rstest;

fn user() -> Grantee {
    Grantee::user("u", "h").unwrap()
}

fn role() -> Grantee {
    Grantee::role("reporting").unwrap()
}

// ============================================================================
// Rendering Tests
// ============================================================================

mod render_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case::global_grant_user(
        PrivilegeOperation::Grant,
        PrivilegeScope::Global,
        None,
        None,
        user(),
        "GRANT SELECT ON *.* TO `u`@`h`;"
    )]
    #[case::global_revoke_role(
        PrivilegeOperation::Revoke,
        PrivilegeScope::Global,
        None,
        None,
        role(),
        "REVOKE SELECT ON *.* FROM `reporting`;"
    )]
    #[case::database_grant_user(
        PrivilegeOperation::Grant,
        PrivilegeScope::Database,
        Some("db"),
        None,
        user(),
        "GRANT SELECT ON `db`.* TO `u`@`h`;"
    )]
    #[case::database_revoke_role(
        PrivilegeOperation::Revoke,
        PrivilegeScope::Database,
        Some("db"),
        None,
        role(),
        "REVOKE SELECT ON `db`.* FROM `reporting`;"
    )]
    #[case::table_grant_role(
        PrivilegeOperation::Grant,
        PrivilegeScope::Table,
        Some("db"),
        Some("t"),
        role(),
        "GRANT SELECT ON `db`.`t` TO `reporting`;"
    )]
    #[case::table_revoke_user(
        PrivilegeOperation::Revoke,
        PrivilegeScope::Table,
        Some("db"),
        Some("t"),
        user(),
        "REVOKE SELECT ON `db`.`t` FROM `u`@`h`;"
    )]
    fn test_build_statement(
        #[case] operation: PrivilegeOperation,
        #[case] scope: PrivilegeScope,
        #[case] database: Option<&str>,
        #[case] table: Option<&str>,
        #[case] grantee: Grantee,
        #[case] expected: &str,
    ) {
        let sql = StatementBuilder::new()
            .build_statement(operation, scope, "SELECT", database, table, &grantee)
            .unwrap();
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_global_scope_ignores_database_and_table() {
        let sql = StatementBuilder::new()
            .build_statement(
                PrivilegeOperation::Grant,
                PrivilegeScope::Global,
                "RELOAD",
                Some("ignored"),
                Some("ignored"),
                &user(),
            )
            .unwrap();
        assert_eq!(sql, "GRANT RELOAD ON *.* TO `u`@`h`;");
    }

    #[test]
    fn test_multi_word_privilege() {
        let privilege = Privilege::database(KnownPrivilege::CreateTemporaryTables, "shop");
        let sql = StatementBuilder::new()
            .build_for(PrivilegeOperation::Grant, &privilege, &user())
            .unwrap();
        assert_eq!(sql, "GRANT CREATE TEMPORARY TABLES ON `shop`.* TO `u`@`h`;");
    }

    #[test]
    fn test_build_for_table_privilege() {
        let privilege = Privilege::table("DELETE HISTORY", "shop", "orders");
        let sql = StatementBuilder::new()
            .build_for(PrivilegeOperation::Revoke, &privilege, &role())
            .unwrap();
        assert_eq!(sql, "REVOKE DELETE HISTORY ON `shop`.`orders` FROM `reporting`;");
    }

    #[test]
    fn test_show_grants() {
        let builder = StatementBuilder::new();
        assert_eq!(builder.show_grants(&user()), "SHOW GRANTS FOR `u`@`h`;");
        assert_eq!(builder.show_grants(&role()), "SHOW GRANTS FOR `reporting`;");
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[rstest]
    #[case::blank_name(PrivilegeScope::Global, "  ", None, None)]
    #[case::missing_database(PrivilegeScope::Database, "SELECT", None, None)]
    #[case::blank_database(PrivilegeScope::Database, "SELECT", Some(" "), None)]
    #[case::table_missing_database(PrivilegeScope::Table, "SELECT", None, Some("t"))]
    #[case::missing_table(PrivilegeScope::Table, "SELECT", Some("db"), None)]
    #[case::blank_table(PrivilegeScope::Table, "SELECT", Some("db"), Some(""))]
    #[case::backtick_database(PrivilegeScope::Database, "SELECT", Some("d`b"), None)]
    #[case::backtick_table(PrivilegeScope::Table, "SELECT", Some("db"), Some("t`"))]
    fn test_invalid_arguments(
        #[case] scope: PrivilegeScope,
        #[case] name: &str,
        #[case] database: Option<&str>,
        #[case] table: Option<&str>,
    ) {
        let result = StatementBuilder::new().build_statement(
            PrivilegeOperation::Grant,
            scope,
            name,
            database,
            table,
            &user(),
        );
        assert!(
            matches!(result, Err(GrantError::InvalidArgument(_))),
            "expected invalid argument, got {result:?}"
        );
    }

    #[rstest]
    #[case::blank_user_name(Grantee::User { name: String::new(), host: "%".to_string() })]
    #[case::blank_user_host(Grantee::User { name: "app".to_string(), host: " ".to_string() })]
    #[case::blank_role(Grantee::Role { name: "  ".to_string() })]
    #[case::backtick_role(Grantee::Role { name: "re`porting".to_string() })]
    fn test_unchecked_grantee_rejected(#[case] grantee: Grantee) {
        let builder = StatementBuilder::new();
        let result = builder.build_statement(
            PrivilegeOperation::Grant,
            PrivilegeScope::Global,
            "SELECT",
            None,
            None,
            &grantee,
        );
        assert!(
            matches!(result, Err(GrantError::InvalidArgument(_))),
            "expected invalid argument, got {result:?}"
        );
        assert!(builder
            .build_for(PrivilegeOperation::Revoke, &Privilege::global("SELECT"), &grantee)
            .is_err());
    }
}
