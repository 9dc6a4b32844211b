//! Grants row parser implementation

use crate::{
    GrantedPrivilege, Grantee, KnownPrivilege, ParseError, Privilege, PrivilegeCatalog,
    PrivilegeScope,
};
use indexmap::IndexSet;
use std::sync::Arc;

const GRANT_KEYWORD: &str = "GRANT ";
const ON_DELIMITER: &str = " ON ";
const TO_DELIMITER: &str = " TO ";
const ALL_PRIVILEGES: &str = "ALL PRIVILEGES";
const WITH_GRANT_OPTION: &str = "WITH GRANT OPTION";

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Object a grants row applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Global,
    Database(&'a str),
    Table(&'a str, &'a str),
}

impl Target<'_> {
    fn scope(&self) -> PrivilegeScope {
        match self {
            Target::Global => PrivilegeScope::Global,
            Target::Database(_) => PrivilegeScope::Database,
            Target::Table(..) => PrivilegeScope::Table,
        }
    }

    fn privilege(&self, name: &str) -> Privilege {
        match *self {
            Target::Global => Privilege::global(name),
            Target::Database(database) => Privilege::database(name, database),
            Target::Table(database, table) => Privilege::table(name, database, table),
        }
    }
}

/// Parses rows of `SHOW GRANTS FOR ...` output
///
/// Privilege names are checked against the catalog for the row's scope, and
/// `ALL PRIVILEGES` expands to the catalog's names minus `USAGE`.
///
/// # Examples
///
/// ```
/// use privsync_admin::{PrivilegeCatalog, PrivilegeScope, ShowGrantsParser};
///
/// let parser = ShowGrantsParser::new(PrivilegeCatalog::mariadb());
/// let grants = parser
///     .parse_line("GRANT SELECT ON `db`.`t` TO 'r'@'%'")
///     .unwrap();
/// assert_eq!(grants.len(), 1);
/// assert_eq!(grants[0].privilege().scope(), PrivilegeScope::Table);
/// assert_eq!(grants[0].grantee().name(), "r");
/// ```
#[derive(Debug, Clone)]
pub struct ShowGrantsParser {
    catalog: Arc<PrivilegeCatalog>,
}

impl ShowGrantsParser {
    pub fn new(catalog: Arc<PrivilegeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PrivilegeCatalog {
        &self.catalog
    }

    /// Parse one `GRANT <privileges> ON <target> TO <grantee>[trailer]` line.
    ///
    /// Returns one grant per privilege on the line, all sharing the same
    /// grantee and target. Any deviation from that shape fails as a whole.
    pub fn parse_line(&self, line: &str) -> ParseResult<Vec<GrantedPrivilege>> {
        if line.trim().is_empty() {
            return Err(ParseError::new("line is empty", line));
        }

        let statement = line.trim_start();
        if !statement.starts_with(GRANT_KEYWORD) {
            return Err(ParseError::new("expected GRANT keyword", line));
        }
        // Keep the space after GRANT so an empty privilege list still yields " ON "
        let body = &statement[GRANT_KEYWORD.len() - 1..];

        let on_index = body
            .find(ON_DELIMITER)
            .ok_or_else(|| ParseError::new("missing ON keyword", line))?;
        let privilege_list = &body[..on_index];
        let after_on = &body[on_index + ON_DELIMITER.len()..];

        let to_index = after_on
            .find(TO_DELIMITER)
            .ok_or_else(|| ParseError::new("missing TO keyword", line))?;
        let target = parse_target(after_on[..to_index].trim(), line)?;
        let grantee = parse_grantee(&after_on[to_index + TO_DELIMITER.len()..], line)?;

        let mut names = self.resolve_privileges(privilege_list, target.scope(), line)?;
        if line.contains(WITH_GRANT_OPTION) {
            let grant_option = KnownPrivilege::GrantOption.as_sql();
            self.require_known(target.scope(), grant_option, line)?;
            names.insert(grant_option.to_string());
        }

        Ok(names
            .iter()
            .map(|name| GrantedPrivilege::new(grantee.clone(), target.privilege(name)))
            .collect())
    }

    fn resolve_privileges(
        &self,
        list: &str,
        scope: PrivilegeScope,
        line: &str,
    ) -> ParseResult<IndexSet<String>> {
        let list = list.trim();
        if list.is_empty() {
            return Err(ParseError::new("empty privilege list", line));
        }
        if list == ALL_PRIVILEGES {
            return Ok(self.catalog.all_privileges(scope).map(str::to_string).collect());
        }

        list.split(',')
            .map(str::trim)
            .map(|token| {
                if token.is_empty() {
                    return Err(ParseError::new("empty entry in privilege list", line));
                }
                self.require_known(scope, token, line)?;
                Ok(token.to_string())
            })
            .collect()
    }

    fn require_known(&self, scope: PrivilegeScope, name: &str, line: &str) -> ParseResult<()> {
        if self.catalog.contains(scope, name) {
            Ok(())
        } else {
            Err(ParseError::new(
                format!("unknown {} privilege \"{}\"", scope, name),
                line,
            ))
        }
    }
}

/// `*.*`, `` `db`.* `` or `` `db`.`table` ``
fn parse_target<'a>(target: &'a str, line: &str) -> ParseResult<Target<'a>> {
    if target == "*.*" {
        return Ok(Target::Global);
    }

    let rest = target
        .strip_prefix('`')
        .ok_or_else(|| ParseError::new("database must be quoted with backticks", line))?;
    let (database, rest) = rest
        .split_once('`')
        .ok_or_else(|| ParseError::new("unterminated database name", line))?;
    if database.trim().is_empty() {
        return Err(ParseError::new("empty database name", line));
    }
    let rest = rest
        .strip_prefix('.')
        .ok_or_else(|| ParseError::new("missing '.' between database and table", line))?;
    if rest == "*" {
        return Ok(Target::Database(database));
    }

    let table = rest
        .strip_prefix('`')
        .and_then(|r| r.strip_suffix('`'))
        .ok_or_else(|| ParseError::new("table must be '*' or quoted with backticks", line))?;
    if table.contains('`') {
        return Err(ParseError::new("unexpected text after table name", line));
    }
    if table.trim().is_empty() {
        return Err(ParseError::new("empty table name", line));
    }
    Ok(Target::Table(database, table))
}

/// `` `user`@`host` `` or `` `role` `` (or the single-quoted forms), followed
/// by an optional trailer such as `IDENTIFIED BY PASSWORD '...'`.
fn parse_grantee(block: &str, line: &str) -> ParseResult<Grantee> {
    let block = block.trim_start();
    let quote = match block.chars().next() {
        Some(q @ ('`' | '\'')) => q,
        _ => {
            return Err(ParseError::new(
                "grantee must be quoted with backticks or single quotes",
                line,
            ));
        }
    };

    let (name, rest) = block[1..]
        .split_once(quote)
        .ok_or_else(|| ParseError::new("unterminated grantee name", line))?;

    let grantee = match rest.strip_prefix('@') {
        Some(host_part) => {
            let (host, trailer) = host_part
                .strip_prefix(quote)
                .and_then(|h| h.split_once(quote))
                .ok_or_else(|| ParseError::new("grantee host must be quoted", line))?;
            check_trailer(trailer, quote, line)?;
            Grantee::user(name, host)
        }
        None => {
            check_trailer(rest, quote, line)?;
            Grantee::role(name)
        }
    };
    grantee.map_err(|e| ParseError::new(e.to_string(), line))
}

fn check_trailer(trailer: &str, quote: char, line: &str) -> ParseResult<()> {
    if trailer.starts_with(quote) || trailer.starts_with('@') {
        return Err(ParseError::new("unexpected text after grantee", line));
    }
    Ok(())
}
