use rusqlite::{Connection, Result};
use vaxsched_core::Role;

use crate::types::Account;

/// Column order shared by every account SELECT in this crate.
pub(crate) const ACCOUNT_COLUMNS: &str = "username, salt, hash, created_at";

/// Map a SELECT row (column order from ACCOUNT_COLUMNS) to an Account.
pub(crate) fn row_to_account(role: Role, row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        username: row.get(0)?,
        role,
        salt: row.get(1)?,
        hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Initialise both account tables. Safe to call on every startup;
/// CREATE IF NOT EXISTS makes it idempotent.
pub fn init_db(conn: &Connection) -> Result<()> {
    for role in [Role::Patient, Role::Caregiver] {
        create_account_table(conn, role)?;
    }
    Ok(())
}

fn create_account_table(conn: &Connection, role: Role) -> Result<()> {
    // NOCASE: "Alice" and "alice" are the same account.
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            username    TEXT PRIMARY KEY NOT NULL COLLATE NOCASE,
            salt        BLOB NOT NULL,
            hash        BLOB NOT NULL,
            created_at  TEXT NOT NULL
        );",
        table = role.table()
    ))
}
