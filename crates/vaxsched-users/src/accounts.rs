use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use vaxsched_core::Role;

use crate::db::{row_to_account, ACCOUNT_COLUMNS};
use crate::error::{Result, UserError};
use crate::password::{generate_salt, hash_password, verify_password};
use crate::types::Account;

/// True if `username` is already registered for `role` (case-insensitive).
pub fn username_exists(conn: &Connection, role: Role, username: &str) -> Result<bool> {
    let found = conn
        .query_row(
            &format!("SELECT 1 FROM {} WHERE username = ?1", role.table()),
            params![username],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Register a new account. The salt is generated here so the caller never
/// handles raw key material.
pub fn create_account(
    conn: &Connection,
    role: Role,
    username: &str,
    password: &str,
) -> Result<Account> {
    if username_exists(conn, role, username)? {
        return Err(UserError::AlreadyExists {
            role,
            username: username.to_string(),
        });
    }

    let salt = generate_salt().to_vec();
    let hash = hash_password(password, &salt)?;
    let account = Account {
        username: username.to_string(),
        role,
        salt,
        hash,
        created_at: Utc::now().to_rfc3339(),
    };
    insert_account_row(conn, &account)?;
    info!(%role, username, "account created");
    Ok(account)
}

/// Load an account by username. Returns None instead of an error when absent
/// so callers decide whether missing is exceptional in their context.
pub fn get_account(conn: &Connection, role: Role, username: &str) -> Result<Option<Account>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM {} WHERE username = ?1",
        role.table()
    ))?;
    match stmt.query_row(params![username], |row| row_to_account(role, row)) {
        Ok(a) => Ok(Some(a)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(UserError::DatabaseError(e)),
    }
}

/// Check a username/password pair. Unknown users and wrong passwords both
/// yield `None`; the caller cannot tell them apart.
pub fn authenticate(
    conn: &Connection,
    role: Role,
    username: &str,
    password: &str,
) -> Result<Option<Account>> {
    let Some(account) = get_account(conn, role, username)? else {
        debug!(%role, username, "login for unknown account");
        return Ok(None);
    };
    if verify_password(password, &account.salt, &account.hash)? {
        info!(%role, username = %account.username, "login succeeded");
        Ok(Some(account))
    } else {
        debug!(%role, username, "login with wrong password");
        Ok(None)
    }
}

// ── private helpers ───────────────────────────────────────────────────────────

fn insert_account_row(conn: &Connection, account: &Account) -> Result<()> {
    let res = conn.execute(
        &format!(
            "INSERT INTO {} ({ACCOUNT_COLUMNS}) VALUES (?1, ?2, ?3, ?4)",
            account.role.table()
        ),
        params![
            account.username,
            account.salt,
            account.hash,
            account.created_at
        ],
    );
    match res {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(UserError::AlreadyExists {
                role: account.role,
                username: account.username.clone(),
            })
        }
        Err(e) => Err(UserError::DatabaseError(e)),
    }
}
