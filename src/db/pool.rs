//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! Writers borrow the pool mutably, readers share it: within a process the
//! borrow checker serializes writes, and every write runs in an IMMEDIATE
//! transaction so separate processes are serialized by SQLite itself.

use rusqlite::{Connection, Result, Transaction, TransactionBehavior};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }

    /// Start the write transaction used by every mutating operation.
    pub fn write_tx(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
    }
}
