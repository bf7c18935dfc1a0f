//! The fixed schema payload, in dependency order.
//!
//! Every statement is individually idempotent: plain DDL uses
//! `IF NOT EXISTS` / `CREATE OR REPLACE`, and triggers (which Postgres
//! cannot guard inline before v14's `OR REPLACE`) carry an explicit
//! catalog lookup that skips creation when the object already exists.

/// One schema statement, optionally guarded by a catalog query.
pub struct Statement {
    /// Short name used in logs and error messages.
    pub name: &'static str,
    /// The DDL to execute.
    pub sql: &'static str,
    /// Existence probe: if this query returns at least one row, the
    /// statement is skipped.
    pub guard: Option<&'static str>,
}

impl Statement {
    const fn plain(name: &'static str, sql: &'static str) -> Self {
        Self { name, sql, guard: None }
    }

    const fn guarded(name: &'static str, sql: &'static str, guard: &'static str) -> Self {
        Self { name, sql, guard: Some(guard) }
    }
}

/// Ordered list of statements making up the schema.
///
/// Ordering invariants: the extension comes first, tables precede the
/// indexes and foreign keys that reference them, and the trigger
/// function precedes the triggers that attach it.
pub fn statements() -> &'static [Statement] {
    STATEMENTS
}

static STATEMENTS: &[Statement] = &[
    Statement::plain("extension citext", "CREATE EXTENSION IF NOT EXISTS citext"),
    Statement::plain(
        "table users",
        "CREATE TABLE IF NOT EXISTS users (
            id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email           CITEXT NOT NULL UNIQUE,
            display_name    TEXT NOT NULL,
            avatar_url      TEXT,
            password_hash   TEXT,
            is_active       BOOLEAN NOT NULL DEFAULT TRUE,
            created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
            CONSTRAINT users_email_at CHECK (position('@' in email) > 1)
        )",
    ),
    Statement::plain(
        "table huddles",
        "CREATE TABLE IF NOT EXISTS huddles (
            id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            host_id         UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title           TEXT NOT NULL,
            is_private      BOOLEAN NOT NULL DEFAULT FALSE,
            join_code       TEXT UNIQUE,
            status          TEXT NOT NULL DEFAULT 'active',
            created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
            CONSTRAINT huddles_join_code_len
                CHECK (join_code IS NULL OR char_length(join_code) BETWEEN 6 AND 32),
            CONSTRAINT huddles_status
                CHECK (status IN ('active', 'ended', 'archived'))
        )",
    ),
    Statement::plain(
        "table participants",
        "CREATE TABLE IF NOT EXISTS participants (
            id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            huddle_id       UUID NOT NULL REFERENCES huddles(id) ON DELETE CASCADE,
            user_id         UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            role            TEXT NOT NULL DEFAULT 'member',
            joined_at       TIMESTAMPTZ NOT NULL DEFAULT now(),
            left_at         TIMESTAMPTZ,
            is_muted        BOOLEAN NOT NULL DEFAULT FALSE,
            is_camera_on    BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT participants_role
                CHECK (role IN ('host', 'moderator', 'member')),
            CONSTRAINT participants_huddle_user UNIQUE (huddle_id, user_id)
        )",
    ),
    Statement::plain(
        "table chat_messages",
        "CREATE TABLE IF NOT EXISTS chat_messages (
            id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            huddle_id       UUID NOT NULL REFERENCES huddles(id) ON DELETE CASCADE,
            sender_id       UUID REFERENCES users(id) ON DELETE SET NULL,
            message_type    TEXT NOT NULL DEFAULT 'text',
            content         TEXT,
            metadata        JSONB NOT NULL DEFAULT '{}',
            created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
            CONSTRAINT chat_messages_type
                CHECK (message_type IN ('text', 'system', 'media')),
            CONSTRAINT chat_messages_text_content
                CHECK (message_type <> 'text'
                       OR (content IS NOT NULL AND btrim(content) <> ''))
        )",
    ),
    Statement::plain(
        "table notifications",
        "CREATE TABLE IF NOT EXISTS notifications (
            id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id         UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            huddle_id       UUID REFERENCES huddles(id) ON DELETE CASCADE,
            notif_type      TEXT NOT NULL,
            title           TEXT NOT NULL,
            body            TEXT,
            data            JSONB NOT NULL DEFAULT '{}',
            is_read         BOOLEAN NOT NULL DEFAULT FALSE,
            read_at         TIMESTAMPTZ,
            created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
            CONSTRAINT notifications_read_consistency
                CHECK (is_read OR read_at IS NULL)
        )",
    ),
    Statement::plain(
        "index huddles host",
        "CREATE INDEX IF NOT EXISTS idx_huddles_host ON huddles(host_id)",
    ),
    Statement::plain(
        "index huddles status",
        "CREATE INDEX IF NOT EXISTS idx_huddles_status ON huddles(status)",
    ),
    Statement::plain(
        "index participants huddle",
        "CREATE INDEX IF NOT EXISTS idx_participants_huddle ON participants(huddle_id)",
    ),
    Statement::plain(
        "index participants user",
        "CREATE INDEX IF NOT EXISTS idx_participants_user ON participants(user_id)",
    ),
    Statement::plain(
        "index chat_messages huddle",
        "CREATE INDEX IF NOT EXISTS idx_chat_messages_huddle
            ON chat_messages(huddle_id, created_at)",
    ),
    Statement::plain(
        "index notifications user",
        "CREATE INDEX IF NOT EXISTS idx_notifications_user
            ON notifications(user_id, created_at)",
    ),
    Statement::plain(
        "index notifications unread",
        "CREATE INDEX IF NOT EXISTS idx_notifications_unread
            ON notifications(user_id) WHERE NOT is_read",
    ),
    Statement::plain(
        "function set_updated_at",
        "CREATE OR REPLACE FUNCTION set_updated_at() RETURNS trigger AS $$
        BEGIN
            NEW.updated_at = now();
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql",
    ),
    Statement::guarded(
        "trigger users updated_at",
        "CREATE TRIGGER trg_users_updated_at
            BEFORE UPDATE ON users
            FOR EACH ROW EXECUTE FUNCTION set_updated_at()",
        "SELECT 1 FROM pg_trigger
            WHERE tgname = 'trg_users_updated_at'
              AND tgrelid = 'users'::regclass",
    ),
    Statement::guarded(
        "trigger huddles updated_at",
        "CREATE TRIGGER trg_huddles_updated_at
            BEFORE UPDATE ON huddles
            FOR EACH ROW EXECUTE FUNCTION set_updated_at()",
        "SELECT 1 FROM pg_trigger
            WHERE tgname = 'trg_huddles_updated_at'
              AND tgrelid = 'huddles'::regclass",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn position_of(name: &str) -> usize {
        statements()
            .iter()
            .position(|s| s.name == name)
            .unwrap_or_else(|| panic!("no statement named {name}"))
    }

    #[test]
    fn every_statement_is_idempotent() {
        for stmt in statements() {
            let sql = stmt.sql.to_uppercase();
            let inline_guard =
                sql.contains("IF NOT EXISTS") || sql.contains("CREATE OR REPLACE");
            assert!(
                inline_guard || stmt.guard.is_some(),
                "statement '{}' has no idempotence guard",
                stmt.name
            );
        }
    }

    #[test]
    fn tables_precede_their_indexes() {
        let tables = [
            ("table huddles", "index huddles host"),
            ("table huddles", "index huddles status"),
            ("table participants", "index participants huddle"),
            ("table participants", "index participants user"),
            ("table chat_messages", "index chat_messages huddle"),
            ("table notifications", "index notifications user"),
            ("table notifications", "index notifications unread"),
        ];
        for (table, index) in tables {
            assert!(position_of(table) < position_of(index));
        }
    }

    #[test]
    fn referenced_tables_precede_referencing_tables() {
        assert!(position_of("table users") < position_of("table huddles"));
        assert!(position_of("table huddles") < position_of("table participants"));
        assert!(position_of("table huddles") < position_of("table chat_messages"));
        assert!(position_of("table users") < position_of("table notifications"));
    }

    #[test]
    fn function_precedes_triggers() {
        let func = position_of("function set_updated_at");
        assert!(func < position_of("trigger users updated_at"));
        assert!(func < position_of("trigger huddles updated_at"));
    }

    #[test]
    fn extension_comes_first() {
        assert_eq!(statements()[0].name, "extension citext");
    }

    #[test]
    fn triggers_are_catalog_guarded() {
        for stmt in statements().iter().filter(|s| s.sql.contains("CREATE TRIGGER")) {
            let guard = stmt.guard.expect("trigger without catalog guard");
            assert!(guard.contains("pg_trigger"));
        }
    }
}
