use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params};

use crate::net::app_cache_dir;
use crate::sources::ResultSink;
use crate::state::EnrichedPlayer;

/// Storage session for ranking output. Owns its connection for the lifetime
/// of the batch; callers open one per run instead of sharing a global handle.
pub struct ScoutDb {
    conn: Connection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredRankedPlayer {
    pub name: String,
    pub club: String,
    pub tier: String,
    pub score: f64,
}

impl ScoutDb {
    pub fn default_path() -> Option<PathBuf> {
        app_cache_dir().map(|dir| dir.join("rankings.sqlite"))
    }

    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).ok();
        }
        let conn = Connection::open(path)
            .with_context(|| format!("open rankings db at {}", path.display()))?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory rankings db")?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Write one ranking batch inside a single transaction and return its
    /// run id. Output order is preserved via the position column.
    pub fn store_ranking(&mut self, players: &[EnrichedPlayer], label: &str) -> Result<i64> {
        let tx = self.conn.transaction().context("begin ranking transaction")?;
        tx.execute(
            "INSERT INTO runs (label, created_utc) VALUES (?1, ?2)",
            params![label, Utc::now().to_rfc3339()],
        )
        .context("insert run row")?;
        let run_id = tx.last_insert_rowid();

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO ranked_players
                     (run_id, position, name, player_position, club, nationality, age,
                      market_value, tier, score)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                )
                .context("prepare ranked player insert")?;
            for (idx, player) in players.iter().enumerate() {
                stmt.execute(params![
                    run_id,
                    idx as i64,
                    player.record.name,
                    player.record.position,
                    player.record.club,
                    player.record.nationality,
                    player.record.age,
                    player.record.market_value,
                    player.tier.map(|t| t.label()),
                    player.score,
                ])
                .context("insert ranked player")?;
            }
        }

        tx.commit().context("commit ranking transaction")?;
        Ok(run_id)
    }

    pub fn load_ranking(&self, run_id: i64) -> Result<Vec<StoredRankedPlayer>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT name, club, COALESCE(tier, ''), COALESCE(score, 0.0)
                 FROM ranked_players WHERE run_id = ?1 ORDER BY position",
            )
            .context("prepare ranking query")?;
        let rows = stmt
            .query_map(params![run_id], |row| {
                Ok(StoredRankedPlayer {
                    name: row.get(0)?,
                    club: row.get(1)?,
                    tier: row.get(2)?,
                    score: row.get(3)?,
                })
            })
            .context("query ranked players")?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row.context("read ranked player row")?);
        }
        Ok(out)
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS runs (
            id INTEGER PRIMARY KEY,
            label TEXT NOT NULL,
            created_utc TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS ranked_players (
            run_id INTEGER NOT NULL REFERENCES runs(id),
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            player_position TEXT NOT NULL,
            club TEXT NOT NULL,
            nationality TEXT NOT NULL,
            age INTEGER NOT NULL,
            market_value REAL NOT NULL,
            tier TEXT,
            score REAL,
            PRIMARY KEY (run_id, position)
        );",
    )
    .context("init rankings schema")
}

impl ResultSink for ScoutDb {
    fn emit(&mut self, players: &[EnrichedPlayer], label: &str) -> Result<()> {
        let run_id = self.store_ranking(players, label)?;
        log::info!("stored ranking '{label}' as run {run_id}");
        Ok(())
    }
}
