// SQLite文档存储
// 开发心理：记录以JSON文档整存整取，归属单独冗余一列供前置条件查询
// 设计原则：WAL模式、捕捉提交走单个SQL事务、受影响行数实现乐观前置条件

use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::core::config::DatabaseConfig;
use crate::core::error::{Result, ServerError};
use crate::player::{Bag, Player, PlayerId};
use crate::pokemon::{Owner, Pokemon, PokemonId};
use crate::storage::Storage;
use crate::world::location::GeoLocation;

// SQLite存储后端
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    // 按配置打开数据库文件
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let conn = Connection::open(Path::new(&config.path))?;
        if config.wal_mode {
            // WAL让捕捉提交与读请求并发
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        Self::init_schema(&conn)?;
        info!("打开SQLite存储: {}", config.path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // 内存数据库（测试用）
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS player (
                id  INTEGER PRIMARY KEY,
                doc TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS pokemon (
                id    INTEGER PRIMARY KEY,
                owner TEXT,
                doc   TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ServerError::Database("数据库连接锁中毒".to_string()))
    }

    fn next_id(tx: &rusqlite::Transaction<'_>, table: &str) -> Result<u64> {
        let id: i64 = tx.query_row(
            &format!("SELECT COALESCE(MAX(id), 0) + 1 FROM {}", table),
            [],
            |row| row.get(0),
        )?;
        Ok(id as u64)
    }
}

impl Storage for SqliteStore {
    fn load_player(&self, id: PlayerId) -> Result<Player> {
        let conn = self.lock()?;
        let doc: Option<String> = conn
            .query_row(
                "SELECT doc FROM player WHERE id = ?1",
                params![id as i64],
                |row| row.get(0),
            )
            .optional()?;
        let doc = doc.ok_or(ServerError::PlayerNotFound(id))?;
        Ok(serde_json::from_str(&doc)?)
    }

    fn load_pokemon(&self, id: PokemonId) -> Result<Pokemon> {
        let conn = self.lock()?;
        let doc: Option<String> = conn
            .query_row(
                "SELECT doc FROM pokemon WHERE id = ?1",
                params![id as i64],
                |row| row.get(0),
            )
            .optional()?;
        let doc = doc.ok_or(ServerError::PokemonNotFound(id))?;
        Ok(serde_json::from_str(&doc)?)
    }

    fn insert_player(&self, mut player: Player) -> Result<PlayerId> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let id = Self::next_id(&tx, "player")?;
        player.id = id;
        tx.execute(
            "INSERT INTO player (id, doc) VALUES (?1, ?2)",
            params![id as i64, serde_json::to_string(&player)?],
        )?;
        tx.commit()?;
        Ok(id)
    }

    fn insert_pokemon(&self, mut pokemon: Pokemon) -> Result<PokemonId> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let id = Self::next_id(&tx, "pokemon")?;
        pokemon.id = id;
        let owner_tag = pokemon
            .owner
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        tx.execute(
            "INSERT INTO pokemon (id, owner, doc) VALUES (?1, ?2, ?3)",
            params![id as i64, owner_tag, serde_json::to_string(&pokemon)?],
        )?;
        tx.commit()?;
        Ok(id)
    }

    fn save_player_bag(&self, id: PlayerId, bag: &Bag) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let doc: Option<String> = tx
            .query_row(
                "SELECT doc FROM player WHERE id = ?1",
                params![id as i64],
                |row| row.get(0),
            )
            .optional()?;
        let mut player: Player = serde_json::from_str(&doc.ok_or(ServerError::PlayerNotFound(id))?)?;
        player.bag = *bag;

        tx.execute(
            "UPDATE player SET doc = ?1 WHERE id = ?2",
            params![serde_json::to_string(&player)?, id as i64],
        )?;
        tx.commit()?;
        debug!("持久化玩家 {} 背包: {:?}", id, bag);
        Ok(())
    }

    fn commit_capture(
        &self,
        player_id: PlayerId,
        bag: &Bag,
        pokemon_id: PokemonId,
        location: GeoLocation,
    ) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let row: Option<(Option<String>, String)> = tx
            .query_row(
                "SELECT owner, doc FROM pokemon WHERE id = ?1",
                params![pokemon_id as i64],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (owner, doc) = row.ok_or(ServerError::PokemonNotFound(pokemon_id))?;

        if owner.is_some() {
            // 事务随tx析构回滚
            return Err(ServerError::TransientPersistence(format!(
                "宝可梦 {} 的归属前置条件失败",
                pokemon_id
            )));
        }

        let mut pokemon: Pokemon = serde_json::from_str(&doc)?;
        pokemon.owner = Some(Owner::Trainer(player_id));
        pokemon.location = Some(location);
        let owner_tag = serde_json::to_string(&pokemon.owner)?;

        // 乐观前置条件：owner仍为NULL时才会命中这一行
        let changed = tx.execute(
            "UPDATE pokemon SET owner = ?1, doc = ?2 WHERE id = ?3 AND owner IS NULL",
            params![owner_tag, serde_json::to_string(&pokemon)?, pokemon_id as i64],
        )?;
        if changed == 0 {
            return Err(ServerError::TransientPersistence(format!(
                "宝可梦 {} 的归属前置条件失败",
                pokemon_id
            )));
        }

        let doc: Option<String> = tx
            .query_row(
                "SELECT doc FROM player WHERE id = ?1",
                params![player_id as i64],
                |row| row.get(0),
            )
            .optional()?;
        let mut player: Player =
            serde_json::from_str(&doc.ok_or(ServerError::PlayerNotFound(player_id))?)?;
        player.bag = *bag;
        if !player.pokemon_ids.contains(&pokemon_id) {
            player.pokemon_ids.push(pokemon_id);
        }

        tx.execute(
            "UPDATE player SET doc = ?1 WHERE id = ?2",
            params![serde_json::to_string(&player)?, player_id as i64],
        )?;

        tx.commit()?;
        debug!("捕捉提交: 玩家 {} 获得宝可梦 {}", player_id, pokemon_id);
        Ok(())
    }
}
