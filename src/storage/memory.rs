// 内存文档存储
// 开发心理：播种和测试需要一个零依赖的存储后端，语义与正式后端完全一致
// 设计原则：捕捉提交在单个写锁内完成，天然原子

use std::collections::HashMap;
use std::sync::RwLock;

use crate::core::error::{Result, ServerError};
use crate::player::{Bag, Player, PlayerId};
use crate::pokemon::{Owner, Pokemon, PokemonId};
use crate::storage::Storage;
use crate::world::location::GeoLocation;

#[derive(Debug, Default)]
struct Inner {
    players: HashMap<PlayerId, Player>,
    pokemons: HashMap<PokemonId, Pokemon>,
    next_player_id: PlayerId,
    next_pokemon_id: PokemonId,
}

// 内存存储后端
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| ServerError::Database("存储读锁中毒".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| ServerError::Database("存储写锁中毒".to_string()))
    }
}

impl Storage for MemoryStore {
    fn load_player(&self, id: PlayerId) -> Result<Player> {
        self.read()?
            .players
            .get(&id)
            .cloned()
            .ok_or(ServerError::PlayerNotFound(id))
    }

    fn load_pokemon(&self, id: PokemonId) -> Result<Pokemon> {
        self.read()?
            .pokemons
            .get(&id)
            .cloned()
            .ok_or(ServerError::PokemonNotFound(id))
    }

    fn insert_player(&self, mut player: Player) -> Result<PlayerId> {
        let mut inner = self.write()?;
        inner.next_player_id += 1;
        let id = inner.next_player_id;
        player.id = id;
        inner.players.insert(id, player);
        Ok(id)
    }

    fn insert_pokemon(&self, mut pokemon: Pokemon) -> Result<PokemonId> {
        let mut inner = self.write()?;
        inner.next_pokemon_id += 1;
        let id = inner.next_pokemon_id;
        pokemon.id = id;
        inner.pokemons.insert(id, pokemon);
        Ok(id)
    }

    fn save_player_bag(&self, id: PlayerId, bag: &Bag) -> Result<()> {
        let mut inner = self.write()?;
        let player = inner
            .players
            .get_mut(&id)
            .ok_or(ServerError::PlayerNotFound(id))?;
        player.bag = *bag;
        Ok(())
    }

    fn commit_capture(
        &self,
        player_id: PlayerId,
        bag: &Bag,
        pokemon_id: PokemonId,
        location: GeoLocation,
    ) -> Result<()> {
        // 单个写锁覆盖全部三项变更，要么全部落地要么全部不落地
        let mut inner = self.write()?;

        if !inner.players.contains_key(&player_id) {
            return Err(ServerError::PlayerNotFound(player_id));
        }

        let pokemon = inner
            .pokemons
            .get_mut(&pokemon_id)
            .ok_or(ServerError::PokemonNotFound(pokemon_id))?;

        // 乐观前置条件：归属必须仍为空
        if pokemon.owner.is_some() {
            return Err(ServerError::TransientPersistence(format!(
                "宝可梦 {} 的归属前置条件失败",
                pokemon_id
            )));
        }

        pokemon.owner = Some(Owner::Trainer(player_id));
        pokemon.location = Some(location);

        let player = inner
            .players
            .get_mut(&player_id)
            .ok_or(ServerError::PlayerNotFound(player_id))?;
        player.bag = *bag;
        if !player.pokemon_ids.contains(&pokemon_id) {
            player.pokemon_ids.push(pokemon_id);
        }

        Ok(())
    }
}
