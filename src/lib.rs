pub mod bank;
pub mod card;
pub mod game_logic;
pub mod gem;
pub mod gems;
pub mod models;
pub mod nobles;
pub mod player;
pub mod registry;
pub mod room;

pub use crate::bank::*;
pub use crate::card::*;
pub use crate::game_logic::*;
pub use crate::gem::*;
pub use crate::gems::*;
pub use crate::models::*;
pub use crate::nobles::*;
pub use crate::player::*;
pub use crate::registry::*;
pub use crate::room::*;

pub trait JSONable: serde::Serialize + serde::de::DeserializeOwned {
    fn from_json(json: &str) -> Self {
        serde_json::from_str(json).expect("Should be able to deserialize")
    }
    fn to_json(&self) -> String {
        serde_json::to_string(self).expect("Should be able to serialize")
    }
}
