pub mod anime;
pub mod bookkeeping;
pub mod galgame;
pub mod shared;
pub mod subject;

pub use shared::{CharacterProfile, CodeName, Provenance, StaffProfile};
