pub mod rick_and_morty;

pub use rick_and_morty::RickAndMortyClient;
