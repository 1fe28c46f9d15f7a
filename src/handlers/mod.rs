// Public handlers (root, health) need no token; everything under
// superheroes sits behind the require_token route layer.
pub mod health;
pub mod superheroes;

pub use health::{health, root};
