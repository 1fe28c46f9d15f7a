pub mod superhero;

pub use superhero::{NewSuperhero, Superhero, SuperheroInput, SuperheroPatch};
