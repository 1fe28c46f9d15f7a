pub mod payload;

pub use payload::{CreatePayload, UpdatePayload};
