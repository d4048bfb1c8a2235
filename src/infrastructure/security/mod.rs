mod password;

pub use password::{PasswordHasher, DEFAULT_COST};
