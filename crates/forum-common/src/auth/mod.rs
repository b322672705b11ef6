//! Authentication utilities

mod password;

pub use password::{
    hash_password, validate_password_strength, verify_against_dummy, verify_password,
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
