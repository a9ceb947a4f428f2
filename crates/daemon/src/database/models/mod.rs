mod entity;

pub use entity::{
    Entity, EntityContent, EntityError, DEFAULT_CONTENT_TYPE, MAX_CONTENT_TYPE_LEN,
    MAX_CREATE_ATTEMPTS,
};
