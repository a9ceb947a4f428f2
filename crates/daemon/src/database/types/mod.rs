mod dsecret;

pub use dsecret::DSecret;
