mod collections;
mod scalar;
mod special;
mod tuple;

pub use special::Bytes;
