//! Attachment storage backends

mod local;

#[cfg(test)]
mod tests;

pub use local::LocalFileStorage;
