pub mod client;

pub use client::MangaDexClient;
