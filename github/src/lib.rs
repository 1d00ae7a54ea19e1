//! Client for Github's v4 GraphQL API
//! https://docs.github.com/en/graphql

pub mod client;

pub use client::Client;
