pub mod api;
pub mod auction;
pub mod auth;
pub mod bidding;
pub mod config;
pub mod detail;
pub mod error;
pub mod feed;
pub mod profile;
pub mod search;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;
