// src/collect/providers/mod.rs
//! One adapter per external provider. Each adapter owns its wire shapes
//! and normalizes them into `PriceSnapshot` or `Article`; orchestrators
//! never see provider payloads.

pub mod coincap;
pub mod coingecko;
pub mod cryptocompare;
pub mod guardian;
pub mod newsapi;
pub mod rss;
