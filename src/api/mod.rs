//! Catalog metadata access over the Web API.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`dto.rs`) - Exact API response shapes
//! - **Adapters** (`adapter.rs`) - Convert DTOs to domain models
//! - **Client** (`client.rs`) - HTTP client for the Web API
//!
//! This decoupling means API changes don't ripple through the codebase, and
//! the wire contract can be tested independently of the download flow.

mod adapter;
mod client;
mod domain;
mod dto;

pub use client::WebApiClient;
pub use domain::{AlbumInfo, ApiError, EpisodeInfo, PlaylistInfo, SearchResults, TrackInfo};
