//! QuillySoft Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the QuillySoft
//! code generation CLI: the project configuration, the render model, and the
//! template engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          quillysoft-cli (CLI)           │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (TemplateEngine, ConfigResolver, ...)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Store, Renderer, Filesystem)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    quillysoft-adapters (Infrastructure) │
//! │ (InMemoryStore, SimpleRenderer, etc)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quillysoft_core::{
//!     application::{ConfigResolver, TemplateEngine},
//!     domain::Model,
//! };
//!
//! // 1. Resolve configuration (never fails)
//! let config = ConfigResolver::new(filesystem).load(None);
//!
//! // 2. Build a model from config plus caller data
//! let mut model = config.to_model();
//! model.merge(Model::new().with("EntityName", "Order"));
//!
//! // 3. Render
//! let engine = TemplateEngine::new(store, renderer);
//! let text = engine.render("entity", &model).unwrap();
//! ```

pub mod application;
pub mod domain;
pub mod error;
