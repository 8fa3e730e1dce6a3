//! Core library for crowdfunding campaign extraction.
//!
//! This crate provides:
//! - A node selection layer over parsed HTML (tag + attribute substring)
//! - Rule-based extractors for every campaign field and reward tier
//! - Project and reward tier records, assembled through builders
//! - A batch driver that fetches and extracts pages in input order

pub mod batch;
pub mod campaign;
pub mod error;
pub mod html;
pub mod models;

pub use batch::{BatchPolicy, BatchReport, BatchRunner, PageFetcher, PageOutcome, parse_url_list};
pub use campaign::{CampaignParser, ExtractionResult, PageParser};
pub use error::{ExtractionError, ParseError, PledgeError, Result, RetrievalError};
pub use html::{Document, Node, NodeSelector};
pub use models::campaign::{BackingLevel, Project};
pub use models::config::{OutputFormat, PledgeConfig};
