// Rust guideline compliant 2026-10-14

//! Reqdesk Core Library
//!
//! This crate provides the foundational components for the Reqdesk service request store:
//! - Data models (Record, RecordUpdate, Status, Priority)
//! - Ordered indices (plain, AVL and red-black trees, the canonical submission index)
//! - Priority heap and relationship graph (BFS, DFS, minimum spanning tree)
//! - Snapshot storage (JSONL, in-memory)
//! - Tracking code generation and legacy issue migration
//! - The `Store` that keeps all of the above in step
//! - Error types and result handling

pub mod audit;
pub mod config;
pub mod error;
pub mod graph;
pub mod heap;
pub mod index;
pub mod migrate;
pub mod models;
pub mod storage;
pub mod store;
pub mod tracking;

pub use audit::{IndexAudit, TreeReport};
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use graph::{RelationshipGraph, WeightedEdge};
pub use heap::{HeapOrder, PriorityHeap};
pub use index::{AvlTree, OrderedIndex, PlainTree, RedBlackTree, SubmissionIndex};
pub use models::{LegacyIssue, Priority, Record, RecordId, RecordUpdate, Status, SubmissionKey};
pub use storage::{JsonlStorage, MemoryStorage, SnapshotStore};
pub use store::Store;
pub use tracking::{code_key, TrackingCodeGenerator};
