//! Data model shared by every pipeline stage.

pub mod errors;
pub mod graph;
pub mod score;
pub mod types;

pub use errors::{Error, Result};
pub use graph::{
    ArchitectureGraph, ComponentEdge, ComponentNode, ComponentType, EdgeRelation, GraphInsights,
    GraphStats,
};
pub use score::{CategoryBreakdown, QualityCategory, QualityReport, QualityScore, SubFactor};
pub use types::{
    extension_of, file_name_of, ActivityMetadata, CodeComponent, CommitInfo, ComponentKind,
    DependencyInfo, EntryKind, FileExtraction, ImportInfo, ImportKind, PackageJson,
    PullRequestInfo, RepositorySnapshot, SourceFile,
};
