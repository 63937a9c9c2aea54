//! Cutline Media - export pipeline
//!
//! Rendering is simulated: a job walks its progress in fixed steps on a
//! worker thread and reports over a channel. No artifact is written yet.

pub mod export;

pub use export::{
    start_export, ExportCancel, ExportError, ExportEvent, ExportFormat, ExportJob, ExportRequest,
};
