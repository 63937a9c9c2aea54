//! Cutline Assets - generated media for the timeline
//!
//! - `AssetGenerator`: the prompt-to-image boundary
//! - `CandidatePool` / `AssetStudio`: generated URLs waiting to be promoted,
//!   produced on background tasks
//! - Script drafts parsed from a JSON scene list

pub mod error;
pub mod generator;
pub mod pool;
pub mod script;

pub use error::{AssetError, AssetResult};
pub use generator::{
    image_data_url, AssetGenerator, InlineData, ResponsePart, StockGenerator, STOCK_IMAGES,
};
pub use pool::{AssetStudio, CandidatePool};
pub use script::{draft_script, parse_script_scenes, script_prompt, SceneTime, ScriptScene};
