//! Data types for the Apiarium backend
//!
//! This module contains all the core data structures used throughout the
//! application. Wire names are camelCase via serde renames.

mod apiary;
mod drum;
mod history;
mod settings;
mod stats;
mod task;
mod user;

pub use apiary::{default_image, Apiary, ApiaryDetail, CreateApiary, UpdateApiary};
pub use drum::{CreateDrum, Drum, DrumSummary, UpdateDrum};
pub use history::ChangeRecord;
pub use settings::{Settings, UpdateSettings};
pub use stats::{ApiaryCounts, BoxStats};
pub use task::{CreateTask, Task, UpdateTask};
pub use user::{CreateUser, LoginRequest, Role, User, UserPublic};
