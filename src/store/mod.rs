//! Apiary store - core data engine
//!
//! All tables live in one in-memory [`Database`] behind a `parking_lot`
//! mutex and are persisted as a single JSONL file: one tagged row per line.
//! Every mutation takes the lock, keeps a pre-mutation copy, applies its
//! changes (entity update plus any ledger rows) and then persists; if the
//! persist fails the in-memory state is rolled back to the copy, so entity
//! state and ledger rows always commit or fail together.

mod apiaries;
mod drums;
pub mod history;
mod maintenance;
mod settings;
pub mod stats;
mod tasks;
mod users;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::types::{
    Apiary, ApiaryCounts, ApiaryDetail, BoxStats, ChangeRecord, CreateApiary, CreateDrum,
    CreateTask, Drum, DrumSummary, Settings, Task, UpdateApiary, UpdateDrum, UpdateSettings,
    UpdateTask, User,
};
use crate::utils::atomic_write;

pub use maintenance::DAILY_FOOD_CONSUMPTION;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// The addressed record does not exist
    NotFound(&'static str),
    /// The addressed record belongs to another user
    Forbidden(&'static str),
    /// A uniqueness rule was violated (e.g. duplicate email)
    Conflict(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
            StoreError::NotFound(what) => write!(f, "{} not found", what),
            StoreError::Forbidden(what) => write!(f, "this {} does not belong to you", what),
            StoreError::Conflict(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// One persisted line of the data file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Row {
    User(User),
    Apiary(Apiary),
    Settings(Settings),
    Task(Task),
    Drum(Drum),
    History(ChangeRecord),
}

/// In-memory tables
#[derive(Debug, Clone, Default)]
pub(crate) struct Database {
    pub users: Vec<User>,
    pub apiaries: Vec<Apiary>,
    pub settings: Vec<Settings>,
    pub tasks: Vec<Task>,
    pub drums: Vec<Drum>,
    pub history: Vec<ChangeRecord>,
}

impl Database {
    pub fn next_user_id(&self) -> u64 {
        self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1
    }

    pub fn next_apiary_id(&self) -> u64 {
        self.apiaries.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    pub fn next_settings_id(&self) -> u64 {
        self.settings.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    pub fn next_task_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    pub fn next_drum_id(&self) -> u64 {
        self.drums.iter().map(|d| d.id).max().unwrap_or(0) + 1
    }

    pub fn next_history_id(&self) -> u64 {
        self.history.iter().map(|h| h.id).max().unwrap_or(0) + 1
    }
}

/// The apiary store with its backing data file
pub struct ApiaryStore {
    data_file_path: PathBuf,
    pub(crate) db: Mutex<Database>,
}

impl ApiaryStore {
    /// Open a store backed by the default data file
    ///
    /// The path comes from `APIARIUM_DATA_FILE` (absolute or relative to the
    /// working directory), falling back to `apiarium.jsonl`.
    pub fn open_default() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let path = match env::var("APIARIUM_DATA_FILE") {
            Ok(p) if Path::new(&p).is_absolute() => PathBuf::from(p),
            Ok(p) => current_dir.join(p),
            Err(_) => current_dir.join("apiarium.jsonl"),
        };
        Self::open(path)
    }

    /// Open a store backed by a specific data file
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        let data_file_path = path.into();
        let db = match Self::load_from_file(&data_file_path) {
            Ok(db) => db,
            Err(e) => {
                eprintln!(
                    "[Store] Failed to load {}: {}. Starting empty.",
                    data_file_path.display(),
                    e
                );
                Database::default()
            }
        };

        Self {
            data_file_path,
            db: Mutex::new(db),
        }
    }

    /// Path of the backing data file
    pub fn file_path(&self) -> &Path {
        &self.data_file_path
    }

    fn load_from_file(path: &Path) -> StoreResult<Database> {
        if !path.exists() {
            return Ok(Database::default());
        }

        let content = fs::read_to_string(path)?;
        let mut db = Database::default();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<Row>(line) {
                Ok(Row::User(u)) => db.users.push(u),
                Ok(Row::Apiary(a)) => db.apiaries.push(a),
                Ok(Row::Settings(s)) => db.settings.push(s),
                Ok(Row::Task(t)) => db.tasks.push(t),
                Ok(Row::Drum(d)) => db.drums.push(d),
                Ok(Row::History(h)) => db.history.push(h),
                Err(e) => {
                    eprintln!("[Store] Skipping bad row at line {}: {}", line_num + 1, e);
                }
            }
        }

        Ok(db)
    }

    /// Serialize and atomically persist the whole database
    fn persist(&self, db: &Database) -> StoreResult<()> {
        let mut content = String::new();

        for user in &db.users {
            content.push_str(&serde_json::to_string(&Row::User(user.clone()))?);
            content.push('\n');
        }
        for apiary in &db.apiaries {
            content.push_str(&serde_json::to_string(&Row::Apiary(apiary.clone()))?);
            content.push('\n');
        }
        for settings in &db.settings {
            content.push_str(&serde_json::to_string(&Row::Settings(settings.clone()))?);
            content.push('\n');
        }
        for task in &db.tasks {
            content.push_str(&serde_json::to_string(&Row::Task(task.clone()))?);
            content.push('\n');
        }
        for drum in &db.drums {
            content.push_str(&serde_json::to_string(&Row::Drum(drum.clone()))?);
            content.push('\n');
        }
        for record in &db.history {
            content.push_str(&serde_json::to_string(&Row::History(record.clone()))?);
            content.push('\n');
        }

        atomic_write(&self.data_file_path, &content)?;
        Ok(())
    }

    /// Persist a mutated database, rolling back to `backup` on failure
    ///
    /// Callers mutate the locked database in place, then hand over the copy
    /// they took before mutating. A failed persist restores that copy, so a
    /// request that errors out leaves no trace - neither entity changes nor
    /// ledger rows.
    pub(crate) fn commit(&self, db: &mut Database, backup: Database) -> StoreResult<()> {
        if let Err(e) = self.persist(db) {
            *db = backup;
            return Err(e);
        }
        Ok(())
    }
}

// Public operations, delegated to the submodules
impl ApiaryStore {
    // Users (users.rs)
    pub fn register_user(
        &self,
        name: String,
        surname: String,
        email: String,
        password_hash: String,
    ) -> StoreResult<User> {
        users::register_user(self, name, surname, email, password_hash)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        users::find_by_email(self, email)
    }

    pub fn get_user(&self, user_id: u64) -> Option<User> {
        users::get_user(self, user_id)
    }

    pub fn delete_user(&self, user_id: u64) -> StoreResult<()> {
        users::delete_user(self, user_id)
    }

    // Apiaries (apiaries.rs)
    pub fn create_apiary(&self, user_id: u64, data: CreateApiary) -> StoreResult<ApiaryDetail> {
        apiaries::create_apiary(self, user_id, data)
    }

    pub fn list_apiaries(&self, user_id: u64) -> Vec<ApiaryDetail> {
        apiaries::list_by_user(self, user_id)
    }

    pub fn get_apiary(&self, user_id: u64, apiary_id: u64) -> StoreResult<ApiaryDetail> {
        apiaries::get_apiary(self, user_id, apiary_id)
    }

    pub fn update_apiary(
        &self,
        user_id: u64,
        apiary_id: u64,
        changes: UpdateApiary,
    ) -> StoreResult<Apiary> {
        apiaries::update_apiary(self, user_id, apiary_id, changes)
    }

    pub fn delete_apiary(&self, user_id: u64, apiary_id: u64) -> StoreResult<()> {
        apiaries::delete_apiary(self, user_id, apiary_id)
    }

    // Settings (settings.rs)
    pub fn update_settings(
        &self,
        user_id: u64,
        apiary_id: u64,
        changes: UpdateSettings,
    ) -> StoreResult<Settings> {
        settings::update_settings(self, user_id, apiary_id, changes)
    }

    pub fn set_harvesting_for_all(&self, user_id: u64, harvesting: bool) -> StoreResult<usize> {
        settings::set_harvesting_for_all(self, user_id, harvesting)
    }

    // Change ledger and day queries (history.rs)
    pub fn history_for_apiary(&self, user_id: u64, apiary_id: u64) -> StoreResult<Vec<ChangeRecord>> {
        history::history_for_apiary(self, user_id, apiary_id)
    }

    pub fn harvested_today_box_stats(&self, user_id: u64) -> BoxStats {
        history::harvested_today_box_stats(self, user_id)
    }

    pub fn harvested_today_counts(&self, user_id: u64) -> ApiaryCounts {
        history::harvested_today_counts(self, user_id)
    }

    // Cross-sectional aggregates (stats.rs)
    pub fn apiary_counts(&self, user_id: u64) -> ApiaryCounts {
        stats::apiary_counts(self, user_id)
    }

    pub fn box_stats(&self, user_id: u64) -> BoxStats {
        stats::box_stats(self, user_id)
    }

    pub fn count_harvesting(&self, user_id: u64) -> usize {
        stats::count_harvesting(self, user_id)
    }

    pub fn harvested_counts(&self, user_id: u64) -> ApiaryCounts {
        stats::harvested_counts(self, user_id)
    }

    pub fn harvested_totals_for_apiary(
        &self,
        user_id: u64,
        apiary_id: u64,
    ) -> StoreResult<BoxStats> {
        stats::harvested_totals_for_apiary(self, user_id, apiary_id)
    }

    // Tasks (tasks.rs)
    pub fn list_tasks(&self, user_id: u64) -> Vec<Task> {
        tasks::list_by_user(self, user_id)
    }

    pub fn create_task(&self, user_id: u64, data: CreateTask) -> StoreResult<Task> {
        tasks::create_task(self, user_id, data)
    }

    pub fn update_task(&self, user_id: u64, task_id: u64, changes: UpdateTask) -> StoreResult<Task> {
        tasks::update_task(self, user_id, task_id, changes)
    }

    pub fn delete_task(&self, user_id: u64, task_id: u64) -> StoreResult<()> {
        tasks::delete_task(self, user_id, task_id)
    }

    // Drums (drums.rs)
    pub fn list_drums(&self, user_id: u64) -> Vec<Drum> {
        drums::list_by_user(self, user_id)
    }

    pub fn create_drum(&self, user_id: u64, data: CreateDrum) -> StoreResult<Drum> {
        drums::create_drum(self, user_id, data)
    }

    pub fn update_drum(&self, user_id: u64, drum_id: u64, changes: UpdateDrum) -> StoreResult<Drum> {
        drums::update_drum(self, user_id, drum_id, changes)
    }

    pub fn delete_drum(&self, user_id: u64, drum_id: u64) -> StoreResult<()> {
        drums::delete_drum(self, user_id, drum_id)
    }

    pub fn drum_summary(&self, user_id: u64) -> DrumSummary {
        drums::summary(self, user_id)
    }

    // Daily maintenance (maintenance.rs)
    pub fn subtract_one_day_treatment(
        &self,
        field: crate::history::TrackedField,
    ) -> StoreResult<usize> {
        maintenance::subtract_one_day_treatment(self, field)
    }

    pub fn subtract_food(&self) -> StoreResult<usize> {
        maintenance::subtract_food(self)
    }

    pub fn run_daily_maintenance(&self) -> StoreResult<()> {
        maintenance::run_daily(self)
    }
}
