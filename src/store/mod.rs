pub mod memory;

use std::sync::Arc;

use crate::config::DbPool;
use crate::modules::auth::{crud::UserCrud, interface::UserRepository};
use crate::modules::problems::{crud::ProblemCrud, interface::ProblemRepository};
use crate::modules::progress::{crud::ProgressCrud, interface::ProgressRepository};
use memory::MemoryStore;

/// The three document collections the handlers work against
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub problems: Arc<dyn ProblemRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Repositories {
    pub fn mysql(pool: DbPool) -> Self {
        Self {
            users: Arc::new(UserCrud::new(pool.clone())),
            problems: Arc::new(ProblemCrud::new(pool.clone())),
            progress: Arc::new(ProgressCrud::new(pool)),
        }
    }

    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            problems: store.clone(),
            progress: store,
        }
    }
}
