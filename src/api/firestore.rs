use firestore::FirestoreDb;
use tracing::info;

use crate::Status;

pub struct FirestoreApi {
    db: FirestoreDb,
}

impl FirestoreApi {
    /// Connects to the Firestore database of `project_id`. Honours
    /// FIRESTORE_EMULATOR_HOST for local runs.
    pub async fn connect(project_id: &str) -> Result<Self, Status> {
        let db = FirestoreDb::new(project_id).await?;
        info!("connected to firestore project '{project_id}'");
        Ok(FirestoreApi { db })
    }

    pub fn db(&self) -> &FirestoreDb {
        &self.db
    }
}
