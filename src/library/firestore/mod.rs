mod games;

pub use games::FirestoreGameStore;
